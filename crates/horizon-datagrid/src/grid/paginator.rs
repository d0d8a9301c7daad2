//! Fixed-size page slicing with bounds clamping.

use serde::{Deserialize, Serialize};

use horizon_datagrid_core::logging::targets;

use super::record::Record;
use crate::error::{GridError, Result};

/// Default page size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// The requested page and page size. Both are at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageState")]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageState {
    current_page: usize,
    items_per_page: usize,
}

impl TryFrom<RawPageState> for PageState {
    type Error = GridError;

    fn try_from(raw: RawPageState) -> Result<Self> {
        PageState::new(raw.current_page, raw.items_per_page)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageState {
    /// Creates a page state, rejecting zero values.
    pub fn new(current_page: usize, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(GridError::InvalidPageSize);
        }
        if current_page == 0 {
            return Err(GridError::InvalidPage { page: current_page });
        }
        Ok(Self {
            current_page,
            items_per_page,
        })
    }

    /// Page one with the given page size.
    pub fn first(items_per_page: usize) -> Result<Self> {
        Self::new(1, items_per_page)
    }

    /// The requested 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Moves to `page`.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(GridError::InvalidPage { page });
        }
        self.current_page = page;
        Ok(())
    }

    /// Changes the page size and returns to page one.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        if items_per_page == 0 {
            return Err(GridError::InvalidPageSize);
        }
        self.items_per_page = items_per_page;
        self.current_page = 1;
        Ok(())
    }

    /// Lowers the current page to `total_pages` if it is past the end.
    pub(crate) fn clamp_to(&mut self, total_pages: usize) {
        self.current_page = self.current_page.min(total_pages.max(1));
    }

    /// Advances one page, stopping at `total_pages`. Returns `true` if moved.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page, stopping at page one. Returns `true` if moved.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }
}

/// Number of pages for `count` items; at least one, even when empty.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

/// One page of the reduced sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    /// Records on the effective page.
    pub items: Vec<&'a Record>,
    /// Total pages, at least one.
    pub total_pages: usize,
    /// The page actually sliced, `min(current_page, total_pages)`.
    pub effective_page: usize,
    /// `true` if the requested page was past the end and has been clamped.
    pub bounds_clamped: bool,
    /// Length of the full reduced sequence.
    pub total_items: usize,
    /// Page size used for slicing.
    pub items_per_page: usize,
}

impl Page<'_> {
    /// The 1-based `(first, last, total)` shown in "showing X to Y of Z"
    /// footers, or `None` if the page is empty.
    pub fn range(&self) -> Option<(usize, usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.effective_page - 1) * self.items_per_page + 1;
        Some((first, first + self.items.len() - 1, self.total_items))
    }

    /// Whether there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.effective_page > 1
    }

    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.effective_page < self.total_pages
    }
}

/// Slices records into pages.
///
/// The paginator never changes the caller's [`PageState`]; it reports a
/// clamped page through [`Page::bounds_clamped`] and [`Page::effective_page`]
/// so the caller can persist it.
pub struct Paginator;

impl Paginator {
    /// Returns the page selected by `state`.
    pub fn apply<'a>(records: &[&'a Record], state: &PageState) -> Page<'a> {
        let total_items = records.len();
        let per_page = state.items_per_page;
        let total_pages = total_pages(total_items, per_page);
        let effective_page = state.current_page.min(total_pages);
        let bounds_clamped = effective_page != state.current_page;

        if bounds_clamped {
            tracing::debug!(
                target: targets::PAGINATOR,
                requested = state.current_page,
                effective = effective_page,
                total_pages,
                "page out of range, clamped"
            );
        }

        let start = ((effective_page - 1) * per_page).min(total_items);
        let end = (effective_page * per_page).min(total_items);

        Page {
            items: records[start..end].to_vec(),
            total_pages,
            effective_page,
            bounds_clamped,
            total_items,
            items_per_page: per_page,
        }
    }

    /// A single page holding everything, used when pagination is disabled.
    pub fn unpaginated<'a>(records: &[&'a Record]) -> Page<'a> {
        Page {
            items: records.to_vec(),
            total_pages: 1,
            effective_page: 1,
            bounds_clamped: false,
            total_items: records.len(),
            items_per_page: records.len().max(1),
        }
    }
}

/// An entry in a page-number bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A clickable page number.
    Page(usize),
    /// A gap between page numbers.
    Ellipsis,
}

/// Builds a page-number bar.
///
/// Always shows the first and last page plus the pages next to `current`;
/// a single ellipsis stands in for each gap that starts two pages away.
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    for page in 1..=total_pages {
        if page == 1 || page == total_pages || page.abs_diff(current) <= 1 {
            links.push(PageLink::Page(page));
        } else if page.abs_diff(current) == 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}
