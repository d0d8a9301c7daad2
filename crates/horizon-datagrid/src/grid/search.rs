//! Free-text search across searchable columns.

use super::column::ColumnDescriptor;
use super::record::Record;
use super::value::search_text;

/// Substring search over accessor-derived values.
///
/// A record passes when any column with an accessor yields a value whose
/// lowercase text contains the lowercase term. Columns without an accessor
/// never take part.
pub struct SearchFilter;

impl SearchFilter {
    /// Returns the records matching `term`, in input order.
    ///
    /// An empty or whitespace-only term keeps every record.
    pub fn apply<'a>(
        records: &[&'a Record],
        term: &str,
        columns: &[ColumnDescriptor],
    ) -> Vec<&'a Record> {
        if is_blank(term) {
            return records.to_vec();
        }

        let needle = term.to_lowercase();
        records
            .iter()
            .copied()
            .filter(|record| matches_lowercase(record, &needle, columns))
            .collect()
    }

    /// Returns `true` if `record` matches `term`.
    pub fn matches(record: &Record, term: &str, columns: &[ColumnDescriptor]) -> bool {
        is_blank(term) || matches_lowercase(record, &term.to_lowercase(), columns)
    }
}

fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

fn matches_lowercase(record: &Record, needle: &str, columns: &[ColumnDescriptor]) -> bool {
    columns.iter().any(|column| {
        column
            .value(record)
            .and_then(search_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}
