//! # Search Filter
//!
//! The visible list is always derived from `items` and the search text.
//! It is never stored, so there is no cached copy that can fall out of date.

use crate::core::record::RecordView;

/// A row of the filtered list: the record plus its index in `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub item_index: usize,
    pub record: &'a RecordView,
}

/// Case-insensitive substring match on the display value.
fn matches(record: &RecordView, search_lower: &str) -> bool {
    record.display.to_lowercase().contains(search_lower)
}

/// Returns every record whose display value contains `search`, ignoring case.
/// An empty search returns all records in their original order.
pub fn filter_records<'a>(items: &'a [RecordView], search: &str) -> Vec<VisibleRow<'a>> {
    let search_lower = search.to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, record)| search_lower.is_empty() || matches(record, &search_lower))
        .map(|(item_index, record)| VisibleRow { item_index, record })
        .collect()
}
