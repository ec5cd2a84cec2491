use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoricalField, SalaryDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which category labels are selected per field
// ---------------------------------------------------------------------------

/// Per-field selection state: maps categorical field → set of selected labels.
/// If a field is absent it means "no filter" (show all).
pub type FilterState = BTreeMap<CategoricalField, BTreeSet<&'static str>>;

/// Initialise a [`FilterState`] with all observed labels selected.
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    dataset
        .category_values
        .iter()
        .map(|(field, labels)| (*field, labels.clone()))
        .collect()
}

/// Return indices of records that pass all active filters.
///
/// A record passes a field filter when:
/// * The field is not present in `filters` → passes (no constraint)
/// * The selected set for that field is empty → nothing selected → fails
/// * The record's label for that field is in the selected set → passes
pub fn filtered_indices(dataset: &SalaryDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            filters
                .iter()
                .all(|(field, selected)| selected.contains(field.value(record)))
        })
        .map(|(i, _)| i)
        .collect()
}
