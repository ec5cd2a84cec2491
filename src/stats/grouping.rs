use std::collections::HashMap;

use crate::data::model::{CategoricalField, NormalizedRecord};

/// Partition `records` by the label of `field`, keeping labels in the order
/// they are first seen. `item` maps each record (with its index) to the
/// value stored in its group.
pub(crate) fn first_seen_groups<T>(
    records: &[NormalizedRecord],
    field: CategoricalField,
    mut item: impl FnMut(usize, &NormalizedRecord) -> T,
) -> Vec<(&'static str, Vec<T>)> {
    let mut slots: HashMap<&'static str, usize> = HashMap::new();
    let mut groups: Vec<(&'static str, Vec<T>)> = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let key = field.value(record);
        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(item(i, record));
    }

    groups
}
