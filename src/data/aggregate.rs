use std::collections::HashMap;

use super::model::{Field, NumericField, Record};

/// Mean of a numeric field over one group of records.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    pub group_key: String,
    pub mean_value: f64,
    /// Records that contributed to the mean (always > 0).
    pub count: usize,
}

/// Partition `records` by `group_field` and average `value_field` per group.
///
/// Groups come out in first-occurrence order. Only groups present in the
/// input are emitted.
pub fn group_mean<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    group_field: Field,
    value_field: NumericField,
) -> Vec<GroupAggregate> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    // (key, sum, count) in first-occurrence order
    let mut groups: Vec<(&'a str, f64, usize)> = Vec::new();

    for record in records {
        let key = record.field(group_field);
        let value = record.numeric(value_field);
        match slots.get(key) {
            Some(&slot) => {
                let (_, sum, count) = &mut groups[slot];
                *sum += value;
                *count += 1;
            }
            None => {
                slots.insert(key, groups.len());
                groups.push((key, value, 1));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, sum, count)| GroupAggregate {
            group_key: key.to_string(),
            mean_value: sum / count as f64,
            count,
        })
        .collect()
}

/// Largest mean in `aggregates`, or 0 when there are none.
pub fn max_mean(aggregates: &[GroupAggregate]) -> f64 {
    aggregates
        .iter()
        .map(|g| g.mean_value)
        .fold(0.0, f64::max)
}
