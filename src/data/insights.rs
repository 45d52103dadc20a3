use super::aggregate::{group_mean, GroupAggregate};
use super::model::{Field, NumericField, Record};

/// Conditions compared across genders.
pub const COMMON_CONDITIONS: [&str; 3] = [
    "Depressive disorders",
    "Anxiety disorders",
    "Bipolar disorders",
];

/// Dataset-wide highlights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    /// Record with the highest non-zero rate.
    pub highest: Option<Record>,
    /// Record with the lowest non-zero rate. Zero rates are blanks, not lows.
    pub lowest_nonzero: Option<Record>,
    /// Mean rate per gender for each of [`COMMON_CONDITIONS`].
    pub gender_differences: Vec<(String, Vec<GroupAggregate>)>,
}

/// Scan `records` once for extremes, then compare genders per condition.
/// Ties keep the earliest record.
pub fn analyze(records: &[Record]) -> Insights {
    let mut highest: Option<&Record> = None;
    let mut lowest: Option<&Record> = None;

    for r in records.iter().filter(|r| r.percentage > 0.0) {
        if highest.map_or(true, |h| r.percentage > h.percentage) {
            highest = Some(r);
        }
        if lowest.map_or(true, |l| r.percentage < l.percentage) {
            lowest = Some(r);
        }
    }

    let gender_differences = COMMON_CONDITIONS
        .iter()
        .map(|condition| {
            let matching = records
                .iter()
                .filter(|r| r.mental_health_issue == *condition);
            (
                condition.to_string(),
                group_mean(matching, Field::Gender, NumericField::Percentage),
            )
        })
        .collect();

    Insights {
        highest: highest.cloned(),
        lowest_nonzero: lowest.cloned(),
        gender_differences,
    }
}
