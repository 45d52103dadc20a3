use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::model::{Field, Record};

// ---------------------------------------------------------------------------
// Filter predicate: at most one selected value per field
// ---------------------------------------------------------------------------

/// Per-field equality selections.
///
/// A field that is absent, or selected as the empty string, means
/// "no filter" (match everything) for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    selections: BTreeMap<Field, String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style selection.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.select(field, value);
        self
    }

    /// Select `value` for `field`. An empty value clears the selection.
    pub fn select(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.selections.remove(&field);
        } else {
            self.selections.insert(field, value);
        }
    }

    /// Current selection for `field`, `None` meaning match-all.
    pub fn selection(&self, field: Field) -> Option<&str> {
        self.selections.get(&field).map(String::as_str)
    }

    /// Whether `record` satisfies every active selection.
    pub fn matches(&self, record: &Record) -> bool {
        self.selections
            .iter()
            .all(|(field, value)| record.field(*field) == value)
    }
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOption {
    /// Leading sentinel that clears the selection.
    MatchAll,
    Value(String),
}

impl FilterOption {
    /// Value to hand to [`FilterSpec::select`].
    pub fn as_selection(&self) -> &str {
        match self {
            FilterOption::MatchAll => "",
            FilterOption::Value(v) => v,
        }
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOption::MatchAll => write!(f, "All"),
            FilterOption::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Distinct values of `field` in first-occurrence order.
pub fn distinct_values<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    field: Field,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = record.field(field);
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Dropdown entries for `field`, optionally led by [`FilterOption::MatchAll`].
pub fn filter_options(records: &[Record], field: Field, with_match_all: bool) -> Vec<FilterOption> {
    let sentinel = with_match_all.then_some(FilterOption::MatchAll);
    sentinel
        .into_iter()
        .chain(
            distinct_values(records, field)
                .into_iter()
                .map(FilterOption::Value),
        )
        .collect()
}

// ---------------------------------------------------------------------------
// Applying the filter
// ---------------------------------------------------------------------------

/// Return indices of records that pass all active selections, in order.
pub fn filtered_indices(records: &[Record], spec: &FilterSpec) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| spec.matches(record))
        .map(|(i, _)| i)
        .collect()
}

/// Records that pass all active selections, in order.
///
/// Selecting a value that never occurs yields an empty result.
pub fn apply<'a>(records: &'a [Record], spec: &FilterSpec) -> Vec<&'a Record> {
    records.iter().filter(|r| spec.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AgeGroup;

    fn record(gender: &str, issue: &str, age: AgeGroup, marstat: &str, pct: f64) -> Record {
        Record {
            gender: gender.into(),
            education_level_raw: "More than 12 year".into(),
            education_level: "College or higher".into(),
            mental_health_issue: issue.into(),
            marital_status: marstat.into(),
            age_group: age,
            percentage: pct,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Male", "Anxiety", AgeGroup::Twenties, "Single", 40.0),
            record("Female", "Anxiety", AgeGroup::Twenties, "Single", 60.0),
            record("Female", "Depression", AgeGroup::Thirties, "Married", 25.0),
            record("Male", "Depression", AgeGroup::Forties, "Married", 10.0),
        ]
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = sample();
        let out = apply(&records, &FilterSpec::new());
        assert_eq!(out.len(), records.len());
        assert!(out.iter().zip(&records).all(|(a, b)| *a == b));
    }

    #[test]
    fn single_selection_keeps_matching_rows_in_order() {
        let records = sample();
        let spec = FilterSpec::new().with(Field::Gender, "Male");
        let out = apply(&records, &spec);
        assert_eq!(out, vec![&records[0], &records[3]]);
        assert_eq!(filtered_indices(&records, &spec), vec![0, 3]);
    }

    #[test]
    fn filter_is_exact() {
        let records = sample();
        let spec = FilterSpec::new()
            .with(Field::Gender, "Female")
            .with(Field::MentalHealthIssue, "Anxiety");
        let kept = filtered_indices(&records, &spec);
        for (i, r) in records.iter().enumerate() {
            let satisfies = r.gender == "Female" && r.mental_health_issue == "Anxiety";
            assert_eq!(kept.contains(&i), satisfies, "record {i}");
        }
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let records = sample();
        let spec = FilterSpec::new().with(Field::Gender, "male");
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn unknown_value_yields_empty() {
        let records = sample();
        let spec = FilterSpec::new().with(Field::Gender, "Unknown");
        assert!(apply(&records, &spec).is_empty());
        assert!(apply(&[], &spec).is_empty());
    }

    #[test]
    fn empty_selection_clears_the_field() {
        let mut spec = FilterSpec::new().with(Field::Gender, "Male");
        spec.select(Field::Gender, "");
        assert_eq!(spec.selection(Field::Gender), None);
        assert_eq!(spec, FilterSpec::new());
    }

    #[test]
    fn apply_is_idempotent() {
        let records = sample();
        let spec = FilterSpec::new().with(Field::MaritalStatus, "Married");
        assert_eq!(apply(&records, &spec), apply(&records, &spec));
    }

    #[test]
    fn distinct_values_keep_first_occurrence_order() {
        let records = sample();
        assert_eq!(distinct_values(&records, Field::Gender), vec!["Male", "Female"]);
        assert_eq!(
            distinct_values(&records, Field::AgeGroup),
            vec!["20s", "30s", "40s"]
        );
    }

    #[test]
    fn options_may_lead_with_match_all() {
        let records = sample();
        let opts = filter_options(&records, Field::MentalHealthIssue, true);
        assert_eq!(
            opts,
            vec![
                FilterOption::MatchAll,
                FilterOption::Value("Anxiety".into()),
                FilterOption::Value("Depression".into()),
            ]
        );
        assert_eq!(opts[0].as_selection(), "");
        assert_eq!(filter_options(&records, Field::MentalHealthIssue, false).len(), 2);
    }
}
