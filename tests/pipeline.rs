use std::fs;

use clap::Parser;
use tempfile::tempdir;

use heartgrid::config::Cli;
use heartgrid::data::aggregate::group_mean;
use heartgrid::data::filter::{apply, distinct_values, FilterSpec};
use heartgrid::data::loader::load_csv_reader;
use heartgrid::data::model::{Field, NumericField};
use heartgrid::state::AppState;

const SURVEY: &str = "\
GENDER_LABEL,EDUC_LEVEL,MH1_LABEL,MARSTAT_LABEL,AGE_GROUP,percentage
Male,0 to 8 year,Anxiety disorders,Single,20s,40
Female,0 to 8 year,Anxiety disorders,Single,20s,60
Female,More than 12 year,Depressive disorders,Married,30s,15.5
Male,unknown/invalid,Depressive disorders,Married,50s,
";

#[test]
fn two_record_example_end_to_end() {
    let ds = load_csv_reader(SURVEY.as_bytes()).unwrap();
    let anxiety = FilterSpec::new().with(Field::MentalHealthIssue, "Anxiety disorders");
    let rows = apply(ds.records(), &anxiety);
    assert_eq!(rows.len(), 2);

    let male = apply(ds.records(), &FilterSpec::new().with(Field::Gender, "Male"));
    assert_eq!(male.len(), 2);
    assert_eq!(male[0].percentage, 40.0);

    let means = group_mean(rows, Field::Gender, NumericField::Percentage);
    let pairs: Vec<(&str, f64)> = means
        .iter()
        .map(|g| (g.group_key.as_str(), g.mean_value))
        .collect();
    assert_eq!(pairs, vec![("Male", 40.0), ("Female", 60.0)]);
}

#[test]
fn filtering_then_refiltering_is_stable() {
    let ds = load_csv_reader(SURVEY.as_bytes()).unwrap();
    let spec = FilterSpec::new()
        .with(Field::Gender, "Female")
        .with(Field::EducationLevel, "Middle School or below");
    let once = apply(ds.records(), &spec);
    let owned: Vec<_> = once.iter().map(|r| (*r).clone()).collect();
    let twice = apply(&owned, &spec);
    assert_eq!(once, twice);
    assert_eq!(once, apply(ds.records(), &spec));
    assert_eq!(
        distinct_values(ds.records(), Field::EducationLevel),
        vec!["Middle School or below", "College or higher", "Unknown"]
    );
}

#[test]
fn startup_loads_the_configured_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    fs::write(&path, SURVEY).unwrap();

    let path_arg = path.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "heartgrid",
        path_arg.as_str(),
        "--gender",
        "",
        "--bar-issue",
        "Depressive disorders",
    ])
    .unwrap();
    let mut state = AppState::startup(&cli);

    assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(4));
    assert_eq!(state.matrix.filters.selection(Field::Gender), None);
    // Both genders, Middle School, Anxiety → one (20s, Single) heart, last wins.
    assert_eq!(state.matrix.view.len(), 1);
    assert_eq!(state.matrix.view.marks()[0].percentage, 60.0);

    let bars: Vec<_> = state
        .bar
        .view
        .marks()
        .iter()
        .map(|g| (g.group_key.clone(), g.mean_value))
        .collect();
    assert_eq!(
        bars,
        vec![
            ("College or higher".to_string(), 15.5),
            ("Unknown".to_string(), 0.0)
        ]
    );
    assert!(!state.matrix.take_diffs().is_empty());
}

#[test]
fn startup_with_missing_explicit_file_reports_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let missing_arg = missing.to_string_lossy().into_owned();
    let cli = Cli::try_parse_from(["heartgrid", missing_arg.as_str()]).unwrap();
    let state = AppState::startup(&cli);
    assert!(state.dataset.is_none());
    assert!(state.status_message.is_some());
}
