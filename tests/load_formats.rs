use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field as ArrowField, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::tempdir;

use heartgrid::data::error::LoadError;
use heartgrid::data::loader::load_file;
use heartgrid::data::model::{AgeGroup, Dataset};

fn write_parquet(path: &Path, percentage: ArrayRef) {
    let labels = |values: [&str; 2]| -> ArrayRef { Arc::new(StringArray::from(values.to_vec())) };
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new("AGE_GROUP", DataType::Utf8, false),
        ArrowField::new("GENDER_LABEL", DataType::Utf8, false),
        ArrowField::new("EDUC_LEVEL", DataType::Utf8, false),
        ArrowField::new("MH1_LABEL", DataType::Utf8, false),
        ArrowField::new("MARSTAT_LABEL", DataType::Utf8, false),
        ArrowField::new("percentage", percentage.data_type().clone(), true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            labels(["20s", "60s"]),
            labels(["Male", "Female"]),
            labels(["0 to 8 year", "Trade school"]),
            labels(["Anxiety disorders", "Anxiety disorders"]),
            labels(["Never married", "Now married"]),
            percentage,
        ],
    )
    .unwrap();

    let file = fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

fn assert_two_rows(ds: &Dataset, second_pct: f64) {
    assert_eq!(ds.len(), 2);
    let [first, second] = ds.records() else {
        panic!("expected two records");
    };
    assert_eq!(first.age_group, AgeGroup::Twenties);
    assert_eq!(first.education_level, "Middle School or below");
    assert_eq!(first.percentage, 12.5);
    assert_eq!(second.age_group, AgeGroup::Sixties);
    assert_eq!(second.education_level, "Trade school");
    assert_eq!(second.percentage, second_pct);
}

#[test]
fn csv_file_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    fs::write(
        &path,
        "MH1_LABEL,MARSTAT_LABEL,AGE_GROUP,GENDER_LABEL,EDUC_LEVEL,percentage\n\
         Anxiety disorders,Never married,20s,Male,0 to 8 year,12.5\n\
         Anxiety disorders,Now married,60s,Female,Trade school,3\n",
    )
    .unwrap();

    assert_two_rows(&load_file(&path).unwrap(), 3.0);
}

#[test]
fn json_file_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.JSON");
    fs::write(
        &path,
        r#"[
          {"GENDER_LABEL":"Male","EDUC_LEVEL":"0 to 8 year","MH1_LABEL":"Anxiety disorders",
           "MARSTAT_LABEL":"Never married","AGE_GROUP":"20s","percentage":12.5},
          {"GENDER_LABEL":"Female","EDUC_LEVEL":"Trade school","MH1_LABEL":"Anxiety disorders",
           "MARSTAT_LABEL":"Now married","AGE_GROUP":"60s"}
        ]"#,
    )
    .unwrap();

    assert_two_rows(&load_file(&path).unwrap(), 0.0);
}

#[test]
fn parquet_file_loads_float_percentages() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.parquet");
    write_parquet(&path, Arc::new(Float64Array::from(vec![Some(12.5), None])));

    assert_two_rows(&load_file(&path).unwrap(), 0.0);
}

#[test]
fn parquet_integer_percentages_are_validated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.pq");
    write_parquet(&path, Arc::new(Int64Array::from(vec![12, 101])));

    match load_file(&path) {
        Err(LoadError::InvalidPercentage { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "101");
        }
        other => panic!("expected InvalidPercentage, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.json");
    fs::write(&path, r#"{"not": "an array"}"#).unwrap();

    assert!(matches!(load_file(&path), Err(LoadError::Json(_))));
}

#[test]
fn json_without_a_label_key_reports_the_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.json");
    fs::write(
        &path,
        r#"[{"GENDER_LABEL":"Male","EDUC_LEVEL":"0 to 8 year","MH1_LABEL":"Anxiety disorders",
             "AGE_GROUP":"20s","percentage":12.5}]"#,
    )
    .unwrap();

    match load_file(&path) {
        Err(LoadError::MissingColumn(col)) => assert_eq!(col, "MARSTAT_LABEL"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn empty_parquet_with_wrong_columns_reports_the_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("survey.parquet");
    let schema = Arc::new(Schema::new(vec![ArrowField::new("foo", DataType::Utf8, false)]));
    let empty: ArrayRef = Arc::new(StringArray::from(Vec::<&str>::new()));
    let batch = RecordBatch::try_new(schema.clone(), vec![empty]).unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    match load_file(&path) {
        Err(LoadError::MissingColumn(col)) => assert_eq!(col, "GENDER_LABEL"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}
