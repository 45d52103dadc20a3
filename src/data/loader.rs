use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{AgeGroup, Dataset, Record};

/// Column holding the numeric share for each survey cell.
pub const PERCENTAGE_COLUMN: &str = "percentage";

/// Every column a source must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "GENDER_LABEL",
    "EDUC_LEVEL",
    "MH1_LABEL",
    "MARSTAT_LABEL",
    "AGE_GROUP",
    PERCENTAGE_COLUMN,
];

/// Raw education labels from the survey codebook → display labels.
const EDUCATION_LABELS: &[(&str, &str)] = &[
    ("0 to 8 year", "Middle School or below"),
    ("9 to 11 year", "Some High School"),
    ("12 (or GED) year", "High School Graduate"),
    ("More than 12 year", "College or higher"),
    ("Special education", "Special Education"),
    ("unknown/invalid", "Unknown"),
];

/// Map a raw education label to its display label.
/// Unmapped labels pass through trimmed.
pub fn normalize_education(raw: &str) -> String {
    let trimmed = raw.trim();
    EDUCATION_LABELS
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the survey columns (any order)
/// * `.json`    – `[{ "GENDER_LABEL": "...", ..., "percentage": 12.5 }, ...]`
/// * `.parquet` – one column per survey field, labels as strings
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(open(path)?),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Shared row validation
// ---------------------------------------------------------------------------

/// One row as text, before validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "GENDER_LABEL")]
    gender: String,
    #[serde(rename = "EDUC_LEVEL")]
    education: String,
    #[serde(rename = "MH1_LABEL")]
    issue: String,
    #[serde(rename = "MARSTAT_LABEL")]
    marital_status: String,
    #[serde(rename = "AGE_GROUP")]
    age_group: String,
    percentage: String,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<Record, LoadError> {
        let age_group = self
            .age_group
            .parse::<AgeGroup>()
            .map_err(|_| LoadError::InvalidAgeGroup {
                row,
                value: self.age_group.clone(),
            })?;
        let percentage = parse_percentage(&self.percentage, row)?;

        Ok(Record {
            gender: self.gender.trim().to_string(),
            education_level: normalize_education(&self.education),
            education_level_raw: self.education.trim().to_string(),
            mental_health_issue: self.issue.trim().to_string(),
            marital_status: self.marital_status.trim().to_string(),
            age_group,
            percentage,
        })
    }
}

/// Blank means zero; anything else must be a finite number in `[0, 100]`.
fn parse_percentage(text: &str, row: usize) -> Result<f64, LoadError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let invalid = || LoadError::InvalidPercentage {
        row,
        value: trimmed.to_string(),
    };
    let value = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}

fn check_columns(mut present: impl FnMut(&str) -> bool) -> Result<(), LoadError> {
    match REQUIRED_COLUMNS.iter().find(|col| !present(**col)) {
        Some(col) => Err(LoadError::MissingColumn((*col).to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, fields looked up by name.
/// Columns beyond [`REQUIRED_COLUMNS`] are ignored.
pub fn load_csv_reader<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    check_columns(|col| headers.iter().any(|h| h == col))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        records.push(result?.into_record(row_no)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
/// `percentage` may be a number, a numeric string, null or absent. Label keys
/// are optional here so an absent key reports as a missing column.
#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(rename = "GENDER_LABEL")]
    gender: Option<String>,
    #[serde(rename = "EDUC_LEVEL")]
    education: Option<String>,
    #[serde(rename = "MH1_LABEL")]
    issue: Option<String>,
    #[serde(rename = "MARSTAT_LABEL")]
    marital_status: Option<String>,
    #[serde(rename = "AGE_GROUP")]
    age_group: Option<String>,
    #[serde(default)]
    percentage: JsonValue,
}

fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let rows: Vec<JsonRow> = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    load_json_rows(rows)
}

fn load_json_rows(rows: Vec<JsonRow>) -> Result<Dataset, LoadError> {
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row_no, row)| {
            let percentage = match row.percentage {
                JsonValue::Null => String::new(),
                JsonValue::String(s) => s,
                JsonValue::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            RawRow {
                gender: required(row.gender, "GENDER_LABEL")?,
                education: required(row.education, "EDUC_LEVEL")?,
                issue: required(row.issue, "MH1_LABEL")?,
                marital_status: required(row.marital_status, "MARSTAT_LABEL")?,
                age_group: required(row.age_group, "AGE_GROUP")?,
                percentage,
            }
            .into_record(row_no)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

fn required(value: Option<String>, column: &str) -> Result<String, LoadError> {
    value.ok_or_else(|| LoadError::MissingColumn(column.to_string()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the survey table.
///
/// Label columns are expected as strings. `percentage` may be stored as text
/// or as any integer/float type; every column is cast to Utf8 and then goes
/// through the same validation as CSV rows.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let file_schema = builder.schema().clone();
    check_columns(|col| file_schema.index_of(col).is_ok())?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let mut columns: Vec<ArrayRef> = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for col in REQUIRED_COLUMNS {
            let idx = schema.index_of(col)?;
            columns.push(arrow::compute::cast(batch.column(idx).as_ref(), &DataType::Utf8)?);
        }

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let text = |i: usize| string_at(&columns[i], row, row_no);
            let raw = RawRow {
                gender: text(0)?,
                education: text(1)?,
                issue: text(2)?,
                marital_status: text(3)?,
                age_group: text(4)?,
                percentage: text(5)?,
            };
            records.push(raw.into_record(row_no)?);
        }
    }

    Ok(Dataset::from_records(records))
}

/// Read one cell of a Utf8 column; nulls read as empty text.
fn string_at(col: &ArrayRef, row: usize, row_no: usize) -> Result<String, LoadError> {
    let strings = col
        .as_string_opt::<i32>()
        .ok_or_else(|| LoadError::MalformedRow {
            row: row_no,
            message: format!("expected a string column, got {:?}", col.data_type()),
        })?;
    if strings.is_null(row) {
        Ok(String::new())
    } else {
        Ok(strings.value(row).to_string())
    }
}
