use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic mental-health survey table.
#[derive(Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Output file (.csv or .parquet)
    #[arg(default_value = "data/mental_health_summary.csv")]
    output: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct SampleRow {
    #[serde(rename = "GENDER_LABEL")]
    gender: &'static str,
    #[serde(rename = "EDUC_LEVEL")]
    education: &'static str,
    #[serde(rename = "MH1_LABEL")]
    issue: &'static str,
    #[serde(rename = "MARSTAT_LABEL")]
    marital_status: &'static str,
    #[serde(rename = "AGE_GROUP")]
    age_group: &'static str,
    percentage: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn generate(seed: u64) -> Vec<SampleRow> {
    let mut rng = SimpleRng::new(seed);

    let genders = ["Male", "Female"];
    let education = [
        "0 to 8 year",
        "9 to 11 year",
        "12 (or GED) year",
        "More than 12 year",
        "Special education",
        "unknown/invalid",
    ];
    let issues = [
        ("Depressive disorders", 30.0),
        ("Anxiety disorders", 22.0),
        ("Bipolar disorders", 12.0),
        ("Trauma- and stressor-related disorders", 10.0),
        ("Schizophrenia or other psychotic disorders", 8.0),
    ];
    let marital = ["Never married", "Now married", "Separated", "Divorced, widowed"];
    let ages = ["20s", "30s", "40s", "50s", "60s"];

    let mut rows = Vec::new();
    for &gender in &genders {
        for &educ in &education {
            for &(issue, base) in &issues {
                for &marstat in &marital {
                    for &age in &ages {
                        // ~1 in 12 cells has no respondents.
                        let percentage = if rng.next_f64() < 0.08 {
                            0.0
                        } else {
                            let v = base * (0.4 + 1.2 * rng.next_f64());
                            (v * 100.0).round() / 100.0
                        };
                        rows.push(SampleRow {
                            gender,
                            education: educ,
                            issue,
                            marital_status: marstat,
                            age_group: age,
                            percentage,
                        });
                    }
                }
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let strings = |f: fn(&SampleRow) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("GENDER_LABEL", DataType::Utf8, false),
        Field::new("EDUC_LEVEL", DataType::Utf8, false),
        Field::new("MH1_LABEL", DataType::Utf8, false),
        Field::new("MARSTAT_LABEL", DataType::Utf8, false),
        Field::new("AGE_GROUP", DataType::Utf8, false),
        Field::new("percentage", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.gender),
            strings(|r| r.education),
            strings(|r| r.issue),
            strings(|r| r.marital_status),
            strings(|r| r.age_group),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.percentage).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let rows = generate(args.seed);
    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(&args.output, &rows)?,
        "parquet" | "pq" => write_parquet(&args.output, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} rows to {}", rows.len(), args.output.display());
    println!("Wrote {} survey rows to {}", rows.len(), args.output.display());
    Ok(())
}
