use std::path::{Path, PathBuf};

use clap::Parser;

/// Data file used when neither the command line nor the environment names one.
pub const DEFAULT_DATA_PATH: &str = "data/mental_health_summary.csv";

/// Command line / environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "heartgrid")]
#[command(about = "Heart-grid and bar chart viewer for mental-health survey tables")]
#[command(version)]
pub struct Cli {
    /// Survey table to open at startup (.csv, .json or .parquet)
    #[arg(env = "HEARTGRID_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial gender selection for the heart grid (empty = all)
    #[arg(long)]
    pub gender: Option<String>,

    /// Initial education selection for the heart grid (empty = all)
    #[arg(long)]
    pub education: Option<String>,

    /// Initial mental health issue for the heart grid (empty = all)
    #[arg(long)]
    pub issue: Option<String>,

    /// Initial mental health issue for the education bar chart
    #[arg(long)]
    pub bar_issue: Option<String>,
}

/// Startup selections that override the first-value defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    pub gender: Option<String>,
    pub education: Option<String>,
    pub issue: Option<String>,
    pub bar_issue: Option<String>,
}

impl Cli {
    pub fn selections(&self) -> Selections {
        Selections {
            gender: self.gender.clone(),
            education: self.education.clone(),
            issue: self.issue.clone(),
            bar_issue: self.bar_issue.clone(),
        }
    }

    /// Whether `data` is the built-in default (absence is then not an error).
    pub fn data_is_default(&self) -> bool {
        self.data == Path::new(DEFAULT_DATA_PATH)
    }
}
