use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// AgeGroup – the fixed x-axis of the heart grid
// ---------------------------------------------------------------------------

/// Decade age bracket of a survey cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    Sixties,
}

impl AgeGroup {
    /// All brackets in axis order.
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Twenties,
        AgeGroup::Thirties,
        AgeGroup::Forties,
        AgeGroup::Fifties,
        AgeGroup::Sixties,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Twenties => "20s",
            AgeGroup::Thirties => "30s",
            AgeGroup::Forties => "40s",
            AgeGroup::Fifties => "50s",
            AgeGroup::Sixties => "60s",
        }
    }

    /// Position on the heart-grid x-axis.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for AgeGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or(())
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field / NumericField – closed set of addressable columns
// ---------------------------------------------------------------------------

/// Categorical columns that can be filtered on or grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Gender,
    EducationLevelRaw,
    /// Education label after normalization (what the UI shows).
    EducationLevel,
    MentalHealthIssue,
    MaritalStatus,
    AgeGroup,
}

impl Field {
    /// Source column header for this field.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Gender => "GENDER_LABEL",
            Field::EducationLevelRaw | Field::EducationLevel => "EDUC_LEVEL",
            Field::MentalHealthIssue => "MH1_LABEL",
            Field::MaritalStatus => "MARSTAT_LABEL",
            Field::AgeGroup => "AGE_GROUP",
        }
    }

    /// Human-readable label for filter widgets and axes.
    pub fn label(self) -> &'static str {
        match self {
            Field::Gender => "Gender",
            Field::EducationLevelRaw => "Education (raw)",
            Field::EducationLevel => "Education",
            Field::MentalHealthIssue => "Mental health issue",
            Field::MaritalStatus => "Marital status",
            Field::AgeGroup => "Age group",
        }
    }
}

/// Numeric columns that can be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Percentage,
}

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// A single survey cell, validated at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub gender: String,
    pub education_level_raw: String,
    pub education_level: String,
    pub mental_health_issue: String,
    pub marital_status: String,
    pub age_group: AgeGroup,
    /// Share of respondents in `[0, 100]`.
    pub percentage: f64,
}

impl Record {
    /// Borrow the value of a categorical field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Gender => &self.gender,
            Field::EducationLevelRaw => &self.education_level_raw,
            Field::EducationLevel => &self.education_level,
            Field::MentalHealthIssue => &self.mental_health_issue,
            Field::MaritalStatus => &self.marital_status,
            Field::AgeGroup => self.age_group.as_str(),
        }
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Percentage => self.percentage,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// All records in source order. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
