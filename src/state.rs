use std::path::Path;

use crate::config::{Cli, Selections};
use crate::data::aggregate::{group_mean, GroupAggregate};
use crate::data::filter::{
    apply, distinct_values, filter_options, filtered_indices, FilterOption, FilterSpec,
};
use crate::data::insights::{analyze, Insights};
use crate::data::loader::load_file;
use crate::data::model::{Dataset, Field, NumericField, Record};
use crate::data::reconcile::{KeyedView, ViewDiff};

/// Fields the heart grid can be filtered on, in widget order.
pub const MATRIX_FILTER_FIELDS: [Field; 3] = [
    Field::Gender,
    Field::EducationLevel,
    Field::MentalHealthIssue,
];

// ---------------------------------------------------------------------------
// Per-chart state
// ---------------------------------------------------------------------------

/// Heart grid: three equality filters, one mark per (age group, marital status).
#[derive(Debug, Default)]
pub struct MatrixChart {
    pub filters: FilterSpec,
    pub view: KeyedView<Record>,
    /// Dataset positions passing the filters, before keys collapse.
    visible: Vec<usize>,
    /// Diffs not yet consumed by the renderer, oldest first.
    pending: Vec<ViewDiff<Record>>,
}

impl MatrixChart {
    pub fn take_diffs(&mut self) -> Vec<ViewDiff<Record>> {
        std::mem::take(&mut self.pending)
    }

    /// Number of records matching the current filters.
    pub fn matched(&self) -> usize {
        self.visible.len()
    }

    fn recompute(&mut self, dataset: &Dataset) {
        let records = dataset.records();
        self.visible = filtered_indices(records, &self.filters);
        log::debug!("heart grid: {} of {} records", self.visible.len(), records.len());
        let diff = self
            .view
            .reconcile(self.visible.iter().map(|&i| records[i].clone()));
        self.pending.push(diff);
    }
}

/// Bar chart: mean rate per education level for one mental health issue.
#[derive(Debug, Default)]
pub struct BarChart {
    /// `None` renders nothing.
    pub issue: Option<String>,
    pub view: KeyedView<GroupAggregate>,
    pending: Vec<ViewDiff<GroupAggregate>>,
}

impl BarChart {
    pub fn take_diffs(&mut self) -> Vec<ViewDiff<GroupAggregate>> {
        std::mem::take(&mut self.pending)
    }

    fn recompute(&mut self, dataset: &Dataset) {
        let groups = match &self.issue {
            Some(issue) => {
                let spec = FilterSpec::new().with(Field::MentalHealthIssue, issue.as_str());
                group_mean(
                    apply(dataset.records(), &spec),
                    Field::EducationLevel,
                    NumericField::Percentage,
                )
            }
            None => Vec::new(),
        };
        log::debug!("bar chart: {} education groups", groups.len());
        let diff = self.view.reconcile(groups);
        self.pending.push(diff);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    pub matrix: MatrixChart,
    pub bar: BarChart,

    /// Marital statuses in first-occurrence order (heart grid rows).
    pub marital_statuses: Vec<String>,

    pub insights: Option<Insights>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the startup state from the command line, loading the data file
    /// if it exists.
    pub fn startup(cli: &Cli) -> Self {
        let mut state = AppState::default();
        if cli.data.exists() || !cli.data_is_default() {
            if state.load_path(&cli.data) {
                state.apply_selections(&cli.selections());
            }
        } else {
            log::info!(
                "No data at {}; waiting for File → Open…",
                cli.data.display()
            );
        }
        state
    }

    /// Load a file, replacing the dataset on success. On failure the
    /// previous dataset (if any) stays and the error is surfaced.
    pub fn load_path(&mut self, path: &Path) -> bool {
        match load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Ingest a newly loaded dataset: every selection starts at the first
    /// distinct value, then both charts recompute.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let records = dataset.records();

        let mut filters = FilterSpec::new();
        for field in MATRIX_FILTER_FIELDS {
            if let Some(first) = distinct_values(records, field).into_iter().next() {
                filters.select(field, first);
            }
        }
        self.matrix.filters = filters;
        self.bar.issue = distinct_values(records, Field::MentalHealthIssue)
            .into_iter()
            .next();

        self.marital_statuses = distinct_values(records, Field::MaritalStatus);
        self.insights = Some(analyze(records));

        self.dataset = Some(dataset);
        self.status_message = None;

        self.refresh_matrix();
        self.refresh_bar();
    }

    /// Apply startup overrides; `Some("")` clears a heart-grid filter.
    pub fn apply_selections(&mut self, selections: &Selections) {
        let matrix = [
            (Field::Gender, &selections.gender),
            (Field::EducationLevel, &selections.education),
            (Field::MentalHealthIssue, &selections.issue),
        ];
        for (field, value) in matrix {
            if let Some(value) = value {
                self.set_matrix_filter(field, value);
            }
        }
        if let Some(issue) = &selections.bar_issue {
            self.set_bar_issue(issue);
        }
    }

    /// Change one heart-grid filter. Before a dataset exists the selection
    /// is recorded but nothing recomputes.
    pub fn set_matrix_filter(&mut self, field: Field, value: &str) {
        self.matrix.filters.select(field, value);
        self.refresh_matrix();
    }

    /// Change the bar chart's issue. Empty means none.
    pub fn set_bar_issue(&mut self, issue: &str) {
        self.bar.issue = (!issue.is_empty()).then(|| issue.to_string());
        self.refresh_bar();
    }

    /// Recompute the heart grid from the current filters.
    pub fn refresh_matrix(&mut self) {
        match &self.dataset {
            Some(ds) => self.matrix.recompute(ds),
            None => log::warn!("heart grid filter changed before any dataset was loaded"),
        }
    }

    /// Recompute the bar chart from the current issue.
    pub fn refresh_bar(&mut self) {
        match &self.dataset {
            Some(ds) => self.bar.recompute(ds),
            None => log::warn!("bar chart issue changed before any dataset was loaded"),
        }
    }

    /// Dropdown entries for a heart-grid filter (led by "All").
    pub fn matrix_options(&self, field: Field) -> Vec<FilterOption> {
        self.dataset
            .as_ref()
            .map(|ds| filter_options(ds.records(), field, true))
            .unwrap_or_default()
    }

    /// Dropdown entries for the bar chart's issue selector.
    pub fn bar_options(&self) -> Vec<FilterOption> {
        self.dataset
            .as_ref()
            .map(|ds| filter_options(ds.records(), Field::MentalHealthIssue, false))
            .unwrap_or_default()
    }
}
