use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorScale;
use crate::data::filter::FilterOption;
use crate::data::insights::Insights;
use crate::state::{AppState, MATRIX_FILTER_FIELDS};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Heart grid filters ----
            ui.strong("Heart grid");
            for field in MATRIX_FILTER_FIELDS {
                let options = state.matrix_options(field);
                let current = state.matrix.filters.selection(field).unwrap_or("").to_string();
                if let Some(choice) = combo(ui, field.label(), &current, &options) {
                    state.set_matrix_filter(field, &choice);
                }
            }
            legend(ui, &ColorScale::heart());
            ui.separator();

            // ---- Bar chart issue ----
            ui.strong("Education bar chart");
            let options = state.bar_options();
            let current = state.bar.issue.clone().unwrap_or_default();
            if let Some(choice) = combo(ui, "Mental health issue (bars)", &current, &options) {
                state.set_bar_issue(&choice);
            }
            ui.separator();

            if let Some(insights) = &state.insights {
                insights_section(ui, insights);
            }
        });
}

/// Labelled dropdown; returns the newly picked selection, if any.
fn combo(ui: &mut Ui, label: &str, current: &str, options: &[FilterOption]) -> Option<String> {
    let shown = if current.is_empty() {
        FilterOption::MatchAll.to_string()
    } else {
        current.to_string()
    };

    let mut picked = None;
    ui.label(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(shown)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let value = option.as_selection();
                if ui
                    .selectable_label(value == current, option.to_string())
                    .clicked()
                    && value != current
                {
                    picked = Some(value.to_string());
                }
            }
        });
    picked
}

fn legend(ui: &mut Ui, scale: &ColorScale) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in scale.legend_entries(6) {
            ui.label(RichText::new("♥").color(color).size(16.0));
            ui.small(label);
        }
    });
}

fn insights_section(ui: &mut Ui, insights: &Insights) {
    egui::CollapsingHeader::new(RichText::new("Highlights").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if let Some(r) = &insights.highest {
                ui.label(format!(
                    "Highest: {:.2}% ({}, {}, {}, {})",
                    r.percentage, r.mental_health_issue, r.gender, r.age_group, r.marital_status
                ));
            }
            if let Some(r) = &insights.lowest_nonzero {
                ui.label(format!(
                    "Lowest: {:.2}% ({}, {}, {}, {})",
                    r.percentage, r.mental_health_issue, r.gender, r.age_group, r.marital_status
                ));
            }
            for (condition, groups) in &insights.gender_differences {
                if groups.is_empty() {
                    continue;
                }
                let by_gender = groups
                    .iter()
                    .map(|g| format!("{} {:.2}%", g.group_key, g.mean_value))
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.label(format!("{condition}: {by_gender}"));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} match, {} hearts shown",
                ds.len(),
                state.matrix.matched(),
                state.matrix.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
