use std::collections::HashMap;

use eframe::egui::{self, Align2, FontId, Id, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::ColorScale;
use crate::data::aggregate::{max_mean, GroupAggregate};
use crate::data::model::{AgeGroup, Record};
use crate::data::reconcile::{CellKey, Keyed, ViewDiff};

/// Seconds a mark takes to reach its new value.
const TRANSITION_SECS: f32 = 0.5;

/// Room for the marital-status labels left of the grid.
const ROW_LABEL_WIDTH: f32 = 140.0;
const AXIS_LABEL_HEIGHT: f32 = 28.0;

// ---------------------------------------------------------------------------
// Heart grid (matrix chart)
// ---------------------------------------------------------------------------

/// Renderer for the heart grid. Owns its marks and keeps them in step with
/// the data through the diffs it is handed.
#[derive(Debug, Default)]
pub struct HeartGrid {
    marks: HashMap<CellKey, Record>,
}

impl HeartGrid {
    /// Create, update and remove marks.
    pub fn apply(&mut self, diff: ViewDiff<Record>) {
        for key in diff.exit {
            self.marks.remove(&key);
        }
        for record in diff.enter.into_iter().chain(diff.update) {
            self.marks.insert(record.key(), record);
        }
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Paint one heart per mark at (age group, marital status).
    pub fn show(&self, ui: &mut Ui, marital_statuses: &[String]) {
        let size = ui.available_size();
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let outer = response.rect;
        let grid = Rect::from_min_max(
            outer.min + Vec2::new(ROW_LABEL_WIDTH, 0.0),
            outer.max - Vec2::new(0.0, AXIS_LABEL_HEIGHT),
        );

        let n_cols = AgeGroup::ALL.len() as f32;
        let n_rows = marital_statuses.len().max(1) as f32;
        let cell = Vec2::new(grid.width() / n_cols, grid.height() / n_rows);
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(14.0);

        for (row, status) in marital_statuses.iter().enumerate() {
            let y = grid.top() + cell.y * (row as f32 + 0.5);
            painter.text(
                Pos2::new(grid.left() - 8.0, y),
                Align2::RIGHT_CENTER,
                status,
                font.clone(),
                text_color,
            );
        }
        for age in AgeGroup::ALL {
            let x = grid.left() + cell.x * (age.index() as f32 + 0.5);
            painter.text(
                Pos2::new(x, grid.bottom() + 6.0),
                Align2::CENTER_TOP,
                age.as_str(),
                font.clone(),
                text_color,
            );
        }

        let scale = ColorScale::heart();
        let radius = 0.35 * cell.x.min(cell.y);

        for (key, record) in &self.marks {
            let Some(row) = marital_statuses.iter().position(|s| *s == key.marital_status) else {
                continue;
            };
            let center = Pos2::new(
                grid.left() + cell.x * (key.age_group.index() as f32 + 0.5),
                grid.top() + cell.y * (row as f32 + 0.5),
            );

            let id = Id::new(("heart", key));
            let shown = ui.ctx().animate_value_with_time(
                id,
                record.percentage as f32,
                TRANSITION_SECS,
            );
            paint_heart(&painter, center, radius, scale.color_for(shown as f64));

            let cell_rect = Rect::from_center_size(center, cell);
            ui.interact(cell_rect, id.with("hover"), Sense::hover())
                .on_hover_text(heart_tooltip(record));
        }
    }
}

/// Two lobes over a downward wedge.
fn paint_heart(painter: &egui::Painter, center: Pos2, r: f32, color: egui::Color32) {
    let lobe = r * 0.52;
    painter.circle_filled(center + Vec2::new(-r * 0.5, -r * 0.25), lobe, color);
    painter.circle_filled(center + Vec2::new(r * 0.5, -r * 0.25), lobe, color);
    painter.add(Shape::convex_polygon(
        vec![
            center + Vec2::new(-r * 0.98, -r * 0.05),
            center + Vec2::new(r * 0.98, -r * 0.05),
            center + Vec2::new(0.0, r),
        ],
        color,
        Stroke::NONE,
    ));
}

/// Hover text for one heart.
pub fn heart_tooltip(record: &Record) -> String {
    format!(
        "{:.2}%\n{}, {}, {}",
        record.percentage, record.education_level, record.age_group, record.marital_status
    )
}

// ---------------------------------------------------------------------------
// Education bar chart
// ---------------------------------------------------------------------------

/// Renderer for the education bar chart. Keeps its bars in the order they
/// first entered and patches them with each diff.
#[derive(Debug, Default)]
pub struct EducationBars {
    marks: Vec<GroupAggregate>,
}

impl EducationBars {
    /// Drop exited bars, refresh updated ones in place, append new ones.
    pub fn apply(&mut self, diff: ViewDiff<GroupAggregate>) {
        self.marks.retain(|m| !diff.exit.contains(&m.key()));
        for group in diff.update {
            if let Some(slot) = self.marks.iter_mut().find(|m| m.group_key == group.group_key) {
                *slot = group;
            }
        }
        self.marks.extend(diff.enter);
    }

    pub fn marks(&self) -> &[GroupAggregate] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Render the bars in the current panel.
    pub fn show(&self, ui: &mut Ui) {
        if self.marks.is_empty() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Pick a mental health issue to compare education levels.");
            });
            return;
        }

        let scale = ColorScale::bars(max_mean(&self.marks));
        let labels: Vec<String> = self.marks.iter().map(|g| g.group_key.clone()).collect();

        let bars: Vec<Bar> = self
            .marks
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let shown = ui.ctx().animate_value_with_time(
                    Id::new(("bar", &group.group_key)),
                    group.mean_value as f32,
                    TRANSITION_SECS,
                ) as f64;
                Bar::new(i as f64, shown)
                    .name(&group.group_key)
                    .fill(scale.color_for(group.mean_value))
                    .width(0.7)
            })
            .collect();

        let chart = BarChart::new(bars)
            .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                bar_tooltip(&bar.name, bar.value)
            }));

        Plot::new("education_bars")
            .x_axis_label("Education level")
            .y_axis_label("Average rate")
            .x_axis_formatter(move |mark, _range| {
                let i = mark.value.round();
                if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                    return String::new();
                }
                labels.get(i as usize).cloned().unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format!("{}%", mark.value))
            .include_y(0.0)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }
}

/// Hover text for one bar.
pub fn bar_tooltip(group: &str, mean: f64) -> String {
    format!("{group}\n{mean:.2}%")
}
