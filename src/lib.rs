//! Filterable heart-grid and bar chart viewer for mental-health survey tables.
//!
//! [`data`] holds the engine (load, filter, aggregate, reconcile); the rest is
//! the egui front end that consumes its output.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
