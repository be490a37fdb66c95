//! Outline Gantt: a desktop Gantt chart for outline-level CSV schedules.
//!
//! The [`model`] module is the layout engine (hierarchy, visibility, timeline,
//! dependencies) and has no UI dependency. [`io`] reads and writes the CSV
//! source; [`app`] and [`ui`] host the engine in an egui window.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod ui;
