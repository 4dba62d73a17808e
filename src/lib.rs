//! Activity dashboard pipeline for fitness tracker exports.
//!
//! Raw CSV text is parsed into [`ActivityRecord`]s, aggregated per weekday
//! and per activity category, projected through scales, and shaped into
//! chart frames that a [`DrawingBackend`] turns into output.

pub use fitdash_charts as charts;
pub use fitdash_common as common;
pub use fitdash_data as data;

pub use fitdash_charts::{ChartFrame, ChartKind, Dashboard, DashboardView, DrawingBackend, Shape};
pub use fitdash_common::{ActivityRecord, DashboardConfig, SummaryStats};
pub use fitdash_data::{load_dataset, load_or_empty, parse_csv, Dataset, LoadError};
