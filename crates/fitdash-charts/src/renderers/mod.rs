//! The four chart renderers.
//!
//! A renderer is a pure function of the records: it builds its scales,
//! then the shape descriptions, and hands back a [`ChartFrame`]. Drawing
//! is left to a [`DrawingBackend`](crate::backends::DrawingBackend).

pub mod bar;
pub mod line;
pub mod pie;
pub mod scatter;

pub use bar::BarRenderer;
pub use line::LineRenderer;
pub use pie::PieRenderer;
pub use scatter::ScatterRenderer;

use chrono::Weekday;
use fitdash_common::{weekday_label, ActivityRecord, ChartGeometry, ChartsConfig, WEEKDAYS};

use crate::axis::{bottom_axis, left_axis, linear_ticks, Tick};
use crate::scale::{BandScale, LinearScale, PointScale};
use crate::shape::{ChartFrame, ChartKind, Shape};

pub trait ChartRenderer: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn title(&self) -> &'static str;

    /// Shape descriptions for `records`. An empty slice yields an empty
    /// frame.
    fn render(&self, records: &[ActivityRecord]) -> ChartFrame;
}

/// One renderer per chart kind, in [`ChartKind::ALL`] order.
pub fn create_renderers(config: &ChartsConfig) -> Vec<Box<dyn ChartRenderer>> {
    ChartKind::ALL.iter().map(|kind| create_renderer(*kind, config)).collect()
}

pub fn create_renderer(kind: ChartKind, config: &ChartsConfig) -> Box<dyn ChartRenderer> {
    match kind {
        ChartKind::Bar => Box::new(BarRenderer::new(config)),
        ChartKind::Line => Box::new(LineRenderer::new(config)),
        ChartKind::Pie => Box::new(PieRenderer::new(config)),
        ChartKind::Scatter => Box::new(ScatterRenderer::new(config)),
    }
}

fn x_range(geometry: &ChartGeometry) -> (f64, f64) {
    (geometry.margin.left, geometry.width - geometry.margin.right)
}

/// Bottom-to-top, so larger values sit higher.
fn y_range(geometry: &ChartGeometry) -> (f64, f64) {
    (geometry.height - geometry.margin.bottom, geometry.margin.top)
}

/// Maximum of `values`, `0` when empty or all negative.
fn observed_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().filter(|v| v.is_finite()).fold(0.0, f64::max)
}

fn weekday_band(geometry: &ChartGeometry, padding: f64) -> BandScale<Weekday> {
    BandScale::new(WEEKDAYS.to_vec(), x_range(geometry), padding)
}

fn weekday_points(geometry: &ChartGeometry) -> PointScale<Weekday> {
    PointScale::new(WEEKDAYS.to_vec(), x_range(geometry))
}

/// Axes shared by the weekday charts: rotated day names along the bottom
/// and the numeric scale on the left.
fn weekday_axes(
    geometry: &ChartGeometry,
    positions: impl Fn(&Weekday) -> f64,
    y: &LinearScale,
    tick_count: usize,
) -> Vec<Shape> {
    let day_ticks: Vec<Tick> = WEEKDAYS
        .iter()
        .map(|day| Tick { position: positions(day), label: weekday_label(*day).to_string() })
        .collect();

    let baseline = geometry.height - geometry.margin.bottom;
    let mut axes = bottom_axis(&day_ticks, x_range(geometry), baseline, true);
    axes.extend(left_axis(&linear_ticks(y, tick_count), y_range(geometry), geometry.margin.left));
    axes
}
