use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::ActivityCategory;

/// Top-level dashboard configuration. Every section falls back to its
/// defaults when absent from the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub parsing: ParsingConfig,

    #[serde(default)]
    pub charts: ChartsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub data_path: String,
    pub output_dir: String,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_path: "data/fitbit_data.csv".to_string(),
            output_dir: "dashboard".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// What to do with a row whose date does not match the configured format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDatePolicy {
    /// Skip the row and keep loading
    #[default]
    Drop,
    /// Fail the whole load
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub date_format: String,
    pub invalid_dates: InvalidDatePolicy,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self { date_format: "%m/%d/%Y".to_string(), invalid_dates: InvalidDatePolicy::Drop }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
}

/// Outer size of one chart and the margin reserved for axes and legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartGeometry {
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self { width, height, margin }
    }

    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(Error::InvalidData(format!(
                "{} chart size must be positive, got {}x{}",
                name, self.width, self.height
            )));
        }
        if self.inner_width() == 0.0 || self.inner_height() == 0.0 {
            warn!("{} chart margins leave no drawing area; the chart will collapse", name);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Inner and outer padding of band slots, as a fraction of the step
    pub band_padding: f64,
    /// Approximate number of ticks per numeric axis
    pub tick_count: usize,
    /// Multiplier applied to the observed maximum of scatter axes
    pub scatter_headroom: f64,
    /// Fill for bars, line markers and scatter points
    pub mark_color: String,
    /// Ordinal palette for pie categories
    pub palette: Vec<String>,
    pub bar: ChartGeometry,
    pub line: ChartGeometry,
    pub pie: ChartGeometry,
    pub scatter: ChartGeometry,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        let cartesian = ChartGeometry::new(600.0, 400.0, Margin::new(20.0, 30.0, 50.0, 60.0));
        Self {
            band_padding: 0.1,
            tick_count: 10,
            scatter_headroom: 1.1,
            mark_color: "steelblue".to_string(),
            palette: [
                "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d",
                "#666666",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            bar: cartesian,
            line: cartesian,
            pie: ChartGeometry::new(600.0, 400.0, Margin::new(20.0, 150.0, 20.0, 20.0)),
            scatter: ChartGeometry::new(600.0, 400.0, Margin::new(20.0, 20.0, 50.0, 60.0)),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        self.charts.bar.validate("bar")?;
        self.charts.line.validate("line")?;
        self.charts.pie.validate("pie")?;
        self.charts.scatter.validate("scatter")?;

        if !(0.0..1.0).contains(&self.charts.band_padding) {
            return Err(Error::Config(format!(
                "band_padding must be in [0, 1), got {}",
                self.charts.band_padding
            )));
        }
        if self.charts.scatter_headroom < 1.0 {
            return Err(Error::Config(format!(
                "scatter_headroom must be at least 1.0, got {}",
                self.charts.scatter_headroom
            )));
        }
        if self.charts.palette.is_empty() {
            return Err(Error::Config("palette must contain at least one colour".to_string()));
        }
        if self.charts.palette.len() < ActivityCategory::ALL.len() {
            warn!(
                "palette has {} colours for {} categories; colours will repeat",
                self.charts.palette.len(),
                ActivityCategory::ALL.len()
            );
        }
        if self.parsing.date_format.trim().is_empty() {
            return Err(Error::Config("date_format must not be empty".to_string()));
        }
        Ok(())
    }
}
