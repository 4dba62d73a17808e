use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use fitdash_charts::{create_backend, BackendKind, ChartKind, Dashboard};
use fitdash_common::DashboardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG documents
    Svg,
    /// Serialized chart frames
    Json,
}

impl From<OutputFormat> for BackendKind {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Svg => BackendKind::Svg,
            OutputFormat::Json => BackendKind::Json,
        }
    }
}

pub async fn charts(
    config: &DashboardConfig,
    data_path: &Path,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<()> {
    let kind = BackendKind::from(format);
    let mut backend = create_backend(kind, out_dir);
    let dashboard = Dashboard::new(&config.charts);

    let view = dashboard
        .load_and_render(data_path, &config.parsing, backend.as_mut())
        .await
        .with_context(|| format!("Failed to write charts to {:?}", out_dir))?;

    if view.is_empty() {
        println!("No activity data; wrote empty charts");
    }
    for chart in ChartKind::ALL {
        println!(
            "{:<8} {}",
            chart.to_string(),
            out_dir.join(format!("{}.{}", chart.file_stem(), kind)).display()
        );
    }

    Ok(())
}
