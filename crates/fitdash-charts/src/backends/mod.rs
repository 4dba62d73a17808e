//! Drawing backends that turn chart frames into output.

pub mod json;
pub mod memory;
pub mod svg;

pub use json::JsonBackend;
pub use memory::MemoryBackend;
pub use svg::{render_svg, SvgBackend};

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::shape::ChartFrame;

/// Receives finished chart frames. Drawing a chart replaces whatever the
/// backend produced for that chart before.
#[async_trait::async_trait]
pub trait DrawingBackend: Send + Sync {
    fn get_name(&self) -> &'static str;

    async fn draw(&mut self, frame: &ChartFrame) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Svg,
    Json,
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Svg => write!(f, "svg"),
            BackendKind::Json => write!(f, "json"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

pub fn create_backend(kind: BackendKind, output_dir: impl Into<PathBuf>) -> Box<dyn DrawingBackend> {
    match kind {
        BackendKind::Svg => Box::new(SvgBackend::new(output_dir)),
        BackendKind::Json => Box::new(JsonBackend::new(output_dir)),
        BackendKind::Memory => Box::new(MemoryBackend::new()),
    }
}

/// Write `contents` to `dir/file_name`, creating `dir` when needed.
pub(crate) async fn write_output(
    dir: &Path,
    file_name: &str,
    contents: &[u8],
) -> Result<PathBuf, RenderError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| RenderError::Io { path: dir.to_path_buf(), source })?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| RenderError::Io { path: path.clone(), source })?;
    Ok(path)
}
