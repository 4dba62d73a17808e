use std::path::{Path, PathBuf};

use tracing::debug;

use super::{write_output, DrawingBackend};
use crate::error::RenderError;
use crate::shape::{ChartFrame, ChartKind};

/// Pretty-printed frame per chart, for drawing layers outside this crate.
pub struct JsonBackend {
    output_dir: PathBuf,
}

impl JsonBackend {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(format!("{}.json", kind.file_stem()))
    }
}

#[async_trait::async_trait]
impl DrawingBackend for JsonBackend {
    fn get_name(&self) -> &'static str {
        "json"
    }

    async fn draw(&mut self, frame: &ChartFrame) -> Result<(), RenderError> {
        let contents = serde_json::to_vec_pretty(frame)?;
        let file_name = format!("{}.json", frame.kind.file_stem());
        let path = write_output(&self.output_dir, &file_name, &contents).await?;
        debug!("Wrote {} chart to {:?}", frame.kind, path);
        Ok(())
    }
}
