use std::collections::BTreeMap;

use super::DrawingBackend;
use crate::error::RenderError;
use crate::shape::{ChartFrame, ChartKind};

/// Keeps the last frame drawn for each chart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    frames: BTreeMap<ChartKind, ChartFrame>,
    draw_count: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self, kind: ChartKind) -> Option<&ChartFrame> {
        self.frames.get(&kind)
    }

    pub fn frames(&self) -> impl Iterator<Item = &ChartFrame> {
        self.frames.values()
    }

    /// Total draw calls, including ones that replaced an earlier frame.
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }
}

#[async_trait::async_trait]
impl DrawingBackend for MemoryBackend {
    fn get_name(&self) -> &'static str {
        "memory"
    }

    async fn draw(&mut self, frame: &ChartFrame) -> Result<(), RenderError> {
        self.frames.insert(frame.kind, frame.clone());
        self.draw_count += 1;
        Ok(())
    }
}
