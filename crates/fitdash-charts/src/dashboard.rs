//! Dashboard composition: dataset in, summary cards and chart frames out.

use std::path::Path;

use fitdash_common::{ChartsConfig, ParsingConfig, SummaryCard, SummaryStats};
use fitdash_data::{load_or_empty, summarize, Dataset};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backends::DrawingBackend;
use crate::error::RenderError;
use crate::renderers::{create_renderers, ChartRenderer};
use crate::shape::ChartFrame;

/// Everything the presentation shell shows for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: SummaryStats,
    pub cards: Vec<SummaryCard>,
    pub frames: Vec<ChartFrame>,
}

impl DashboardView {
    /// True when there was no data to chart.
    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(ChartFrame::is_empty)
    }
}

pub struct Dashboard {
    renderers: Vec<Box<dyn ChartRenderer>>,
}

impl Dashboard {
    pub fn new(config: &ChartsConfig) -> Self {
        Self { renderers: create_renderers(config) }
    }

    pub fn renderers(&self) -> &[Box<dyn ChartRenderer>] {
        &self.renderers
    }

    /// Recompute every derived value from `dataset`. Nothing is cached, so
    /// calling this again with a new dataset is all a refresh takes.
    pub fn compose(&self, dataset: &Dataset) -> DashboardView {
        let records = dataset.records();
        if records.is_empty() {
            debug!("Composing dashboard for an empty dataset");
        }

        let summary = summarize(records);
        let frames = self.renderers.iter().map(|r| r.render(records)).collect();

        DashboardView { cards: summary.cards(), summary, frames }
    }

    /// Hand every frame of `view` to `backend`.
    pub async fn publish(
        &self,
        view: &DashboardView,
        backend: &mut dyn DrawingBackend,
    ) -> Result<(), RenderError> {
        for frame in &view.frames {
            backend.draw(frame).await?;
        }
        info!("Published {} charts through the {} backend", view.frames.len(), backend.get_name());
        Ok(())
    }

    /// The whole pipeline: one load, then compose and publish. A failed
    /// load is logged and leaves the dashboard in its empty state.
    pub async fn load_and_render(
        &self,
        path: impl AsRef<Path>,
        parsing: &ParsingConfig,
        backend: &mut dyn DrawingBackend,
    ) -> Result<DashboardView, RenderError> {
        let dataset = load_or_empty(path, parsing).await;
        if dataset.is_empty() {
            warn!("No activity records available; charts will be empty");
        }

        let view = self.compose(&dataset);
        self.publish(&view, backend).await?;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::shape::ChartKind;
    use chrono::NaiveDate;
    use fitdash_common::ActivityRecord;

    fn dataset() -> Dataset {
        let record = |id: u64, day: u32, steps: u32| ActivityRecord {
            id,
            date: NaiveDate::from_ymd_opt(2016, 4, day).unwrap(),
            total_steps: steps,
            calories: 1800.0,
            total_distance: 5.0,
            very_active_minutes: 10,
            fairly_active_minutes: 20,
            lightly_active_minutes: 200,
            sedentary_minutes: 700,
        };
        Dataset::new(vec![record(1, 12, 1000), record(1, 13, 3000), record(2, 13, 5000)])
    }

    #[test]
    fn test_compose_produces_all_charts() {
        let dashboard = Dashboard::new(&ChartsConfig::default());
        let view = dashboard.compose(&dataset());

        assert_eq!(view.frames.len(), 4);
        assert!(!view.is_empty());
        assert_eq!(view.summary.users, 2);
        assert_eq!(view.cards.len(), 6);
        assert_eq!(view.cards[1].value, "3000");
    }

    #[test]
    fn test_compose_empty_dataset() {
        let dashboard = Dashboard::new(&ChartsConfig::default());
        let view = dashboard.compose(&Dataset::default());

        assert!(view.is_empty());
        assert_eq!(view.summary, SummaryStats::default());
        assert_eq!(view.cards[0].value, "0");
    }

    #[test]
    fn test_compose_is_idempotent() {
        let dashboard = Dashboard::new(&ChartsConfig::default());
        let data = dataset();
        assert_eq!(dashboard.compose(&data), dashboard.compose(&data));
    }

    #[tokio::test]
    async fn test_publish_twice_keeps_one_frame_per_chart() {
        let dashboard = Dashboard::new(&ChartsConfig::default());
        let view = dashboard.compose(&dataset());
        let mut backend = MemoryBackend::new();

        dashboard.publish(&view, &mut backend).await.unwrap();
        dashboard.publish(&view, &mut backend).await.unwrap();

        assert_eq!(backend.draw_count(), 8);
        assert_eq!(backend.frames().count(), 4);
        assert_eq!(backend.frame(ChartKind::Scatter), Some(&view.frames[3]));
    }
}
