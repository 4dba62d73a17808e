use chrono::Weekday;
use fitdash_common::{weekday_label, ActivityRecord, ChartGeometry, ChartsConfig, WeekdayBucket};
use fitdash_data::steps_by_weekday;

use super::{observed_max, weekday_axes, weekday_band, y_range, ChartRenderer};
use crate::scale::{BandScale, Channel, LinearScale};
use crate::shape::{ChartFrame, ChartKind, Shape, TextAnchor};

/// Mean steps per weekday as vertical bars.
pub struct BarRenderer {
    geometry: ChartGeometry,
    padding: f64,
    tick_count: usize,
    fill: String,
}

impl BarRenderer {
    pub fn new(config: &ChartsConfig) -> Self {
        Self {
            geometry: config.bar,
            padding: config.band_padding,
            tick_count: config.tick_count,
            fill: config.mark_color.clone(),
        }
    }

    pub fn scales(&self, buckets: &[WeekdayBucket]) -> (BandScale<Weekday>, LinearScale) {
        let x = weekday_band(&self.geometry, self.padding);
        let max = observed_max(buckets.iter().map(|b| b.value));
        let y = LinearScale::from_max(max, y_range(&self.geometry)).nice(self.tick_count);
        (x, y)
    }

    /// One rect per bucket, then one label per bucket just above its bar.
    pub fn marks(
        &self,
        buckets: &[WeekdayBucket],
        x: &BandScale<Weekday>,
        y: &LinearScale,
    ) -> Vec<Shape> {
        let baseline = y.project(0.0);

        let bars = buckets.iter().map(|bucket| {
            let top = y.project(bucket.value);
            Shape::Rect {
                x: x.position(&bucket.key),
                y: top.min(baseline),
                width: x.bandwidth(),
                height: (baseline - top).abs(),
                fill: self.fill.clone(),
            }
        });

        let labels = buckets.iter().map(|bucket| {
            Shape::text(
                x.center(&bucket.key),
                y.project(bucket.value) - 5.0,
                TextAnchor::Middle,
                format!("{:.0}", bucket.value.round()),
            )
        });

        bars.chain(labels).collect()
    }
}

impl ChartRenderer for BarRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn title(&self) -> &'static str {
        "Average Steps by Weekday"
    }

    fn render(&self, records: &[ActivityRecord]) -> ChartFrame {
        let mut frame = ChartFrame::empty(self.kind(), self.title(), &self.geometry);
        if records.is_empty() {
            return frame;
        }

        let buckets = steps_by_weekday(records);
        let (x, y) = self.scales(&buckets);

        frame.scales = vec![x.spec(Channel::X, |d| weekday_label(*d).to_string()), y.spec(Channel::Y)];
        frame.marks = self.marks(&buckets, &x, &y);
        frame.axes = weekday_axes(&self.geometry, |d| x.center(d), &y, self.tick_count);
        frame
    }
}
