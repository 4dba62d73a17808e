use chrono::Weekday;
use fitdash_common::{weekday_label, ActivityRecord, ChartGeometry, ChartsConfig, WeekdayBucket};
use fitdash_data::active_minutes_by_weekday;

use super::{observed_max, weekday_axes, weekday_points, y_range, ChartRenderer};
use crate::scale::{Channel, LinearScale, PointScale};
use crate::shape::{ChartFrame, ChartKind, PathCommand, Shape, TextAnchor};

const MARKER_RADIUS: f64 = 4.0;
const STROKE_WIDTH: f64 = 2.0;

/// Mean active minutes per weekday as a smoothed line with markers.
pub struct LineRenderer {
    geometry: ChartGeometry,
    tick_count: usize,
    color: String,
}

impl LineRenderer {
    pub fn new(config: &ChartsConfig) -> Self {
        Self { geometry: config.line, tick_count: config.tick_count, color: config.mark_color.clone() }
    }

    pub fn scales(&self, buckets: &[WeekdayBucket]) -> (PointScale<Weekday>, LinearScale) {
        let x = weekday_points(&self.geometry);
        let max = observed_max(buckets.iter().map(|b| b.value));
        let y = LinearScale::from_max(max, y_range(&self.geometry)).nice(self.tick_count);
        (x, y)
    }

    /// The path through every bucket in weekday order, then a marker and
    /// a value label per bucket.
    pub fn marks(
        &self,
        buckets: &[WeekdayBucket],
        x: &PointScale<Weekday>,
        y: &LinearScale,
    ) -> Vec<Shape> {
        let mut marks = Vec::with_capacity(buckets.len() * 2 + 1);

        let commands = buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                let (px, py) = (x.position(&bucket.key), y.project(bucket.value));
                if i == 0 {
                    PathCommand::MoveTo { x: px, y: py }
                } else {
                    PathCommand::LineTo { x: px, y: py }
                }
            })
            .collect();
        marks.push(Shape::Path {
            commands,
            stroke: self.color.clone(),
            stroke_width: STROKE_WIDTH,
            fill: None,
            smooth: true,
        });

        for bucket in buckets {
            marks.push(Shape::Point {
                x: x.position(&bucket.key),
                y: y.project(bucket.value),
                radius: MARKER_RADIUS,
                fill: self.color.clone(),
            });
        }

        for bucket in buckets {
            marks.push(Shape::text(
                x.position(&bucket.key),
                y.project(bucket.value) - 10.0,
                TextAnchor::Middle,
                format!("{:.1}", bucket.value),
            ));
        }

        marks
    }
}

impl ChartRenderer for LineRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn title(&self) -> &'static str {
        "Average Active Time by Weekday"
    }

    fn render(&self, records: &[ActivityRecord]) -> ChartFrame {
        let mut frame = ChartFrame::empty(self.kind(), self.title(), &self.geometry);
        if records.is_empty() {
            return frame;
        }

        let buckets = active_minutes_by_weekday(records);
        let (x, y) = self.scales(&buckets);

        frame.scales = vec![x.spec(Channel::X, |d| weekday_label(*d).to_string()), y.spec(Channel::Y)];
        frame.marks = self.marks(&buckets, &x, &y);
        frame.axes = weekday_axes(&self.geometry, |d| x.position(d), &y, self.tick_count);
        frame
    }
}
