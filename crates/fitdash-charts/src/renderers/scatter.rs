use fitdash_common::{ActivityRecord, ChartGeometry, ChartsConfig};

use super::{observed_max, x_range, y_range, ChartRenderer};
use crate::axis::{axis_title, bottom_axis, left_axis, linear_ticks};
use crate::scale::{Channel, LinearScale};
use crate::shape::{ChartFrame, ChartKind, Shape};

const POINT_RADIUS: f64 = 5.0;

/// Every raw record at (total steps, calories).
pub struct ScatterRenderer {
    geometry: ChartGeometry,
    headroom: f64,
    tick_count: usize,
    fill: String,
}

impl ScatterRenderer {
    pub fn new(config: &ChartsConfig) -> Self {
        Self {
            geometry: config.scatter,
            headroom: config.scatter_headroom,
            tick_count: config.tick_count,
            fill: config.mark_color.clone(),
        }
    }

    pub fn scales(&self, records: &[ActivityRecord]) -> (LinearScale, LinearScale) {
        let max_steps = observed_max(records.iter().map(|r| f64::from(r.total_steps)));
        let max_calories = observed_max(records.iter().map(|r| r.calories));
        (
            LinearScale::with_headroom(max_steps, self.headroom, x_range(&self.geometry)),
            LinearScale::with_headroom(max_calories, self.headroom, y_range(&self.geometry)),
        )
    }

    /// One point per record; duplicates are kept.
    pub fn marks(&self, records: &[ActivityRecord], x: &LinearScale, y: &LinearScale) -> Vec<Shape> {
        records
            .iter()
            .map(|r| Shape::Point {
                x: x.project(f64::from(r.total_steps)),
                y: y.project(r.calories),
                radius: POINT_RADIUS,
                fill: self.fill.clone(),
            })
            .collect()
    }

    fn axes(&self, x: &LinearScale, y: &LinearScale) -> Vec<Shape> {
        let g = &self.geometry;
        let baseline = g.height - g.margin.bottom;

        let mut axes = bottom_axis(&linear_ticks(x, self.tick_count), x_range(g), baseline, false);
        axes.extend(left_axis(&linear_ticks(y, self.tick_count), y_range(g), g.margin.left));
        axes.push(axis_title(g.margin.left + g.inner_width() / 2.0, baseline + 40.0, "Total Steps", None));
        axes.push(axis_title(
            g.margin.left - 50.0,
            g.margin.top + g.inner_height() / 2.0,
            "Calories",
            Some(-90.0),
        ));
        axes
    }
}

impl ChartRenderer for ScatterRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn title(&self) -> &'static str {
        "Total Steps vs. Calories"
    }

    fn render(&self, records: &[ActivityRecord]) -> ChartFrame {
        let mut frame = ChartFrame::empty(self.kind(), self.title(), &self.geometry);
        if records.is_empty() {
            return frame;
        }

        let (x, y) = self.scales(records);
        frame.scales = vec![x.spec(Channel::X), y.spec(Channel::Y)];
        frame.marks = self.marks(records, &x, &y);
        frame.axes = self.axes(&x, &y);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(steps: u32, calories: f64) -> ActivityRecord {
        ActivityRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2016, 4, 12).unwrap(),
            total_steps: steps,
            calories,
            total_distance: 0.0,
            very_active_minutes: 0,
            fairly_active_minutes: 0,
            lightly_active_minutes: 0,
            sedentary_minutes: 0,
        }
    }

    #[test]
    fn test_one_point_per_record_including_duplicates() {
        let renderer = ScatterRenderer::new(&ChartsConfig::default());
        let records = vec![record(5000, 2000.0), record(5000, 2000.0), record(12000, 3100.0)];
        let frame = renderer.render(&records);

        assert_eq!(frame.count_marks("point"), 3);
        assert_eq!(frame.marks[0], frame.marks[1]);
    }

    #[test]
    fn test_largest_point_stays_inside_plot() {
        let renderer = ScatterRenderer::new(&ChartsConfig::default());
        let records = vec![record(10_000, 3000.0), record(0, 0.0)];
        let (x, y) = renderer.scales(&records);
        let marks = renderer.marks(&records, &x, &y);

        match &marks[0] {
            Shape::Point { x: px, y: py, radius, .. } => {
                assert!(*px < 580.0, "x {} should leave headroom", px);
                assert!(*py > 20.0, "y {} should leave headroom", py);
                assert_eq!(*radius, 5.0);
            }
            other => panic!("expected point, got {:?}", other),
        }
        match &marks[1] {
            Shape::Point { x: px, y: py, .. } => {
                assert_eq!(*px, 60.0);
                assert_eq!(*py, 350.0);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_all_zero_records_collapse_to_origin() {
        let renderer = ScatterRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record(0, 0.0), record(0, 0.0)]);

        for mark in &frame.marks {
            match mark {
                Shape::Point { x, y, .. } => {
                    assert_eq!(*x, 60.0);
                    assert_eq!(*y, 350.0);
                }
                other => panic!("expected point, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_axis_titles() {
        let renderer = ScatterRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record(100, 100.0)]);
        let titles: Vec<&str> = frame
            .axes
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, font_size, .. } if *font_size == 12.0 => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Total Steps", "Calories"]);
    }
}
