use std::f64::consts::TAU;

use fitdash_common::{ActivityCategory, ActivityRecord, CategoryShare, ChartGeometry, ChartsConfig};
use fitdash_data::category_shares;

use super::ChartRenderer;
use crate::scale::{arc_centroid, polar, ArcSlice, OrdinalScale, PieLayout};
use crate::shape::{ChartFrame, ChartKind, Coord, PathCommand, Shape, TextAnchor};

const LABEL_RING: f64 = 1.1;
const LABEL_OFFSET: f64 = 1.2;
const SWATCH: f64 = 18.0;
const LEGEND_PITCH: f64 = 20.0;

/// Share of total minutes per activity category.
pub struct PieRenderer {
    geometry: ChartGeometry,
    palette: Vec<String>,
}

impl PieRenderer {
    pub fn new(config: &ChartsConfig) -> Self {
        Self { geometry: config.pie, palette: config.palette.clone() }
    }

    pub fn center(&self) -> Coord {
        Coord::new((self.geometry.width - self.geometry.margin.right) / 2.0, self.geometry.height / 2.0)
    }

    pub fn radius(&self) -> f64 {
        (self.geometry.inner_width().min(self.geometry.inner_height()) / 2.0 - 20.0).max(0.0)
    }

    pub fn colors(&self) -> OrdinalScale<ActivityCategory> {
        OrdinalScale::new(ActivityCategory::ALL.to_vec(), self.palette.clone())
    }

    /// A wedge per share, then a connector and a percentage label per
    /// share, all in category order.
    pub fn marks(&self, shares: &[CategoryShare], slices: &[ArcSlice]) -> Vec<Shape> {
        let center = self.center();
        let radius = self.radius();
        let colors = self.colors();
        let ring = radius * LABEL_RING;
        let at = |(dx, dy): (f64, f64)| Coord::new(center.x + dx, center.y + dy);

        let mut marks = Vec::with_capacity(shares.len() * 3);

        for (share, slice) in shares.iter().zip(slices) {
            marks.push(Shape::Path {
                commands: wedge(center, radius, slice),
                stroke: "white".to_string(),
                stroke_width: 2.0,
                fill: Some(colors.color(&share.category).to_string()),
                smooth: false,
            });
        }

        for slice in slices {
            let side = if slice.is_right_half() { 1.0 } else { -1.0 };
            let inner = at(arc_centroid(slice, 0.0, radius));
            let outer = at(arc_centroid(slice, ring, ring));
            let anchor = Coord::new(center.x + radius * side, outer.y);
            marks.push(Shape::Polyline {
                points: vec![inner, outer, anchor],
                stroke: "black".to_string(),
                stroke_width: 1.0,
            });
        }

        for (share, slice) in shares.iter().zip(slices) {
            let (side, anchor) =
                if slice.is_right_half() { (1.0, TextAnchor::Start) } else { (-1.0, TextAnchor::End) };
            let outer = at(arc_centroid(slice, ring, ring));
            marks.push(Shape::text(
                center.x + radius * LABEL_OFFSET * side,
                outer.y,
                anchor,
                share.percentage_label(),
            ));
        }

        marks
    }

    /// Swatch and category name per row, to the right of the pie.
    pub fn legend(&self, shares: &[CategoryShare]) -> Vec<Shape> {
        let center = self.center();
        let radius = self.radius();
        let colors = self.colors();
        let (left, top) = (center.x + radius + 20.0, center.y - radius);

        let swatches = shares.iter().enumerate().map(|(i, share)| Shape::Rect {
            x: left,
            y: top + i as f64 * LEGEND_PITCH,
            width: SWATCH,
            height: SWATCH,
            fill: colors.color(&share.category).to_string(),
        });
        let names = shares.iter().enumerate().map(|(i, share)| {
            Shape::text(
                left + 24.0,
                top + i as f64 * LEGEND_PITCH + SWATCH / 2.0 + 4.0,
                TextAnchor::Start,
                share.category.label(),
            )
        });

        swatches.chain(names).collect()
    }
}

/// Closed wedge outline from the centre. A slice covering the whole
/// circle is drawn as two half arcs since a single arc cannot end where
/// it starts.
fn wedge(center: Coord, radius: f64, slice: &ArcSlice) -> Vec<PathCommand> {
    let at = |angle: f64| {
        let (dx, dy) = polar(radius, angle);
        (center.x + dx, center.y + dy)
    };
    let (sx, sy) = at(slice.start_angle);
    let (ex, ey) = at(slice.end_angle);

    if slice.span() >= TAU - 1e-9 {
        let (mx, my) = at(slice.mid_angle());
        return vec![
            PathCommand::MoveTo { x: sx, y: sy },
            PathCommand::Arc { radius, large_arc: false, sweep: true, x: mx, y: my },
            PathCommand::Arc { radius, large_arc: false, sweep: true, x: ex, y: ey },
            PathCommand::Close,
        ];
    }

    vec![
        PathCommand::MoveTo { x: sx, y: sy },
        PathCommand::Arc { radius, large_arc: slice.span() > TAU / 2.0, sweep: true, x: ex, y: ey },
        PathCommand::LineTo { x: center.x, y: center.y },
        PathCommand::Close,
    ]
}

impl ChartRenderer for PieRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn title(&self) -> &'static str {
        "Activity Status"
    }

    fn render(&self, records: &[ActivityRecord]) -> ChartFrame {
        let mut frame = ChartFrame::empty(self.kind(), self.title(), &self.geometry);
        if records.is_empty() {
            return frame;
        }

        let shares = category_shares(records, &ActivityCategory::ALL);
        let layout = PieLayout::default();
        let values: Vec<f64> = shares.iter().map(|s| s.total_minutes as f64).collect();
        let slices = layout.slices(&values);
        let labels = || shares.iter().map(|s| s.category.label().to_string()).collect::<Vec<_>>();

        frame.scales = vec![layout.spec(labels()), self.colors().spec(|c| c.label().to_string())];
        frame.marks = self.marks(&shares, &slices);
        frame.legend = self.legend(&shares);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(minutes: [u32; 4]) -> ActivityRecord {
        ActivityRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2016, 4, 12).unwrap(),
            total_steps: 0,
            calories: 0.0,
            total_distance: 0.0,
            very_active_minutes: minutes[0],
            fairly_active_minutes: minutes[1],
            lightly_active_minutes: minutes[2],
            sedentary_minutes: minutes[3],
        }
    }

    #[test]
    fn test_default_geometry() {
        let renderer = PieRenderer::new(&ChartsConfig::default());
        assert_eq!(renderer.center(), Coord::new(225.0, 200.0));
        // min(430, 360) / 2 - 20
        assert_eq!(renderer.radius(), 160.0);
    }

    #[test]
    fn test_wedge_connector_label_per_category() {
        let renderer = PieRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record([20, 10, 170, 800])]);

        assert_eq!(frame.count_marks("path"), 4);
        assert_eq!(frame.count_marks("polyline"), 4);
        assert_eq!(frame.count_marks("text"), 4);
        assert_eq!(frame.legend.len(), 8);

        let labels: Vec<&str> = frame
            .marks
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["2.00%", "1.00%", "17.00%", "80.00%"]);
    }

    #[test]
    fn test_label_side_flips_with_mid_angle() {
        let renderer = PieRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record([25, 0, 0, 75])]);
        let center = renderer.center();
        let radius = renderer.radius();

        let texts: Vec<(f64, TextAnchor)> = frame
            .marks
            .iter()
            .filter_map(|s| match s {
                Shape::Text { x, anchor, .. } => Some((*x, *anchor)),
                _ => None,
            })
            .collect();

        // very active: first quarter, right side
        assert_eq!(texts[0].1, TextAnchor::Start);
        assert!((texts[0].0 - (center.x + 1.2 * radius)).abs() < 1e-9);
        // sedentary: mid-angle past pi, left side
        assert_eq!(texts[3].1, TextAnchor::End);
        assert!((texts[3].0 - (center.x - 1.2 * radius)).abs() < 1e-9);

        let connectors: Vec<&Vec<Coord>> = frame
            .marks
            .iter()
            .filter_map(|s| match s {
                Shape::Polyline { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert_eq!(connectors[0].len(), 3);
        assert!((connectors[0][2].x - (center.x + radius)).abs() < 1e-9);
        assert!((connectors[3][2].x - (center.x - radius)).abs() < 1e-9);
    }

    #[test]
    fn test_single_category_is_full_circle() {
        let renderer = PieRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record([0, 0, 0, 600])]);

        let Some(Shape::Path { commands, .. }) = frame.marks.get(3) else {
            panic!("expected sedentary wedge");
        };
        let arcs = commands.iter().filter(|c| matches!(c, PathCommand::Arc { .. })).count();
        assert_eq!(arcs, 2);
    }

    #[test]
    fn test_zero_minutes_still_lists_categories() {
        let renderer = PieRenderer::new(&ChartsConfig::default());
        let frame = renderer.render(&[record([0, 0, 0, 0])]);

        assert_eq!(frame.count_marks("path"), 4);
        let labels: Vec<&str> = frame
            .marks
            .iter()
            .filter_map(|s| match s {
                Shape::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.iter().all(|l| *l == "0.00%"));
    }

    #[test]
    fn test_legend_uses_palette_in_order() {
        let config = ChartsConfig::default();
        let renderer = PieRenderer::new(&config);
        let shares = category_shares(&[record([1, 1, 1, 1])], &ActivityCategory::ALL);
        let legend = renderer.legend(&shares);

        for (i, shape) in legend.iter().take(4).enumerate() {
            match shape {
                Shape::Rect { fill, width, y, .. } => {
                    assert_eq!(fill, &config.palette[i]);
                    assert_eq!(*width, 18.0);
                    assert_eq!(*y, 40.0 + i as f64 * 20.0);
                }
                other => panic!("expected swatch, got {:?}", other),
            }
        }
        assert!(matches!(&legend[4], Shape::Text { content, .. } if content == "Very Active"));
    }
}
