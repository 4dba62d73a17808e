use fitdash_common::ChartGeometry;
use serde::{Deserialize, Serialize};

use crate::scale::ScaleSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Scatter];

    /// File name without extension used by file-writing backends.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Bar => "steps_by_weekday",
            ChartKind::Line => "active_minutes_by_weekday",
            ChartKind::Pie => "activity_status",
            ChartKind::Scatter => "steps_vs_calories",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "Bar"),
            ChartKind::Line => write!(f, "Line"),
            ChartKind::Pie => write!(f, "Pie"),
            ChartKind::Scatter => write!(f, "Scatter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Circular arc to `(x, y)`
    Arc { radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    Close,
}

/// A backend-agnostic drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64, fill: String },
    Point { x: f64, y: f64, radius: f64, fill: String },
    Path {
        commands: Vec<PathCommand>,
        stroke: String,
        stroke_width: f64,
        fill: Option<String>,
        /// Ask the backend for a monotone curve through the vertices
        smooth: bool,
    },
    Polyline { points: Vec<Coord>, stroke: String, stroke_width: f64 },
    Text {
        x: f64,
        y: f64,
        anchor: TextAnchor,
        content: String,
        font_size: f64,
        /// Degrees, around `(x, y)`
        rotate: Option<f64>,
    },
}

impl Shape {
    pub fn text(x: f64, y: f64, anchor: TextAnchor, content: impl Into<String>) -> Self {
        Shape::Text { x, y, anchor, content: content.into(), font_size: 12.0, rotate: None }
    }

    pub fn line(from: Coord, to: Coord, stroke: &str) -> Self {
        Shape::Polyline { points: vec![from, to], stroke: stroke.to_string(), stroke_width: 1.0 }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Rect { .. } => "rect",
            Shape::Point { .. } => "point",
            Shape::Path { .. } => "path",
            Shape::Polyline { .. } => "polyline",
            Shape::Text { .. } => "text",
        }
    }
}

/// Everything one chart needs drawn, grouped by role.
///
/// `marks` hold the data-bearing shapes; `axes` and `legend` are
/// decoration derived from the same scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub kind: ChartKind,
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub scales: Vec<ScaleSpec>,
    pub marks: Vec<Shape>,
    pub axes: Vec<Shape>,
    pub legend: Vec<Shape>,
}

impl ChartFrame {
    pub fn empty(kind: ChartKind, title: impl Into<String>, geometry: &ChartGeometry) -> Self {
        Self {
            kind,
            title: title.into(),
            width: geometry.width,
            height: geometry.height,
            scales: Vec::new(),
            marks: Vec::new(),
            axes: Vec::new(),
            legend: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.axes.is_empty() && self.legend.is_empty()
    }

    pub fn count_marks(&self, type_name: &str) -> usize {
        self.marks.iter().filter(|s| s.type_name() == type_name).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitdash_common::Margin;

    #[test]
    fn test_shape_serialization_is_tagged() {
        let shape = Shape::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0, fill: "steelblue".into() };
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains(r#""type":"rect""#));

        let text = Shape::text(0.0, 0.0, TextAnchor::End, "Sunday");
        let json = serde_json::to_string(&text).unwrap();
        assert!(json.contains(r#""anchor":"end""#));
        assert!(json.contains("Sunday"));
    }

    #[test]
    fn test_empty_frame() {
        let geometry = ChartGeometry::new(600.0, 400.0, Margin::new(0.0, 0.0, 0.0, 0.0));
        let frame = ChartFrame::empty(ChartKind::Pie, "Activity Status", &geometry);
        assert!(frame.is_empty());
        assert_eq!(frame.width, 600.0);
        assert_eq!(frame.count_marks("rect"), 0);
    }

    #[test]
    fn test_chart_kind_names() {
        assert_eq!(ChartKind::Scatter.to_string(), "Scatter");
        assert_eq!(ChartKind::Bar.file_stem(), "steps_by_weekday");
        assert_eq!(serde_json::to_string(&ChartKind::Line).unwrap(), r#""line""#);
    }
}
