use crate::scale::{step_precision, tick_step, LinearScale};
use crate::shape::{Coord, Shape, TextAnchor};

const AXIS_COLOR: &str = "currentColor";
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// A tick position on the axis and the label printed next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Ticks for a numeric scale, labelled with thousands separators.
pub fn linear_ticks(scale: &LinearScale, count: usize) -> Vec<Tick> {
    let (d0, d1) = scale.domain();
    let precision = step_precision(tick_step(d0, d1, count));
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick { position: scale.project(value), label: format_number(value, precision) })
        .collect()
}

/// `12345.678` with precision 1 becomes `"12,345.7"`.
pub fn format_number(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Horizontal axis at `y` spanning `range`, ticks pointing down.
///
/// With `rotate_labels` the labels are tilted -45 degrees and anchored at
/// their end, for long category names.
pub fn bottom_axis(ticks: &[Tick], range: (f64, f64), y: f64, rotate_labels: bool) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(ticks.len() * 2 + 1);
    shapes.push(Shape::line(Coord::new(range.0, y), Coord::new(range.1, y), AXIS_COLOR));

    for tick in ticks {
        shapes.push(Shape::line(
            Coord::new(tick.position, y),
            Coord::new(tick.position, y + TICK_SIZE),
            AXIS_COLOR,
        ));
        let label_y = y + TICK_SIZE + TICK_PADDING + 9.0;
        let label = if rotate_labels {
            Shape::Text {
                x: tick.position - 10.0,
                y: label_y + 10.0,
                anchor: TextAnchor::End,
                content: tick.label.clone(),
                font_size: 10.0,
                rotate: Some(-45.0),
            }
        } else {
            Shape::Text {
                x: tick.position,
                y: label_y,
                anchor: TextAnchor::Middle,
                content: tick.label.clone(),
                font_size: 10.0,
                rotate: None,
            }
        };
        shapes.push(label);
    }
    shapes
}

/// Vertical axis at `x` spanning `range`, ticks pointing left.
pub fn left_axis(ticks: &[Tick], range: (f64, f64), x: f64) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(ticks.len() * 2 + 1);
    shapes.push(Shape::line(Coord::new(x, range.0), Coord::new(x, range.1), AXIS_COLOR));

    for tick in ticks {
        shapes.push(Shape::line(
            Coord::new(x - TICK_SIZE, tick.position),
            Coord::new(x, tick.position),
            AXIS_COLOR,
        ));
        shapes.push(Shape::Text {
            x: x - TICK_SIZE - TICK_PADDING,
            y: tick.position + 3.5,
            anchor: TextAnchor::End,
            content: tick.label.clone(),
            font_size: 10.0,
            rotate: None,
        });
    }
    shapes
}

pub fn axis_title(x: f64, y: f64, content: &str, rotate: Option<f64>) -> Shape {
    Shape::Text {
        x,
        y,
        anchor: TextAnchor::Middle,
        content: content.to_string(),
        font_size: 12.0,
        rotate,
    }
}
