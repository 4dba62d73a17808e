use std::path::{Path, PathBuf};

use tracing::debug;

use super::{write_output, DrawingBackend};
use crate::error::RenderError;
use crate::shape::{ChartFrame, ChartKind, Coord, PathCommand, Shape};

/// One standalone SVG document per chart, overwritten on every draw.
pub struct SvgBackend {
    output_dir: PathBuf,
}

impl SvgBackend {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(format!("{}.svg", kind.file_stem()))
    }
}

#[async_trait::async_trait]
impl DrawingBackend for SvgBackend {
    fn get_name(&self) -> &'static str {
        "svg"
    }

    async fn draw(&mut self, frame: &ChartFrame) -> Result<(), RenderError> {
        let document = render_svg(frame);
        let file_name = format!("{}.svg", frame.kind.file_stem());
        let path = write_output(&self.output_dir, &file_name, document.as_bytes()).await?;
        debug!("Wrote {} chart to {:?} ({} bytes)", frame.kind, path, document.len());
        Ok(())
    }
}

pub fn render_svg(frame: &ChartFrame) -> String {
    let mut svg = String::new();
    let (width, height) = (frame.width, frame.height);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!("<title>{}</title>", escape_xml(&frame.title)));

    for (class, shapes) in [("axes", &frame.axes), ("marks", &frame.marks), ("legend", &frame.legend)] {
        if shapes.is_empty() {
            continue;
        }
        svg.push_str(&format!("<g class=\"{class}\">"));
        for shape in shapes {
            svg.push_str(&shape_svg(shape));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn shape_svg(shape: &Shape) -> String {
    match shape {
        Shape::Rect { x, y, width, height, fill } => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
            escape_xml(fill)
        ),
        Shape::Point { x, y, radius, fill } => format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{radius}\" fill=\"{}\"/>",
            escape_xml(fill)
        ),
        Shape::Path { commands, stroke, stroke_width, fill, smooth } => {
            let d = if *smooth { monotone_path(&vertices(commands)) } else { commands_to_path(commands) };
            format!(
                "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                d,
                escape_xml(fill.as_deref().unwrap_or("none")),
                escape_xml(stroke),
                stroke_width
            )
        }
        Shape::Polyline { points, stroke, stroke_width } => {
            let points: Vec<String> = points.iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
            format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                points.join(" "),
                escape_xml(stroke),
                stroke_width
            )
        }
        Shape::Text { x, y, anchor, content, font_size, rotate } => {
            let transform = rotate
                .map(|angle| format!(" transform=\"rotate({angle} {x:.2} {y:.2})\""))
                .unwrap_or_default();
            format!(
                "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" font-size=\"{font_size}\"{transform}>{}</text>",
                anchor.as_str(),
                escape_xml(content)
            )
        }
    }
}

fn commands_to_path(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(|command| match command {
            PathCommand::MoveTo { x, y } => format!("M {x:.2} {y:.2}"),
            PathCommand::LineTo { x, y } => format!("L {x:.2} {y:.2}"),
            PathCommand::Arc { radius, large_arc, sweep, x, y } => format!(
                "A {radius:.2} {radius:.2} 0 {} {} {x:.2} {y:.2}",
                u8::from(*large_arc),
                u8::from(*sweep)
            ),
            PathCommand::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn vertices(commands: &[PathCommand]) -> Vec<Coord> {
    commands
        .iter()
        .filter_map(|c| match c {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => Some(Coord::new(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Cubic curve through `points` that preserves monotonicity in y, for
/// points ordered by increasing x (Fritsch-Carlson style tangents).
pub fn monotone_path(points: &[Coord]) -> String {
    match points.len() {
        0 => return String::new(),
        1 => return format!("M {:.2} {:.2}", points[0].x, points[0].y),
        2 => {
            return format!(
                "M {:.2} {:.2} L {:.2} {:.2}",
                points[0].x, points[0].y, points[1].x, points[1].y
            )
        }
        _ => {}
    }

    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    let mut d = format!("M {:.2} {:.2}", points[0].x, points[0].y);
    for i in 1..n {
        let (p0, p1) = (points[i - 1], points[i]);
        let dx = (p1.x - p0.x) / 3.0;
        d.push_str(&format!(
            " C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            p0.x + dx,
            p0.y + dx * tangents[i - 1],
            p1.x - dx,
            p1.y - dx * tangents[i],
            p1.x,
            p1.y
        ));
    }
    d
}

fn slope(a: Coord, b: Coord) -> f64 {
    let h = b.x - a.x;
    if h == 0.0 {
        0.0
    } else {
        (b.y - a.y) / h
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn interior_tangent(p0: Coord, p1: Coord, p2: Coord) -> f64 {
    let (h0, h1) = (p1.x - p0.x, p2.x - p1.x);
    let (s0, s1) = (slope(p0, p1), slope(p1, p2));
    let p = if h0 + h1 == 0.0 { 0.0 } else { (s0 * h1 + s1 * h0) / (h0 + h1) };
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

fn end_tangent(p0: Coord, p1: Coord, neighbour: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.y - p0.y) / h - neighbour) / 2.0
    }
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
