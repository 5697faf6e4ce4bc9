use super::LABEL_RADIUS_FACTOR;
use std::f64::consts::PI;
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angles are in degrees, measured clockwise from 12 o'clock.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0) * PI / 180.0;
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Closed pie-slice outline: center, straight edge out, arc, straight edge back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcPath {
    pub commands: Vec<PathCommand>,
}

impl ArcPath {
    pub fn is_large_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::Arc { large_arc: true, .. }))
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(out, "M {:.3} {:.3}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(out, "L {:.3} {:.3}", p.x, p.y)?,
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    out,
                    "A {r:.3} {r:.3} 0 {} {} {:.3} {:.3}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    to.x,
                    to.y,
                    r = radius
                )?,
                PathCommand::Close => out.push('Z'),
            }
        }
        f.write_str(&out)
    }
}

/// Spans over 180 degrees take the large arc; exactly 180 does not.
pub fn describe_arc_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> ArcPath {
    let from = polar_to_cartesian(center, radius, start_deg);
    let to = polar_to_cartesian(center, radius, end_deg);

    ArcPath {
        commands: vec![
            PathCommand::MoveTo(center),
            PathCommand::LineTo(from),
            PathCommand::Arc {
                radius,
                large_arc: end_deg - start_deg > 180.0,
                // clockwise on a y-down surface
                sweep: true,
                to,
            },
            PathCommand::Close,
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub position: Point,
    pub rotation_deg: f64,
}

/// Places a label on the bisector of a segment, flipped on the lower half so
/// it never reads upside-down.
pub fn label_placement(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> LabelPlacement {
    let mid = (start_deg + end_deg) / 2.0;
    let position = polar_to_cartesian(center, radius * LABEL_RADIUS_FACTOR, mid);
    let rotation_deg = if mid > 90.0 && mid < 270.0 {
        mid + 180.0
    } else {
        mid
    };

    LabelPlacement {
        position,
        rotation_deg,
    }
}

pub fn segment_angle(count: usize) -> f64 {
    360.0 / count as f64
}

/// Start and end angle of segment `index` on a wheel of `count` equal segments.
pub fn segment_span(index: usize, count: usize) -> (f64, f64) {
    let step = segment_angle(count);
    (index as f64 * step, (index + 1) as f64 * step)
}

/// Index of the segment containing `angle_deg` (any number of full turns).
pub fn segment_at(angle_deg: f64, count: usize) -> Option<usize> {
    if count == 0 || !angle_deg.is_finite() {
        return None;
    }
    let idx = (angle_deg.rem_euclid(360.0) / segment_angle(count)).floor() as usize;
    Some(idx.min(count - 1))
}
