use super::LABEL_MAX_CHARS;
use super::geometry::{ArcPath, Point, describe_arc_path, label_placement, segment_span};
use super::model::{OptionId, OptionText, WheelOption};
use super::theme::{HexColor, LabelTone, color_for};
use palette::Srgb;

/// Everything a renderer needs to draw one slice of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSegment {
    pub id: OptionId,
    pub text: OptionText,
    /// Display text; may be shortened, `text` never is.
    pub label: String,
    pub color: Srgb<u8>,
    pub label_tone: LabelTone,
    pub start_deg: f64,
    pub end_deg: f64,
    pub path: ArcPath,
    pub label_x: f64,
    pub label_y: f64,
    pub label_rotation: f64,
}

pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= LABEL_MAX_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(LABEL_MAX_CHARS - 1).collect();
    short.push('…');
    short
}

pub fn layout(
    members: &[&WheelOption],
    center: Point,
    radius: f64,
    palette: &[Srgb<u8>],
) -> Vec<WheelSegment> {
    let count = members.len();
    members
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (start_deg, end_deg) = segment_span(i, count);
            let color = color_for(i, palette);
            let label = label_placement(center, radius, start_deg, end_deg);

            WheelSegment {
                id: option.id,
                text: option.text.clone(),
                label: truncate_label(&option.text),
                color,
                label_tone: LabelTone::for_background(color),
                start_deg,
                end_deg,
                path: describe_arc_path(center, radius, start_deg, end_deg),
                label_x: label.position.x,
                label_y: label.position.y,
                label_rotation: label.rotation_deg,
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
        out
    })
}

/// Standalone SVG of the wheel, sized so `center` is the middle of the canvas.
/// `pointer_deg` turns the marker clockwise from 12 o'clock, so a spin's
/// `final_angle_deg` shows where it landed.
pub fn render_svg(
    segments: &[WheelSegment],
    center: Point,
    radius: f64,
    pointer_deg: Option<f64>,
) -> String {
    let (width, height) = (center.x * 2.0, center.y * 2.0);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    svg.push('\n');

    for seg in segments {
        svg.push_str(&format!(
            r##"  <path d="{}" fill="{}" stroke="#ffffff" stroke-width="2"/>"##,
            seg.path,
            HexColor(seg.color)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{x:.3}" y="{y:.3}" transform="rotate({r:.3} {x:.3} {y:.3})" fill="{}" font-family="sans-serif" font-size="14" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            HexColor(seg.label_tone.color()),
            escape(&seg.label),
            x = seg.label_x,
            y = seg.label_y,
            r = seg.label_rotation,
        ));
        svg.push('\n');
    }

    svg.push_str(&format!(
        r##"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="#ffffff"/>"##,
        center.x,
        center.y,
        radius * 0.08
    ));
    svg.push('\n');

    let tip = center.y - radius + 12.0;
    let base = center.y - radius - 12.0;
    svg.push_str(&format!(
        r##"  <polygon points="{:.3},{tip:.3} {:.3},{base:.3} {:.3},{base:.3}" fill="#2d3436" transform="rotate({:.3} {:.3} {:.3})"/>"##,
        center.x,
        center.x - 10.0,
        center.x + 10.0,
        pointer_deg.unwrap_or(0.0).rem_euclid(360.0),
        center.x,
        center.y,
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}
