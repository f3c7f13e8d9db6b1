use unicode_segmentation::UnicodeSegmentation;
use web_sys::CanvasRenderingContext2d;

use crate::constants::*;
use crate::flow::geometry::{EdgeCurve, Rect};
use crate::models::{NodeKind, Point};

/// Header fill and accent colour per node kind.
pub fn kind_palette(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Message => (HEADER_MESSAGE_FILL, ACCENT_MESSAGE),
        NodeKind::Input => (HEADER_INPUT_FILL, ACCENT_INPUT),
        NodeKind::Menu => (HEADER_MENU_FILL, ACCENT_MENU),
    }
}

/// Cuts `text` to at most `max` graphemes, marking the cut with an ellipsis.
pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = graphemes[..keep].concat();
    out.push('…');
    out
}

// Creates a rounded rectangle path without filling or stroking
pub fn rounded_rect_path(context: &CanvasRenderingContext2d, rect: &Rect, radius: f64) {
    let Rect { x, y, width, height } = *rect;
    context.begin_path();
    context.move_to(x + radius, y);
    context.line_to(x + width - radius, y);
    context.quadratic_curve_to(x + width, y, x + width, y + radius);
    context.line_to(x + width, y + height - radius);
    context.quadratic_curve_to(x + width, y + height, x + width - radius, y + height);
    context.line_to(x + radius, y + height);
    context.quadratic_curve_to(x, y + height, x, y + height - radius);
    context.line_to(x, y + radius);
    context.quadratic_curve_to(x, y, x + radius, y);
    context.close_path();
}

/// Card body, header band and border.
pub fn draw_card(context: &CanvasRenderingContext2d, rect: &Rect, kind: NodeKind, selected: bool) {
    let (header_fill, _) = kind_palette(kind);
    context.save();

    context.set_shadow_color("rgba(0, 0, 0, 0.35)");
    context.set_shadow_blur(12.0);
    context.set_shadow_offset_y(4.0);
    context.set_fill_style_str(NODE_FILL);
    rounded_rect_path(context, rect, NODE_CORNER_RADIUS);
    context.fill();

    context.set_shadow_blur(0.0);
    context.set_shadow_offset_y(0.0);

    // Header band, clipped to the card outline
    context.save();
    rounded_rect_path(context, rect, NODE_CORNER_RADIUS);
    context.clip();
    context.set_fill_style_str(header_fill);
    context.fill_rect(rect.x, rect.y, rect.width, NODE_HEADER_HEIGHT);
    context.restore();

    rounded_rect_path(context, rect, NODE_CORNER_RADIUS);
    if selected {
        context.set_stroke_style_str(NODE_BORDER_SELECTED);
        context.set_line_width(2.0);
        context.set_shadow_color(NODE_BORDER_SELECTED);
        context.set_shadow_blur(8.0);
    } else {
        context.set_stroke_style_str(NODE_BORDER_DEFAULT);
        context.set_line_width(1.0);
    }
    context.stroke();

    context.restore();
}

pub fn draw_handle(context: &CanvasRenderingContext2d, center: Point, active: bool) {
    context.save();
    context.begin_path();
    let _ = context.arc(center.x, center.y, HANDLE_RADIUS, 0.0, std::f64::consts::TAU);
    context.set_fill_style_str(if active { HANDLE_ACTIVE_FILL } else { HANDLE_FILL });
    context.fill();
    context.set_line_width(1.5);
    context.set_stroke_style_str(if active { HANDLE_ACTIVE_FILL } else { HANDLE_STROKE });
    context.stroke();
    context.restore();
}

pub fn draw_curve(
    context: &CanvasRenderingContext2d,
    curve: &EdgeCurve,
    color: &str,
    width: f64,
    dashed: bool,
) {
    context.save();
    if dashed {
        let dash = js_sys::Array::of2(&6.0.into(), &4.0.into());
        let _ = context.set_line_dash(&dash);
    }
    context.begin_path();
    context.move_to(curve.start.x, curve.start.y);
    context.bezier_curve_to(
        curve.control1.x,
        curve.control1.y,
        curve.control2.x,
        curve.control2.y,
        curve.end.x,
        curve.end.y,
    );
    context.set_stroke_style_str(color);
    context.set_line_width(width);
    context.stroke();
    context.restore();
}

/// Trigger text in a small pill centred on `center`.
pub fn draw_pill_label(context: &CanvasRenderingContext2d, text: &str, center: Point) {
    context.save();
    context.set_font("600 10px system-ui, -apple-system, sans-serif");
    let text_width = context
        .measure_text(text)
        .map(|m| m.width())
        .unwrap_or(text.len() as f64 * 6.0);
    let rect = Rect {
        x: center.x - text_width / 2.0 - 6.0,
        y: center.y - 9.0,
        width: text_width + 12.0,
        height: 18.0,
    };
    rounded_rect_path(context, &rect, 9.0);
    context.set_fill_style_str(TRIGGER_LABEL_FILL);
    context.fill();
    context.set_stroke_style_str(TRIGGER_TEXT_COLOR);
    context.set_line_width(1.0);
    context.stroke();
    context.set_fill_style_str(TRIGGER_TEXT_COLOR);
    context.set_text_align("center");
    context.set_text_baseline("middle");
    let _ = context.fill_text(text, center.x, center.y);
    context.restore();
}

/// Round "x" button revealed on a hovered edge.
pub fn draw_delete_button(context: &CanvasRenderingContext2d, center: Point) {
    context.save();
    context.begin_path();
    let _ = context.arc(center.x, center.y, EDGE_DELETE_RADIUS, 0.0, std::f64::consts::TAU);
    context.set_fill_style_str(EDGE_DELETE_FILL);
    context.fill();
    let arm = EDGE_DELETE_RADIUS * 0.4;
    context.begin_path();
    context.move_to(center.x - arm, center.y - arm);
    context.line_to(center.x + arm, center.y + arm);
    context.move_to(center.x + arm, center.y - arm);
    context.line_to(center.x - arm, center.y + arm);
    context.set_stroke_style_str("#ffffff");
    context.set_line_width(2.0);
    context.stroke();
    context.restore();
}

/// Word-wraps `text` into at most `max_lines` lines of `max_width` pixels.
/// The last line is cut with an ellipsis when text remains.
pub fn draw_wrapped_text(
    context: &CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
    max_width: f64,
    line_height: f64,
    max_lines: usize,
) {
    let measure = |s: &str| context.measure_text(s).map(|m| m.width()).unwrap_or(0.0);
    let lines = wrap_words(text, max_width, max_lines, measure);
    for (i, line) in lines.iter().enumerate() {
        let _ = context.fill_text(line, x, y + i as f64 * line_height);
    }
}

/// Greedy word wrap with a pluggable width function.
pub fn wrap_words(
    text: &str,
    max_width: f64,
    max_lines: usize,
    measure: impl Fn(&str) -> f64,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            if lines.len() == max_lines {
                break;
            }
        } else {
            current = candidate;
        }
    }

    let truncated = lines.len() == max_lines;
    if !truncated && !current.is_empty() {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_graphemes_not_bytes() {
        assert_eq!(truncate_graphemes("preço", 5), "preço");
        assert_eq!(truncate_graphemes("Recuperação de Carrinho", 10), "Recuperaç…");
        assert_eq!(truncate_graphemes("👍🏽👍🏽👍🏽", 2), "👍🏽…");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // One unit per char.
        let lines = wrap_words("hello there big world", 11.0, 3, |s| s.chars().count() as f64);
        assert_eq!(lines, vec!["hello there", "big world"]);
    }

    #[test]
    fn wrap_stops_at_line_limit() {
        let lines = wrap_words("a b c d e f", 1.0, 2, |s| s.chars().count() as f64);
        assert_eq!(lines, vec!["a", "b…"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_words("   ", 100.0, 3, |_| 0.0).is_empty());
    }
}
