use web_sys::CanvasRenderingContext2d;

use super::shapes;
use crate::constants::*;
use crate::flow::{EdgeView, NodeView, Scene, ViewportTransform};
use crate::models::Point;

/// Paints one frame.  `width`/`height` are the CSS pixel size of the canvas;
/// the backing store is `dpr` times larger.
pub fn draw_scene(
    context: &CanvasRenderingContext2d,
    scene: &Scene,
    width: f64,
    height: f64,
    dpr: f64,
) {
    context.save();
    let _ = context.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

    context.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, width, height);

    let t = &scene.transform;
    let _ = context.translate(t.translate_x, t.translate_y);
    let _ = context.scale(t.scale, t.scale);

    draw_grid(context, t, width, height);

    // Edges go under the cards.
    for edge in &scene.edges {
        draw_edge(context, edge);
    }
    if let Some(curve) = &scene.provisional_edge {
        shapes::draw_curve(context, curve, PROVISIONAL_EDGE_COLOR, 2.0, true);
    }
    for node in &scene.nodes {
        draw_node(context, node);
    }
    // Labels and delete buttons on top of everything.
    for edge in &scene.edges {
        if let Some(trigger) = &edge.trigger {
            let text = shapes::truncate_graphemes(trigger, TRIGGER_MAX_GRAPHEMES);
            shapes::draw_pill_label(context, &text, edge.midpoint);
        }
        if edge.hovered {
            shapes::draw_delete_button(context, edge.midpoint);
        }
    }

    context.restore();
}

/// Dot grid covering the visible area, aligned to virtual coordinates so it
/// moves with the canvas.
fn draw_grid(context: &CanvasRenderingContext2d, t: &ViewportTransform, width: f64, height: f64) {
    // Too dense to be useful when zoomed far out.
    if t.scale < 0.35 {
        return;
    }
    let top_left = t.screen_to_virtual(Point::new(0.0, 0.0));
    let bottom_right = t.screen_to_virtual(Point::new(width, height));
    let start_x = (top_left.x / GRID_SPACING).floor() * GRID_SPACING;
    let start_y = (top_left.y / GRID_SPACING).floor() * GRID_SPACING;

    context.save();
    context.set_fill_style_str(GRID_DOT_COLOR);
    let mut x = start_x;
    while x <= bottom_right.x {
        let mut y = start_y;
        while y <= bottom_right.y {
            context.fill_rect(x - 1.0, y - 1.0, 2.0, 2.0);
            y += GRID_SPACING;
        }
        x += GRID_SPACING;
    }
    context.restore();
}

fn draw_edge(context: &CanvasRenderingContext2d, edge: &EdgeView) {
    let (color, width) = if edge.hovered {
        (CONNECTION_HOVER_COLOR, 3.0)
    } else {
        (CONNECTION_LINE_COLOR, 2.0)
    };
    shapes::draw_curve(context, &edge.curve, color, width, false);
}

fn draw_node(context: &CanvasRenderingContext2d, node: &NodeView) {
    let rect = &node.rect;
    let (_, accent) = shapes::kind_palette(node.kind);
    shapes::draw_card(context, rect, node.kind, node.selected);

    context.save();
    context.set_text_align("left");
    context.set_text_baseline("middle");

    // Header: kind tag and label
    context.set_font("600 9px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(accent);
    let _ = context.fill_text(
        &node.kind.as_str().to_uppercase(),
        rect.x + 12.0,
        rect.y + NODE_HEADER_HEIGHT / 2.0,
    );
    context.set_font("600 12px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(NODE_TEXT_PRIMARY);
    let label = shapes::truncate_graphemes(&node.label, LABEL_MAX_GRAPHEMES);
    let _ = context.fill_text(&label, rect.x + 64.0, rect.y + NODE_HEADER_HEIGHT / 2.0);

    // Body: trigger badge, then content preview
    let mut body_y = rect.y + NODE_HEADER_HEIGHT + 8.0;
    if !node.trigger.is_empty() {
        context.set_font("500 10px system-ui, -apple-system, sans-serif");
        context.set_fill_style_str(TRIGGER_TEXT_COLOR);
        let trigger = shapes::truncate_graphemes(&node.trigger, TRIGGER_MAX_GRAPHEMES);
        context.set_text_baseline("top");
        let _ = context.fill_text(&format!("⚡ {}", trigger), rect.x + 12.0, body_y);
        body_y += NODE_TRIGGER_ROW_HEIGHT;
    }

    context.set_text_baseline("top");
    context.set_font("11px system-ui, -apple-system, sans-serif");
    context.set_fill_style_str(NODE_TEXT_SECONDARY);
    if node.content.trim().is_empty() {
        let _ = context.fill_text("Empty content...", rect.x + 12.0, body_y);
    } else {
        shapes::draw_wrapped_text(
            context,
            &node.content,
            rect.x + 12.0,
            body_y,
            rect.width - 24.0,
            14.0,
            CONTENT_MAX_LINES,
        );
    }
    context.restore();

    shapes::draw_handle(context, node.input_anchor, node.input_highlighted);
    shapes::draw_handle(context, node.output_anchor, node.output_active);
}
