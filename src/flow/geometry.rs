//! Card footprint, connector anchors and edge curves, all in virtual units.

use crate::constants::{
    EDGE_MIN_CONTROL_OFFSET, EDGE_SAMPLES, HANDLE_HIT_RADIUS, HANDLE_OFFSET_Y, NODE_BASE_HEIGHT,
    NODE_TRIGGER_ROW_HEIGHT, NODE_WIDTH,
};
use crate::models::{FlowNode, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Cards grow by one row when they show a trigger badge.
pub fn node_height(node: &FlowNode) -> f64 {
    if node.trigger.is_empty() {
        NODE_BASE_HEIGHT
    } else {
        NODE_BASE_HEIGHT + NODE_TRIGGER_ROW_HEIGHT
    }
}

pub fn node_rect(node: &FlowNode) -> Rect {
    Rect {
        x: node.x,
        y: node.y,
        width: NODE_WIDTH,
        height: node_height(node),
    }
}

/// Left connector, where incoming edges end.
pub fn input_anchor(node: &FlowNode) -> Point {
    Point::new(node.x, node.y + HANDLE_OFFSET_Y)
}

/// Right connector, where outgoing edges start.
pub fn output_anchor(node: &FlowNode) -> Point {
    Point::new(node.x + NODE_WIDTH, node.y + HANDLE_OFFSET_Y)
}

pub fn hits_handle(anchor: Point, p: Point) -> bool {
    anchor.distance_to(p) <= HANDLE_HIT_RADIUS
}

/// Cubic Bézier from a source connector to a target connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl EdgeCurve {
    /// Horizontal control offset is half the horizontal span, floored so
    /// vertically stacked cards still get a visible curve.
    pub fn between(start: Point, end: Point) -> Self {
        let offset = ((end.x - start.x).abs() * 0.5).max(EDGE_MIN_CONTROL_OFFSET);
        Self {
            start,
            control1: Point::new(start.x + offset, start.y),
            control2: Point::new(end.x - offset, end.y),
            end,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// Midpoint of the two endpoints; trigger labels and the delete button
    /// are anchored here.
    pub fn label_anchor(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Approximate distance from `p` to the curve, sampled along `t`.
    pub fn distance_to(&self, p: Point) -> f64 {
        (0..=EDGE_SAMPLES)
            .map(|i| self.point_at(i as f64 / EDGE_SAMPLES as f64).distance_to(p))
            .fold(f64::MAX, f64::min)
    }
}

pub fn edge_curve(source: &FlowNode, target: &FlowNode) -> EdgeCurve {
    EdgeCurve::between(output_anchor(source), input_anchor(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn node_at(id: &str, x: f64, y: f64) -> FlowNode {
        FlowNode::new(id.into(), NodeKind::Message, Point::new(x, y))
    }

    #[test]
    fn control_offset_is_half_the_horizontal_span() {
        let curve = EdgeCurve::between(Point::new(0.0, 0.0), Point::new(400.0, 80.0));
        assert_eq!(curve.control1, Point::new(200.0, 0.0));
        assert_eq!(curve.control2, Point::new(200.0, 80.0));
    }

    #[test]
    fn control_offset_has_a_floor() {
        let curve = EdgeCurve::between(Point::new(100.0, 0.0), Point::new(100.0, 300.0));
        assert_eq!(curve.control1.x, 150.0);
        assert_eq!(curve.control2.x, 50.0);
    }

    #[test]
    fn curve_endpoints_are_exact() {
        let curve = EdgeCurve::between(Point::new(3.0, 4.0), Point::new(90.0, -20.0));
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
        assert!(curve.distance_to(curve.end) < 1e-9);
    }

    #[test]
    fn edge_runs_from_right_handle_to_left_handle() {
        let a = node_at("a", 100.0, 100.0);
        let b = node_at("b", 400.0, 100.0);
        let curve = edge_curve(&a, &b);
        assert_eq!(curve.start, Point::new(308.0, 142.0));
        assert_eq!(curve.end, Point::new(400.0, 142.0));
        assert_eq!(curve.label_anchor(), Point::new(354.0, 142.0));
    }

    #[test]
    fn trigger_row_makes_the_card_taller() {
        let mut n = node_at("n", 0.0, 0.0);
        assert_eq!(node_height(&n), NODE_BASE_HEIGHT);
        n.trigger = "yes".into();
        assert_eq!(node_height(&n), NODE_BASE_HEIGHT + NODE_TRIGGER_ROW_HEIGHT);
        assert!(node_rect(&n).contains(Point::new(NODE_WIDTH, NODE_BASE_HEIGHT + 1.0)));
    }
}
