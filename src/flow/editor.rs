//! The editor surface: viewport, graph and pointer session together.
//!
//! Pointer coordinates passed in are screen pixels relative to the canvas
//! container.  Nothing here touches the DOM; the canvas renderer draws the
//! `Scene` produced by [`FlowEditor::scene`].

use crate::constants::{EDGE_DELETE_RADIUS, EDGE_HOVER_DISTANCE, NEW_NODE_OFFSET_X, NEW_NODE_OFFSET_Y};
use crate::flow::geometry::{
    edge_curve, hits_handle, input_anchor, node_rect, output_anchor, EdgeCurve, Rect,
};
use crate::flow::graph::GraphStore;
use crate::flow::interaction::{Interaction, PointerOutcome, PointerTarget};
use crate::flow::viewport::ViewportTransform;
use crate::models::{FlowNode, NodeField, NodeKind, Point};

#[derive(Clone, Debug, Default)]
pub struct FlowEditor {
    transform: ViewportTransform,
    graph: GraphStore,
    interaction: Interaction,
    hovered_edge: Option<(String, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub content: String,
    pub trigger: String,
    pub rect: Rect,
    pub input_anchor: Point,
    pub output_anchor: Point,
    pub selected: bool,
    /// Drop target hint while a connection is being drawn.
    pub input_highlighted: bool,
    pub output_active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub curve: EdgeCurve,
    pub midpoint: Point,
    /// Trigger of the target node, shown on the edge when set.
    pub trigger: Option<String>,
    pub hovered: bool,
}

/// Everything the renderer needs for one frame, in virtual units except for
/// the transform itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub transform: ViewportTransform,
    pub edges: Vec<EdgeView>,
    pub nodes: Vec<NodeView>,
    pub provisional_edge: Option<EdgeCurve>,
}

impl FlowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn hovered_edge(&self) -> Option<(&str, &str)> {
        self.hovered_edge
            .as_ref()
            .map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Swaps in the graph of another bot: view and selection start over.
    pub fn load(&mut self, nodes: Vec<FlowNode>) {
        self.graph.replace_all(nodes);
        self.transform.reset();
        self.interaction = Interaction::Idle;
        self.hovered_edge = None;
    }

    pub fn to_wire(&self) -> Vec<FlowNode> {
        self.graph.to_wire()
    }

    // ---------------------------------------------------------------------
    // Hit testing
    // ---------------------------------------------------------------------

    pub fn hit_test(&self, screen: Point) -> PointerTarget {
        let p = self.transform.screen_to_virtual(screen);
        let nodes = self.graph.nodes();

        if let Some(n) = nodes.iter().rev().find(|n| hits_handle(output_anchor(n), p)) {
            return PointerTarget::OutputHandle(n.id.clone());
        }
        if let Some(id) = self.input_handle_at(p) {
            return PointerTarget::InputHandle(id);
        }
        if let Some(n) = nodes.iter().rev().find(|n| node_rect(n).contains(p)) {
            return PointerTarget::NodeBody(n.id.clone());
        }
        if let Some((source, target)) = &self.hovered_edge {
            if let Some(curve) = self.curve_for(source, target) {
                if curve.label_anchor().distance_to(p) <= EDGE_DELETE_RADIUS {
                    return PointerTarget::EdgeDelete {
                        source: source.clone(),
                        target: target.clone(),
                    };
                }
            }
        }
        PointerTarget::Background
    }

    /// Topmost input handle under `p` (virtual units), ignoring every other
    /// target.  Output handles sitting close by never shadow a drop.
    fn input_handle_at(&self, p: Point) -> Option<String> {
        self.graph
            .nodes()
            .iter()
            .rev()
            .find(|n| hits_handle(input_anchor(n), p))
            .map(|n| n.id.clone())
    }

    fn curve_for(&self, source: &str, target: &str) -> Option<EdgeCurve> {
        let s = self.graph.node(source)?;
        let t = self.graph.node(target)?;
        s.outgoing
            .iter()
            .any(|id| id == target)
            .then(|| edge_curve(s, t))
    }

    /// Closest edge within hover distance of `p` (virtual units).  The delete
    /// button of the edge already hovered keeps it hovered.
    fn edge_near(&self, p: Point) -> Option<(String, String)> {
        if let Some((source, target)) = &self.hovered_edge {
            if let Some(curve) = self.curve_for(source, target) {
                if curve.label_anchor().distance_to(p) <= EDGE_DELETE_RADIUS {
                    return Some((source.clone(), target.clone()));
                }
            }
        }
        let mut best: Option<(f64, &str, &str)> = None;
        for (source, target) in self.graph.edges() {
            let Some(curve) = self.curve_for(source, target) else {
                continue;
            };
            let d = curve.distance_to(p);
            if d <= EDGE_HOVER_DISTANCE && best.map_or(true, |(bd, _, _)| d < bd) {
                best = Some((d, source, target));
            }
        }
        best.map(|(_, s, t)| (s.to_string(), t.to_string()))
    }

    // ---------------------------------------------------------------------
    // Pointer events
    // ---------------------------------------------------------------------

    pub fn pointer_down(&mut self, screen: Point) -> PointerOutcome {
        if !screen.is_finite() {
            return PointerOutcome::None;
        }
        match self.hit_test(screen) {
            PointerTarget::OutputHandle(source_id) => {
                debug_log!("connection drag from {}", source_id);
                self.interaction = Interaction::ConnectingFrom {
                    source_id,
                    cursor: self.transform.screen_to_virtual(screen),
                };
                PointerOutcome::Redraw
            }
            // Input handles are only drop targets; pressing one grabs the card.
            PointerTarget::NodeBody(node_id) | PointerTarget::InputHandle(node_id) => {
                let changed = self.graph.selected_id() != Some(node_id.as_str());
                self.graph.select(Some(&node_id));
                self.interaction = Interaction::DraggingNode {
                    node_id,
                    last: screen,
                };
                if changed {
                    PointerOutcome::SelectionChanged
                } else {
                    PointerOutcome::Redraw
                }
            }
            PointerTarget::EdgeDelete { source, target } => {
                self.interaction = Interaction::Idle;
                PointerOutcome::ConfirmDisconnect { source, target }
            }
            PointerTarget::Background => {
                self.interaction = Interaction::Panning { last: screen };
                PointerOutcome::None
            }
        }
    }

    pub fn pointer_move(&mut self, screen: Point) -> PointerOutcome {
        if !screen.is_finite() {
            return PointerOutcome::None;
        }
        if self.interaction.is_idle() {
            let hovered = self.edge_near(self.transform.screen_to_virtual(screen));
            if hovered == self.hovered_edge {
                return PointerOutcome::None;
            }
            self.hovered_edge = hovered;
            return PointerOutcome::Redraw;
        }
        match &mut self.interaction {
            Interaction::Idle => PointerOutcome::None,
            Interaction::Panning { last } => {
                let delta = Point::new(screen.x - last.x, screen.y - last.y);
                *last = screen;
                self.transform.apply_pan(delta);
                PointerOutcome::Redraw
            }
            Interaction::DraggingNode { node_id, last } => {
                let delta = self
                    .transform
                    .screen_delta_to_virtual(Point::new(screen.x - last.x, screen.y - last.y));
                *last = screen;
                self.graph.move_node(node_id, delta);
                PointerOutcome::Redraw
            }
            Interaction::ConnectingFrom { cursor, .. } => {
                *cursor = self.transform.screen_to_virtual(screen);
                PointerOutcome::Redraw
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Point) -> PointerOutcome {
        let session = std::mem::take(&mut self.interaction);
        match session {
            Interaction::Idle => PointerOutcome::None,
            Interaction::ConnectingFrom { source_id, .. } => {
                if screen.is_finite() {
                    let p = self.transform.screen_to_virtual(screen);
                    if let Some(target) = self.input_handle_at(p) {
                        if self.graph.connect(&source_id, &target) {
                            return PointerOutcome::Connected {
                                source: source_id,
                                target,
                            };
                        }
                    }
                }
                PointerOutcome::Redraw
            }
            Interaction::Panning { .. } | Interaction::DraggingNode { .. } => {
                PointerOutcome::Redraw
            }
        }
    }

    /// The cursor left the canvas: the session ends without side effects.
    pub fn pointer_leave(&mut self) -> PointerOutcome {
        let was_idle = self.interaction.is_idle();
        self.interaction = Interaction::Idle;
        let had_hover = self.hovered_edge.take().is_some();
        if was_idle && !had_hover {
            PointerOutcome::None
        } else {
            PointerOutcome::Redraw
        }
    }

    // ---------------------------------------------------------------------
    // Viewport
    // ---------------------------------------------------------------------

    pub fn wheel(&mut self, delta_y: f64) {
        self.transform.apply_zoom(delta_y);
    }

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.transform.reset();
    }

    // ---------------------------------------------------------------------
    // Graph edits
    // ---------------------------------------------------------------------

    /// Places a new card centred on what the user currently sees.
    pub fn add_node_at_center(&mut self, kind: NodeKind, width: f64, height: f64) -> String {
        let center = self.transform.visible_center(width, height);
        self.add_node_at(
            kind,
            Point::new(center.x - NEW_NODE_OFFSET_X, center.y - NEW_NODE_OFFSET_Y),
        )
    }

    pub fn add_node_at(&mut self, kind: NodeKind, position: Point) -> String {
        self.graph.add_node(kind, position).id.clone()
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.graph.select(id);
    }

    pub fn update_field(&mut self, id: &str, field: NodeField, value: &str) {
        self.graph.update_field(id, field, value);
    }

    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        self.graph.connect(source, target)
    }

    pub fn disconnect(&mut self, source: &str, target: &str) -> bool {
        let removed = self.graph.disconnect(source, target);
        if self.hovered_edge() == Some((source, target)) {
            self.hovered_edge = None;
        }
        removed
    }

    pub fn delete_node(&mut self, id: &str) {
        self.graph.delete_node(id);
        let touches = |(s, t): &(String, String)| s == id || t == id;
        if self.hovered_edge.as_ref().is_some_and(touches) {
            self.hovered_edge = None;
        }
        let stale = match &self.interaction {
            Interaction::DraggingNode { node_id, .. } => node_id == id,
            Interaction::ConnectingFrom { source_id, .. } => source_id == id,
            _ => false,
        };
        if stale {
            self.interaction = Interaction::Idle;
        }
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    pub fn scene(&self) -> Scene {
        let selected = self.graph.selected_id();
        let connecting = self.interaction.connecting_source();

        let nodes = self
            .graph
            .nodes()
            .iter()
            .map(|n| NodeView {
                id: n.id.clone(),
                kind: n.kind,
                label: n.label.clone(),
                content: n.content.clone(),
                trigger: n.trigger.clone(),
                rect: node_rect(n),
                input_anchor: input_anchor(n),
                output_anchor: output_anchor(n),
                selected: selected == Some(n.id.as_str()),
                input_highlighted: connecting.is_some_and(|s| s != n.id),
                output_active: connecting == Some(n.id.as_str()),
            })
            .collect();

        let edges = self
            .graph
            .edges()
            .filter_map(|(source, target)| {
                let curve = self.curve_for(source, target)?;
                let trigger = self
                    .graph
                    .node(target)
                    .map(|t| t.trigger.clone())
                    .filter(|t| !t.is_empty());
                Some(EdgeView {
                    source: source.to_string(),
                    target: target.to_string(),
                    midpoint: curve.label_anchor(),
                    curve,
                    trigger,
                    hovered: self.hovered_edge() == Some((source, target)),
                })
            })
            .collect();

        let provisional_edge = match &self.interaction {
            Interaction::ConnectingFrom { source_id, cursor } => self
                .graph
                .node(source_id)
                .map(|s| EdgeCurve::between(output_anchor(s), *cursor)),
            _ => None,
        };

        Scene {
            transform: self.transform,
            edges,
            nodes,
            provisional_edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HANDLE_OFFSET_Y, NODE_WIDTH};

    fn two_nodes() -> (FlowEditor, String, String) {
        let mut editor = FlowEditor::new();
        let a = editor.add_node_at(NodeKind::Message, Point::new(100.0, 100.0));
        let b = editor.add_node_at(NodeKind::Menu, Point::new(400.0, 100.0));
        (editor, a, b)
    }

    fn output_of(x: f64, y: f64) -> Point {
        Point::new(x + NODE_WIDTH, y + HANDLE_OFFSET_Y)
    }

    #[test]
    fn hit_test_prefers_handles_over_bodies() {
        let (editor, a, b) = two_nodes();
        assert_eq!(
            editor.hit_test(output_of(100.0, 100.0)),
            PointerTarget::OutputHandle(a.clone())
        );
        assert_eq!(
            editor.hit_test(Point::new(400.0, 142.0)),
            PointerTarget::InputHandle(b)
        );
        assert_eq!(
            editor.hit_test(Point::new(150.0, 110.0)),
            PointerTarget::NodeBody(a)
        );
        assert_eq!(editor.hit_test(Point::new(50.0, 400.0)), PointerTarget::Background);
    }

    #[test]
    fn topmost_node_wins_on_overlap() {
        let mut editor = FlowEditor::new();
        editor.add_node_at(NodeKind::Message, Point::new(0.0, 0.0));
        let top = editor.add_node_at(NodeKind::Input, Point::new(30.0, 10.0));
        assert_eq!(editor.hit_test(Point::new(60.0, 30.0)), PointerTarget::NodeBody(top));
    }

    #[test]
    fn dragging_divides_by_scale_and_selects() {
        let (mut editor, a, _) = two_nodes();
        editor.select(None);
        editor.zoom_in();
        editor.zoom_in();
        editor.zoom_in();
        editor.zoom_in();
        editor.zoom_in(); // scale 2.0
        let start = editor.transform().virtual_to_screen(Point::new(150.0, 120.0));
        assert_eq!(editor.pointer_down(start), PointerOutcome::SelectionChanged);
        editor.pointer_move(Point::new(start.x + 20.0, start.y + 10.0));
        editor.pointer_up(Point::new(start.x + 20.0, start.y + 10.0));
        let node = editor.graph().node(&a).unwrap();
        assert!((node.x - 110.0).abs() < 1e-9);
        assert!((node.y - 105.0).abs() < 1e-9);
        assert_eq!(editor.graph().selected_id(), Some(a.as_str()));
        assert!(editor.interaction().is_idle());
    }

    #[test]
    fn background_drag_pans_in_screen_units() {
        let (mut editor, _, _) = two_nodes();
        editor.zoom_out();
        editor.pointer_down(Point::new(10.0, 500.0));
        editor.pointer_move(Point::new(40.0, 520.0));
        assert_eq!(editor.transform().translate_x, 30.0);
        assert_eq!(editor.transform().translate_y, 20.0);
        editor.pointer_leave();
        assert!(editor.interaction().is_idle());
    }

    #[test]
    fn connection_drag_onto_input_handle_connects() {
        let (mut editor, a, b) = two_nodes();
        editor.pointer_down(output_of(100.0, 100.0));
        editor.pointer_move(Point::new(350.0, 150.0));
        assert!(editor.scene().provisional_edge.is_some());
        let outcome = editor.pointer_up(Point::new(402.0, 140.0));
        assert_eq!(
            outcome,
            PointerOutcome::Connected { source: a.clone(), target: b.clone() }
        );
        assert_eq!(editor.graph().node(&a).unwrap().outgoing, vec![b]);
        assert!(editor.scene().provisional_edge.is_none());
    }

    #[test]
    fn released_connection_over_background_is_discarded() {
        let (mut editor, a, _) = two_nodes();
        editor.pointer_down(output_of(100.0, 100.0));
        assert_eq!(editor.interaction().connecting_source(), Some(a.as_str()));
        editor.pointer_move(Point::new(500.0, 500.0));
        let cursor = match editor.interaction() {
            Interaction::ConnectingFrom { cursor, .. } => *cursor,
            other => panic!("unexpected session {other:?}"),
        };
        assert_eq!(cursor, Point::new(500.0, 500.0));
        editor.pointer_up(Point::new(700.0, 500.0));
        assert!(editor.interaction().is_idle());
        assert_eq!(editor.graph().edges().count(), 0);
        assert!(editor.scene().provisional_edge.is_none());
    }

    #[test]
    fn drop_on_input_next_to_an_output_handle_connects() {
        let mut editor = FlowEditor::new();
        let a = editor.add_node_at(NodeKind::Message, Point::new(100.0, 100.0));
        let b = editor.add_node_at(NodeKind::Menu, Point::new(316.0, 100.0));
        // A's output (308,142) and B's input (316,142) overlap within the hit radius.
        editor.pointer_down(Point::new(308.0, 142.0));
        editor.pointer_move(Point::new(316.0, 142.0));
        let outcome = editor.pointer_up(Point::new(316.0, 142.0));
        assert_eq!(
            outcome,
            PointerOutcome::Connected { source: a.clone(), target: b.clone() }
        );
        assert_eq!(editor.graph().node(&a).unwrap().outgoing, vec![b]);
    }

    #[test]
    fn connecting_a_node_to_itself_does_nothing() {
        let (mut editor, a, _) = two_nodes();
        editor.pointer_down(output_of(100.0, 100.0));
        let outcome = editor.pointer_up(Point::new(100.0, 142.0));
        assert_eq!(outcome, PointerOutcome::Redraw);
        assert!(editor.graph().node(&a).unwrap().outgoing.is_empty());
    }

    #[test]
    fn hovering_an_edge_reveals_its_delete_button() {
        let (mut editor, a, b) = two_nodes();
        editor.connect(&a, &b);
        // Straight edge from (308,142) to (400,142); midpoint (354,142).
        assert_eq!(editor.pointer_move(Point::new(330.0, 145.0)), PointerOutcome::Redraw);
        assert_eq!(editor.hovered_edge(), Some((a.as_str(), b.as_str())));
        let outcome = editor.pointer_down(Point::new(354.0, 142.0));
        assert_eq!(
            outcome,
            PointerOutcome::ConfirmDisconnect { source: a.clone(), target: b.clone() }
        );
        // Nothing is removed until the shell confirms.
        assert_eq!(editor.graph().edges().count(), 1);
        assert!(editor.disconnect(&a, &b));
        assert!(editor.hovered_edge().is_none());
    }

    #[test]
    fn delete_affordance_needs_hover_first() {
        let (mut editor, a, b) = two_nodes();
        editor.connect(&a, &b);
        assert_eq!(editor.hit_test(Point::new(354.0, 142.0)), PointerTarget::Background);
    }

    #[test]
    fn scene_shows_target_trigger_on_edge() {
        let (mut editor, a, b) = two_nodes();
        editor.connect(&a, &b);
        editor.update_field(&b, NodeField::Trigger, "preço");
        let scene = editor.scene();
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.edges[0].trigger.as_deref(), Some("preço"));
        assert_eq!(scene.edges[0].midpoint, Point::new(354.0, 142.0));
        let menu = scene.nodes.iter().find(|n| n.id == b).unwrap();
        assert!(menu.rect.height > 84.0);
    }

    #[test]
    fn connecting_highlights_other_inputs() {
        let (mut editor, a, b) = two_nodes();
        editor.pointer_down(output_of(100.0, 100.0));
        let scene = editor.scene();
        let source = scene.nodes.iter().find(|n| n.id == a).unwrap();
        let target = scene.nodes.iter().find(|n| n.id == b).unwrap();
        assert!(source.output_active && !source.input_highlighted);
        assert!(target.input_highlighted);
    }

    #[test]
    fn new_nodes_land_in_the_visible_center() {
        let mut editor = FlowEditor::new();
        let id = editor.add_node_at_center(NodeKind::Message, 800.0, 600.0);
        let node = editor.graph().node(&id).unwrap();
        assert_eq!(node.position(), Point::new(300.0, 250.0));
    }

    #[test]
    fn deleting_the_dragged_node_ends_the_session() {
        let (mut editor, a, _) = two_nodes();
        editor.pointer_down(Point::new(150.0, 110.0));
        editor.delete_node(&a);
        assert!(editor.interaction().is_idle());
        assert_eq!(editor.pointer_move(Point::new(0.0, 0.0)), PointerOutcome::None);
    }

    #[test]
    fn load_resets_view_and_selection() {
        let (mut editor, _, _) = two_nodes();
        editor.zoom_in();
        editor.pointer_down(Point::new(10.0, 500.0));
        editor.pointer_move(Point::new(60.0, 500.0));
        let nodes = editor.to_wire();
        editor.load(nodes.clone());
        assert_eq!(*editor.transform(), ViewportTransform::identity());
        assert!(editor.graph().selected().is_none());
        assert!(editor.interaction().is_idle());
        assert_eq!(editor.to_wire(), nodes);
    }
}
