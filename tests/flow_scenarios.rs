//! End-to-end editor scenarios through the public `flow` API: the same
//! pointer sequences the canvas produces, followed by a save/load trip
//! through the wire format.

use flow_studio_frontend::constants::{HANDLE_OFFSET_Y, NODE_WIDTH};
use flow_studio_frontend::flow::{FlowEditor, PointerOutcome, PointerTarget};
use flow_studio_frontend::models::{FlowNode, FlowSavePayload, NodeField, NodeKind, Point};

fn output_handle(node: &FlowNode) -> Point {
    Point::new(node.x + NODE_WIDTH, node.y + HANDLE_OFFSET_Y)
}

fn input_handle(node: &FlowNode) -> Point {
    Point::new(node.x, node.y + HANDLE_OFFSET_Y)
}

fn build_welcome_flow() -> (FlowEditor, String, String) {
    let mut editor = FlowEditor::new();
    let welcome = editor.add_node_at(NodeKind::Message, Point::new(100.0, 100.0));
    let menu = editor.add_node_at(NodeKind::Menu, Point::new(400.0, 100.0));

    let from = output_handle(editor.graph().node(&welcome).unwrap());
    let to = input_handle(editor.graph().node(&menu).unwrap());
    editor.pointer_down(from);
    editor.pointer_move(Point::new(to.x - 30.0, to.y));
    let outcome = editor.pointer_up(to);
    assert_eq!(
        outcome,
        PointerOutcome::Connected { source: welcome.clone(), target: menu.clone() }
    );
    (editor, welcome, menu)
}

#[test]
fn build_connect_and_label_a_flow() {
    let (mut editor, welcome, menu) = build_welcome_flow();
    editor.update_field(&menu, NodeField::Trigger, "preço");

    let scene = editor.scene();
    assert_eq!(scene.nodes.len(), 2);
    assert_eq!(scene.edges.len(), 1);
    let edge = &scene.edges[0];
    assert_eq!((edge.source.as_str(), edge.target.as_str()), (welcome.as_str(), menu.as_str()));
    assert_eq!(edge.trigger.as_deref(), Some("preço"));
}

#[test]
fn saved_flow_reloads_identically() {
    let (mut editor, welcome, menu) = build_welcome_flow();
    editor.update_field(&menu, NodeField::Trigger, "preço");
    editor.update_field(&menu, NodeField::Content, "1) Prices\n2) Support");

    let body = serde_json::to_string(&FlowSavePayload { nodes: editor.to_wire() }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["nodes"][1]["type"], "menu");

    let payload: FlowSavePayload = serde_json::from_str(&body).unwrap();
    let mut reloaded = FlowEditor::new();
    reloaded.load(payload.nodes);
    assert_eq!(reloaded.to_wire(), editor.to_wire());
    assert!(reloaded.graph().selected_id().is_none());
    assert_eq!(reloaded.graph().node(&menu).unwrap().trigger, "preço");
    assert_eq!(reloaded.graph().node(&welcome).unwrap().outgoing, vec![menu.clone()]);
    assert_eq!(reloaded.scene().edges[0].trigger.as_deref(), Some("preço"));
}

#[test]
fn deleting_the_source_node_keeps_its_target() {
    let (mut editor, welcome, menu) = build_welcome_flow();
    editor.delete_node(&welcome);
    assert_eq!(editor.graph().len(), 1);
    assert!(editor.graph().node(&welcome).is_none());
    let remaining = editor.graph().node(&menu).unwrap();
    assert_eq!(remaining.kind, NodeKind::Menu);
    assert!(remaining.outgoing.is_empty());
    assert!(editor.scene().edges.is_empty());
}

#[test]
fn deleting_a_node_removes_edges_into_it() {
    let (mut editor, welcome, menu) = build_welcome_flow();
    editor.delete_node(&menu);
    assert_eq!(editor.graph().len(), 1);
    assert!(editor.graph().node(&welcome).unwrap().outgoing.is_empty());
    assert!(editor.scene().edges.is_empty());
}

#[test]
fn connection_released_on_background_is_dropped() {
    let (mut editor, welcome, menu) = build_welcome_flow();
    let from = output_handle(editor.graph().node(&menu).unwrap());
    editor.pointer_down(from);
    editor.pointer_move(Point::new(900.0, 500.0));
    assert!(editor.scene().provisional_edge.is_some());
    assert_eq!(editor.hit_test(Point::new(900.0, 500.0)), PointerTarget::Background);

    assert_eq!(editor.pointer_up(Point::new(900.0, 500.0)), PointerOutcome::Redraw);
    assert!(editor.scene().provisional_edge.is_none());
    assert!(editor.graph().node(&menu).unwrap().outgoing.is_empty());
    assert_eq!(editor.graph().node(&welcome).unwrap().outgoing, vec![menu]);
}

#[test]
fn zoomed_and_panned_view_still_hits_handles() {
    let (mut editor, _, menu) = build_welcome_flow();
    editor.zoom_in();
    editor.pointer_down(Point::new(20.0, 600.0));
    editor.pointer_move(Point::new(-80.0, 640.0));
    editor.pointer_up(Point::new(-80.0, 640.0));

    let node = editor.graph().node(&menu).unwrap().clone();
    let screen = editor.transform().virtual_to_screen(input_handle(&node));
    assert_eq!(editor.hit_test(screen), PointerTarget::InputHandle(menu));
}
