use wasm_bindgen_test::*;

use crate::components::{inspector, zoom_controls};
use crate::models::{FlowNode, NodeKind, Point};
use crate::ui::setup;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn base_ui_builds_editor_layout() {
    let document = document();
    setup::create_base_ui(&document).unwrap();

    assert!(document.get_element_by_id("flow-canvas").is_some());
    assert!(document.get_element_by_id(inspector::INSPECTOR_ID).is_some());
    let status = document.get_element_by_id(setup::STATUS_ID).unwrap();
    assert_eq!(status.text_content().unwrap(), "Loading flow...");

    setup::update_status(&document, "Ready", "green");
    assert!(status.class_list().contains("green"));
    assert!(!status.class_list().contains("yellow"));
}

#[wasm_bindgen_test]
fn inspector_follows_selection() {
    let document = document();
    if document.get_element_by_id(inspector::INSPECTOR_ID).is_none() {
        setup::create_base_ui(&document).unwrap();
    }
    let mut node = FlowNode::new("n1".into(), NodeKind::Menu, Point::new(0.0, 0.0));
    node.trigger = "preço".into();

    inspector::refresh(&document, Some(&node)).unwrap();
    let panel = document.get_element_by_id(inspector::INSPECTOR_ID).unwrap();
    assert_eq!(panel.get_attribute("data-node-id").as_deref(), Some("n1"));

    inspector::refresh(&document, None).unwrap();
    assert_eq!(panel.get_attribute("data-node-id").as_deref(), Some(""));

    zoom_controls::refresh(&document, 1.2);
    let label = document.get_element_by_id(zoom_controls::ZOOM_LABEL_ID).unwrap();
    assert_eq!(label.text_content().unwrap(), zoom_controls::zoom_label(1.2));
}
