use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::components::{backend_offline, canvas_editor, flow_header, inspector, node_palette, zoom_controls};

pub const STATUS_ID: &str = "flow-status";

/// Builds the editor layout: header, palette | canvas | inspector, status bar.
pub fn create_base_ui(document: &Document) -> Result<(), JsValue> {
    let body = document.body().ok_or(JsValue::from_str("No body found"))?;

    let app = document.create_element("div")?;
    app.set_id("flow-app");
    app.set_class_name("flow-app");
    body.append_child(&app)?;

    flow_header::render(document, &app)?;

    let main = document.create_element("div")?;
    main.set_class_name("flow-main");
    app.append_child(&main)?;

    node_palette::render(document, &main)?;

    let stage = document.create_element("div")?;
    stage.set_class_name("flow-stage");
    main.append_child(&stage)?;
    canvas_editor::setup_canvas(document, &stage)?;
    zoom_controls::render(document, &stage)?;
    backend_offline::render(document, &stage)?;

    inspector::render(document, &main)?;

    let status_bar = create_status_bar(document)?;
    app.append_child(&status_bar)?;
    Ok(())
}

fn create_status_bar(document: &Document) -> Result<Element, JsValue> {
    let status_bar = document.create_element("div")?;
    status_bar.set_class_name("status-bar");

    let status = document.create_element("div")?;
    status.set_id(STATUS_ID);
    status.set_class_name("yellow");
    status.set_text_content(Some("Loading flow..."));
    status_bar.append_child(&status)?;

    Ok(status_bar)
}

/// `color` is one of the stylesheet's "red", "yellow" or "green" classes.
pub fn update_status(document: &Document, msg: &str, color: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_ID) {
        let class_list = el.class_list();
        for c in ["red", "yellow", "green"] {
            let _ = class_list.remove_1(c);
        }
        let _ = class_list.add_1(color);
        el.set_text_content(Some(msg));
    }
}
