//! Overlay shown over the canvas when the backend cannot be reached and no
//! offline data could be served.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::state::dispatch_global_message;

pub const OFFLINE_PANEL_ID: &str = "backend-offline";

pub fn render(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let panel = document.create_element("div")?;
    panel.set_id(OFFLINE_PANEL_ID);
    panel.set_class_name("backend-offline");
    dom_utils::hide(&panel);

    let title = document.create_element("h2")?;
    title.set_text_content(Some("Backend offline"));
    panel.append_child(&title)?;

    let detail = document.create_element("p")?;
    detail.set_id("backend-offline-detail");
    panel.append_child(&detail)?;

    let retry = document.create_element("button")?;
    retry.set_id("backend-retry");
    retry.set_class_name("btn-primary");
    retry.set_attribute("type", "button")?;
    retry.set_text_content(Some("Try again"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::RetryConnection);
    }) as Box<dyn FnMut(_)>);
    retry.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&retry)?;

    parent.append_child(&panel)?;
    Ok(())
}

pub fn refresh(document: &Document, error: Option<&str>) {
    let Some(panel) = document.get_element_by_id(OFFLINE_PANEL_ID) else {
        return;
    };
    match error {
        Some(err) => {
            if let Some(detail) = document.get_element_by_id("backend-offline-detail") {
                detail.set_text_content(Some(err));
            }
            dom_utils::show(&panel);
        }
        None => dom_utils::hide(&panel),
    }
}
