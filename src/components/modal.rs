//! Shared modal helper and the confirmation dialog for destructive actions.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::dom_utils;
use crate::messages::Message;
use crate::state::{dispatch_global_message, PendingConfirmation};

pub const CONFIRM_MODAL_ID: &str = "confirm-modal";

/// Ensure a `<div id="{id}" class="modal">` backdrop with a
/// `.modal-content` child exists and return both.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name("modal");
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("No body found"))?
            .append_child(&el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };

    Ok((backdrop, content))
}

pub fn show(modal_backdrop: &Element) {
    dom_utils::show(modal_backdrop);
}

pub fn hide(modal_backdrop: &Element) {
    dom_utils::hide(modal_backdrop);
}

/// Shows the dialog for `pending`, or hides it when nothing awaits
/// confirmation.
pub fn refresh_confirm(document: &Document, pending: Option<&PendingConfirmation>) -> Result<(), JsValue> {
    let Some(pending) = pending else {
        if let Some(backdrop) = document.get_element_by_id(CONFIRM_MODAL_ID) {
            hide(&backdrop);
        }
        return Ok(());
    };

    let (backdrop, content) = ensure_modal(document, CONFIRM_MODAL_ID)?;
    content.set_inner_html("");

    let text = document.create_element("p")?;
    text.set_class_name("confirm-text");
    text.set_text_content(Some(&pending.prompt()));
    content.append_child(&text)?;

    let buttons = document.create_element("div")?;
    buttons.set_class_name("modal-buttons");

    let cancel = document.create_element("button")?;
    cancel.set_id("confirm-cancel");
    cancel.set_attribute("type", "button")?;
    cancel.set_text_content(Some("Cancel"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::CancelPending);
    }) as Box<dyn FnMut(_)>);
    cancel.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    buttons.append_child(&cancel)?;

    let confirm = document.create_element("button")?;
    confirm.set_id("confirm-ok");
    confirm.set_class_name("btn-danger");
    confirm.set_attribute("type", "button")?;
    confirm.set_text_content(Some(match pending {
        PendingConfirmation::DeleteNode { .. } => "Delete",
        PendingConfirmation::Disconnect { .. } => "Remove",
    }));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::ConfirmPending);
    }) as Box<dyn FnMut(_)>);
    confirm.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    buttons.append_child(&confirm)?;

    content.append_child(&buttons)?;
    show(&backdrop);
    Ok(())
}
