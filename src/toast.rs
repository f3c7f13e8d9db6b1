//! Tiny toast / notification helper.
//! Creates a `#toast-root` container once per page and appends toast divs that
//! disappear after a few seconds.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::TOAST_DURATION_MS;

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Info => "toast-info",
        }
    }
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

pub fn info(msg: &str) {
    show(msg, ToastKind::Info);
}

pub fn show(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Err(e) = try_show(&document, message, kind) {
        crate::warn_log!("Toast failed: {:?}", e);
    }
}

fn try_show(document: &Document, message: &str, kind: ToastKind) -> Result<(), JsValue> {
    let root = ensure_root(document)?;

    let toast = document.create_element("div")?;
    toast.set_class_name(&format!("toast {}", kind.class()));
    toast.set_text_content(Some(message));

    // Newest on top
    root.prepend_with_node_1(&toast)?;

    Timeout::new(TOAST_DURATION_MS, move || toast.remove()).forget();
    Ok(())
}

fn ensure_root(document: &Document) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Ok(el);
    }
    let root = document.create_element("div")?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    document
        .body()
        .ok_or_else(|| JsValue::from_str("No body found"))?
        .append_child(&root)?;
    Ok(root)
}
