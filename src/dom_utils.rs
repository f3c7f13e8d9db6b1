//! Thin helper layer for repetitive DOM operations.

use web_sys::{Document, Element};

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}
