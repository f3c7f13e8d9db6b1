use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::state::dispatch_global_message;

pub const ZOOM_LABEL_ID: &str = "zoom-level";

/// Zoom percentage as shown next to the buttons.
pub fn zoom_label(scale: f64) -> String {
    format!("{}%", (scale * 100.0).round() as i64)
}

pub fn render(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let controls = document.create_element("div")?;
    controls.set_id("zoom-controls");
    controls.set_class_name("zoom-controls");

    let buttons: [(&str, &str, &str, Message); 3] = [
        ("zoom-out", "−", "Zoom out (-)", Message::ZoomOut),
        ("zoom-reset", "⟲", "Reset view (0)", Message::ResetView),
        ("zoom-in", "+", "Zoom in (+)", Message::ZoomIn),
    ];
    for (id, text, title, msg) in buttons {
        let button = document.create_element("button")?;
        button.set_id(id);
        button.set_attribute("type", "button")?;
        button.set_attribute("title", title)?;
        button.set_text_content(Some(text));
        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(msg.clone());
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
        controls.append_child(&button)?;
    }

    let label = document.create_element("span")?;
    label.set_id(ZOOM_LABEL_ID);
    label.set_class_name("zoom-level");
    label.set_text_content(Some(&zoom_label(1.0)));
    controls.append_child(&label)?;

    parent.append_child(&controls)?;
    Ok(())
}

pub fn refresh(document: &Document, scale: f64) {
    if let Some(label) = document.get_element_by_id(ZOOM_LABEL_ID) {
        label.set_text_content(Some(&zoom_label(scale)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_label_rounds_to_percent() {
        assert_eq!(zoom_label(1.0), "100%");
        assert_eq!(zoom_label(1.2000000000000002), "120%");
        assert_eq!(zoom_label(0.1), "10%");
    }
}
