//! Palette of node kinds.  Clicking an entry drops a new card in the middle
//! of the visible canvas.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MouseEvent};

use crate::messages::Message;
use crate::models::NodeKind;
use crate::state::dispatch_global_message;

pub const PALETTE_ID: &str = "node-palette";

fn description(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Message => "Send text to the customer",
        NodeKind::Input => "Wait for the customer's answer",
        NodeKind::Menu => "Offer a set of options",
    }
}

pub fn render(document: &Document, parent: &Element) -> Result<(), JsValue> {
    if document.get_element_by_id(PALETTE_ID).is_some() {
        return Ok(());
    }
    let palette = document.create_element("div")?;
    palette.set_id(PALETTE_ID);
    palette.set_class_name("node-palette");

    let title = document.create_element("h3")?;
    title.set_text_content(Some("Add step"));
    palette.append_child(&title)?;

    for kind in NodeKind::ALL {
        let item = document.create_element("button")?;
        item.set_id(&format!("palette-{}", kind.as_str()));
        item.set_class_name(&format!("palette-item palette-{}", kind.as_str()));
        item.set_attribute("type", "button")?;
        item.set_attribute("title", description(kind))?;
        item.set_text_content(Some(kind.default_label()));

        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
            dispatch_global_message(Message::AddNode(kind));
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();

        palette.append_child(&item)?;
    }

    parent.append_child(&palette)?;
    Ok(())
}
