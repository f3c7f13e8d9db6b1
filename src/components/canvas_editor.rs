//! Canvas element of the flow editor.  All pointer input is captured on the
//! canvas itself and routed into the editor's state machine as messages.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, HtmlCanvasElement,
    KeyboardEvent, MouseEvent, WheelEvent,
};

use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

pub const CANVAS_ID: &str = "flow-canvas";
pub const CONTAINER_ID: &str = "canvas-container";

pub fn setup_canvas(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let container = document.create_element("div")?;
    container.set_id(CONTAINER_ID);
    container.set_class_name("canvas-container");

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(CANVAS_ID);
    // Focusable so keyboard shortcuts reach it.
    canvas.set_tab_index(0);
    container.append_child(&canvas)?;
    parent.append_child(&container)?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.canvas = Some(canvas.clone());
        state.context = Some(context);
    });

    resize_canvas(&canvas)?;
    setup_pointer_events(&canvas)?;
    setup_keyboard_shortcuts(&canvas)?;
    setup_resize_handler(&canvas)?;

    Ok(())
}

/// Matches the backing store to the container size and device pixel ratio.
pub fn resize_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let Some(container) = canvas.parent_element() else {
        return Ok(());
    };
    let width = container.client_width().max(1) as f64;
    let height = container.client_height().max(1) as f64;
    let dpr = window.device_pixel_ratio();

    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    canvas.style().set_property("width", &format!("{}px", width))?;
    canvas.style().set_property("height", &format!("{}px", height))?;

    APP_STATE.with(|state| {
        state.borrow_mut().device_pixel_ratio = dpr;
    });
    dispatch_global_message(Message::CanvasResized { width, height });
    Ok(())
}

fn setup_resize_handler(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let canvas_clone = canvas.clone();
    let resize_callback = Closure::wrap(Box::new(move || {
        if let Err(e) = resize_canvas(&canvas_clone) {
            crate::warn_log!("Canvas resize failed: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
    resize_callback.forget();
    Ok(())
}

fn setup_pointer_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let mousedown = Closure::wrap(Box::new(move |event: MouseEvent| {
        // Left button only
        if event.button() != 0 {
            return;
        }
        event.prevent_default();
        if let Some(target) = event.current_target() {
            if let Ok(el) = target.dyn_into::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
        }
        dispatch_global_message(Message::CanvasPointerDown {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
    mousedown.forget();

    let mousemove = Closure::wrap(Box::new(move |event: MouseEvent| {
        dispatch_global_message(Message::CanvasPointerMove {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
    mousemove.forget();

    let mouseup = Closure::wrap(Box::new(move |event: MouseEvent| {
        dispatch_global_message(Message::CanvasPointerUp {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
    mouseup.forget();

    let mouseleave = Closure::wrap(Box::new(move |_event: MouseEvent| {
        dispatch_global_message(Message::CanvasPointerLeave);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseleave", mouseleave.as_ref().unchecked_ref())?;
    mouseleave.forget();

    // Non-passive so the page does not scroll while zooming.
    let wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
        event.prevent_default();
        dispatch_global_message(Message::CanvasWheel {
            delta_y: event.delta_y(),
        });
    }) as Box<dyn FnMut(_)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    canvas.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        wheel.as_ref().unchecked_ref(),
        &options,
    )?;
    wheel.forget();

    Ok(())
}

/// Key handling for the focused canvas.  Returns the message for a key, if
/// it is bound.
pub fn shortcut_for_key(key: &str) -> Option<Message> {
    match key {
        "Delete" | "Backspace" => Some(Message::RequestDeleteSelected),
        "+" | "=" => Some(Message::ZoomIn),
        "-" | "_" => Some(Message::ZoomOut),
        "0" => Some(Message::ResetView),
        _ => None,
    }
}

fn setup_keyboard_shortcuts(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }
        if let Some(msg) = shortcut_for_key(&event.key()) {
            event.prevent_default();
            dispatch_global_message(msg);
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_map_to_editor_messages() {
        assert!(matches!(shortcut_for_key("Delete"), Some(Message::RequestDeleteSelected)));
        assert!(matches!(shortcut_for_key("Backspace"), Some(Message::RequestDeleteSelected)));
        assert!(matches!(shortcut_for_key("+"), Some(Message::ZoomIn)));
        assert!(matches!(shortcut_for_key("-"), Some(Message::ZoomOut)));
        assert!(matches!(shortcut_for_key("0"), Some(Message::ResetView)));
        assert!(shortcut_for_key("a").is_none());
    }
}
