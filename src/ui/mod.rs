pub mod setup;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::components::{backend_offline, flow_header, inspector, modal, zoom_controls};
use crate::messages::Message;
use crate::state::{dispatch_global_message, APP_STATE};

// Animation loop: one AnimationTick per frame; the reducer repaints only when
// the canvas is dirty.
pub fn setup_animation_loop() {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        dispatch_global_message(Message::AnimationTick);
        request_frame(&f);
    }) as Box<dyn FnMut()>));

    request_frame(&g);
}

fn request_frame(handle: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(cb) = handle.borrow().as_ref() {
        if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            crate::error_log!("request_animation_frame failed: {:?}", e);
        }
    }
}

/// Brings every DOM panel in line with the current state.
pub fn refresh_panels() {
    let Some(document) = crate::dom_utils::document() else {
        return;
    };
    let result = APP_STATE.with(|state| {
        let state = state.borrow();
        flow_header::refresh(&document, &state)?;
        inspector::refresh(&document, state.editor.graph().selected())?;
        modal::refresh_confirm(&document, state.pending_confirmation.as_ref())?;
        backend_offline::refresh(&document, state.backend_error.as_deref());
        zoom_controls::refresh(&document, state.editor.transform().scale);
        let (text, color) = state.status_line();
        setup::update_status(&document, &text, color);
        Ok::<(), JsValue>(())
    });
    if let Err(e) = result {
        crate::warn_log!("Failed to refresh panels: {:?}", e);
    }
}
