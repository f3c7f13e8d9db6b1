use wasm_bindgen::prelude::*;

// Export convenience macros crate-wide
#[macro_use]
pub mod macros;

mod canvas;
mod command_executors;
mod components;
pub mod constants;
mod dom_utils;
pub mod flow;
mod messages;
pub mod models;
pub mod network;
mod reducers;
mod state;
pub mod storage;
mod toast;
mod ui;
mod update;

#[cfg(test)]
mod tests;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    // Compile-time settings first; bootstrap code may still override the
    // base URL through `init_api_config_js` before the first request goes out.
    network::init_api_config();

    let document = dom_utils::document().ok_or_else(|| JsValue::from_str("No document"))?;

    ui::setup::create_base_ui(&document)?;
    ui::setup_animation_loop();

    state::dispatch_global_message(messages::Message::LoadBots);
    Ok(())
}

/// Current flow as plain JS objects, in the shape the backend stores.
#[wasm_bindgen]
pub fn flow_snapshot() -> Result<JsValue, JsValue> {
    let nodes = state::with_state(|state| state.editor.to_wire())
        .ok_or_else(|| JsValue::from_str("Editor state is busy"))?;
    serde_wasm_bindgen::to_value(&nodes).map_err(JsValue::from)
}

/// Drops the browser-local offline database and reloads the bot list, so the
/// next offline session starts from the seeded demo data.
#[wasm_bindgen]
pub fn reset_mock_db() -> Result<(), JsValue> {
    storage::clear_mock_db()?;
    toast::info("Offline data reset");
    state::dispatch_global_message(messages::Message::MockDbReset);
    Ok(())
}
