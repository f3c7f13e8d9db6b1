pub mod api_client;
pub mod config;
pub mod error;
pub mod gateway;

pub use api_client::ApiClient;
pub use error::GatewayError;

use config::ApiConfig;
use lazy_static::lazy_static;
use std::sync::RwLock;
use wasm_bindgen::prelude::*;

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

fn store_config(config: ApiConfig) {
    match API_CONFIG.write() {
        Ok(mut guard) => *guard = Some(config),
        Err(poisoned) => *poisoned.into_inner() = Some(config),
    }
}

/// Initialise the API configuration from build-time environment variables.
pub fn init_api_config() {
    let config = ApiConfig::new();
    crate::debug_log!(
        "API base URL {} (offline fallback {})",
        config.base_url(),
        config.offline_fallback()
    );
    store_config(config);
}

/// Point the gateway at another backend at runtime.  The offline fallback
/// setting is kept.
#[wasm_bindgen]
pub fn init_api_config_js(api_base_url: &str) -> Result<(), JsValue> {
    if api_base_url.trim().is_empty() {
        return Err(JsValue::from_str("API base URL must not be empty"));
    }
    crate::debug_log!("Initializing API config from JS: {}", api_base_url);
    let config = get_api_config().with_url(api_base_url);
    store_config(config);
    Ok(())
}

/// Current configuration, or the default one before initialisation.
pub(crate) fn get_api_config() -> ApiConfig {
    let guard = match API_CONFIG.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.clone().unwrap_or_default()
}
