use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the persistence gateway.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The request never produced an HTTP response (backend down, CORS,
    /// network error).  Only this variant triggers the offline fallback.
    #[error("Backend unreachable: {0}")]
    Transport(String),

    #[error("API Error: {code} {text}")]
    Status { code: u16, text: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Local storage unavailable: {0}")]
    Storage(String),
}

impl GatewayError {
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    pub(crate) fn transport(value: JsValue) -> Self {
        GatewayError::Transport(js_text(&value))
    }

    pub(crate) fn storage(value: JsValue) -> Self {
        GatewayError::Storage(js_text(&value))
    }
}

fn js_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl From<GatewayError> for JsValue {
    fn from(err: GatewayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}
