use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::error::GatewayError;
use super::get_api_config;

/// Thin REST client for the bot backend.  Bodies are returned as text and
/// decoded by the caller.
pub struct ApiClient;

impl ApiClient {
    pub async fn get_bots() -> Result<String, GatewayError> {
        Self::fetch_json("/bots", "GET", None).await
    }

    pub async fn get_flow(bot_id: &str) -> Result<String, GatewayError> {
        Self::fetch_json(&flow_path(bot_id), "GET", None).await
    }

    /// `payload` is the serialised `{ "nodes": [...] }` body.
    pub async fn save_flow(bot_id: &str, payload: &str) -> Result<String, GatewayError> {
        Self::fetch_json(&flow_path(bot_id), "POST", Some(payload)).await
    }

    async fn fetch_json(
        path: &str,
        method: &str,
        body: Option<&str>,
    ) -> Result<String, GatewayError> {
        use wasm_bindgen::JsValue;
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let url = get_api_config().url(path);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(GatewayError::transport)?;
        headers
            .append("Content-Type", "application/json")
            .map_err(GatewayError::transport)?;
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
        }
        opts.set_headers(&headers);

        let request =
            Request::new_with_str_and_init(&url, &opts).map_err(GatewayError::transport)?;

        let window =
            web_sys::window().ok_or_else(|| GatewayError::Transport("no window".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(GatewayError::transport)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(GatewayError::transport)?;

        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        if !resp.ok() {
            return Err(status_error(resp.status(), &resp.status_text(), &text));
        }
        Ok(text)
    }
}

fn flow_path(bot_id: &str) -> String {
    format!("/bots/{}/flow", bot_id)
}

/// Prefers the `message` field of a JSON error body over the status line.
pub(crate) fn status_error(code: u16, status_text: &str, body: &str) -> GatewayError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
    GatewayError::Status {
        code,
        text: message.unwrap_or_else(|| status_text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_backend_message() {
        let err = status_error(422, "Unprocessable Entity", r#"{"message":"flow too large"}"#);
        assert_eq!(err.to_string(), "API Error: 422 flow too large");
    }

    #[test]
    fn status_error_falls_back_to_status_text() {
        let err = status_error(500, "Internal Server Error", "<html>oops</html>");
        assert_eq!(
            err,
            GatewayError::Status { code: 500, text: "Internal Server Error".into() }
        );
        assert!(!err.is_transport());
    }

    #[test]
    fn flow_path_is_per_bot() {
        assert_eq!(flow_path("b1"), "/bots/b1/flow");
    }
}
