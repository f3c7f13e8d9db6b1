//! Load/save contract for flows and the bot directory.
//!
//! Every call goes to the REST backend first.  When the backend cannot be
//! reached and the offline fallback is enabled, the same call is answered
//! from the local mock database after a short simulated latency.

use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

use super::api_client::ApiClient;
use super::error::GatewayError;
use super::get_api_config;
use crate::models::{Bot, FlowNode, FlowSavePayload};
use crate::storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Backend,
    /// Served from `localStorage` because the backend was unreachable.
    MockDb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Fetched<T> {
    fn backend(data: T) -> Self {
        Self { data, source: DataSource::Backend }
    }

    fn mock(data: T) -> Self {
        Self { data, source: DataSource::MockDb }
    }

    pub fn is_offline(&self) -> bool {
        self.source == DataSource::MockDb
    }
}

/// Decodes a flow body without trusting it.  Anything that is not a list of
/// well-formed nodes becomes an empty graph.
pub fn decode_flow(body: &str) -> Vec<FlowNode> {
    if body.trim().is_empty() {
        return Vec::new();
    }
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            warn_log!("Flow body is not JSON, using an empty graph: {}", e);
            return Vec::new();
        }
    };
    if !value.is_array() {
        warn_log!("Flow body is not a list, using an empty graph");
        return Vec::new();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn_log!("Flow body has malformed nodes, using an empty graph: {}", e);
        Vec::new()
    })
}

pub fn decode_bots(body: &str) -> Result<Vec<Bot>, GatewayError> {
    Ok(serde_json::from_str(body)?)
}

pub fn encode_save_payload(nodes: &[FlowNode]) -> Result<String, GatewayError> {
    let payload = FlowSavePayload { nodes: nodes.to_vec() };
    Ok(serde_json::to_string(&payload)?)
}

/// Backend errors other than transport failures are never masked.
fn should_fall_back(err: &GatewayError) -> bool {
    err.is_transport() && get_api_config().offline_fallback()
}

async fn simulate_latency(method: &str, path: &str) {
    warn_log!("[Mock API] Serving {} {} (Backend Offline)", method, path);
    TimeoutFuture::new(get_api_config().mock_latency_ms()).await;
}

pub async fn list_bots() -> Result<Fetched<Vec<Bot>>, GatewayError> {
    match ApiClient::get_bots().await {
        Ok(body) => Ok(Fetched::backend(decode_bots(&body)?)),
        Err(e) if should_fall_back(&e) => {
            simulate_latency("GET", "/bots").await;
            Ok(Fetched::mock(storage::load_mock_db()?.bots))
        }
        Err(e) => Err(e),
    }
}

pub async fn load_graph(bot_id: &str) -> Result<Fetched<Vec<FlowNode>>, GatewayError> {
    match ApiClient::get_flow(bot_id).await {
        Ok(body) => {
            let nodes = decode_flow(&body);
            debug_log!("Loaded {} nodes for bot {}", nodes.len(), bot_id);
            Ok(Fetched::backend(nodes))
        }
        Err(e) if should_fall_back(&e) => {
            simulate_latency("GET", &format!("/bots/{}/flow", bot_id)).await;
            Ok(Fetched::mock(storage::load_mock_db()?.flow(bot_id)))
        }
        Err(e) => Err(e),
    }
}

/// Whole-graph replace.  The latest save wins.
pub async fn save_graph(bot_id: &str, nodes: &[FlowNode]) -> Result<Fetched<()>, GatewayError> {
    let payload = encode_save_payload(nodes)?;
    match ApiClient::save_flow(bot_id, &payload).await {
        Ok(_) => Ok(Fetched::backend(())),
        Err(e) if should_fall_back(&e) => {
            simulate_latency("POST", &format!("/bots/{}/flow", bot_id)).await;
            let mut db = storage::load_mock_db()?;
            db.set_flow(bot_id, nodes.to_vec());
            storage::save_mock_db(&db)?;
            Ok(Fetched::mock(()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    #[test]
    fn non_array_bodies_decode_to_empty_graph() {
        assert!(decode_flow("").is_empty());
        assert!(decode_flow("null").is_empty());
        assert!(decode_flow(r#"{"nodes":[]}"#).is_empty());
        assert!(decode_flow("not json").is_empty());
    }

    #[test]
    fn malformed_nodes_decode_to_empty_graph() {
        assert!(decode_flow(r#"[{"id":"a","type":"message"}]"#).is_empty());
        assert!(decode_flow(r#"[{"id":"a","type":"video","label":"","content":"","trigger":"","x":0,"y":0}]"#).is_empty());
    }

    #[test]
    fn well_formed_body_decodes() {
        let body = r#"[
            {"id":"a","type":"message","label":"Hi","content":"Olá!","trigger":"","x":100,"y":100,"next":["b"]},
            {"id":"b","type":"menu","label":"Menu","content":"","trigger":"preço","x":400,"y":100}
        ]"#;
        let nodes = decode_flow(body);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].outgoing, vec!["b"]);
        assert_eq!(nodes[1].kind, NodeKind::Menu);
        assert!(nodes[1].outgoing.is_empty());
    }

    #[test]
    fn save_payload_wraps_nodes() {
        let nodes = decode_flow(
            r#"[{"id":"a","type":"input","label":"Ask","content":"","trigger":"","x":0,"y":0}]"#,
        );
        let body: Value = serde_json::from_str(&encode_save_payload(&nodes).unwrap()).unwrap();
        assert_eq!(body["nodes"][0]["id"], "a");
        assert_eq!(body["nodes"][0]["next"], serde_json::json!([]));
    }

    #[test]
    fn bot_listing_rejects_garbage() {
        assert!(matches!(decode_bots("{}"), Err(GatewayError::Decode(_))));
        assert_eq!(decode_bots("[]").unwrap().len(), 0);
    }
}
