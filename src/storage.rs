//! Local mock database used while the backend is unreachable.
//!
//! The whole database is one JSON document in `localStorage`.  Keys this
//! crate does not manage (products, media, ...) are carried through
//! untouched so other dashboard pages keep their data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::models::{Bot, BotStats, BotStatus, FlowNode};
use crate::network::error::GatewayError;

pub const MOCK_DB_KEY: &str = "hubsymples_mock_db_v1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockDb {
    #[serde(default)]
    pub bots: Vec<Bot>,
    /// Flow per bot id.
    #[serde(default)]
    pub flows: HashMap<String, Vec<FlowNode>>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl Default for MockDb {
    fn default() -> Self {
        Self::seed()
    }
}

impl MockDb {
    /// Demo data served on first use.  No flows are stored yet.
    pub fn seed() -> Self {
        Self {
            bots: vec![
                Bot {
                    id: "b1".into(),
                    name: "Atendimento Geral".into(),
                    phone_number: "5511999990001".into(),
                    status: BotStatus::Online,
                    ab_test_group: None,
                    stats: BotStats { conversations: 1240, sales: 45, revenue: 4500.0 },
                },
                Bot {
                    id: "b2".into(),
                    name: "Recuperação de Carrinho".into(),
                    phone_number: "5511999990002".into(),
                    status: BotStatus::Paused,
                    ab_test_group: None,
                    stats: BotStats { conversations: 85, sales: 12, revenue: 1200.0 },
                },
            ],
            flows: HashMap::new(),
            other: serde_json::Map::new(),
        }
    }

    /// Parses a stored document.  Missing or corrupt data yields the seed.
    pub fn parse(stored: Option<&str>) -> Self {
        match stored {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn_log!("Mock DB corrupted, reseeding: {}", e);
                Self::seed()
            }),
            None => Self::seed(),
        }
    }

    pub fn to_json(&self) -> Result<String, GatewayError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Unknown bots have an empty flow.
    pub fn flow(&self, bot_id: &str) -> Vec<FlowNode> {
        self.flows.get(bot_id).cloned().unwrap_or_default()
    }

    pub fn set_flow(&mut self, bot_id: &str, nodes: Vec<FlowNode>) {
        self.flows.insert(bot_id.to_string(), nodes);
    }
}

fn local_storage() -> Result<web_sys::Storage, GatewayError> {
    let window = web_sys::window().ok_or_else(|| GatewayError::Storage("no window".into()))?;
    window
        .local_storage()
        .map_err(GatewayError::storage)?
        .ok_or_else(|| GatewayError::Storage("localStorage disabled".into()))
}

pub fn load_mock_db() -> Result<MockDb, GatewayError> {
    let storage = local_storage()?;
    let stored = storage.get_item(MOCK_DB_KEY).map_err(GatewayError::storage)?;
    Ok(MockDb::parse(stored.as_deref()))
}

pub fn save_mock_db(db: &MockDb) -> Result<(), GatewayError> {
    let storage = local_storage()?;
    storage
        .set_item(MOCK_DB_KEY, &db.to_json()?)
        .map_err(GatewayError::storage)
}

/// Drops the stored document so the next read starts from the seed.
pub fn clear_mock_db() -> Result<(), JsValue> {
    local_storage()?.remove_item(MOCK_DB_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeKind, Point};

    #[test]
    fn missing_document_yields_seed() {
        let db = MockDb::parse(None);
        assert_eq!(db.bots.len(), 2);
        assert_eq!(db.bots[0].name, "Atendimento Geral");
        assert_eq!(db.bots[1].status, BotStatus::Paused);
        assert!(db.flows.is_empty());
        assert!(db.flow("b1").is_empty());
    }

    #[test]
    fn corrupt_document_yields_seed() {
        assert_eq!(MockDb::parse(Some("{not json")), MockDb::seed());
    }

    #[test]
    fn foreign_keys_survive_a_round_trip() {
        let raw = r#"{"bots":[],"flows":{},"products":[{"id":"p1"}],"media":[]}"#;
        let mut db = MockDb::parse(Some(raw));
        db.set_flow(
            "b1",
            vec![FlowNode::new("n1".into(), NodeKind::Message, Point::new(1.0, 2.0))],
        );
        let back: serde_json::Value = serde_json::from_str(&db.to_json().unwrap()).unwrap();
        assert_eq!(back["products"][0]["id"], "p1");
        assert_eq!(back["flows"]["b1"][0]["type"], "message");
        assert_eq!(MockDb::parse(Some(&db.to_json().unwrap())).flow("b1").len(), 1);
    }
}
