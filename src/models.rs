use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INPUT_LABEL, DEFAULT_MENU_LABEL, DEFAULT_MESSAGE_LABEL};

/// A position or offset on either the screen or the virtual canvas.  Which
/// space a value lives in is decided by the call site, not the type.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Kind of conversation step.  Only drives the default label and how the card
/// is painted; the editor treats all kinds the same.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Message,
    Input,
    Menu,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Message, NodeKind::Input, NodeKind::Menu];

    pub fn default_label(self) -> &'static str {
        match self {
            NodeKind::Message => DEFAULT_MESSAGE_LABEL,
            NodeKind::Input => DEFAULT_INPUT_LABEL,
            NodeKind::Menu => DEFAULT_MENU_LABEL,
        }
    }

    /// Wire name, also used for DOM ids and data attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Message => "message",
            NodeKind::Input => "input",
            NodeKind::Menu => "menu",
        }
    }
}

/// Editable text fields of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeField {
    Label,
    Content,
    Trigger,
}

/// FlowNode is one conversation step.  The serde shape is the wire contract
/// shared with the backend: `{ id, type, label, content, trigger, x, y, next }`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub content: String,
    /// Utterance that activates this node when it is the target of a
    /// connection.  Empty means default path.
    pub trigger: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "next", default)]
    pub outgoing: Vec<String>,
}

impl FlowNode {
    pub fn new(id: String, kind: NodeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            label: kind.default_label().to_string(),
            content: String::new(),
            trigger: String::new(),
            x: position.x,
            y: position.y,
            outgoing: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn field(&self, field: NodeField) -> &str {
        match field {
            NodeField::Label => &self.label,
            NodeField::Content => &self.content,
            NodeField::Trigger => &self.trigger,
        }
    }
}

/// Body of `POST /bots/{id}/flow`.
#[derive(Serialize, Deserialize, Debug)]
pub struct FlowSavePayload {
    pub nodes: Vec<FlowNode>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum BotStatus {
    #[serde(rename = "ONLINE")]
    Online,
    #[serde(rename = "OFFLINE")]
    Offline,
    /// Manually turned off.
    #[serde(rename = "PAUSADO")]
    Paused,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct BotStats {
    #[serde(default)]
    pub conversations: u64,
    #[serde(default)]
    pub sales: u64,
    #[serde(default)]
    pub revenue: f64,
}

/// Bot is a chatbot instance as listed by `GET /bots`.  Only used to pick
/// which flow is being edited.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    pub status: BotStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ab_test_group: Option<String>,
    #[serde(default)]
    pub stats: BotStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_wire_shape_uses_type_and_next() {
        let mut node = FlowNode::new("a1".into(), NodeKind::Menu, Point::new(400.0, 100.0));
        node.outgoing.push("b2".into());
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "menu");
        assert_eq!(value["next"][0], "b2");
        assert_eq!(value["label"], "Menu Opções");
        assert!(value.get("kind").is_none());
        assert!(value.get("outgoing").is_none());
    }

    #[test]
    fn missing_next_decodes_as_empty() {
        let node: FlowNode = serde_json::from_str(
            r#"{"id":"n","type":"input","label":"Ask","content":"","trigger":"","x":1,"y":2}"#,
        )
        .unwrap();
        assert!(node.outgoing.is_empty());
        assert_eq!(node.kind, NodeKind::Input);
    }

    #[test]
    fn bot_status_uses_backend_names() {
        let bot: Bot = serde_json::from_str(
            r#"{"id":"b2","name":"Cart","phoneNumber":"5511","status":"PAUSADO",
                "stats":{"conversations":85,"sales":12,"revenue":1200.0}}"#,
        )
        .unwrap();
        assert_eq!(bot.status, BotStatus::Paused);
        assert_eq!(bot.phone_number, "5511");
        assert_eq!(bot.stats.sales, 12);
    }
}
