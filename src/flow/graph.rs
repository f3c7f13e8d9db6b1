//! In-memory node collection for the flow being edited.
//!
//! All mutations go through `GraphStore` so the graph invariants hold at rest:
//! node ids are unique, `outgoing` never names its own node, never repeats a
//! target and never references a node that is not in the store.

use std::collections::HashSet;

use crate::models::{FlowNode, NodeField, NodeKind, Point};

#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    // Paint order: later nodes are drawn on top.
    nodes: Vec<FlowNode>,
    selected: Option<String>,
}

fn new_node_id() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    token[..9].to_string()
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<FlowNode>) -> Self {
        let mut store = Self::new();
        store.replace_all(nodes);
        store
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Every connection as `(source, target)`, in node then outgoing order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes
            .iter()
            .flat_map(|n| n.outgoing.iter().map(move |t| (n.id.as_str(), t.as_str())))
    }

    pub fn selected(&self) -> Option<&FlowNode> {
        self.selected.as_deref().and_then(|id| self.node(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selecting an unknown id clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.contains(id)).map(str::to_string);
    }

    /// Creates a node with a fresh id and its kind's default label, and
    /// selects it.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> &FlowNode {
        let mut id = new_node_id();
        while self.contains(&id) {
            id = new_node_id();
        }
        debug_log!("add node {} ({})", id, kind.as_str());
        self.selected = Some(id.clone());
        self.nodes.push(FlowNode::new(id, kind, position));
        let last = self.nodes.len() - 1;
        &self.nodes[last]
    }

    pub fn move_node(&mut self, id: &str, delta: Point) {
        if !delta.is_finite() {
            return;
        }
        if let Some(node) = self.node_mut(id) {
            node.x += delta.x;
            node.y += delta.y;
        }
    }

    pub fn update_field(&mut self, id: &str, field: NodeField, value: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let slot = match field {
            NodeField::Label => &mut node.label,
            NodeField::Content => &mut node.content,
            NodeField::Trigger => &mut node.trigger,
        };
        value.clone_into(slot);
    }

    /// Adds `source -> target`.  Self loops, repeats and unknown endpoints are
    /// ignored.  Returns whether a new edge was created.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        if source == target || !self.contains(target) {
            return false;
        }
        let Some(node) = self.node_mut(source) else {
            return false;
        };
        if node.outgoing.iter().any(|t| t == target) {
            return false;
        }
        node.outgoing.push(target.to_string());
        debug_log!("connect {} -> {}", source, target);
        true
    }

    pub fn disconnect(&mut self, source: &str, target: &str) -> bool {
        let Some(node) = self.node_mut(source) else {
            return false;
        };
        let before = node.outgoing.len();
        node.outgoing.retain(|t| t != target);
        before != node.outgoing.len()
    }

    /// Removes the node together with every connection pointing at it.
    pub fn delete_node(&mut self, id: &str) {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if before == self.nodes.len() {
            return;
        }
        for node in &mut self.nodes {
            node.outgoing.retain(|t| t != id);
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug_log!("deleted node {}", id);
    }

    /// Replaces the whole graph.  Input from storage is not trusted: repeated
    /// ids keep their first node, and self loops, repeated targets and
    /// dangling targets are dropped.  Clears the selection.
    pub fn replace_all(&mut self, nodes: Vec<FlowNode>) {
        let mut seen = HashSet::new();
        let mut kept: Vec<FlowNode> = nodes
            .into_iter()
            .filter(|n| seen.insert(n.id.clone()))
            .collect();

        let ids: HashSet<String> = kept.iter().map(|n| n.id.clone()).collect();
        for node in &mut kept {
            let mut targets = HashSet::new();
            let own = node.id.clone();
            node.outgoing
                .retain(|t| *t != own && ids.contains(t) && targets.insert(t.clone()));
        }

        self.nodes = kept;
        self.selected = None;
    }

    /// Snapshot for persistence, in the same order as painted.
    pub fn to_wire(&self) -> Vec<FlowNode> {
        self.nodes.clone()
    }
}
