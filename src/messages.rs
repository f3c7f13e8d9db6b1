use crate::models::{Bot, FlowNode, NodeField, NodeKind};

/// Everything that can happen in the editor.  Pointer coordinates are screen
/// pixels relative to the canvas element.
#[derive(Debug, Clone)]
pub enum Message {
    // Bot directory
    LoadBots,
    BotsLoaded { bots: Vec<Bot>, offline: bool },
    BotsLoadFailed(String),
    SelectBot(String),
    RetryConnection,
    /// The local mock database was wiped; everything shown must be reloaded.
    MockDbReset,

    // Flow persistence
    GraphLoaded { bot_id: String, nodes: Vec<FlowNode>, offline: bool },
    GraphLoadFailed { bot_id: String, error: String },
    SaveGraph,
    GraphSaved { bot_id: String, offline: bool },
    GraphSaveFailed { bot_id: String, error: String },

    // Canvas pointer events
    CanvasPointerDown { x: f64, y: f64 },
    CanvasPointerMove { x: f64, y: f64 },
    CanvasPointerUp { x: f64, y: f64 },
    CanvasPointerLeave,
    CanvasWheel { delta_y: f64 },
    CanvasResized { width: f64, height: f64 },

    // Viewport controls
    ZoomIn,
    ZoomOut,
    ResetView,

    // Graph edits
    AddNode(NodeKind),
    UpdateField { node_id: String, field: NodeField, value: String },
    RequestDeleteNode(String),
    RequestDeleteSelected,
    RequestDisconnect { source: String, target: String },
    ConfirmPending,
    CancelPending,

    AnimationTick,
}

/// Side effects requested by the reducers.  Executed by
/// `dispatch_global_message` once the state borrow is released.
pub enum Command {
    SendMessage(Message),
    UpdateUI(Box<dyn FnOnce()>),
    FetchBots,
    FetchGraph { bot_id: String },
    SaveGraph { bot_id: String, nodes: Vec<FlowNode> },
}

impl Command {
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }

    pub fn update_ui<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Command::UpdateUI(Box::new(f))
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SendMessage(msg) => f.debug_tuple("SendMessage").field(msg).finish(),
            Command::UpdateUI(_) => f.write_str("UpdateUI(..)"),
            Command::FetchBots => f.write_str("FetchBots"),
            Command::FetchGraph { bot_id } => {
                f.debug_struct("FetchGraph").field("bot_id", bot_id).finish()
            }
            Command::SaveGraph { bot_id, nodes } => f
                .debug_struct("SaveGraph")
                .field("bot_id", bot_id)
                .field("nodes", &nodes.len())
                .finish(),
        }
    }
}
