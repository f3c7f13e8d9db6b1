use std::cell::RefCell;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::renderer;
use crate::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::flow::FlowEditor;
use crate::messages::{Command, Message};
use crate::models::Bot;
use crate::update::update;

/// A destructive action waiting for the user to confirm it.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingConfirmation {
    DeleteNode { node_id: String, label: String },
    Disconnect { source: String, target: String },
}

impl PendingConfirmation {
    pub fn prompt(&self) -> String {
        match self {
            PendingConfirmation::DeleteNode { label, .. } => format!(
                "Delete \"{}\"? Its connections will be removed too.",
                label
            ),
            PendingConfirmation::Disconnect { .. } => "Remove this connection?".to_string(),
        }
    }
}

pub struct AppState {
    pub bots: Vec<Bot>,
    pub selected_bot_id: Option<String>,
    pub editor: FlowEditor,

    // Canvas and rendering
    pub canvas: Option<HtmlCanvasElement>,
    pub context: Option<CanvasRenderingContext2d>,
    /// CSS pixel size of the canvas container.
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub device_pixel_ratio: f64,
    /// Canvas must be repainted on the next animation frame.
    pub dirty: bool,

    // Persistence
    pub is_loading: bool,
    pub is_saving: bool,
    /// The backend could not be reached and nothing was served instead.
    pub backend_error: Option<String>,
    /// Data currently comes from the local mock database.
    pub serving_mock: bool,
    pub last_saved_at: Option<String>,

    pub pending_confirmation: Option<PendingConfirmation>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            bots: Vec::new(),
            selected_bot_id: None,
            editor: FlowEditor::new(),
            canvas: None,
            context: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            device_pixel_ratio: 1.0,
            dirty: true,
            is_loading: true,
            is_saving: false,
            backend_error: None,
            serving_mock: false,
            last_saved_at: None,
            pending_confirmation: None,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn selected_bot(&self) -> Option<&Bot> {
        let id = self.selected_bot_id.as_deref()?;
        self.bots.iter().find(|b| b.id == id)
    }

    /// True when `bot_id` is still the bot being edited.  Responses for any
    /// other bot arrived after the user moved on and are dropped.
    pub fn is_current_bot(&self, bot_id: &str) -> bool {
        self.selected_bot_id.as_deref() == Some(bot_id)
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }

    /// Repaints the canvas if anything changed since the last frame.
    pub fn draw_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        if let Some(context) = &self.context {
            let scene = self.editor.scene();
            renderer::draw_scene(
                context,
                &scene,
                self.viewport_width,
                self.viewport_height,
                self.device_pixel_ratio,
            );
            self.dirty = false;
        }
    }

    /// Line shown in the status bar, with its colour class.
    pub fn status_line(&self) -> (String, &'static str) {
        if let Some(err) = &self.backend_error {
            return (format!("Backend offline: {}", err), "red");
        }
        if self.is_loading {
            return ("Loading flow...".to_string(), "yellow");
        }
        if self.is_saving {
            return ("Saving...".to_string(), "yellow");
        }
        if self.serving_mock {
            let saved = self
                .last_saved_at
                .as_ref()
                .map(|t| format!(" Saved locally at {}.", t))
                .unwrap_or_default();
            return (
                format!("Offline mode: changes are kept in this browser.{}", saved),
                "yellow",
            );
        }
        match &self.last_saved_at {
            Some(t) => (format!("Saved at {}", t), "green"),
            None => ("Ready".to_string(), "green"),
        }
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Runs `msg` through the reducers, then executes the resulting commands
/// with the state borrow released.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.dispatch(msg)
    });

    for cmd in commands {
        match cmd {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::UpdateUI(ui_fn) => ui_fn(),
            cmd @ Command::FetchBots
            | cmd @ Command::FetchGraph { .. }
            | cmd @ Command::SaveGraph { .. } => {
                crate::command_executors::execute_gateway_command(cmd)
            }
        }
    }
}

/// Read-only access to the state outside of the reducers.
pub fn with_state<R>(f: impl FnOnce(&AppState) -> R) -> Option<R> {
    APP_STATE.with(|state| match state.try_borrow() {
        Ok(state) => Some(f(&state)),
        Err(_) => {
            warn_log!("APP_STATE is busy; skipping read");
            None
        }
    })
}
