//! Bot directory and flow persistence reducer.

use chrono::Local;

use crate::messages::{Command, Message};
use crate::reducers::refresh_panels;
use crate::state::AppState;
use crate::toast;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::LoadBots => {
            state.is_loading = true;
            cmds.push(Command::FetchBots);
            refresh_panels(cmds);
        }
        Message::RetryConnection => {
            state.backend_error = None;
            state.is_loading = true;
            if state.bots.is_empty() {
                cmds.push(Command::FetchBots);
            } else if let Some(bot_id) = state.selected_bot_id.clone() {
                cmds.push(Command::FetchGraph { bot_id });
            } else {
                cmds.push(Command::FetchBots);
            }
            refresh_panels(cmds);
        }
        Message::MockDbReset => {
            // Forget the selection so the reload re-fetches a flow as well.
            state.selected_bot_id = None;
            state.pending_confirmation = None;
            state.last_saved_at = None;
            state.is_loading = true;
            state.editor.load(Vec::new());
            state.mark_dirty();
            cmds.push(Command::FetchBots);
            refresh_panels(cmds);
        }
        Message::BotsLoaded { bots, offline } => {
            state.bots = bots.clone();
            state.serving_mock = *offline;
            state.backend_error = None;
            let keep = state
                .selected_bot_id
                .as_deref()
                .is_some_and(|id| bots.iter().any(|b| b.id == id));
            if !keep {
                state.selected_bot_id = None;
                match bots.first() {
                    Some(first) => cmds.push(Command::send(Message::SelectBot(first.id.clone()))),
                    None => state.is_loading = false,
                }
            } else {
                state.is_loading = false;
            }
            refresh_panels(cmds);
        }
        Message::BotsLoadFailed(error) => {
            warn_log!("Failed to load bots: {}", error);
            state.is_loading = false;
            state.backend_error = Some(error.clone());
            refresh_panels(cmds);
        }
        Message::SelectBot(bot_id) => {
            if state.is_current_bot(bot_id) && !state.is_loading {
                return true;
            }
            debug_log!("Selecting bot {}", bot_id);
            state.selected_bot_id = Some(bot_id.clone());
            state.pending_confirmation = None;
            state.last_saved_at = None;
            state.is_loading = true;
            state.editor.load(Vec::new());
            state.mark_dirty();
            cmds.push(Command::FetchGraph { bot_id: bot_id.clone() });
            refresh_panels(cmds);
        }
        Message::GraphLoaded { bot_id, nodes, offline } => {
            if !state.is_current_bot(bot_id) {
                debug_log!("Dropping stale flow for bot {}", bot_id);
                return true;
            }
            state.editor.load(nodes.clone());
            state.is_loading = false;
            state.serving_mock = *offline;
            state.backend_error = None;
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::GraphLoadFailed { bot_id, error } => {
            if !state.is_current_bot(bot_id) {
                return true;
            }
            warn_log!("Failed to load flow for bot {}: {}", bot_id, error);
            state.is_loading = false;
            state.backend_error = Some(error.clone());
            refresh_panels(cmds);
        }
        Message::SaveGraph => {
            let Some(bot_id) = state.selected_bot_id.clone() else {
                return true;
            };
            if state.is_loading {
                // The canvas does not hold this bot's flow yet.
                return true;
            }
            state.is_saving = true;
            cmds.push(Command::SaveGraph {
                bot_id,
                nodes: state.editor.to_wire(),
            });
            refresh_panels(cmds);
        }
        Message::GraphSaved { bot_id, offline } => {
            state.is_saving = false;
            if !state.is_current_bot(bot_id) {
                debug_log!("Ignoring save confirmation for bot {}", bot_id);
                refresh_panels(cmds);
                return true;
            }
            state.serving_mock = *offline;
            state.last_saved_at = Some(Local::now().format("%H:%M:%S").to_string());
            let text = if *offline {
                "Flow saved in this browser (backend offline)"
            } else {
                "Flow saved"
            };
            cmds.push(Command::update_ui(move || toast::success(text)));
            refresh_panels(cmds);
        }
        Message::GraphSaveFailed { bot_id, error } => {
            state.is_saving = false;
            warn_log!("Failed to save flow for bot {}: {}", bot_id, error);
            if state.is_current_bot(bot_id) {
                let text = format!("Could not save the flow: {}", error);
                cmds.push(Command::update_ui(move || toast::error(&text)));
            }
            refresh_panels(cmds);
        }
        _ => return false,
    }
    true
}
