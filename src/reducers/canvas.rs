//! Editor surface reducer: pointer events, viewport controls, graph edits
//! and the confirmation flow for destructive actions.

use crate::flow::PointerOutcome;
use crate::messages::{Command, Message};
use crate::models::Point;
use crate::reducers::refresh_panels;
use crate::state::{AppState, PendingConfirmation};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::CanvasPointerDown { x, y } => {
            let outcome = state.editor.pointer_down(Point::new(*x, *y));
            apply_outcome(state, outcome, cmds);
        }
        Message::CanvasPointerMove { x, y } => {
            let outcome = state.editor.pointer_move(Point::new(*x, *y));
            apply_outcome(state, outcome, cmds);
        }
        Message::CanvasPointerUp { x, y } => {
            let outcome = state.editor.pointer_up(Point::new(*x, *y));
            apply_outcome(state, outcome, cmds);
        }
        Message::CanvasPointerLeave => {
            let outcome = state.editor.pointer_leave();
            apply_outcome(state, outcome, cmds);
        }
        Message::CanvasWheel { delta_y } => {
            state.editor.wheel(*delta_y);
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::ZoomIn => {
            state.editor.zoom_in();
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::ZoomOut => {
            state.editor.zoom_out();
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::ResetView => {
            state.editor.reset_view();
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::AddNode(kind) => {
            if state.selected_bot_id.is_none() {
                crate::warn_log!("No bot selected; ignoring new {} node", kind.as_str());
                return true;
            }
            let id = state
                .editor
                .add_node_at_center(*kind, state.viewport_width, state.viewport_height);
            crate::debug_log!("Added {} node {}", kind.as_str(), id);
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::UpdateField { node_id, field, value } => {
            state.editor.update_field(node_id, *field, value);
            state.mark_dirty();
        }
        Message::RequestDeleteNode(node_id) => {
            request_node_deletion(state, node_id, cmds);
        }
        Message::RequestDeleteSelected => {
            if let Some(id) = state.editor.graph().selected_id().map(str::to_string) {
                request_node_deletion(state, &id, cmds);
            }
        }
        Message::RequestDisconnect { source, target } => {
            state.pending_confirmation = Some(PendingConfirmation::Disconnect {
                source: source.clone(),
                target: target.clone(),
            });
            refresh_panels(cmds);
        }
        Message::ConfirmPending => {
            match state.pending_confirmation.take() {
                Some(PendingConfirmation::DeleteNode { node_id, .. }) => {
                    state.editor.delete_node(&node_id);
                }
                Some(PendingConfirmation::Disconnect { source, target }) => {
                    state.editor.disconnect(&source, &target);
                }
                None => return true,
            }
            state.mark_dirty();
            refresh_panels(cmds);
        }
        Message::CancelPending => {
            if state.pending_confirmation.take().is_some() {
                refresh_panels(cmds);
            }
        }
        _ => return false,
    }
    true
}

fn request_node_deletion(state: &mut AppState, node_id: &str, cmds: &mut Vec<Command>) {
    let Some(node) = state.editor.graph().node(node_id) else {
        return;
    };
    state.pending_confirmation = Some(PendingConfirmation::DeleteNode {
        node_id: node.id.clone(),
        label: node.label.clone(),
    });
    refresh_panels(cmds);
}

fn apply_outcome(state: &mut AppState, outcome: PointerOutcome, cmds: &mut Vec<Command>) {
    match outcome {
        PointerOutcome::None => {}
        PointerOutcome::Redraw => state.mark_dirty(),
        PointerOutcome::SelectionChanged => {
            state.mark_dirty();
            refresh_panels(cmds);
        }
        PointerOutcome::Connected { source, target } => {
            crate::debug_log!("Connected {} -> {}", source, target);
            state.mark_dirty();
        }
        PointerOutcome::ConfirmDisconnect { source, target } => {
            state.mark_dirty();
            cmds.push(Command::send(Message::RequestDisconnect { source, target }));
        }
    }
}
