use crate::messages::{Command, Message};
use crate::state::AppState;

/// Root reducer.  Domain reducers claim the messages they handle; the few
/// that belong to no domain are handled here.
pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    if crate::reducers::canvas::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::bots::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::AnimationTick => state.draw_if_dirty(),
        Message::CanvasResized { width, height } => {
            if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
                state.viewport_width = width;
                state.viewport_height = height;
                state.mark_dirty();
            }
        }
        other => crate::debug_log!("Unhandled message {:?}", other),
    }

    commands
}
