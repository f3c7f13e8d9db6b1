//! Domain reducers.  Each returns `true` when it handled the message.

pub mod bots;
pub mod canvas;

use crate::messages::Command;

/// Refreshes every DOM panel from the current state once the reducer is
/// done with it.
pub(crate) fn refresh_panels(cmds: &mut Vec<Command>) {
    cmds.push(Command::update_ui(crate::ui::refresh_panels));
}
