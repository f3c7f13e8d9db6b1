//! Pointer session of the editor canvas.  Exactly one session is active at a
//! time; starting a new one replaces whatever was there.

use crate::models::Point;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Background drag.  `last` is the previous cursor in screen space.
    Panning { last: Point },
    /// Node drag.  `last` is the previous cursor in screen space; deltas are
    /// converted to virtual units when applied.
    DraggingNode { node_id: String, last: Point },
    /// Connection being drawn from an output handle.  `cursor` is in virtual
    /// units so the provisional edge can be drawn with the nodes.
    ConnectingFrom { source_id: String, cursor: Point },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn connecting_source(&self) -> Option<&str> {
        match self {
            Interaction::ConnectingFrom { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}

/// What lies under the cursor, resolved by `FlowEditor::hit_test`.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerTarget {
    Background,
    NodeBody(String),
    OutputHandle(String),
    InputHandle(String),
    EdgeDelete { source: String, target: String },
}

/// Side effects the shell has to handle after a pointer event.  The editor
/// never removes connections on its own; the user confirms first.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    None,
    /// Repaint only.
    Redraw,
    /// The selection changed; panels that show the selected node need a
    /// refresh too.
    SelectionChanged,
    ConfirmDisconnect { source: String, target: String },
    Connected { source: String, target: String },
}
