//! Flow editor core.  Pure Rust, no DOM access, so everything here is unit
//! tested on the host.

pub mod editor;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod viewport;

pub use editor::{EdgeView, FlowEditor, NodeView, Scene};
pub use graph::GraphStore;
pub use interaction::{Interaction, PointerOutcome, PointerTarget};
pub use viewport::ViewportTransform;
