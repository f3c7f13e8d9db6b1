pub mod backend_offline;
pub mod canvas_editor;
pub mod flow_header;
pub mod inspector;
pub mod modal;
pub mod node_palette;
pub mod zoom_controls;
