// Node footprint in virtual canvas units.  Edges attach at HANDLE_OFFSET_Y
// from the node's top edge on both sides.
pub const NODE_WIDTH: f64 = 208.0;
pub const NODE_BASE_HEIGHT: f64 = 84.0;
pub const NODE_HEADER_HEIGHT: f64 = 32.0;
pub const NODE_TRIGGER_ROW_HEIGHT: f64 = 22.0;
pub const NODE_CORNER_RADIUS: f64 = 8.0;
pub const HANDLE_OFFSET_Y: f64 = 42.0;
pub const HANDLE_RADIUS: f64 = 6.0;
pub const HANDLE_HIT_RADIUS: f64 = 12.0;

// New nodes are centred on the viewport: top-left = centre - this offset.
pub const NEW_NODE_OFFSET_X: f64 = 100.0;
pub const NEW_NODE_OFFSET_Y: f64 = 50.0;

// Viewport
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 3.0;
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;
pub const ZOOM_STEP: f64 = 0.2;
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

// Edges
pub const EDGE_MIN_CONTROL_OFFSET: f64 = 50.0;
pub const EDGE_HOVER_DISTANCE: f64 = 10.0;
pub const EDGE_DELETE_RADIUS: f64 = 10.0;
pub const EDGE_SAMPLES: usize = 24;

// Default labels per node kind
pub const DEFAULT_MESSAGE_LABEL: &str = "Mensagem";
pub const DEFAULT_INPUT_LABEL: &str = "Entrada Usuário";
pub const DEFAULT_MENU_LABEL: &str = "Menu Opções";

// Canvas palette
pub const CANVAS_BACKGROUND_COLOR: &str = "#020617";
pub const GRID_DOT_COLOR: &str = "rgba(100, 116, 139, 0.25)";
pub const GRID_SPACING: f64 = 40.0;
pub const NODE_FILL: &str = "#0f172a";
pub const NODE_BORDER_DEFAULT: &str = "#334155";
pub const NODE_BORDER_SELECTED: &str = "#10b981";
pub const NODE_TEXT_PRIMARY: &str = "#e2e8f0";
pub const NODE_TEXT_SECONDARY: &str = "#94a3b8";
pub const HEADER_MESSAGE_FILL: &str = "#1e293b";
pub const HEADER_INPUT_FILL: &str = "rgba(245, 158, 11, 0.10)";
pub const HEADER_MENU_FILL: &str = "rgba(16, 185, 129, 0.10)";
pub const ACCENT_MESSAGE: &str = "#60a5fa";
pub const ACCENT_INPUT: &str = "#fbbf24";
pub const ACCENT_MENU: &str = "#34d399";
pub const TRIGGER_TEXT_COLOR: &str = "#f59e0b";
pub const TRIGGER_LABEL_FILL: &str = "#0f172a";
pub const HANDLE_FILL: &str = "#1e293b";
pub const HANDLE_STROKE: &str = "#64748b";
pub const HANDLE_ACTIVE_FILL: &str = "#10b981";
pub const CONNECTION_LINE_COLOR: &str = "#64748b";
pub const CONNECTION_HOVER_COLOR: &str = "#10b981";
pub const PROVISIONAL_EDGE_COLOR: &str = "#10b981";
pub const EDGE_DELETE_FILL: &str = "#f43f5e";

// Text limits for the canvas card
pub const LABEL_MAX_GRAPHEMES: usize = 22;
pub const TRIGGER_MAX_GRAPHEMES: usize = 24;
pub const CONTENT_MAX_LINES: usize = 3;

// Toasts
pub const TOAST_DURATION_MS: u32 = 4000;
