//! Small crate-wide convenience macros.
//!
//! Logging goes to the browser console when compiled for `wasm32` and to
//! stderr otherwise, so the editor core can log from native unit tests
//! without touching a JS import.

#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub enum Level {
    Debug,
    Warn,
    Error,
}

#[doc(hidden)]
pub fn emit(level: Level, line: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::Debug => web_sys::console::log_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Error => web_sys::console::error_1(&value),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let tag = match level {
            Level::Debug => "debug",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        eprintln!("[{}] {}", tag, line);
    }
}

/// Debug-level log line.  Skipped in release builds.
///
/// ```rust,ignore
/// debug_log!("Loaded {} nodes for bot {}", nodes.len(), bot_id);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::macros::emit($crate::macros::Level::Debug, &format!($($arg)*));
        }
    };
}

/// Warning-level log line.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::Level::Warn, &format!($($arg)*))
    };
}

/// Error-level log line.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::macros::emit($crate::macros::Level::Error, &format!($($arg)*))
    };
}
