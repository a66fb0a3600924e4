//! Logging macros that work on both native and WASM targets.
//!
//! On WASM the messages land in the browser console; on native debug
//! builds they go to stderr; on native release builds they compile to
//! nothing.

/// Logs a debug message.
#[macro_export]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		#[cfg(target_arch = "wasm32")]
		web_sys::console::debug_1(&format!($($arg)*).into());
		#[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
		eprintln!("[DEBUG] {}", format!($($arg)*));
	}};
}

/// Logs an informational message.
#[macro_export]
macro_rules! info_log {
	($($arg:tt)*) => {{
		#[cfg(target_arch = "wasm32")]
		web_sys::console::info_1(&format!($($arg)*).into());
		#[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
		eprintln!("[INFO] {}", format!($($arg)*));
	}};
}

/// Logs a warning.
#[macro_export]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		#[cfg(target_arch = "wasm32")]
		web_sys::console::warn_1(&format!($($arg)*).into());
		#[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
		eprintln!("[WARN] {}", format!($($arg)*));
	}};
}

/// Logs an error.
#[macro_export]
macro_rules! error_log {
	($($arg:tt)*) => {{
		#[cfg(target_arch = "wasm32")]
		web_sys::console::error_1(&format!($($arg)*).into());
		#[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
		eprintln!("[ERROR] {}", format!($($arg)*));
	}};
}
