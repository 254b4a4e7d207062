//! Interactive command line
//!
//! This module handles validated prompts, command parsing and the session
//! loop that ties the ladder, the renderer and storage together.

pub mod commands;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use commands::Command;
pub use prompt::{is_input_closed, Console};
pub use session::{lock_log, save_shared, Flow, Session};
