//! Agent harness and terminal interface for Alfred

mod agent;
mod ui;


pub use agent::{ALFRED_INSTRUCTIONS, Alfred, DEFAULT_MAX_STEPS};
pub use ui::{display_banner, print_help, read_input};

// Re-export core types
pub use alfred_core::{Error, Result};
