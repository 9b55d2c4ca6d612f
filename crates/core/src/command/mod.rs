//! External tool invocations built from file handles

pub mod tool_command;

// Re-export commonly used types
pub use tool_command::{CommandType, ToolCommand};
