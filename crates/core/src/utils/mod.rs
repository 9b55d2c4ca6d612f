pub mod path;
pub mod serde_helpers;

pub use path::{find_upward, is_hidden, is_visible};
