pub mod capability;
pub mod classification;
pub mod kind;

// Re-export commonly used types
pub use capability::Capability;
pub use classification::{Classification, RuleSource};
pub use kind::Kind;
