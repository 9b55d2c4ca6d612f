pub mod formatter;

pub use formatter::{format_capabilities, format_classification, kind_icon};
