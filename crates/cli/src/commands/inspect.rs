use anyhow::{Context, Result};
use filekind_core::Kind;
use std::path::Path;
use tracing::debug;

use crate::display::{format_capabilities, kind_icon};
use crate::session::Session;

pub fn inspect_command(session: &Session, path: &Path) -> Result<()> {
    debug!("Inspecting: {}", path.display());
    let classification = session.registry.explain(path);
    let kind = classification.kind.clone();
    let handle = session
        .factory
        .build(classification.path.clone(), classification.kind.clone());

    println!("{} {}", kind_icon(&kind), handle.describe());
    if kind == Kind::MISSING {
        return Ok(());
    }

    println!("  Kind: {} ({})", kind, kind.label());
    println!("  Rule: {}", classification.source);
    if let Some(mime) = &classification.mime {
        println!("  MIME: {mime}");
    }
    println!("  Capabilities: {}", format_capabilities(handle.capabilities()));

    let details = handle
        .details()
        .with_context(|| format!("Failed to read {}", path.display()))?;
    for (label, value) in details {
        println!("  {}: {}", capitalize(&label), value);
    }
    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
