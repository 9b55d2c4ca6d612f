use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::session::Session;

#[derive(Debug, Serialize)]
struct FolderRuleView<'a> {
    position: usize,
    predicate: &'a str,
    kind: &'a str,
}

#[derive(Debug, Serialize)]
struct RulesView<'a> {
    sniffer: &'a str,
    folders: Vec<FolderRuleView<'a>>,
    extensions: BTreeMap<&'a str, &'a str>,
    mime: BTreeMap<&'a str, &'a str>,
}

pub fn rules_command(session: &Session, json: bool) -> Result<()> {
    let registry = &session.registry;

    if json {
        let view = RulesView {
            sniffer: registry.sniffer().name(),
            folders: registry
                .folder_rules()
                .map(|rule| FolderRuleView {
                    position: rule.index + 1,
                    predicate: rule.name,
                    kind: rule.kind.as_str(),
                })
                .collect(),
            extensions: registry
                .extension_rules()
                .map(|(ext, kind)| (ext, kind.as_str()))
                .collect(),
            mime: registry
                .mime_rules()
                .map(|(prefix, kind)| (prefix, kind.as_str()))
                .collect(),
        };
        let output = serde_json::to_string_pretty(&view).context("Failed to serialize rules")?;
        println!("{output}");
        return Ok(());
    }

    if let Some(path) = &session.config_info.project_config_path {
        println!("📄 Config: {}", path.display());
    }
    if let Some(path) = &session.config_info.root_config_path {
        println!("🏠 Root config: {}", path.display());
    }
    print!("{}", registry.describe_rules());
    Ok(())
}
