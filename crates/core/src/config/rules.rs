use serde::{Deserialize, Serialize};

use crate::handles::Toolchain;
use crate::registry::{AnyOf, ContainsEntry, FolderPredicate, HasChildWithExtension};
use crate::types::Kind;

/// What a configured folder rule looks for inside a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderTest {
    /// A child with exactly this name
    Contains(String),
    /// A child with any of these names
    ContainsAny(Vec<String>),
    /// A child with this extension
    Extension(String),
}

/// A folder rule as written in a config file:
/// `{ "kind": "rust_crate", "contains": "Cargo.toml" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRuleConfig {
    pub kind: Kind,
    #[serde(flatten)]
    pub test: FolderTest,
}

impl FolderRuleConfig {
    pub fn new(kind: Kind, test: FolderTest) -> Self {
        Self { kind, test }
    }

    pub fn predicate(&self) -> Box<dyn FolderPredicate> {
        match &self.test {
            FolderTest::Contains(name) => Box::new(ContainsEntry::new(name)),
            FolderTest::ContainsAny(names) => Box::new(AnyOf::new(
                names
                    .iter()
                    .map(|name| Box::new(ContainsEntry::new(name)) as Box<dyn FolderPredicate>)
                    .collect(),
            )),
            FolderTest::Extension(ext) => Box::new(HasChildWithExtension::new(ext)),
        }
    }
}

/// Overrides for the programs handles invoke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_compiler: Option<String>,
}

impl ToolsConfig {
    /// Later values win field by field.
    pub fn merge(&mut self, other: ToolsConfig) {
        if other.python.is_some() {
            self.python = other.python;
        }
        if other.c_compiler.is_some() {
            self.c_compiler = other.c_compiler;
        }
    }

    pub fn toolchain(&self) -> Toolchain {
        let defaults = Toolchain::default();
        Toolchain {
            python: self.python.clone().unwrap_or(defaults.python),
            c_compiler: self.c_compiler.clone().unwrap_or(defaults.c_compiler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_folder_rule_json_shapes() {
        let rules: Vec<FolderRuleConfig> = serde_json::from_str(
            r#"[
                {"kind": "rust_crate", "contains": "Cargo.toml"},
                {"kind": "Lua_Project", "extension": "lua"},
                {"kind": "node_app", "contains_any": ["package.json", "yarn.lock"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            rules[0],
            FolderRuleConfig::new(
                Kind::new("rust_crate"),
                FolderTest::Contains("Cargo.toml".to_string())
            )
        );
        assert_eq!(rules[1].kind.as_str(), "lua_project");
        assert_eq!(rules[2].predicate().name(), "contains package.json or contains yarn.lock");

        let json = serde_json::to_value(&rules[0]).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "rust_crate", "contains": "Cargo.toml"}));
    }

    #[test]
    fn test_predicates_match() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("init.lua"), "").unwrap();

        let by_ext = FolderRuleConfig::new(Kind::new("lua"), FolderTest::Extension("lua".into()));
        assert!(by_ext.predicate().matches(temp_dir.path()).unwrap());

        let by_name = FolderRuleConfig::new(Kind::new("x"), FolderTest::Contains("init.lua".into()));
        assert!(by_name.predicate().matches(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_tools_merge_and_toolchain() {
        let mut tools = ToolsConfig {
            python: Some("python3.11".to_string()),
            c_compiler: None,
        };
        tools.merge(ToolsConfig {
            python: None,
            c_compiler: Some("clang".to_string()),
        });
        let toolchain = tools.toolchain();
        assert_eq!(toolchain.python, "python3.11");
        assert_eq!(toolchain.c_compiler, "clang");

        assert_eq!(ToolsConfig::default().toolchain(), Toolchain::default());
    }
}
