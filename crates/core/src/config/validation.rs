//! Configuration validation, run before rules reach a registry

use crate::{
    config::{Config, FolderRuleConfig, FolderTest},
    error::{Error, Result},
    registry::{normalize_extension, normalize_mime_prefix},
    types::Kind,
};

/// Trait for validating configurations
pub trait ConfigValidator {
    /// Validate the entire configuration
    fn validate(&self, config: &Config) -> Result<()>;

    /// Validate a single folder rule
    fn validate_folder_rule(&self, rule: &FolderRuleConfig) -> Result<()>;
}

/// Rejects entries that could never match or name no kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleValidator;

impl RuleValidator {
    fn kind_problem(kind: &Kind, context: &str) -> Option<String> {
        kind.as_str()
            .is_empty()
            .then(|| format!("{context}: kind is empty"))
    }

    fn folder_rule_problem(rule: &FolderRuleConfig) -> Option<String> {
        let context = format!("folder rule for {:?}", rule.kind.as_str());
        if let Some(problem) = Self::kind_problem(&rule.kind, &context) {
            return Some(problem);
        }
        let valid = match &rule.test {
            FolderTest::Contains(name) => !name.trim().is_empty(),
            FolderTest::ContainsAny(names) => {
                !names.is_empty() && names.iter().all(|name| !name.trim().is_empty())
            }
            FolderTest::Extension(ext) => normalize_extension(ext).is_some(),
        };
        (!valid).then(|| format!("{context}: predicate argument is empty or invalid"))
    }
}

impl ConfigValidator for RuleValidator {
    fn validate(&self, config: &Config) -> Result<()> {
        let mut problems = Vec::new();

        for (extension, kind) in &config.extensions {
            let context = format!("extension {extension:?}");
            if normalize_extension(extension).is_none() {
                problems.push(format!("{context}: not a single file extension"));
            }
            problems.extend(Self::kind_problem(kind, &context));
        }

        for (prefix, kind) in &config.mime {
            let context = format!("mime prefix {prefix:?}");
            if normalize_mime_prefix(prefix).is_none() {
                problems.push(format!("{context}: prefix is empty"));
            }
            problems.extend(Self::kind_problem(kind, &context));
        }

        problems.extend(config.folders.iter().filter_map(Self::folder_rule_problem));

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidRule(problems.join("; ")))
        }
    }

    fn validate_folder_rule(&self, rule: &FolderRuleConfig) -> Result<()> {
        match Self::folder_rule_problem(rule) {
            Some(problem) => Err(Error::InvalidRule(problem)),
            None => Ok(()),
        }
    }
}

/// Validate with the default rules.
pub fn validate(config: &Config) -> Result<()> {
    RuleValidator.validate(config)
}
