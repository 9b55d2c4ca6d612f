//! Configuration merging for filekind
//!
//! Implements the hierarchy root -> project. The root config comes from the
//! directory named by `FILEKIND_ROOT`; the project config is the nearest
//! config file above the starting path (or an explicit `--config` file).

use super::Config;
use crate::error::Result;
use crate::registry::{normalize_extension, normalize_mime_prefix};
use crate::types::Kind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a directory whose config applies everywhere.
pub const ROOT_ENV_VAR: &str = "FILEKIND_ROOT";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigInfo {
    pub root_config_path: Option<PathBuf>,
    pub project_config_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigMerger {
    root_config: Option<Config>,
    project_config: Option<Config>,
    config_info: ConfigInfo,
}

impl ConfigMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the project config found from `start` and the root config named
    /// by `FILEKIND_ROOT`.
    pub fn load_configs_for_path(&mut self, start: &Path) -> Result<()> {
        let root_dir = std::env::var_os(ROOT_ENV_VAR).map(PathBuf::from);
        self.load_configs_with_root(start, root_dir.as_deref())
    }

    /// Load only the root config named by `FILEKIND_ROOT`, if set.
    pub fn load_root_from_env(&mut self) -> Result<()> {
        match std::env::var_os(ROOT_ENV_VAR) {
            Some(root_dir) => self.load_root_config(Path::new(&root_dir)),
            None => Ok(()),
        }
    }

    pub fn load_configs_with_root(&mut self, start: &Path, root_dir: Option<&Path>) -> Result<()> {
        debug!("Loading configs for path: {:?}", start);

        if let Some(project_path) = Config::find_config_file(start) {
            debug!("Found project config at: {:?}", project_path);
            self.load_project_config(&project_path)?;
        }

        if let Some(root_dir) = root_dir {
            self.load_root_config(root_dir)?;
        }
        Ok(())
    }

    /// Use `path` as the project config instead of searching for one.
    pub fn load_project_config(&mut self, path: &Path) -> Result<()> {
        self.project_config = Some(Config::load_from_file(path)?);
        self.config_info.project_config_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn load_root_config(&mut self, root_dir: &Path) -> Result<()> {
        let Some(root_path) = super::CONFIG_FILE_NAMES
            .iter()
            .map(|name| root_dir.join(name))
            .find(|path| path.is_file())
        else {
            debug!("No root config in {:?}", root_dir);
            return Ok(());
        };

        if self.is_project_config(&root_path) {
            debug!("Root config is the project config, skipping duplicate load");
            self.config_info.root_config_path = Some(root_path);
            return Ok(());
        }

        debug!("Found root config at: {:?}", root_path);
        self.root_config = Some(Config::load_from_file(&root_path)?);
        self.config_info.root_config_path = Some(root_path);
        Ok(())
    }

    fn is_project_config(&self, path: &Path) -> bool {
        let Some(project_path) = &self.config_info.project_config_path else {
            return false;
        };
        match (project_path.canonicalize(), path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => project_path == path,
        }
    }

    /// Root then project. The project's map entries and sniffer win; its
    /// folder rules are consulted before the root's.
    pub fn get_merged_config(&self) -> Config {
        let mut config = Config::default();
        if let Some(root) = &self.root_config {
            config = merge_configs(config, root.clone());
        }
        if let Some(project) = &self.project_config {
            config = merge_configs(config, project.clone());
        }
        config
    }

    pub fn get_config_info(&self) -> &ConfigInfo {
        &self.config_info
    }
}

fn merge_configs(mut base: Config, overlay: Config) -> Config {
    if overlay.sniffer.is_some() {
        base.sniffer = overlay.sniffer;
    }
    base.extensions = normalized_keys(base.extensions, normalize_extension);
    base.extensions.extend(normalized_keys(overlay.extensions, normalize_extension));
    base.mime = normalized_keys(base.mime, normalize_mime_prefix);
    base.mime.extend(normalized_keys(overlay.mime, normalize_mime_prefix));

    let mut folders = overlay.folders;
    folders.append(&mut base.folders);
    base.folders = folders;

    if let Some(tools) = overlay.tools {
        base.tools.get_or_insert_with(Default::default).merge(tools);
    }
    base
}

/// Re-key a rule map by the registry's spelling so `rs`, `.rs` and `.RS`
/// collide. Keys that do not normalize are kept for validation to report.
fn normalized_keys(
    map: BTreeMap<String, Kind>,
    normalize: fn(&str) -> Option<String>,
) -> BTreeMap<String, Kind> {
    map.into_iter()
        .map(|(key, kind)| (normalize(&key).unwrap_or(key), kind))
        .collect()
}
