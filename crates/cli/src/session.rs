use anyhow::{Context, Result};
use filekind_core::config::{ConfigInfo, validate};
use filekind_core::{ClassificationRegistry, Config, ConfigMerger, HandleFactory};
use std::path::Path;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Everything a command needs: the registry with config rules applied and
/// the handle factory.
#[derive(Debug)]
pub struct Session {
    pub registry: ClassificationRegistry,
    pub factory: HandleFactory,
    pub config: Config,
    pub config_info: ConfigInfo,
}

impl Session {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(global, &cwd)
    }

    pub fn load_from(global: &GlobalArgs, cwd: &Path) -> Result<Self> {
        let mut merger = ConfigMerger::new();
        match &global.config {
            Some(path) => {
                merger
                    .load_project_config(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                merger.load_root_from_env().context("Failed to load root config")?;
            }
            None => merger
                .load_configs_for_path(cwd)
                .context("Failed to load configuration")?,
        }

        let config = merger.get_merged_config();
        validate(&config).context("Invalid configuration")?;
        debug!("Merged config: {:?}", config);

        let mut registry = ClassificationRegistry::with_builtin();
        config.apply(&mut registry);
        if let Some(sniffer) = global.sniffer {
            debug!("Using {} sniffer from command line", sniffer);
            registry.set_sniffer(sniffer.build());
        }

        let factory = HandleFactory::with_builtin().with_toolchain(config.toolchain());

        Ok(Self {
            registry,
            factory,
            config,
            config_info: merger.get_config_info().clone(),
        })
    }
}
