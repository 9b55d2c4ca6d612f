use anyhow::{Context, Result};
use filekind_core::Config;
use filekind_core::config::CONFIG_FILE_NAMES;
use std::{env, path::PathBuf};
use tracing::info;

pub fn init_command(cwd: Option<&std::path::Path>, force: bool) -> Result<()> {
    let project_root = match cwd {
        Some(cwd) => PathBuf::from(cwd),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    info!("Writing config template to {}", config_path.display());
    Config::template()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    println!("\n📌 Next steps:");
    println!("   Map extensions under 'extensions' and MIME prefixes under 'mime'");
    println!("   Folder rules under 'folders' are checked before the built-in ones");
    println!("   Run `filekind rules` to see the result");
    Ok(())
}
