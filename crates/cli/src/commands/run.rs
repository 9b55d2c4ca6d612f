use anyhow::{Context, Result, bail};
use filekind_core::{CommandType, Kind};
use std::path::Path;
use tracing::{debug, info};

use crate::session::Session;

pub fn run_command(session: &Session, path: &Path, args: &[String], dry_run: bool) -> Result<()> {
    let classification = session.registry.explain(path);
    debug!("Running {} as {}", path.display(), classification.kind);
    if classification.kind == Kind::MISSING {
        bail!("File not found: {}", path.display());
    }

    let handle = session
        .factory
        .build(classification.path, classification.kind);
    let command = handle
        .run_command(args)
        .with_context(|| format!("Cannot run {}", handle.describe()))?;

    if dry_run {
        println!("{}", command.to_shell_command());
        println!("Action: {}", command.command_type.action());
        if let Some(ref dir) = command.working_dir {
            println!("Working directory: {}", dir.display());
        }
        return Ok(());
    }

    let shell_cmd = command.to_shell_command();
    info!("Running: {}", shell_cmd);
    if let Some(ref dir) = command.working_dir {
        info!("Working directory: {}", dir.display());
    }

    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    if command.command_type == CommandType::Compiler {
        println!("✅ Compiled {}", path.display());
    }
    Ok(())
}
