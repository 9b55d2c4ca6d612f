use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use filekind_core::SnifferChoice;
use std::path::PathBuf;

use crate::commands::{
    classify_command, init_command, inspect_command, rules_command, run_command, tree_command,
};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "filekind")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug         Enable debug logging\n    FILEKIND_ROOT=<DIR>    Directory whose config applies to every project")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Use this config file instead of searching for .filekind.json
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MIME sniffer to use (auto, magic, guess, none)
    #[arg(long, global = true, value_name = "SNIFFER")]
    pub sniffer: Option<SnifferChoice>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify paths and print their kinds
    #[command(visible_alias = "c")]
    Classify {
        /// Paths to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print a JSON array of classifications
        #[arg(short, long)]
        json: bool,

        /// Show which rule decided each kind
        #[arg(short, long)]
        explain: bool,

        /// Also classify everything below directories
        #[arg(short, long)]
        recursive: bool,
    },
    /// List the registered rules in the order they are consulted
    Rules {
        /// Print the rules as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show a directory tree annotated with kinds
    #[command(visible_alias = "t")]
    Tree {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Levels to descend below the direct children
        #[arg(short, long, default_value_t = 2)]
        depth: usize,

        /// Include dot-files and dot-folders
        #[arg(short, long)]
        all: bool,
    },
    /// Show a path's kind, capabilities and kind-specific details
    #[command(visible_alias = "i")]
    Inspect {
        path: PathBuf,
    },
    /// Run a Python file, compile a C file, or execute a binary
    #[command(visible_alias = "r")]
    Run {
        path: PathBuf,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,

        /// Arguments passed through to the program
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Write a starter .filekind.json
    Init {
        /// Directory to write the config into
        #[arg(short, long)]
        cwd: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the parsed command line
    pub fn execute(self) -> Result<()> {
        let global = self.global;
        match self.command {
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
            Commands::Classify {
                paths,
                json,
                explain,
                recursive,
            } => classify_command(&Session::load(&global)?, &paths, json, explain, recursive),
            Commands::Rules { json } => rules_command(&Session::load(&global)?, json),
            Commands::Tree { dir, depth, all } => {
                tree_command(&Session::load(&global)?, &dir, depth, all)
            }
            Commands::Inspect { path } => inspect_command(&Session::load(&global)?, &path),
            Commands::Run {
                path,
                dry_run,
                args,
            } => run_command(&Session::load(&global)?, &path, &args, dry_run),
        }
    }
}
