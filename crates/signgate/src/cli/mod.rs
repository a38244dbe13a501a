//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use signgate_core::config::{load_config_or_default, project_dir_for};

use commands::{CheckCommand, InitCommand, ResolveCommand};

/// Signgate - release signing gate for Android build pipelines
#[derive(Debug, Parser)]
#[command(name = "signgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Keystore descriptor path (overrides signgate.toml)
    #[arg(long, global = true, env = "SIGNGATE_DESCRIPTOR")]
    pub descriptor: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve release signing for the requested build tasks
    Resolve(ResolveCommand),

    /// Check the keystore descriptor is ready for a release build
    Check(CheckCommand),

    /// Create a keystore descriptor template
    Init(InitCommand),
}

/// Paths of the Android project the command operates on
#[derive(Debug, Clone)]
pub struct Project {
    pub config_path: Option<PathBuf>,
    pub android_dir: PathBuf,
    pub descriptor_path: PathBuf,
    pub module_dir: PathBuf,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Resolve(ref cmd) => cmd.execute(&self),
            Commands::Check(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load project configuration and locate the descriptor
    pub fn project(&self) -> anyhow::Result<Project> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        let project_dir = project_dir_for(config_path.as_deref(), &cwd);

        let descriptor_path = match &self.descriptor {
            Some(path) => absolutize(path, &cwd),
            None => config.android.descriptor_path(&project_dir),
        };
        let android_dir = project_dir.join(&config.android.root);
        let module_dir = config.android.module_dir(&project_dir);

        debug!(
            project_dir = %project_dir.display(),
            descriptor = %descriptor_path.display(),
            module_dir = %module_dir.display(),
            "resolved project layout"
        );

        Ok(Project {
            config_path,
            android_dir,
            descriptor_path,
            module_dir,
        })
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
