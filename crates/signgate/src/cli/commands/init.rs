//! Init command

use clap::Args;
use console::style;
use tracing::info;

use signgate_core::descriptor::descriptor_template;

use crate::cli::{output, Cli, OutputFormat};

/// Create a keystore descriptor template
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite an existing descriptor
    #[arg(short, long)]
    pub force: bool,

    /// Key alias inside the keystore
    #[arg(long, default_value = "upload")]
    pub key_alias: String,

    /// Keystore path, relative to the app module unless absolute
    #[arg(long, default_value = "")]
    pub store_file: String,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let project = cli.project()?;
        let path = &project.descriptor_path;

        if path.exists() && !self.force {
            anyhow::bail!(
                "Keystore descriptor already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, descriptor_template(&self.key_alias, &self.store_file))?;
        info!(path = %path.display(), "wrote keystore descriptor template");

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "created": path.to_string_lossy(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!("Created keystore descriptor at {}", output::path(path)));
                    if self.store_file.trim().is_empty() {
                        output::warning("storeFile is empty; release builds will fail until it is set");
                    }
                    println!();
                    println!("Next steps:");
                    println!("  1. Fill in storePassword, keyPassword and storeFile");
                    println!("  2. Run {} to verify your setup", style("signgate check").cyan());
                }
            }
        }

        Ok(())
    }
}
