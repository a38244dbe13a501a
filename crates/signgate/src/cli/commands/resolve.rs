//! Resolve command

use clap::Args;
use console::style;
use tracing::info;

use signgate_core::{load_descriptor, resolver::resolve_intent, InvocationIntent, ReleaseSigning};

use crate::cli::{output, Cli, OutputFormat};

/// Resolve release signing for the requested build tasks
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Build task names requested for this invocation (e.g. bundleRelease)
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(tasks = ?self.tasks, "executing resolve command");
        let project = cli.project()?;

        let descriptor = load_descriptor(&project.descriptor_path)?;
        let intent = InvocationIntent::from_tasks(&self.tasks);
        let resolution = resolve_intent(descriptor.as_ref(), &intent)?;

        match cli.format {
            OutputFormat::Json => {
                let store_path = resolution
                    .keystore()
                    .map(|k| k.store_file_path(&project.module_dir).to_string_lossy().to_string());
                let output = serde_json::json!({
                    "descriptor": project.descriptor_path.to_string_lossy(),
                    "descriptorPresent": descriptor.is_some(),
                    "intent": intent,
                    "buildType": intent.build_type(),
                    "resolution": resolution,
                    "keystorePath": store_path,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Release signing"));
                    let presence = if descriptor.is_some() {
                        style("found").green()
                    } else {
                        style("missing").yellow()
                    };
                    println!(
                        "{}",
                        output::key_value(
                            "descriptor",
                            &format!("{} ({})", output::path(&project.descriptor_path), presence)
                        )
                    );
                    println!(
                        "{}",
                        output::key_value("build type", &intent.build_type().to_string())
                    );
                    if cli.verbose && !intent.tasks.is_empty() {
                        println!("{}", output::key_value("tasks", &intent.tasks.join(", ")));
                    }

                    match &resolution.signing {
                        ReleaseSigning::Configured(keystore) => {
                            println!(
                                "{}",
                                output::key_value("status", &style("configured").green().to_string())
                            );
                            println!(
                                "{}",
                                output::key_value(
                                    "keystore",
                                    &output::path(&keystore.store_file_path(&project.module_dir))
                                )
                            );
                            println!("{}", output::key_value("key alias", &keystore.key_alias));
                        }
                        ReleaseSigning::Unconfigured => {
                            println!(
                                "{}",
                                output::key_value("status", &style("unconfigured").yellow().to_string())
                            );
                        }
                    }
                }
            }
        }

        // Only a release build without signing is fatal
        resolution.require_signing()?;
        Ok(())
    }
}
