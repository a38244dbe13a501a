//! Check command

use std::path::Path;

use clap::Args;
use console::style;
use tracing::{debug, info};

use signgate_core::descriptor::{KEY_PASSWORD, REQUIRED_KEYS, STORE_FILE, STORE_PASSWORD};
use signgate_core::{load_descriptor, resolve, Properties};

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes::ValidationFailed;

/// Keystore extensions the Android toolchain signs with
const KEYSTORE_EXTENSIONS: [&str; 2] = ["jks", "keystore"];

/// Check the keystore descriptor is ready for a release build
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing check command");
        let project = cli.project()?;

        let mut findings = Findings::default();
        match load_descriptor(&project.descriptor_path) {
            Ok(Some(props)) => inspect_descriptor(&props, &project.module_dir, &mut findings),
            Ok(None) => findings.errors.push(format!(
                "Keystore descriptor not found at {}",
                project.descriptor_path.display()
            )),
            Err(e) => findings.errors.push(format!("Descriptor: {}", e)),
        }
        inspect_gitignore(&project.android_dir, &project.descriptor_path, &mut findings);

        let Findings {
            mut errors,
            mut warnings,
        } = findings;

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": project.config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "descriptor": project.descriptor_path.to_string_lossy(),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Signing Check"));
                    println!();
                    println!("Descriptor: {}", output::path(&project.descriptor_path));
                    println!();

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            output::success("Release signing is ready");
                        } else {
                            output::success(&format!(
                                "Release signing is ready with {} warning(s)",
                                warnings.len()
                            ));
                        }
                    }
                }
            }
        }

        if !passed {
            return Err(ValidationFailed {
                errors: errors.len(),
            }
            .into());
        }

        Ok(())
    }
}

fn inspect_descriptor(props: &Properties, module_dir: &Path, findings: &mut Findings) {
    for key in REQUIRED_KEYS {
        if !props.contains_key(key) {
            findings.errors.push(format!("Missing field '{}'", key));
        }
    }

    if props.get(STORE_FILE).is_some_and(|v| v.trim().is_empty()) {
        findings.errors.push(format!("'{}' is blank", STORE_FILE));
    }

    for key in [STORE_PASSWORD, KEY_PASSWORD] {
        if props.get(key) == Some("") {
            findings.warnings.push(format!("'{}' is empty", key));
        }
    }

    // A descriptor that resolves for a release build names a keystore
    let keystore = match resolve(Some(props), ["bundleRelease"]) {
        Ok(resolution) => resolution.keystore().cloned(),
        Err(e) => {
            debug!(error = %e, "descriptor does not resolve");
            None
        }
    };

    if let Some(keystore) = keystore {
        let store_path = keystore.store_file_path(module_dir);
        if !store_path.is_file() {
            findings
                .errors
                .push(format!("Keystore not found at {}", store_path.display()));
        }

        let known_extension = store_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| KEYSTORE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
        if !known_extension {
            findings.warnings.push(format!(
                "Keystore {} does not have a .jks or .keystore extension",
                store_path.display()
            ));
        }
    }
}

fn inspect_gitignore(android_dir: &Path, descriptor_path: &Path, findings: &mut Findings) {
    let gitignore = android_dir.join(".gitignore");
    let Ok(relative) = descriptor_path.strip_prefix(android_dir) else {
        return;
    };
    let Ok(content) = std::fs::read_to_string(&gitignore) else {
        return;
    };

    let relative = relative.to_string_lossy().replace('\\', "/");
    let file_name = descriptor_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let ignored = content
        .lines()
        .map(|l| l.trim().trim_start_matches('/'))
        .any(|l| l == relative || l == file_name);

    if !ignored {
        findings.warnings.push(format!(
            "{} is not listed in {}",
            relative,
            gitignore.display()
        ));
    }
}
