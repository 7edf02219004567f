use std::time::Duration;

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use indicatif::ProgressBar;
use tokio::process::Command;
use tracing::debug;

use crate::config::{PackageManagerKind, ProjectConfig};

/// Adds and removes entries in the project's dependency manifest.
#[allow(async_fn_in_trait)]
pub trait PackageManager {
    async fn uninstall(&self, names: &[String]) -> Result<()>;
}

/// The command line a package manager invocation resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Runs `yarn` or `npm` in the project root.
#[derive(Debug, Clone)]
pub struct ProcessPackageManager<'a> {
    config: &'a ProjectConfig,
}

impl<'a> ProcessPackageManager<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    /// Concrete tool for this project, resolving `auto` through `yarn.lock`.
    pub fn resolve_kind(&self) -> PackageManagerKind {
        match self.config.package_manager {
            PackageManagerKind::Auto if uses_yarn(&self.config.root) => PackageManagerKind::Yarn,
            PackageManagerKind::Auto => PackageManagerKind::Npm,
            kind => kind,
        }
    }

    pub fn uninstall_invocation(&self, names: &[String]) -> Invocation {
        let kind = self.resolve_kind();
        debug!("Using {kind} (configured as {})", self.config.package_manager);

        match kind {
            PackageManagerKind::Yarn => Invocation {
                program: "yarn".to_owned(),
                args: ["remove".to_owned()]
                    .into_iter()
                    .chain(names.iter().cloned())
                    .collect(),
            },
            _ => Invocation {
                program: "npm".to_owned(),
                args: ["uninstall".to_owned(), "--save".to_owned()]
                    .into_iter()
                    .chain(names.iter().cloned())
                    .collect(),
            },
        }
    }

    async fn run(&self, invocation: Invocation) -> Result<()> {
        let command_line = format!("{} {}", invocation.program, invocation.args.join(" "));
        debug!("Running \"{command_line}\" in \"{}\"", self.config.root);

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(command_line.clone());
        spinner.enable_steady_tick(Duration::from_millis(100));

        // Output is captured so the spinner never draws over it.
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&self.config.root)
            .output()
            .await;

        spinner.finish_and_clear();

        let output = output.with_context(|| format!("Failed to run \"{command_line}\""))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "\"{command_line}\" failed with {}\n{}",
                output.status,
                stderr.trim_end()
            );
        }

        Ok(())
    }
}

impl PackageManager for ProcessPackageManager<'_> {
    async fn uninstall(&self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        self.run(self.uninstall_invocation(names)).await
    }
}

fn uses_yarn(root: &Utf8Path) -> bool {
    root.join("yarn.lock").exists()
}
