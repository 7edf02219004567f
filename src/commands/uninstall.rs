use anyhow::Result;
use clap::Args;

use crate::{
    config::ProjectConfig,
    logger::{Logger, TracingLogger},
    package_manager::{PackageManager, ProcessPackageManager},
    unlink::{SymlinkUnlinker, Unlink, UnlinkOptions},
};

pub const DESCRIPTION: &str = "uninstall and unlink native dependencies";

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UninstallArgs {
    /// Package to unlink and remove from the manifest
    #[arg(value_name = "packageName")]
    pub package_name: String,
}

/// Unlinks a native dependency, then removes it through the package manager.
///
/// The two steps run strictly in order and any failure is returned as is:
/// a failed unlink means the package manager is never called, and a failed
/// uninstall leaves the dependency unlinked.
pub struct UninstallCommand<'a, U, P, L> {
    unlink: &'a U,
    package_manager: &'a P,
    logger: &'a L,
}

impl<'a, U, P, L> UninstallCommand<'a, U, P, L>
where
    U: Unlink,
    P: PackageManager,
    L: Logger,
{
    pub fn new(unlink: &'a U, package_manager: &'a P, logger: &'a L) -> Self {
        Self {
            unlink,
            package_manager,
            logger,
        }
    }

    pub async fn run(&self, args: &UninstallArgs, ctx: &ProjectConfig) -> Result<()> {
        let name = &args.package_name;
        let names = [name.clone()];

        self.logger.info(&format!("Unlinking \"{name}\"..."));
        self.unlink
            .func(&names, ctx, &UnlinkOptions::default())
            .await?;

        self.logger.info(&format!("Uninstalling \"{name}\"..."));
        self.package_manager.uninstall(&names).await?;

        self.logger
            .success(&format!("Successfully uninstalled and unlinked \"{name}\""));

        Ok(())
    }
}

pub async fn uninstall(args: &UninstallArgs, ctx: &ProjectConfig) -> Result<()> {
    let package_manager = ProcessPackageManager::new(ctx);

    UninstallCommand::new(&SymlinkUnlinker, &package_manager, &TracingLogger)
        .run(args, ctx)
        .await
}
