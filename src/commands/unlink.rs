use anyhow::Result;
use clap::Args;

use crate::{
    config::ProjectConfig,
    logger::{Logger, TracingLogger},
    unlink::{SymlinkUnlinker, Unlink, UnlinkOptions},
};

pub const DESCRIPTION: &str = "unlink native dependency";

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UnlinkArgs {
    /// Package whose link should be removed
    #[arg(value_name = "packageName")]
    pub package_name: String,
}

pub struct UnlinkCommand<'a, U, L> {
    unlink: &'a U,
    logger: &'a L,
}

impl<'a, U: Unlink, L: Logger> UnlinkCommand<'a, U, L> {
    pub fn new(unlink: &'a U, logger: &'a L) -> Self {
        Self { unlink, logger }
    }

    pub async fn run(&self, args: &UnlinkArgs, ctx: &ProjectConfig) -> Result<()> {
        let name = &args.package_name;

        self.logger.info(&format!("Unlinking \"{name}\"..."));
        self.unlink
            .func(&[name.clone()], ctx, &UnlinkOptions::default())
            .await?;

        self.logger
            .success(&format!("Successfully unlinked \"{name}\""));

        Ok(())
    }
}

pub async fn unlink(args: &UnlinkArgs, ctx: &ProjectConfig) -> Result<()> {
    UnlinkCommand::new(&SymlinkUnlinker, &TracingLogger)
        .run(args, ctx)
        .await
}
