use std::{env::current_dir, process::ExitCode};

use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use native_cli::{
    commands::{self, UninstallArgs, UnlinkArgs, UNINSTALL_DESCRIPTION, UNLINK_DESCRIPTION},
    config::ProjectConfig,
};

#[derive(Parser)]
#[command(name = "native")]
#[command(about = "Manage native dependencies of a mobile app project", long_about = None)]
struct Cli {
    /// Project root, defaults to the current directory
    #[arg(long, global = true)]
    root: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = UNINSTALL_DESCRIPTION)]
    Uninstall(UninstallArgs),
    #[command(about = UNLINK_DESCRIPTION)]
    Unlink(UnlinkArgs),
}

fn project_root(root: Option<Utf8PathBuf>) -> Result<Utf8PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => Utf8PathBuf::from_path_buf(current_dir()?)
            .map_err(|path| anyhow!("Current directory \"{}\" is not UTF-8", path.display())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match project_root(cli.root).and_then(ProjectConfig::load) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load project: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Commands::Uninstall(args) => {
            if let Err(e) = commands::uninstall(args, &config).await {
                error!("Failed to uninstall package: {:?}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Unlink(args) => {
            if let Err(e) = commands::unlink(args, &config).await {
                error!("Failed to unlink package: {:?}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_uninstall_package_name() {
        let cli = Cli::try_parse_from(["native", "uninstall", "left-pad"]).unwrap();

        assert!(cli.root.is_none());
        assert!(matches!(
            cli.command,
            Commands::Uninstall(UninstallArgs { ref package_name }) if package_name == "left-pad"
        ));
    }

    #[test]
    fn root_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["native", "unlink", "left-pad", "--root", "/app"]).unwrap();

        assert_eq!(cli.root, Some(Utf8PathBuf::from("/app")));
        assert!(matches!(cli.command, Commands::Unlink(_)));
    }

    #[test]
    fn missing_package_name_is_an_argument_error() {
        let err = Cli::try_parse_from(["native", "uninstall"]).err().unwrap();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn extra_package_names_are_rejected() {
        assert!(Cli::try_parse_from(["native", "uninstall", "a", "b"]).is_err());
    }
}
