use std::{io::ErrorKind, sync::LazyLock};

use anyhow::{bail, Context, Result};
use regex::Regex;
use tokio::fs;
use tracing::debug;

use crate::config::ProjectConfig;

/// `name` or `@scope/name` without backslashes or whitespace. Any case, legacy
/// names like `JSONStream` are still installable.
static PACKAGE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@([^/\\\s]+)/)?([^/\\\s@][^/\\\s]*)$").expect("invalid regex")
});

/// Whether `name` resolves to an entry inside the module store.
fn is_valid_package_name(name: &str) -> bool {
    PACKAGE_NAME_REGEX.captures(name).is_some_and(|captures| {
        captures
            .iter()
            .skip(1)
            .flatten()
            .all(|segment| !matches!(segment.as_str(), "." | ".."))
    })
}

/// Options accepted by an unlink run. Empty for now.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UnlinkOptions {}

/// Removes the native references of dependencies from the host project.
#[allow(async_fn_in_trait)]
pub trait Unlink {
    async fn func(
        &self,
        names: &[String],
        ctx: &ProjectConfig,
        options: &UnlinkOptions,
    ) -> Result<()>;
}

/// Unlinks a dependency by deleting its symlink from the module store.
///
/// Real directories are left alone and missing entries are skipped, so
/// unlinking a dependency that was never linked succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymlinkUnlinker;

impl Unlink for SymlinkUnlinker {
    async fn func(
        &self,
        names: &[String],
        ctx: &ProjectConfig,
        _options: &UnlinkOptions,
    ) -> Result<()> {
        for name in names {
            if !is_valid_package_name(name) {
                bail!("\"{name}\" is not a valid package name");
            }

            debug!("Unlinking \"{name}\" from {}", ctx.platforms.join(", "));

            let link_path = ctx.modules_path().join(name);

            let metadata = match fs::symlink_metadata(&link_path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("\"{link_path}\" does not exist, nothing to unlink");
                    continue;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to inspect \"{link_path}\""))
                }
            };

            if !metadata.is_symlink() {
                debug!("\"{name}\" is not linked, leaving \"{link_path}\" in place");
                continue;
            }

            fs::remove_file(&link_path)
                .await
                .with_context(|| format!("Failed to remove link \"{link_path}\""))?;

            debug!("Removed link \"{link_path}\"");
        }

        Ok(())
    }
}
