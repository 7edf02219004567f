mod uninstall;
mod unlink;

pub use uninstall::{uninstall, UninstallArgs, UninstallCommand, DESCRIPTION as UNINSTALL_DESCRIPTION};
pub use unlink::{unlink, UnlinkArgs, UnlinkCommand, DESCRIPTION as UNLINK_DESCRIPTION};
