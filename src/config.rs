use std::{fmt, fs, str::FromStr};

use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

pub const CONFIG_FILE: &str = "native.toml";

/// Which tool removes packages from the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PackageManagerKind {
    /// Yarn when the project has a `yarn.lock`, npm otherwise.
    #[default]
    Auto,
    Npm,
    Yarn,
}

impl FromStr for PackageManagerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            other => bail!("Unknown package manager \"{other}\", expected auto, npm or yarn"),
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        };
        f.write_str(name)
    }
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    modules_dir: Option<Utf8PathBuf>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    package_manager: Option<PackageManagerKind>,
    platforms: Option<Vec<String>>,
}

/// Description of the host project handed to every command.
///
/// Commands only read it; nothing here is written back to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub root: Utf8PathBuf,
    pub modules_dir: Utf8PathBuf,
    pub package_manager: PackageManagerKind,
    pub platforms: Vec<String>,
}

impl ProjectConfig {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules_dir: Utf8PathBuf::from("node_modules"),
            package_manager: PackageManagerKind::Auto,
            platforms: vec!["android".to_owned(), "ios".to_owned()],
        }
    }

    /// Reads `native.toml` from `root` when it exists, falling back to defaults.
    pub fn load(root: impl Into<Utf8PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        let path = config.root.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(config);
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("Failed to read \"{path}\""))?;
        let file: ConfigFile = toml_edit::de::from_str(&contents)
            .with_context(|| format!("Failed to parse \"{path}\""))?;

        if let Some(modules_dir) = file.modules_dir {
            config.modules_dir = modules_dir;
        }
        if let Some(package_manager) = file.package_manager {
            config.package_manager = package_manager;
        }
        if let Some(platforms) = file.platforms {
            config.platforms = platforms;
        }

        Ok(config)
    }

    /// Absolute location of the module store.
    pub fn modules_path(&self) -> Utf8PathBuf {
        self.root.join(&self.modules_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn defaults_without_config_file() {
        let (_dir, root) = temp_root();
        let config = ProjectConfig::load(root.clone()).unwrap();

        assert_eq!(config, ProjectConfig::new(root.clone()));
        assert_eq!(config.modules_path(), root.join("node_modules"));
        assert_eq!(config.package_manager, PackageManagerKind::Auto);
        assert_eq!(config.platforms, ["android", "ios"]);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let (_dir, root) = temp_root();
        fs::write(
            root.join(CONFIG_FILE),
            "modules_dir = \"vendor/modules\"\npackage_manager = \"yarn\"\nplatforms = [\"ios\"]\n",
        )
        .unwrap();

        let config = ProjectConfig::load(root.clone()).unwrap();

        assert_eq!(config.modules_path(), root.join("vendor/modules"));
        assert_eq!(config.package_manager, PackageManagerKind::Yarn);
        assert_eq!(config.platforms, ["ios"]);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let (_dir, root) = temp_root();
        fs::write(root.join(CONFIG_FILE), "package_manager = \"npm\"\n").unwrap();

        let config = ProjectConfig::load(root).unwrap();

        assert_eq!(config.package_manager, PackageManagerKind::Npm);
        assert_eq!(config.modules_dir, Utf8PathBuf::from("node_modules"));
    }

    #[test]
    fn unknown_package_manager_is_rejected() {
        let (_dir, root) = temp_root();
        fs::write(root.join(CONFIG_FILE), "package_manager = \"pnpm\"\n").unwrap();

        let err = ProjectConfig::load(root).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown package manager \"pnpm\""));
    }
}
