//! Launcher configuration stored in `launcher.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::io::resolver::{PackageResolver, prefixes_from_env};
use crate::io::schema::JsonSchemaValidator;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

/// Launcher configuration (TOML).
///
/// Every field is optional. Relative paths are taken relative to the
/// directory the launcher is started from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Launcher package path reported to downstream orchestration.
    /// Defaults to the working directory.
    pub launcher_root: Option<PathBuf>,

    /// Install prefixes searched for `share/<package>`. When empty, the
    /// `AMENT_PREFIX_PATH` environment variable is used instead.
    pub package_prefixes: Vec<PathBuf>,

    /// JSON Schema used to validate workflows instead of the built-in one.
    pub schema_path: Option<PathBuf>,
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if let Some(root) = &self.launcher_root
            && root.as_os_str().is_empty()
        {
            return Err(WorkflowError::Config(
                "launcher_root must be non-empty".to_string(),
            ));
        }
        if let Some(schema_path) = &self.schema_path
            && schema_path.as_os_str().is_empty()
        {
            return Err(WorkflowError::Config(
                "schema_path must be non-empty".to_string(),
            ));
        }
        if self
            .package_prefixes
            .iter()
            .any(|prefix| prefix.as_os_str().is_empty())
        {
            return Err(WorkflowError::Config(
                "package_prefixes entries must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute launcher root, anchored at `cwd` when relative or unset.
    pub fn launcher_root(&self, cwd: &Path) -> PathBuf {
        match &self.launcher_root {
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        }
    }

    /// Configured prefixes, falling back to the environment.
    pub fn package_prefixes(&self, cwd: &Path) -> Vec<PathBuf> {
        if self.package_prefixes.is_empty() {
            return prefixes_from_env();
        }
        self.package_prefixes
            .iter()
            .map(|prefix| cwd.join(prefix))
            .collect()
    }

    pub fn resolver(&self, cwd: &Path) -> PackageResolver {
        PackageResolver::new(self.package_prefixes(cwd), self.launcher_root(cwd))
    }

    pub fn schema_validator(&self, cwd: &Path) -> Result<JsonSchemaValidator, WorkflowError> {
        match &self.schema_path {
            Some(path) => JsonSchemaValidator::from_file(&cwd.join(path)),
            None => JsonSchemaValidator::builtin(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`.
pub fn load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        return Ok(LauncherConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
