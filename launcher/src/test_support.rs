//! Test-only fixtures and recording collaborators.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::scenario::Database;
use crate::error::WorkflowError;
use crate::io::data::DataManager;
use crate::io::resolver::PathResolver;
use crate::io::schema::SchemaValidator;

/// Resolver that records every reference it is asked about.
///
/// Unmapped references resolve to `/resolved/<reference>`.
#[derive(Debug, Default)]
pub struct RecordingResolver {
    mapping: BTreeMap<String, PathBuf>,
    calls: RefCell<Vec<String>>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: &str, resolved: impl Into<PathBuf>) -> Self {
        self.mapping.insert(reference.to_string(), resolved.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PathResolver for RecordingResolver {
    fn resolve(&self, reference: &str) -> Result<PathBuf, WorkflowError> {
        self.calls.borrow_mut().push(reference.to_string());
        Ok(self
            .mapping
            .get(reference)
            .cloned()
            .unwrap_or_else(|| Path::new("/resolved").join(reference)))
    }
}

/// Validator that records paths and either accepts or rejects all of them.
#[derive(Debug, Default)]
pub struct RecordingValidator {
    rejection: Option<Vec<String>>,
    validated: RefCell<Vec<PathBuf>>,
}

impl RecordingValidator {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(details: Vec<String>) -> Self {
        Self {
            rejection: Some(details),
            ..Self::default()
        }
    }

    pub fn validated(&self) -> Vec<PathBuf> {
        self.validated.borrow().clone()
    }
}

impl SchemaValidator for RecordingValidator {
    fn validate(&self, path: &Path) -> Result<(), WorkflowError> {
        self.validated.borrow_mut().push(path.to_path_buf());
        match &self.rejection {
            Some(details) => Err(WorkflowError::InvalidWorkflow {
                path: path.to_path_buf(),
                details: details.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Data manager serving a fixed database and recording every call.
#[derive(Debug, Default)]
pub struct RecordingData {
    database: Database,
    missing: BTreeSet<PathBuf>,
    reads: RefCell<Vec<PathBuf>>,
    existence_checks: RefCell<Vec<PathBuf>>,
}

impl RecordingData {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            ..Self::default()
        }
    }

    /// Make `check_existence` fail for `path`.
    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    pub fn existence_checks(&self) -> Vec<PathBuf> {
        self.existence_checks.borrow().clone()
    }
}

impl DataManager for RecordingData {
    fn read(&self, path: &Path) -> Result<Database, WorkflowError> {
        self.reads.borrow_mut().push(path.to_path_buf());
        Ok(self.database.clone())
    }

    fn check_existence(&self, path: &Path) -> Result<(), WorkflowError> {
        self.existence_checks.borrow_mut().push(path.to_path_buf());
        if self.missing.contains(path) {
            return Err(WorkflowError::Missing {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// Temporary directory laid out like an install tree.
///
/// Packages live under `<root>/install/share/<package>`.
pub struct WorkflowFixture {
    dir: TempDir,
}

impl WorkflowFixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Install prefix to hand to the package resolver.
    pub fn prefix(&self) -> PathBuf {
        self.root().join("install")
    }

    /// Create a package share directory and return it.
    pub fn add_package(&self, package: &str) -> Result<PathBuf> {
        let share = self.prefix().join("share").join(package);
        fs::create_dir_all(&share).with_context(|| format!("create {}", share.display()))?;
        Ok(share)
    }

    /// Write `contents` to `relative` under the fixture root.
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
