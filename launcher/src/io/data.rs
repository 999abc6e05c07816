//! Reading workflow databases and checking scenario files.

use std::fs;
use std::path::Path;

use crate::core::scenario::Database;
use crate::error::WorkflowError;

/// Parses workflow files and checks that referenced files exist.
pub trait DataManager {
    fn read(&self, path: &Path) -> Result<Database, WorkflowError>;
    fn check_existence(&self, path: &Path) -> Result<(), WorkflowError>;
}

impl<T: DataManager + ?Sized> DataManager for &T {
    fn read(&self, path: &Path) -> Result<Database, WorkflowError> {
        (**self).read(path)
    }

    fn check_existence(&self, path: &Path) -> Result<(), WorkflowError> {
        (**self).check_existence(path)
    }
}

/// Filesystem-backed data manager for YAML and JSON workflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDataManager;

impl DataManager for FsDataManager {
    fn read(&self, path: &Path) -> Result<Database, WorkflowError> {
        let contents = fs::read_to_string(path).map_err(|source| WorkflowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| WorkflowError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn check_existence(&self, path: &Path) -> Result<(), WorkflowError> {
        if !path.exists() {
            return Err(WorkflowError::Missing {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}
