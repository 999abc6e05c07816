//! Workflow loading: resolve, validate, read, and resolve scenario paths.
//!
//! The loader owns no I/O of its own. Path resolution, schema validation,
//! parsing, and existence checks are delegated to the collaborators in
//! [`crate::io`], so every step can be observed in tests.

use std::path::PathBuf;

use tracing::{error, info, instrument};

use crate::core::reference::Reference;
use crate::core::scenario::Scenario;
use crate::error::WorkflowError;
use crate::io::data::DataManager;
use crate::io::resolver::PathResolver;
use crate::io::schema::SchemaValidator;
use crate::logging;

/// Everything downstream orchestration needs to run a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkflow {
    pub launcher_package_path: PathBuf,
    pub log_path: PathBuf,
    /// Scenarios in workflow order, each `path` resolved and checked.
    pub scenarios: Vec<Scenario>,
}

/// Loads workflow files through injected collaborators.
pub struct WorkflowLoader<R, V, D> {
    resolver: R,
    validator: V,
    data: D,
    launcher_root: PathBuf,
}

impl<R: PathResolver, V: SchemaValidator, D: DataManager> WorkflowLoader<R, V, D> {
    pub fn new(resolver: R, validator: V, data: D, launcher_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            validator,
            data,
            launcher_root: launcher_root.into(),
        }
    }

    /// Resolve `workflow_file` and check it against the schema.
    ///
    /// Returns the resolved path. A schema violation is logged at error
    /// level and returned as [`WorkflowError::InvalidWorkflow`].
    pub fn validate_workflow(&self, workflow_file: &str) -> Result<PathBuf, WorkflowError> {
        let workflow_path = resolve_reference(&self.resolver, workflow_file)?;
        if let Err(err) = self.validator.validate(&workflow_path) {
            if err.is_invalid_workflow() {
                error!(path = %workflow_path.display(), "workflow file is not valid");
                error!("{err}");
            }
            return Err(err);
        }
        Ok(workflow_path)
    }

    /// Load a workflow and resolve the log directory and every scenario path.
    #[instrument(skip(self))]
    pub fn load(
        &self,
        workflow_file: &str,
        log_directory: &str,
    ) -> Result<LoadedWorkflow, WorkflowError> {
        logging::separator("Reading workflow");
        let workflow_path = self.validate_workflow(workflow_file)?;
        let database = self.data.read(&workflow_path)?;
        let log_path = resolve_reference(&self.resolver, log_directory)?;

        let mut scenarios = Vec::with_capacity(database.scenarios.len());
        for mut scenario in database.scenarios {
            let reference = scenario.path.to_string_lossy().into_owned();
            let scenario_path = resolve_reference(&self.resolver, &reference)?;
            self.data.check_existence(&scenario_path)?;
            scenario.path = scenario_path;
            scenarios.push(scenario);
        }

        info!(
            workflow = %workflow_path.display(),
            log = %log_path.display(),
            scenarios = scenarios.len(),
            "workflow loaded"
        );
        Ok(LoadedWorkflow {
            launcher_package_path: self.launcher_root.clone(),
            log_path,
            scenarios,
        })
    }
}

/// Absolute references pass through; anything else goes to `resolver`.
pub fn resolve_reference<R: PathResolver>(
    resolver: &R,
    reference: &str,
) -> Result<PathBuf, WorkflowError> {
    match Reference::classify(reference) {
        Reference::Absolute(path) => Ok(path.to_path_buf()),
        Reference::PackageRelative(reference) => resolver.resolve(reference),
    }
}
