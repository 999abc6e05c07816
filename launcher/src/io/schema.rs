//! Workflow schema validation with JSON Schema.
//!
//! Workflow files are YAML (JSON parses as YAML too). The document is loaded
//! into a `serde_json::Value` and checked against the workflow schema, which
//! is embedded in the binary unless the launcher config names a file.

use std::fs;
use std::path::Path;

use jsonschema::{Validator, validator_for};
use serde_json::Value;
use tracing::debug;

use crate::error::WorkflowError;

/// Built-in workflow schema (`schemas/workflow/v1.schema.json`).
pub const WORKFLOW_SCHEMA_V1: &str =
    include_str!("../../../schemas/workflow/v1.schema.json");

/// Checks a workflow file before it is parsed.
pub trait SchemaValidator {
    /// Fails with [`WorkflowError::InvalidWorkflow`] when the file does not
    /// conform.
    fn validate(&self, path: &Path) -> Result<(), WorkflowError>;
}

impl<T: SchemaValidator + ?Sized> SchemaValidator for &T {
    fn validate(&self, path: &Path) -> Result<(), WorkflowError> {
        (**self).validate(path)
    }
}

/// Validator compiled from a JSON Schema document.
pub struct JsonSchemaValidator {
    schema: Value,
    compiled: Validator,
}

impl JsonSchemaValidator {
    pub fn builtin() -> Result<Self, WorkflowError> {
        let schema: Value = serde_json::from_str(WORKFLOW_SCHEMA_V1)
            .map_err(|err| WorkflowError::Schema(format!("parse built-in schema: {err}")))?;
        Self::from_value(schema)
    }

    pub fn from_file(path: &Path) -> Result<Self, WorkflowError> {
        let contents = fs::read_to_string(path).map_err(|source| WorkflowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: Value = serde_json::from_str(&contents).map_err(|err| {
            WorkflowError::Schema(format!("parse schema {}: {err}", path.display()))
        })?;
        Self::from_value(schema)
    }

    pub fn from_value(schema: Value) -> Result<Self, WorkflowError> {
        let compiled =
            validator_for(&schema).map_err(|err| WorkflowError::Schema(err.to_string()))?;
        Ok(Self { schema, compiled })
    }

    /// The schema document this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Violation messages for an already-parsed document; empty when valid.
    pub fn violations(&self, instance: &Value) -> Vec<String> {
        self.compiled
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect()
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, path: &Path) -> Result<(), WorkflowError> {
        let invalid = |details: Vec<String>| WorkflowError::InvalidWorkflow {
            path: path.to_path_buf(),
            details,
        };
        let contents = fs::read_to_string(path).map_err(|source| WorkflowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let instance: Value = serde_yaml::from_str(&contents)
            .map_err(|err| invalid(vec![format!("parse {}: {err}", path.display())]))?;
        let details = self.violations(&instance);
        if !details.is_empty() {
            return Err(invalid(details));
        }
        debug!(path = %path.display(), "workflow schema ok");
        Ok(())
    }
}
