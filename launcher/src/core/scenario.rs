//! Workflow data model: the database and the scenario records it lists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed workflow file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Database {
    /// Scenario records in source order.
    #[serde(rename = "Scenario")]
    pub scenarios: Vec<Scenario>,
}

/// One scenario entry.
///
/// Only `path` is interpreted by the loader; every other key is carried
/// through in `fields` exactly as it appeared in the workflow file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub path: PathBuf,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Expected outcome of running a scenario.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    #[default]
    Success,
    Failure,
    Error,
}

impl Expect {
    pub fn as_str(self) -> &'static str {
        match self {
            Expect::Success => "success",
            Expect::Failure => "failure",
            Expect::Error => "error",
        }
    }
}

impl Scenario {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fields: Map::new(),
        }
    }

    /// `expect` field; missing or unrecognized values read as success.
    pub fn expect(&self) -> Expect {
        self.fields
            .get("expect")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }

    pub fn frame_rate(&self) -> Option<f64> {
        self.fields.get("frame-rate").and_then(Value::as_f64)
    }

    pub fn step_time_ms(&self) -> Option<u64> {
        self.fields.get("step_time_ms").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scenarios_and_keeps_extra_fields() {
        let input = r#"
Scenario:
  - path: $(find-pkg-share demo)/a.yaml
    expect: failure
    frame-rate: 30
  - path: /abs/b.yaml
    note: keep me
"#;
        let db: Database = serde_yaml::from_str(input).expect("parse");
        assert_eq!(db.scenarios.len(), 2);
        assert_eq!(db.scenarios[0].expect(), Expect::Failure);
        assert_eq!(db.scenarios[0].frame_rate(), Some(30.0));
        assert_eq!(db.scenarios[1].expect(), Expect::Success);
        assert_eq!(
            db.scenarios[1].fields.get("note"),
            Some(&Value::String("keep me".to_string()))
        );
    }

    #[test]
    fn unknown_expect_reads_as_default() {
        let mut scenario = Scenario::new("/abs/a.yaml");
        scenario
            .fields
            .insert("expect".to_string(), Value::String("maybe".to_string()));
        assert_eq!(scenario.expect(), Expect::Success);
        assert_eq!(scenario.step_time_ms(), None);
    }
}
