//! Workflow loader behavior, observed through recording collaborators and
//! against real install trees on disk.

use std::path::PathBuf;

use launcher::core::scenario::{Database, Expect, Scenario};
use launcher::io::data::FsDataManager;
use launcher::io::resolver::PackageResolver;
use launcher::io::schema::JsonSchemaValidator;
use launcher::test_support::{
    RecordingData, RecordingResolver, RecordingValidator, WorkflowFixture,
};
use launcher::workflow::WorkflowLoader;
use serde_json::Value;

fn scenarios(paths: &[&str]) -> Database {
    Database {
        scenarios: paths.iter().map(|path| Scenario::new(*path)).collect(),
    }
}

#[test]
fn absolute_workflow_path_never_reaches_resolver() {
    let resolver = RecordingResolver::new();
    let validator = RecordingValidator::accepting();
    let data = RecordingData::new(Database::default());
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    loader
        .load("/abs/workflow.yaml", "/abs/log")
        .expect("load");

    assert!(
        !resolver
            .calls()
            .iter()
            .any(|call| call == "/abs/workflow.yaml")
    );
    assert_eq!(validator.validated(), vec![PathBuf::from("/abs/workflow.yaml")]);
    assert_eq!(data.reads(), vec![PathBuf::from("/abs/workflow.yaml")]);
}

#[test]
fn package_reference_is_resolved_then_validated_and_read() {
    let reference = "$(find-pkg-share demo)/workflow.yaml";
    let resolver = RecordingResolver::new().with(reference, "/share/demo/workflow.yaml");
    let validator = RecordingValidator::accepting();
    let data = RecordingData::new(Database::default());
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    loader.load(reference, "/abs/log").expect("load");

    assert_eq!(resolver.calls(), vec![reference.to_string()]);
    assert_eq!(
        validator.validated(),
        vec![PathBuf::from("/share/demo/workflow.yaml")]
    );
    assert_eq!(data.reads(), vec![PathBuf::from("/share/demo/workflow.yaml")]);
}

#[test]
fn scenarios_keep_count_and_order() {
    let resolver = RecordingResolver::new();
    let validator = RecordingValidator::accepting();
    let data = RecordingData::new(scenarios(&["/s/c.yaml", "rel/a.yaml", "/s/b.yaml"]));
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    let loaded = loader.load("/abs/workflow.yaml", "/abs/log").expect("load");

    let paths: Vec<PathBuf> = loaded.scenarios.iter().map(|s| s.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/s/c.yaml"),
            PathBuf::from("/resolved/rel/a.yaml"),
            PathBuf::from("/s/b.yaml"),
        ]
    );
    assert_eq!(data.existence_checks(), paths);
}

#[test]
fn absolute_scenario_path_is_unchanged_but_still_checked() {
    let resolver = RecordingResolver::new();
    let validator = RecordingValidator::accepting();
    let data = RecordingData::new(scenarios(&["/s/already.yaml"]));
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    let loaded = loader.load("/abs/workflow.yaml", "/abs/log").expect("load");

    assert_eq!(loaded.scenarios[0].path, PathBuf::from("/s/already.yaml"));
    assert_eq!(
        data.existence_checks(),
        vec![PathBuf::from("/s/already.yaml")]
    );
    assert!(resolver.calls().is_empty());
}

#[test]
fn schema_failure_returns_no_scenarios() {
    let resolver = RecordingResolver::new();
    let validator = RecordingValidator::rejecting(vec!["bad".to_string()]);
    let data = RecordingData::new(scenarios(&["/s/a.yaml"]));
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    let err = loader
        .load("/abs/workflow.yaml", "/abs/log")
        .expect_err("invalid workflow");

    assert!(err.is_invalid_workflow());
    assert!(data.reads().is_empty());
    assert!(data.existence_checks().is_empty());
}

#[test]
fn bare_relative_log_directory_uses_resolver_result() {
    let resolver = RecordingResolver::new().with("log", "/var/launcher/log");
    let validator = RecordingValidator::accepting();
    let data = RecordingData::new(Database::default());
    let loader = WorkflowLoader::new(&resolver, &validator, &data, "/launcher");

    let loaded = loader.load("/abs/workflow.yaml", "log").expect("load");

    assert_eq!(loaded.log_path, PathBuf::from("/var/launcher/log"));
    assert_eq!(loaded.launcher_package_path, PathBuf::from("/launcher"));
    assert_eq!(resolver.calls(), vec!["log".to_string()]);
}

#[test]
fn loads_real_workflow_through_install_prefix() {
    let fixture = WorkflowFixture::new().expect("fixture");
    let share = fixture.add_package("demo").expect("package");
    fixture
        .write("install/share/demo/scenario/a.yaml", "{}\n")
        .expect("scenario a");
    let absolute_b = fixture.write("elsewhere/b.yaml", "{}\n").expect("scenario b");
    fixture
        .write(
            "install/share/demo/workflow/sample.yaml",
            &format!(
                "Scenario:\n  - path: $(find-pkg-share demo)/scenario/a.yaml\n    expect: failure\n    frame-rate: 30\n  - path: {}\n    tag: smoke\n",
                absolute_b.display()
            ),
        )
        .expect("workflow");

    let launcher_root = fixture.root().join("launcher");
    let loader = WorkflowLoader::new(
        PackageResolver::new(vec![fixture.prefix()], &launcher_root),
        JsonSchemaValidator::builtin().expect("schema"),
        FsDataManager,
        &launcher_root,
    );

    let loaded = loader
        .load("$(find-pkg-share demo)/workflow/sample.yaml", "log")
        .expect("load");

    assert_eq!(loaded.launcher_package_path, launcher_root);
    assert_eq!(loaded.log_path, launcher_root.join("log"));
    assert_eq!(loaded.scenarios.len(), 2);
    assert_eq!(loaded.scenarios[0].path, share.join("scenario/a.yaml"));
    assert_eq!(loaded.scenarios[0].expect(), Expect::Failure);
    assert_eq!(loaded.scenarios[1].path, absolute_b);
    assert_eq!(
        loaded.scenarios[1].fields.get("tag"),
        Some(&Value::String("smoke".to_string()))
    );
}

#[test]
fn missing_scenario_file_fails_the_load() {
    let fixture = WorkflowFixture::new().expect("fixture");
    let workflow = fixture
        .write("workflow.yaml", "Scenario:\n  - path: /definitely/not/here.yaml\n")
        .expect("workflow");
    let loader = WorkflowLoader::new(
        PackageResolver::new(Vec::new(), fixture.root()),
        JsonSchemaValidator::builtin().expect("schema"),
        FsDataManager,
        fixture.root(),
    );

    let err = loader
        .load(&workflow.to_string_lossy(), "log")
        .expect_err("missing scenario");
    assert!(!err.is_invalid_workflow());
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}
