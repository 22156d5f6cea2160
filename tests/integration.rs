//! Integration tests for Stepwright
//!
//! End-to-end tests: loading sources from disk, batch compilation and document output.
//!
mod common;
use common::*;
use serde_json::Value;
use std::fs;
use stepwright::emit::DOCUMENT_SEPARATOR;
use stepwright::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn emit(machines: &[&StateMachine], format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_documents(&mut out, machines.iter().copied(), format).expect("Failed to emit");
        String::from_utf8(out).expect("Output should be UTF-8")
    }

    #[test]
    fn test_compilation_is_deterministic() {
        for yaml in [SINGLE_TASK_YAML, CHOICE_YAML, CATCH_YAML, FULL_YAML] {
            let first = compile("wf", yaml).unwrap();
            let second = compile("wf", yaml).unwrap();
            assert_eq!(
                render(&first, OutputFormat::Json).unwrap(),
                render(&second, OutputFormat::Json).unwrap()
            );
        }
    }

    #[test]
    fn test_every_edge_resolves() {
        for yaml in [SINGLE_TASK_YAML, CHOICE_YAML, CATCH_YAML, FULL_YAML] {
            let machine = compile("wf", yaml).unwrap();
            let names: Vec<_> = machine.state_names().collect();

            assert!(names.contains(&machine.start_at.as_str()));
            assert_eq!(
                names.iter().filter(|n| **n == machine.start_at).count(),
                1,
                "start state must be unique"
            );
            for state in &machine.states {
                for target in state.targets() {
                    assert!(names.contains(&target), "{} -> {} dangles", state.name, target);
                }
            }
        }
    }

    #[test]
    fn test_non_choice_states_have_one_way_out() {
        let machine = compile("full", FULL_YAML).unwrap();
        for state in &machine.states {
            if state.is_choice() || matches!(state.kind, StateKind::Succeed) {
                continue;
            }
            assert!(
                state.transition().is_some(),
                "{} has no outgoing edge",
                state.name
            );
        }
    }

    #[test]
    fn test_json_output_keeps_insertion_order() {
        let machine = compile("orders", CATCH_YAML).unwrap();
        let rendered = render(&machine, OutputFormat::Json).unwrap();

        let position = |needle: &str| rendered.find(needle).unwrap();
        assert!(position("\"Version\"") < position("\"Comment\""));
        assert!(position("\"Comment\"") < position("\"StartAt\""));
        assert!(position("\"StartAt\"") < position("\"States\""));
        assert!(position("\"Init\": {") < position("\"Create Order\": {"));
        assert!(position("\"Create Order\": {") < position("\"MicroServiceErrorFallback\": {"));
        assert!(position("\"MicroServiceErrorFallback\": {") < position("\"notify\": {"));
        assert!(rendered.starts_with("{\n  \"Version\": \"1.0\""));
    }

    #[test]
    fn test_pass_through_payload_keeps_source_key_order() {
        let yaml = r#"
states:
  - name: send
    tech:
      service: svc
      post: /send
      body:
        zeta: 1
        alpha: 2
"#;
        let machine = compile("ordered", yaml).unwrap();
        let rendered = render(&machine, OutputFormat::Json).unwrap();

        let zeta = rendered.find("\"zeta\"").unwrap();
        let alpha = rendered.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "body keys were reordered:\n{}", rendered);
    }

    #[test]
    fn test_yaml_output_round_trips_to_same_tree() {
        let machine = compile("full", FULL_YAML).unwrap();
        let as_yaml: Value = serde_yaml::from_str(&render(&machine, OutputFormat::Yaml).unwrap())
            .expect("Emitted YAML should parse");
        assert_eq!(as_yaml, serde_json::to_value(&machine).unwrap());
    }

    #[test]
    fn test_documents_are_separated() {
        let single = compile("single", SINGLE_TASK_YAML).unwrap();
        let choice = compile("choice", CHOICE_YAML).unwrap();
        let output = emit(&[&single, &choice], OutputFormat::Json);

        let documents: Vec<_> = output.split(&format!("\n{}\n", DOCUMENT_SEPARATOR)).collect();
        assert_eq!(documents.len(), 2);
        let first: Value = serde_json::from_str(documents[0]).unwrap();
        let second: Value = serde_json::from_str(documents[1]).unwrap();
        assert_eq!(first["Comment"], "single");
        assert_eq!(second["Comment"], "choice");

        let lone = emit(&[&single], OutputFormat::Json);
        assert!(!lone.contains(DOCUMENT_SEPARATOR));
    }

    #[test]
    fn test_batch_keeps_declaration_order() {
        let sources = vec![
            WorkflowSource::new("b", Ok(document(CHOICE_YAML))),
            WorkflowSource::new("a", Ok(document(SINGLE_TASK_YAML))),
            WorkflowSource::new("b", Ok(document(SINGLE_TASK_YAML))),
        ];
        let compiled = compile_batch(&Compiler::default(), sources).unwrap();

        let names: Vec<_> = compiled.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        // First occurrence of a name wins.
        assert!(compiled[0].machine.get("c1").is_some());
    }

    #[test]
    fn test_batch_collects_every_failure() {
        let sources = vec![
            WorkflowSource::new("good", Ok(document(SINGLE_TASK_YAML))),
            WorkflowSource::new("empty", Ok(document(""))),
            WorkflowSource::new(
                "missing",
                Err(CompileError::DocumentNotFound {
                    path: "flows/missing.yml".to_string(),
                }),
            ),
            WorkflowSource::new("also good", Ok(document(CHOICE_YAML))),
        ];
        let err = compile_batch(&Compiler::default(), sources).unwrap_err();

        let failed: Vec<_> = err.failed_names().collect();
        assert_eq!(failed, vec!["empty", "missing"]);
        assert_eq!(err.failures[0].error, CompileError::EmptyDocument);

        let report = err.to_string();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error in empty: "));
        assert!(lines[1].starts_with("Error in missing: "));
        assert!(lines[1].contains("flows/missing.yml"));
    }

    #[test]
    fn test_sources_loaded_from_project_dir() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("orders.yml"), CATCH_YAML).unwrap();
        fs::write(dir.path().join("reminder.yml"), FULL_YAML).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a workflow").unwrap();

        let locator = SourceLocator::new(dir.path());
        let names = locator.discover().unwrap();
        assert_eq!(names, vec!["orders", "reminder"]);

        let sources = names
            .iter()
            .map(|name| WorkflowSource::new(name.as_str(), locator.load(name)));
        let compiled = compile_batch(&Compiler::default(), sources).unwrap();
        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].machine.comment, "Order processing");
        assert_eq!(compiled[1].machine.comment, "Invoice reminder");
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let locator = SourceLocator::new(dir.path());

        match locator.load("ghost") {
            Err(CompileError::DocumentNotFound { path }) => assert!(path.ends_with("ghost.yml")),
            other => panic!("Expected DocumentNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_source_is_reported_as_parse_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.yml");
        fs::write(&path, "states: [\n  - name: a\n").unwrap();

        assert!(matches!(load_file(&path), Err(CompileError::Parse(_))));
    }
}
