use door_marks::domain::model::{
    CommandResult, ElementId, MarkParameter, MarkReport, ReportLine, TransactionState,
};
use door_marks::{CommandConfig, InMemoryDocument, ListMarksCommand, TomlConfig};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const MODEL: &str = r#"{
  "elements": [
    {"id": 1, "category": "Doors", "kind": "family_instance", "mark": {"value": "A"}},
    {"id": 2, "category": "Doors", "kind": "family_instance", "mark": {"value": "B"}},
    {"id": 3, "category": "Doors", "kind": "family_instance", "mark": {"value": "A"}},
    {"id": 4, "category": "Doors", "kind": "family_symbol"},
    {"id": 5, "category": "Windows", "kind": "family_instance", "mark": {"value": "W1"}},
    {"id": 6, "category": null, "kind": "family_instance", "mark": {"value": "X"}}
  ],
  "selection": [1, 5, 999]
}"#;

fn write_model(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn mark(value: &str) -> MarkParameter {
    MarkParameter::Value(value.to_string())
}

#[test]
fn test_end_to_end_report_and_mutation() {
    let model = write_model(MODEL);
    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();
    let mut sink: Vec<MarkReport> = Vec::new();

    let outcome = ListMarksCommand::new(CommandConfig::default()).invoke(&mut doc, &mut sink);

    assert_eq!(outcome.result, CommandResult::Succeeded);
    assert_eq!(
        sink,
        vec![MarkReport {
            total_elements: 3,
            lines: vec![
                ReportLine {
                    mark: "A".to_string(),
                    count: 2
                },
                ReportLine {
                    mark: "B".to_string(),
                    count: 1
                },
            ],
        }]
    );

    let mutation = outcome.mutation.unwrap();
    assert_eq!(mutation.changed_count, 1);
    assert_eq!(mutation.changed, vec![ElementId(1)]);
    assert_eq!(mutation.ineligible, vec![ElementId(5)]);
    assert_eq!(mutation.unresolved, vec![ElementId(999)]);
    assert_eq!(mutation.transaction, TransactionState::Committed);

    assert_eq!(doc.mark_of(ElementId(1)), Some(&mark("42")));
    assert_eq!(doc.mark_of(ElementId(5)), Some(&mark("W1")));
    assert_eq!(doc.mark_of(ElementId(6)), Some(&mark("X")));
}

#[test]
fn test_second_run_changes_same_count_and_regroups() {
    let model = write_model(MODEL);
    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();
    let command = ListMarksCommand::new(CommandConfig::default());

    let first = command.invoke(&mut doc, &mut Vec::<MarkReport>::new());
    let mut sink: Vec<MarkReport> = Vec::new();
    let second = command.invoke(&mut doc, &mut sink);

    assert_eq!(first.changed_count(), 1);
    assert_eq!(second.changed_count(), 1);
    assert_eq!(doc.mark_of(ElementId(1)), Some(&mark("42")));

    let marks: Vec<&str> = sink[0].lines.iter().map(|l| l.mark.as_str()).collect();
    assert_eq!(marks, vec!["42", "A", "B"]);
    assert_eq!(
        doc.committed_transactions(),
        ["Modify Existing Door Marks", "Modify Existing Door Marks"]
    );
}

#[test]
fn test_empty_category_and_empty_selection() {
    let model = write_model(
        r#"{"elements": [{"id": 1, "category": "Walls", "kind": "system", "mark": {"value": "W"}}]}"#,
    );
    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();
    let mut sink: Vec<MarkReport> = Vec::new();

    let outcome = ListMarksCommand::new(CommandConfig::default()).invoke(&mut doc, &mut sink);

    assert!(sink.is_empty());
    assert_eq!(outcome.result, CommandResult::Succeeded);
    assert_eq!(outcome.changed_count(), 0);
    assert_eq!(outcome.transaction_state(), TransactionState::Committed);
}

#[test]
fn test_toml_config_drives_command_and_model_round_trips() {
    let model = write_model(MODEL);
    let config = TomlConfig::from_toml_str(
        r#"
[filter]
category = "Windows"

[report]
noun = "window"

[mutation]
target_value = "W-99"
transaction_name = "Renumber Windows"
"#,
    )
    .unwrap();

    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();
    let mut sink: Vec<MarkReport> = Vec::new();
    let outcome =
        ListMarksCommand::new(config.to_command_config()).invoke(&mut doc, &mut sink);

    assert_eq!(outcome.result, CommandResult::Succeeded);
    assert_eq!(sink[0].total_elements, 1);
    assert_eq!(outcome.mutation.as_ref().unwrap().changed, vec![ElementId(5)]);

    let dir = TempDir::new().unwrap();
    let saved = dir.path().join("model.json");
    doc.save(&saved).unwrap();

    let reloaded = InMemoryDocument::from_file(&saved).unwrap();
    assert_eq!(reloaded.mark_of(ElementId(5)), Some(&mark("W-99")));
    assert_eq!(reloaded.mark_of(ElementId(1)), Some(&mark("A")));
}

#[test]
fn test_unset_marks_grouped_under_empty_key_when_allowed() {
    let model = write_model(
        r#"{"elements": [
            {"id": 1, "category": "Doors", "kind": "family_instance", "mark": "unset"},
            {"id": 2, "category": "Doors", "kind": "family_instance", "mark": {"value": ""}},
            {"id": 3, "category": "Doors", "kind": "family_instance", "mark": {"value": "A"}}
        ]}"#,
    );
    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();

    let rejecting = ListMarksCommand::new(CommandConfig::default())
        .invoke(&mut doc, &mut Vec::<MarkReport>::new());
    assert_eq!(rejecting.result, CommandResult::Failed);

    let config = CommandConfig {
        unset_mark_policy: door_marks::domain::ports::UnsetMarkPolicy::Empty,
        ..Default::default()
    };
    let mut sink: Vec<MarkReport> = Vec::new();
    let outcome = ListMarksCommand::new(config).invoke(&mut doc, &mut sink);

    assert_eq!(outcome.result, CommandResult::Succeeded);
    assert_eq!(
        sink[0].lines,
        vec![
            ReportLine {
                mark: String::new(),
                count: 2
            },
            ReportLine {
                mark: "A".to_string(),
                count: 1
            },
        ]
    );
}

#[test]
fn test_read_only_element_aborts_all_writes() {
    let model = write_model(
        r#"{"elements": [
            {"id": 1, "category": "Doors", "kind": "family_instance", "mark": {"value": "A"}},
            {"id": 2, "category": "Doors", "kind": "family_instance", "mark": {"value": "B"}, "read_only": true}
        ],
        "selection": [1, 2]}"#,
    );
    let mut doc = InMemoryDocument::from_file(model.path()).unwrap();

    let outcome = ListMarksCommand::new(CommandConfig::default())
        .invoke(&mut doc, &mut Vec::<MarkReport>::new());

    assert_eq!(outcome.result, CommandResult::Failed);
    assert!(outcome.mutation.is_none());
    assert_eq!(doc.mark_of(ElementId(1)), Some(&mark("A")));
    assert_eq!(doc.mark_of(ElementId(2)), Some(&mark("B")));
    assert!(doc.committed_transactions().is_empty());
}

#[test]
fn test_missing_model_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = InMemoryDocument::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, door_marks::MarkError::IoError(_)));
}
