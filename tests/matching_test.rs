use latch::hooks::{
    Hook, HookDefinition, HookMatcher, install_definition, matchers_to_remove, remove_by_command,
    remove_definition,
};
use latch::jsonc::parse;
use serde_json::{Value, json};

fn matcher(pattern: &str, commands: &[&str]) -> HookMatcher {
    HookMatcher {
        matcher: pattern.to_string(),
        hooks: commands.iter().map(|c| Hook::command(*c)).collect(),
    }
}

fn definition(event: &str, matchers: Vec<HookMatcher>) -> HookDefinition {
    let mut definition = HookDefinition::new();
    definition.insert(event.to_string(), matchers);
    definition
}

fn parsed(text: &str) -> Value {
    let (root, errors) = parse(text);
    assert!(errors.is_empty(), "unexpected diagnostics: {errors:?}");
    root.expect("document should have a root").to_value()
}

#[test]
fn equality_is_exact_not_partial() {
    let wanted = matcher("Bash", &["latch-guard"]);
    let existing = vec![
        json!({"matcher": "Bash", "hooks": [{"type": "command", "command": "latch-guard"}]}),
        json!({"matcher": "Bash", "hooks": [
            {"type": "command", "command": "latch-guard"},
            {"type": "command", "command": "other"},
        ]}),
        json!({"matcher": "Edit", "hooks": [{"type": "command", "command": "latch-guard"}]}),
        json!({"matcher": "Bash", "hooks": [
            {"type": "command", "command": "latch-guard", "timeout": 5},
        ]}),
        json!("garbage"),
        json!({"matcher": "Bash", "hooks": "not an array"}),
    ];
    assert_eq!(matchers_to_remove(&[wanted], &existing), vec![0]);
}

#[test]
fn install_is_idempotent_and_removal_cleans_up() {
    let definition = definition("PreToolUse", vec![matcher("Bash", &["latch-guard"])]);

    let first = install_definition("", &definition);
    assert_eq!(first.changed, 1);
    let value = parsed(&first.text);
    assert_eq!(
        value["hooks"]["PreToolUse"][0]["hooks"][0]["command"],
        "latch-guard"
    );

    let second = install_definition(&first.text, &definition);
    assert_eq!(second.changed, 0);
    assert_eq!(second.text, first.text);

    let removal = remove_definition(&second.text, &definition);
    assert_eq!(removal.changed, 1);
    let value = parsed(&removal.text);
    assert!(value.get("hooks").is_none());
}

#[test]
fn install_into_comment_only_document_keeps_comments() {
    let doc = "// reserved for team settings\n// do not commit secrets here\n";
    let definition = definition("PreToolUse", vec![matcher("Bash", &["latch-guard"])]);
    let out = install_definition(doc, &definition);
    assert_eq!(out.changed, 1);
    assert!(out.text.starts_with(doc));
    let value = parsed(&out.text);
    assert_eq!(
        value["hooks"]["PreToolUse"][0]["hooks"][0]["command"],
        "latch-guard"
    );
}

#[test]
fn emptied_containers_are_deleted_all_the_way_up() {
    let doc = r#"{"hooks":{"PreToolUse":[{"matcher":"Edit","hooks":[{"type":"command","command":"x"}]}]}}"#;
    let definition = definition("PreToolUse", vec![matcher("Edit", &["x"])]);
    let out = remove_definition(doc, &definition);
    assert_eq!(out.changed, 1);
    assert_eq!(out.text, "{}");
}

#[test]
fn no_match_leaves_the_document_byte_identical() {
    let doc = "{\n  \"hooks\": {\n    \"PreToolUse\": [\n      { \"matcher\": \"Edit\", \"hooks\": [{ \"type\": \"command\", \"command\": \"x\" }] }\n    ]\n  }\n}\n";
    let definition = definition("PreToolUse", vec![matcher("Bash", &["latch-guard"])]);
    let out = remove_definition(doc, &definition);
    assert_eq!(out.changed, 0);
    assert_eq!(out.text, doc);

    let out = remove_definition("{}", &definition);
    assert_eq!(out.changed, 0);
    assert_eq!(out.text, "{}");
}

#[test]
fn command_removal_matches_by_substring() {
    let doc = "{\n  \"keep\": true,\n  \"hooks\": {\n    \"PreToolUse\": [\n      {\n        \"matcher\": \"Bash\",\n        \"hooks\": [\n          { \"type\": \"command\", \"command\": \"/usr/local/bin/latch-guard --check\" },\n          { \"type\": \"command\", \"command\": \"other-tool\" }\n        ]\n      }\n    ],\n    \"Stop\": [\n      { \"matcher\": \"\", \"hooks\": [{ \"type\": \"command\", \"command\": \"latch-guard\" }] }\n    ]\n  }\n}\n";
    let out = remove_by_command(doc, "latch-guard");
    assert_eq!(out.changed, 2);
    let value = parsed(&out.text);
    assert_eq!(value["keep"], true);
    let hooks = value["hooks"]["PreToolUse"][0]["hooks"].as_array().unwrap();
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0]["command"], "other-tool");
    assert!(value["hooks"].get("Stop").is_none());
}

#[test]
fn command_removal_without_any_hit_changes_nothing() {
    let doc = "{\n  \"hooks\": {\n    \"PostToolUse\": [\n      { \"matcher\": \"Write\", \"hooks\": [{ \"type\": \"command\", \"command\": \"fmt\" }] }\n    ]\n  }\n}\n";
    let out = remove_by_command(doc, "latch-guard");
    assert_eq!(out.changed, 0);
    assert_eq!(out.text, doc);
}
