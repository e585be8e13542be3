// tests/prompt_rendering.rs
//! Prompt composition from a saved standups.json.

use notion_standup::{
    format_standup_data, load_standups, AppError, PromptComposer, StandupPromptComposer,
};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/standups.json")
}

#[test]
fn test_saved_digest_renders_per_project_sections() {
    let entries = load_standups(&fixture_path()).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].project_name, "Unknown Project");

    insta::assert_snapshot!(format_standup_data(&entries[..2]), @r###"
    Project: TenantPay
    Work completed:
    - TP-41 Payment retries
    - Added idempotency keys to charge requests
    - Retry failed charges with backoff

    ---

    Project: Gigworks
    Work completed:
    - GW-7 Filter by status
    "###);

    let all = format_standup_data(&entries);
    assert!(all.ends_with("\n\n---\n\nProject: Unknown Project\nWork completed:\n"));
}

#[test]
fn test_full_prompt_has_preamble_data_and_format() {
    let entries = load_standups(&fixture_path()).unwrap();
    let prompt = StandupPromptComposer::new(None)
        .unwrap()
        .compose(&entries)
        .unwrap();
    let text = prompt.as_str();

    let preamble = text.find("Now summarize the following standup data:").unwrap();
    let data = text.find("Project: TenantPay").unwrap();
    let format = text.find("Response Format:").unwrap();
    assert!(preamble < data && data < format);
    assert!(text.contains("\n\n---\n\nProject: Gigworks\n"));
    assert!(text.trim_end().ends_with("Conducted thorough testing of new feature implementation"));
}

#[test]
fn test_custom_template_file() {
    let dir = std::env::temp_dir().join(format!("notion-standup-tpl-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let template = dir.join("terse.hbs");
    fs::write(&template, "{{instruction}}|{{entry_count}}|{{standup_data}}").unwrap();

    let entries = load_standups(&fixture_path()).unwrap();
    let composer =
        StandupPromptComposer::from_template_file(&template, Some("Be brief".to_string())).unwrap();
    assert_eq!(composer.template_name(), "terse");

    let prompt = composer.compose(&entries[1..2]).unwrap();
    assert_eq!(
        prompt.as_str(),
        "Be brief|1|Project: Gigworks\nWork completed:\n- GW-7 Filter by status"
    );
    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_corrupt_digest_is_a_parse_error() {
    let dir = std::env::temp_dir().join(format!("notion-standup-bad-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("standups.json");
    fs::write(&path, "{\"not\": \"a list\"}").unwrap();

    assert!(matches!(
        load_standups(&path),
        Err(AppError::JsonParseError { .. })
    ));
    assert!(matches!(
        load_standups(&dir.join("missing.json")),
        Err(AppError::Io(_))
    ));
    fs::remove_dir_all(dir).ok();
}
