// src/extract/blocks.rs
//! Type-dispatched extraction of text from raw Notion blocks.
//!
//! Every known block type keeps its rich text in a sub-object named after
//! the type (`{"type": "to_do", "to_do": {"rich_text": [...]}}`). The rule
//! table maps each tag to its kind and an optional attribute reader; tags
//! without a rule go through a generic scan of the block's sub-objects.

use crate::model::{Block, BlockKind};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Reads a kind-specific attribute from the block's type-keyed sub-object.
type AttributeRule = fn(&Map<String, Value>, &mut Block);

struct ExtractionRule {
    kind: BlockKind,
    attribute: Option<AttributeRule>,
}

static EXTRACTION_RULES: Lazy<HashMap<&'static str, ExtractionRule>> = Lazy::new(|| {
    let plain = |kind| ExtractionRule {
        kind,
        attribute: None,
    };

    HashMap::from([
        ("paragraph", plain(BlockKind::Paragraph)),
        ("heading_1", plain(BlockKind::Heading1)),
        ("heading_2", plain(BlockKind::Heading2)),
        ("heading_3", plain(BlockKind::Heading3)),
        ("bulleted_list_item", plain(BlockKind::BulletedListItem)),
        ("numbered_list_item", plain(BlockKind::NumberedListItem)),
        ("toggle", plain(BlockKind::Toggle)),
        ("quote", plain(BlockKind::Quote)),
        (
            "to_do",
            ExtractionRule {
                kind: BlockKind::ToDo,
                attribute: Some(read_checked),
            },
        ),
        (
            "code",
            ExtractionRule {
                kind: BlockKind::Code,
                attribute: Some(read_language),
            },
        ),
        (
            "callout",
            ExtractionRule {
                kind: BlockKind::Callout,
                attribute: Some(read_icon),
            },
        ),
    ])
});

fn read_checked(data: &Map<String, Value>, block: &mut Block) {
    block.checked = Some(data.get("checked").and_then(Value::as_bool).unwrap_or(false));
}

fn read_language(data: &Map<String, Value>, block: &mut Block) {
    let language = data.get("language").and_then(Value::as_str).unwrap_or("");
    block.language = Some(language.to_string());
}

fn read_icon(data: &Map<String, Value>, block: &mut Block) {
    let icon = data
        .get("icon")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    block.icon = Some(icon);
}

/// Concatenates the `plain_text` of every run in a rich-text array.
///
/// Runs are joined in array order with no separator. A missing or
/// non-array value yields an empty string.
pub fn rich_text_plain(rich_text: Option<&Value>) -> String {
    rich_text
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// Normalizes a raw block into a [`Block`]. Never fails.
///
/// Known types read the rich text of their own sub-object. Unknown types
/// take the first sub-object (in the block's key order) whose `rich_text`
/// yields non-empty text, or end up with empty content.
pub fn extract_content(raw: &Value) -> Block {
    let tag = raw.get("type").and_then(Value::as_str).unwrap_or("unknown");
    let id = raw.get("id").and_then(Value::as_str).unwrap_or_default();
    let has_children = raw
        .get("has_children")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut block = match EXTRACTION_RULES.get(tag) {
        Some(rule) => {
            let mut block = Block::empty(id, rule.kind.clone(), has_children);
            if let Some(data) = raw.get(tag).and_then(Value::as_object) {
                block.content = rich_text_plain(data.get("rich_text"));
                if let Some(read_attribute) = rule.attribute {
                    read_attribute(data, &mut block);
                }
            } else if let Some(read_attribute) = rule.attribute {
                read_attribute(&Map::new(), &mut block);
            }
            block
        }
        None => {
            let mut block = Block::empty(id, BlockKind::from_tag(tag), has_children);
            block.content = scan_for_rich_text(raw);
            block
        }
    };

    block.created_time = string_field(raw, "created_time");
    block.last_edited_time = string_field(raw, "last_edited_time");
    block
}

/// Returns the block's text when it counts as a standup work item.
///
/// Only substantive kinds with non-empty content pass; a to-do's checked
/// state is not part of the item.
pub fn extract_done_list_item(block: &Block) -> Option<String> {
    if block.kind.is_substantive() && block.has_content() {
        Some(block.content.clone())
    } else {
        None
    }
}

/// Filters a flattened block sequence down to its work items, in order.
pub fn collect_work_items(blocks: &[Block]) -> Vec<String> {
    blocks.iter().filter_map(extract_done_list_item).collect()
}

fn scan_for_rich_text(raw: &Value) -> String {
    let Some(fields) = raw.as_object() else {
        return String::new();
    };

    fields
        .values()
        .filter_map(Value::as_object)
        .filter(|data| data.contains_key("rich_text"))
        .map(|data| rich_text_plain(data.get("rich_text")))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn runs(texts: &[&str]) -> Value {
        Value::Array(
            texts
                .iter()
                .map(|t| json!({"type": "text", "plain_text": t}))
                .collect(),
        )
    }

    #[test]
    fn test_paragraph_runs_are_concatenated() {
        let raw = json!({
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {"rich_text": runs(&["Hello, ", "world"])}
        });
        let block = extract_content(&raw);
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.content, "Hello, world");
        assert_eq!(block.checked, None);
    }

    #[test]
    fn test_to_do_keeps_checked_state_on_block() {
        let raw = json!({
            "id": "b2",
            "type": "to_do",
            "to_do": {"rich_text": [{"plain_text": "Fix bug"}], "checked": true}
        });
        let block = extract_content(&raw);
        assert_eq!(block.content, "Fix bug");
        assert_eq!(block.checked, Some(true));
        assert_eq!(extract_done_list_item(&block), Some("Fix bug".to_string()));
    }

    #[test]
    fn test_code_and_callout_attributes() {
        let code = extract_content(&json!({
            "id": "c",
            "type": "code",
            "code": {"rich_text": runs(&["fn main() {}"]), "language": "rust"}
        }));
        assert_eq!(code.language.as_deref(), Some("rust"));

        let callout = extract_content(&json!({
            "id": "d",
            "type": "callout",
            "callout": {"rich_text": runs(&["Heads up"]), "icon": {"type": "emoji", "emoji": "💡"}}
        }));
        assert_eq!(callout.icon, Some(json!({"type": "emoji", "emoji": "💡"})));
        assert_eq!(extract_done_list_item(&callout), None);
    }

    #[test]
    fn test_empty_or_missing_rich_text() {
        let empty = extract_content(&json!({
            "id": "e", "type": "bulleted_list_item", "bulleted_list_item": {"rich_text": []}
        }));
        assert_eq!(empty.content, "");
        assert_eq!(extract_done_list_item(&empty), None);

        let missing = extract_content(&json!({"id": "f", "type": "heading_2"}));
        assert_eq!(missing.content, "");
        assert_eq!(missing.kind, BlockKind::Heading2);
    }

    #[test]
    fn test_unknown_type_scans_sub_objects_in_key_order() {
        let raw = json!({
            "id": "g",
            "type": "template",
            "decoration": {"rich_text": []},
            "template": {"rich_text": runs(&["first"])},
            "other": {"rich_text": runs(&["second"])}
        });
        let block = extract_content(&raw);
        assert_eq!(block.kind, BlockKind::Unknown("template".to_string()));
        assert_eq!(block.content, "first");
        assert_eq!(extract_done_list_item(&block), None);
    }

    #[test]
    fn test_presentation_blocks_have_no_content() {
        let divider = extract_content(&json!({"id": "h", "type": "divider", "divider": {}}));
        assert_eq!(divider.content, "");

        let garbage = extract_content(&json!("not an object"));
        assert_eq!(garbage.id, "");
        assert_eq!(garbage.kind, BlockKind::Unknown("unknown".to_string()));
    }

    #[test]
    fn test_collect_work_items_keeps_order_and_drops_noise() {
        let blocks = vec![
            extract_content(&json!({"id": "1", "type": "heading_1", "heading_1": {"rich_text": runs(&["Sprint"])}})),
            extract_content(&json!({"id": "2", "type": "toggle", "toggle": {"rich_text": runs(&["Details"])}})),
            extract_content(&json!({"id": "3", "type": "numbered_list_item", "numbered_list_item": {"rich_text": runs(&["Step one"])}})),
            extract_content(&json!({"id": "4", "type": "paragraph", "paragraph": {"rich_text": []}})),
        ];
        assert_eq!(collect_work_items(&blocks), vec!["Sprint", "Step one"]);
    }
}
