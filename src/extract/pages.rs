// src/extract/pages.rs
//! Extraction of page-level records from raw Notion page objects.

use super::blocks::rich_text_plain;
use crate::constants::{PROJECT_PROPERTY, TITLE_PROPERTY};
use crate::model::{Block, PageDetails, PageSummary, PropertyValue};
use indexmap::IndexMap;
use serde_json::Value;

/// Builds the summary of a done task from its `Name` and `Project` properties.
///
/// The title is the first run of the `Name` title property; the project is
/// the option name of the `Project` select. Either falls back to `""` when
/// the property is missing, empty, or of another type.
pub fn summarize_page(raw: &Value) -> PageSummary {
    let properties = raw.get("properties");
    let property = |name: &str, expected_type: &str| {
        properties
            .and_then(|props| props.get(name))
            .filter(|prop| prop.get("type").and_then(Value::as_str) == Some(expected_type))
    };

    let title = property(TITLE_PROPERTY, "title")
        .map(|prop| first_run_text(prop.get("title")))
        .unwrap_or_default();

    let project_name = property(PROJECT_PROPERTY, "select")
        .map(|prop| select_name(prop.get("select")))
        .unwrap_or_default();

    PageSummary {
        id: page_id(raw),
        title,
        project_name,
    }
}

/// Simplifies every property of a page, preserving the page's key order.
pub fn extract_properties(raw: &Value) -> IndexMap<String, PropertyValue> {
    let Some(properties) = raw.get("properties").and_then(Value::as_object) else {
        return IndexMap::new();
    };

    properties
        .iter()
        .map(|(name, prop)| (name.clone(), simplify_property(prop)))
        .collect()
}

/// Builds the full-fidelity view of a page over its flattened blocks.
///
/// Only blocks that carry text are kept; their kind-specific attributes
/// (checked state, code language, callout icon) come along unchanged.
pub fn extract_page_details(raw: &Value, blocks: &[Block]) -> PageDetails {
    PageDetails {
        id: page_id(raw),
        url: optional_string(raw.get("url")),
        created_time: optional_string(raw.get("created_time")),
        last_edited_time: optional_string(raw.get("last_edited_time")),
        archived: raw.get("archived").and_then(Value::as_bool).unwrap_or(false),
        properties: extract_properties(raw),
        content: blocks.iter().filter(|b| b.has_content()).cloned().collect(),
    }
}

/// The page's id as returned by Notion, or `""` when absent.
pub fn page_id(raw: &Value) -> String {
    raw.get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn simplify_property(prop: &Value) -> PropertyValue {
    let prop_type = prop.get("type").and_then(Value::as_str).unwrap_or_default();
    let data = prop.get(prop_type);

    match prop_type {
        "title" => PropertyValue::Text(first_run_text(data)),
        "rich_text" => PropertyValue::Text(rich_text_plain(data)),
        "select" => PropertyValue::Text(select_name(data)),
        "multi_select" => PropertyValue::Names(
            data.and_then(Value::as_array)
                .map(|options| {
                    options
                        .iter()
                        .map(|option| select_name(Some(option)))
                        .collect()
                })
                .unwrap_or_default(),
        ),
        "date" => PropertyValue::Text(
            data.and_then(|date| date.get("start"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        "checkbox" => PropertyValue::Checkbox(data.and_then(Value::as_bool).unwrap_or(false)),
        "number" => PropertyValue::Number(match data {
            Some(Value::Number(number)) => Some(number.clone()),
            _ => None,
        }),
        "url" | "email" | "phone_number" => PropertyValue::OptionalText(optional_string(data)),
        _ => PropertyValue::Raw(prop.clone()),
    }
}

fn first_run_text(rich_text: Option<&Value>) -> String {
    rich_text
        .and_then(Value::as_array)
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("plain_text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn select_name(select: Option<&Value>) -> String {
    select
        .and_then(|option| option.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
