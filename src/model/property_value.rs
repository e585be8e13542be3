use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page property reduced to the simplest value that still means something.
///
/// Serializes untagged, so a select becomes `"In Progress"` and a
/// multi-select becomes `["a", "b"]` in the details report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// title, rich_text, select and date properties
    Text(String),
    /// multi_select names in option order
    Names(Vec<String>),
    Checkbox(bool),
    /// number properties; `None` when the cell is empty
    Number(Option<serde_json::Number>),
    /// url, email and phone_number; `None` when the cell is empty
    OptionalText(Option<String>),
    /// any property type without a simplification rule, kept verbatim
    Raw(Value),
}
