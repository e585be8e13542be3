use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kind of a content block, keyed by its Notion type tag.
///
/// Tags the extractor has no rule for are kept verbatim in `Unknown`,
/// so new Notion block types pass through without failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Code,
    Callout,
    Unknown(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "paragraph" => Self::Paragraph,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "to_do" => Self::ToDo,
            "toggle" => Self::Toggle,
            "quote" => Self::Quote,
            "code" => Self::Code,
            "callout" => Self::Callout,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
            Self::BulletedListItem => "bulleted_list_item",
            Self::NumberedListItem => "numbered_list_item",
            Self::ToDo => "to_do",
            Self::Toggle => "toggle",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::Callout => "callout",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether blocks of this kind count as standup work items.
    pub fn is_substantive(&self) -> bool {
        matches!(
            self,
            Self::ToDo
                | Self::BulletedListItem
                | Self::NumberedListItem
                | Self::Paragraph
                | Self::Heading1
                | Self::Heading2
                | Self::Heading3
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for BlockKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(BlockKind::from_tag(&tag))
    }
}

/// One content node of a page, normalized to its plain text.
///
/// `content` is the concatenation of the node's rich-text runs and may be
/// empty. The optional attributes are only filled for the kinds that carry
/// them (`checked` for to-dos, `language` for code, `icon` for callouts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub content: String,
    pub checked: Option<bool>,
    pub has_children: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
}

impl Block {
    /// A block with no text and no attributes.
    pub fn empty(id: impl Into<String>, kind: BlockKind, has_children: bool) -> Self {
        Self {
            id: id.into(),
            kind,
            created_time: None,
            last_edited_time: None,
            content: String::new(),
            checked: None,
            has_children,
            language: None,
            icon: None,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}
