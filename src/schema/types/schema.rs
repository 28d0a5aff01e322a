//! Root schema types: the validated form definition and its layout and
//! card-grouping metadata.

use serde::{Deserialize, Serialize};

use crate::schema::types::FieldSpec;

/// A validated form schema: an ordered list of fields plus optional layout
/// hints. Field order is rendering order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,
}

/// Grid layout hints for the whole form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Desktop column count. Positive when present; defaults to one column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Column count on narrow viewports. Consumed by the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_columns: Option<u32>,
    /// Horizontal and vertical gutter, exactly two non-negative integers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter: Option<(u32, u32)>,
}

impl LayoutConfig {
    /// The column count to lay fields out with. One column when unset.
    pub fn effective_columns(&self) -> u32 {
        self.columns.unwrap_or(1)
    }
}

/// Visual-container metadata for a field. Purely a rendering hint; carries no
/// validation semantics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CardSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// Card size restriction: only `default` and `small` are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Default,
    Small,
}

impl CardSize {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "small" => Some(Self::Small),
            _ => None,
        }
    }
}
