//! Column-span computation for resolved fields.
//!
//! Spans are expressed on a 24-unit grid row. A `newline: true` field always
//! occupies a full row regardless of the computed span.

use crate::schema::types::{FieldSpec, FieldType, LayoutConfig};

/// Width of one full grid row.
pub const FULL_SPAN: u32 = 24;

/// Span used for checkbox properties inside array items; keeps short
/// controls from dominating a row.
const ITEM_CHECKBOX_SPAN: u32 = 8;
/// Span for every other property type inside array items.
const ITEM_PROPERTY_SPAN: u32 = 12;

/// Span of an object property laid out under the schema's column count.
pub fn column_span(field: &FieldSpec, layout: &LayoutConfig) -> u32 {
    if field.newline {
        return FULL_SPAN;
    }
    FULL_SPAN / layout.effective_columns().max(1)
}

/// Span of an object property rendered inside an array item.
pub fn item_property_span(field: &FieldSpec) -> u32 {
    if field.newline {
        return FULL_SPAN;
    }
    if field.field_type() == FieldType::Checkbox {
        ITEM_CHECKBOX_SPAN
    } else {
        ITEM_PROPERTY_SPAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::FieldKind;

    fn spec(kind: FieldKind, newline: bool) -> FieldSpec {
        FieldSpec {
            name: "f".to_string(),
            label: None,
            required: false,
            rules: None,
            placeholder: None,
            newline,
            card: None,
            default_value: None,
            kind,
        }
    }

    fn string_kind() -> FieldKind {
        FieldKind::String {
            min_length: None,
            max_length: None,
        }
    }

    #[test]
    fn test_span_divides_by_columns() {
        let layout = LayoutConfig {
            columns: Some(2),
            ..Default::default()
        };
        assert_eq!(column_span(&spec(string_kind(), false), &layout), 12);
        assert_eq!(
            column_span(&spec(string_kind(), false), &LayoutConfig::default()),
            FULL_SPAN
        );
    }

    #[test]
    fn test_newline_forces_full_row() {
        let layout = LayoutConfig {
            columns: Some(3),
            ..Default::default()
        };
        assert_eq!(column_span(&spec(string_kind(), true), &layout), FULL_SPAN);
        assert_eq!(item_property_span(&spec(string_kind(), true)), FULL_SPAN);
    }

    #[test]
    fn test_item_checkbox_narrower_than_others() {
        assert_eq!(item_property_span(&spec(FieldKind::Checkbox, false)), 8);
        assert_eq!(item_property_span(&spec(string_kind(), false)), 12);
    }
}
