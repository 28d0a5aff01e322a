//! Recursive validation of untyped field descriptions against the field-type
//! grammar.
//!
//! The validator walks an authored JSON node in pre-order and either produces
//! a structurally verified [`FieldSpec`] or stops at the first violation.
//! Traversal is deliberately first-failure-wins: nested object and array
//! validation reports only the first error encountered.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::schema::date::parse_date;
use crate::schema::types::{
    CardConfig, CardSize, FieldKind, FieldSpec, FieldType, OptionValue, SchemaError, SelectMode,
    SelectOption,
};
use crate::schema::value::validate_value;
use crate::schema::Result;

/// Validates authored field descriptions against the closed type grammar.
pub struct FieldValidator;

impl FieldValidator {
    /// Validates a single untyped field description.
    ///
    /// # Errors
    /// Returns a `SchemaError::Field` (or `SchemaError::Value` for default
    /// values) carrying the dotted path at which validation failed.
    pub fn validate(node: &Value) -> Result<FieldSpec> {
        Self::validate_at(node, None)
    }

    /// Validates a node at a known position. `ctx` is the dotted path assigned
    /// by the caller for nested positions (`parent.property`, `field.items`);
    /// top-level fields use their own name as path.
    fn validate_at(node: &Value, ctx: Option<&str>) -> Result<FieldSpec> {
        let obj = node.as_object().ok_or_else(|| {
            SchemaError::field(ctx.unwrap_or("fields"), "Field must be a JSON object")
        })?;

        let name = match obj.get("name").and_then(Value::as_str) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                return Err(SchemaError::field(
                    ctx.unwrap_or("fields"),
                    "Field name is required and must be a string",
                ))
            }
        };
        let path = ctx.map_or_else(|| name.clone(), str::to_string);

        let field_type = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(FieldType::parse)
            .ok_or_else(|| {
                SchemaError::field(
                    &path,
                    format!(
                        "Invalid field type for {name}. Must be one of: {}",
                        FieldType::canonical_list()
                    ),
                )
            })?;

        let required = opt_bool(
            obj,
            "required",
            &path,
            format!("Required property must be a boolean for field {name}"),
        )?
        .unwrap_or(false);
        let newline = opt_bool(
            obj,
            "newline",
            &path,
            format!("Newline property must be a boolean for field {name}"),
        )?
        .unwrap_or(false);
        let label = opt_string(
            obj,
            "label",
            &path,
            format!("Label must be a string for field {name}"),
        )?;
        let placeholder = opt_string(
            obj,
            "placeholder",
            &path,
            format!("Placeholder must be a string for field {name}"),
        )?;

        let rules = match obj.get("rules") {
            None => None,
            Some(Value::Array(list)) => Some(list.clone()),
            Some(_) => {
                return Err(SchemaError::field(
                    &path,
                    format!("Rules must be an array for field {name}"),
                ))
            }
        };

        let card = match obj.get("card") {
            None => None,
            Some(node) => Some(Self::validate_card(node, &name, &path)?),
        };

        let kind = match field_type {
            FieldType::String => Self::string_kind(obj, &name, &path)?,
            FieldType::Longtext => Self::longtext_kind(obj, &name, &path)?,
            FieldType::Number => Self::number_kind(obj, &name, &path)?,
            FieldType::Checkbox => Self::checkbox_kind(obj, &name, &path)?,
            FieldType::Radio => Self::radio_kind(obj, &name, &path)?,
            FieldType::Select => Self::select_kind(obj, &name, &path)?,
            FieldType::Upload => Self::upload_kind(obj, &name, &path)?,
            FieldType::Array => Self::array_kind(obj, &name, &path)?,
            FieldType::Object => Self::object_kind(obj, &name, &path)?,
            FieldType::Date => Self::date_kind(obj, &name, &path)?,
            FieldType::Json => Self::json_kind(obj, &name, &path)?,
        };

        Ok(FieldSpec {
            name,
            label,
            required,
            rules,
            placeholder,
            newline,
            card,
            default_value: obj.get("defaultValue").cloned(),
            kind,
        })
    }

    fn validate_card(node: &Value, name: &str, path: &str) -> Result<CardConfig> {
        let obj = node.as_object().ok_or_else(|| {
            SchemaError::field(
                path,
                format!("Card configuration must be an object for field {name}"),
            )
        })?;
        let title = opt_string(
            obj,
            "title",
            path,
            format!("Card title must be a string for field {name}"),
        )?;
        let description = opt_string(
            obj,
            "description",
            path,
            format!("Card description must be a string for field {name}"),
        )?;
        let bordered = opt_bool(
            obj,
            "bordered",
            path,
            format!("Card bordered must be a boolean for field {name}"),
        )?;
        let size = match obj.get("size") {
            None => None,
            Some(v) => Some(
                v.as_str().and_then(CardSize::parse).ok_or_else(|| {
                    SchemaError::field(
                        path,
                        format!("Card size must be either 'default' or 'small' for field {name}"),
                    )
                })?,
            ),
        };
        let extra = opt_string(
            obj,
            "extra",
            path,
            format!("Card extra must be a string for field {name}"),
        )?;
        Ok(CardConfig {
            title,
            description,
            bordered,
            size,
            extra,
        })
    }

    fn string_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let (min_length, max_length) = Self::length_bounds(obj, name, path)?;
        Self::check_string_default(obj, name, path)?;
        Ok(FieldKind::String {
            min_length,
            max_length,
        })
    }

    fn longtext_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let (min_length, max_length) = Self::length_bounds(obj, name, path)?;
        let rows = opt_positive_uint(
            obj,
            "rows",
            path,
            format!("Rows must be a positive integer for field {name}"),
        )?;
        Self::check_string_default(obj, name, path)?;
        Ok(FieldKind::LongText {
            min_length,
            max_length,
            rows,
        })
    }

    fn length_bounds(
        obj: &Map<String, Value>,
        name: &str,
        path: &str,
    ) -> Result<(Option<u64>, Option<u64>)> {
        let min_length = opt_uint(
            obj,
            "minLength",
            path,
            format!("MinLength must be a non-negative integer for field {name}"),
        )?;
        let max_length = opt_uint(
            obj,
            "maxLength",
            path,
            format!("MaxLength must be a non-negative integer for field {name}"),
        )?;
        Ok((min_length, max_length))
    }

    fn check_string_default(obj: &Map<String, Value>, name: &str, path: &str) -> Result<()> {
        match obj.get("defaultValue") {
            None => Ok(()),
            Some(v) if v.is_string() => Ok(()),
            Some(_) => Err(SchemaError::value(
                path,
                format!("Default value must be a string for field {name}"),
            )),
        }
    }

    fn number_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let min = opt_number(
            obj,
            "min",
            path,
            format!("Min value must be a number for field {name}"),
        )?;
        let max = opt_number(
            obj,
            "max",
            path,
            format!("Max value must be a number for field {name}"),
        )?;
        let step = opt_number(
            obj,
            "step",
            path,
            format!("Step value must be a number for field {name}"),
        )?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SchemaError::field(
                    path,
                    format!("Min value cannot be greater than max value for field {name}"),
                ));
            }
        }

        if let Some(default) = obj.get("defaultValue") {
            let default = default.as_f64().ok_or_else(|| {
                SchemaError::value(
                    path,
                    format!("Default value must be a number for field {name}"),
                )
            })?;
            if let Some(min) = min {
                if default < min {
                    return Err(SchemaError::value(
                        path,
                        format!("Default value cannot be less than min value for field {name}"),
                    ));
                }
            }
            if let Some(max) = max {
                if default > max {
                    return Err(SchemaError::value(
                        path,
                        format!("Default value cannot be greater than max value for field {name}"),
                    ));
                }
            }
        }

        Ok(FieldKind::Number { min, max, step })
    }

    fn checkbox_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        match obj.get("defaultValue") {
            None => {}
            Some(v) if v.is_boolean() => {}
            Some(_) => {
                return Err(SchemaError::value(
                    path,
                    format!("Default value must be a boolean for field {name}"),
                ))
            }
        }
        Ok(FieldKind::Checkbox)
    }

    fn radio_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let options = Self::parse_options(obj, name, path, FieldType::Radio)?;
        Self::check_choice_default(obj, name, path, &options, None)?;
        Ok(FieldKind::Radio { options })
    }

    fn select_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let options = Self::parse_options(obj, name, path, FieldType::Select)?;
        let mode = match obj.get("mode") {
            None => None,
            Some(v) => Some(
                v.as_str().and_then(SelectMode::parse).ok_or_else(|| {
                    SchemaError::field(
                        path,
                        format!(
                            "Invalid select mode for {name}. Must be either 'multiple' or 'tags'"
                        ),
                    )
                })?,
            ),
        };
        Self::check_choice_default(obj, name, path, &options, mode)?;
        Ok(FieldKind::Select { options, mode })
    }

    fn parse_options(
        obj: &Map<String, Value>,
        name: &str,
        path: &str,
        field_type: FieldType,
    ) -> Result<Vec<SelectOption>> {
        let raw = obj.get("options").and_then(Value::as_array).ok_or_else(|| {
            SchemaError::field(
                path,
                format!("{field_type} field {name} must have an options array"),
            )
        })?;
        if raw.is_empty() {
            return Err(SchemaError::field(
                path,
                format!("Options cannot be empty for field {name}"),
            ));
        }
        let mut options = Vec::with_capacity(raw.len());
        for entry in raw {
            let parsed = entry.as_object().and_then(|o| {
                let label = o.get("label")?.as_str()?.to_string();
                let value = OptionValue::from_json(o.get("value")?)?;
                Some(SelectOption { label, value })
            });
            match parsed {
                Some(option) => options.push(option),
                None => {
                    return Err(SchemaError::field(
                        path,
                        format!(
                            "Invalid options format for {name}. \
                             Each option must have label and value properties"
                        ),
                    ))
                }
            }
        }
        Ok(options)
    }

    fn check_choice_default(
        obj: &Map<String, Value>,
        name: &str,
        path: &str,
        options: &[SelectOption],
        mode: Option<SelectMode>,
    ) -> Result<()> {
        let Some(default) = obj.get("defaultValue") else {
            return Ok(());
        };
        let is_member = |v: &Value| options.iter().any(|opt| opt.value.matches(v));

        if mode.is_some() {
            // multiple/tags: the default is a list of member values
            let list = default.as_array().ok_or_else(|| {
                SchemaError::value(
                    path,
                    format!("Default value must be an array for multiple select field {name}"),
                )
            })?;
            if !list.iter().all(|v| is_member(v)) {
                return Err(SchemaError::value(
                    path,
                    format!("Default value contains invalid options for field {name}"),
                ));
            }
        } else if !is_member(default) {
            return Err(SchemaError::value(
                path,
                format!("Invalid default value for field {name}"),
            ));
        }
        Ok(())
    }

    fn upload_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let multiple = opt_bool(
            obj,
            "multiple",
            path,
            format!("Multiple property must be a boolean for upload field {name}"),
        )?;
        let max_count = opt_positive_uint(
            obj,
            "maxCount",
            path,
            format!("MaxCount must be a positive integer for upload field {name}"),
        )?;
        let accept = opt_string(
            obj,
            "accept",
            path,
            format!("Accept must be a string for upload field {name}"),
        )?;
        let max_size = match opt_number(
            obj,
            "maxSize",
            path,
            format!("MaxSize must be a positive number for upload field {name}"),
        )? {
            Some(v) if v <= 0.0 => {
                return Err(SchemaError::field(
                    path,
                    format!("MaxSize must be a positive number for upload field {name}"),
                ))
            }
            other => other,
        };
        match obj.get("defaultValue") {
            None => {}
            Some(v) if v.is_array() => {}
            Some(_) => {
                return Err(SchemaError::value(
                    path,
                    format!("Default value must be an array for upload field {name}"),
                ))
            }
        }
        Ok(FieldKind::Upload {
            multiple,
            max_count,
            accept,
            max_size,
        })
    }

    fn array_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let items_node = obj.get("items").filter(|v| v.is_object()).ok_or_else(|| {
            SchemaError::field(
                path,
                format!("Array field {name} must have an items property defining the array elements"),
            )
        })?;
        let items_path = format!("{path}.items");
        if items_node.get("type").and_then(Value::as_str) == Some("array") {
            return Err(SchemaError::field(
                items_path,
                format!("Array field {name} cannot contain array items"),
            ));
        }
        let items = Self::validate_at(items_node, Some(&items_path))?;

        if let Some(default) = obj.get("defaultValue") {
            let list = default.as_array().ok_or_else(|| {
                SchemaError::value(
                    path,
                    format!("Default value must be an array for field {name}"),
                )
            })?;
            for element in list {
                validate_value(element, &items).map_err(|reason| {
                    SchemaError::value(
                        path,
                        format!("Invalid default value item for field {name}: {reason}"),
                    )
                })?;
            }
        }
        Ok(FieldKind::Array {
            items: Box::new(items),
        })
    }

    fn object_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let props_node = obj
            .get("properties")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SchemaError::field(
                    path,
                    format!("Object field {name} must have a properties object"),
                )
            })?;

        let mut properties = Vec::with_capacity(props_node.len());
        let mut seen_names = HashSet::new();
        for (key, prop_node) in props_node {
            let prop_path = format!("{path}.{key}");
            let prop = Self::validate_at(prop_node, Some(&prop_path))?;
            if !seen_names.insert(prop.name.clone()) {
                return Err(SchemaError::field(
                    prop_path,
                    format!("Duplicate field name '{}' in object field {name}", prop.name),
                ));
            }
            properties.push((key.clone(), prop));
        }

        if let Some(default) = obj.get("defaultValue") {
            let default_obj = default.as_object().ok_or_else(|| {
                SchemaError::value(
                    path,
                    format!("Default value must be an object for field {name}"),
                )
            })?;
            for (key, value) in default_obj {
                let Some((_, prop)) = properties.iter().find(|(k, _)| k == key) else {
                    return Err(SchemaError::value(
                        path,
                        format!("Unknown property {key} in default value for field {name}"),
                    ));
                };
                validate_value(value, prop).map_err(|reason| {
                    SchemaError::value(
                        format!("{path}.{key}"),
                        format!("Invalid default value for property {key} in field {name}: {reason}"),
                    )
                })?;
            }
        }
        Ok(FieldKind::Object { properties })
    }

    fn date_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        let format = opt_string(
            obj,
            "format",
            path,
            format!("Format must be a string for field {name}"),
        )?;
        if let Some(default) = obj.get("defaultValue") {
            let text = default.as_str().ok_or_else(|| {
                SchemaError::value(
                    path,
                    format!("Default value must be a string for field {name}"),
                )
            })?;
            if parse_date(text).is_none() {
                return Err(SchemaError::value(
                    path,
                    format!("Invalid date format for default value in field {name}"),
                ));
            }
        }
        Ok(FieldKind::Date { format })
    }

    fn json_kind(obj: &Map<String, Value>, name: &str, path: &str) -> Result<FieldKind> {
        match obj.get("defaultValue") {
            None => {}
            Some(v) if v.is_string() => {}
            Some(_) => {
                return Err(SchemaError::value(
                    path,
                    format!("Default value must be a string for field {name}"),
                ))
            }
        }
        Ok(FieldKind::Json)
    }
}

fn opt_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    message: String,
) -> Result<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| SchemaError::field(path, message)),
    }
}

fn opt_bool(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    message: String,
) -> Result<Option<bool>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| SchemaError::field(path, message)),
    }
}

fn opt_number(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    message: String,
) -> Result<Option<f64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| SchemaError::field(path, message)),
    }
}

fn opt_uint(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    message: String,
) -> Result<Option<u64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| SchemaError::field(path, message)),
    }
}

fn opt_positive_uint(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    message: String,
) -> Result<Option<u64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 => Ok(Some(n)),
            _ => Err(SchemaError::field(path, message)),
        },
    }
}
