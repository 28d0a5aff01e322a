//! Shared fixtures for integration tests.

/// Initializes test logging once; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A reference schema exercising every grammar feature at once: an object
/// group with a card, an array of objects, choice fields, upload and layout
/// hints.
pub fn reference_schema_text() -> &'static str {
    r#"{
        "fields": [
            {
                "name": "personalInfo",
                "label": "Personal Information",
                "type": "object",
                "card": {
                    "title": "Basic Info",
                    "bordered": true,
                    "size": "default"
                },
                "properties": {
                    "name": {
                        "name": "name",
                        "label": "Name",
                        "type": "string",
                        "required": true,
                        "defaultValue": "John Doe"
                    },
                    "age": {
                        "name": "age",
                        "label": "Age",
                        "type": "number",
                        "required": true,
                        "min": 0,
                        "max": 150,
                        "step": 1,
                        "defaultValue": 25
                    },
                    "birthDate": {
                        "name": "birthDate",
                        "label": "Birth Date",
                        "type": "date",
                        "format": "YYYY-MM-DD",
                        "required": true,
                        "defaultValue": "2000-01-01"
                    },
                    "gender": {
                        "name": "gender",
                        "label": "Gender",
                        "type": "radio",
                        "required": true,
                        "defaultValue": "male",
                        "options": [
                            {"label": "Male", "value": "male"},
                            {"label": "Female", "value": "female"},
                            {"label": "Other", "value": "other"}
                        ]
                    }
                }
            },
            {
                "name": "contactMethods",
                "label": "Contact Methods",
                "type": "array",
                "card": {"title": "Contacts", "bordered": true},
                "items": {
                    "name": "contact",
                    "label": "Contact",
                    "type": "object",
                    "properties": {
                        "kind": {
                            "name": "kind",
                            "label": "Kind",
                            "type": "select",
                            "options": [
                                {"label": "Email", "value": "email"},
                                {"label": "Phone", "value": "phone"}
                            ]
                        },
                        "value": {
                            "name": "value",
                            "label": "Value",
                            "type": "string",
                            "required": true
                        },
                        "preferred": {
                            "name": "preferred",
                            "label": "Preferred",
                            "type": "checkbox"
                        }
                    }
                },
                "defaultValue": [
                    {"kind": "email", "value": "john@example.com", "preferred": true}
                ]
            },
            {
                "name": "interests",
                "label": "Interests",
                "type": "select",
                "mode": "multiple",
                "defaultValue": ["music"],
                "options": [
                    {"label": "Music", "value": "music"},
                    {"label": "Sports", "value": "sports"}
                ]
            },
            {
                "name": "bio",
                "label": "Biography",
                "type": "longtext",
                "rows": 4,
                "maxLength": 500,
                "placeholder": "Tell us about yourself"
            },
            {
                "name": "avatar",
                "label": "Avatar",
                "type": "upload",
                "maxCount": 1,
                "accept": "image/*",
                "maxSize": 2
            },
            {
                "name": "newsletter",
                "label": "Subscribe",
                "type": "checkbox",
                "defaultValue": true,
                "newline": true
            },
            {
                "name": "extra",
                "label": "Extra Config",
                "type": "json",
                "defaultValue": "{}"
            }
        ],
        "layout": {
            "columns": 2,
            "mobileColumns": 1,
            "gutter": [12, 0]
        }
    }"#
}
