//! Resolution of a validated schema into renderer-facing data: initial
//! values, effective validation rules, and layout spans.

pub mod defaults;
pub mod layout;
pub mod rules;

pub use defaults::{initial_values, merge_initial_values};
pub use layout::{column_span, item_property_span, FULL_SPAN};
pub use rules::{effective_rules, ValidationRule};
