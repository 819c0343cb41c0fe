//! SQL literal rendering for synthesized statements.
//!
//! Values are interpolated straight into the statement text; there is no bound
//! parameter layer. All rendering goes through `render_literal` so the
//! behavior can be tested and replaced in one place.

use serde_json::Value;

/// Render a record value as a SQL literal.
///
/// - strings are wrapped in single quotes as-is (embedded quotes are NOT escaped)
/// - numbers and booleans use their bare textual form
/// - null renders as the `null` keyword
/// - arrays and objects render as their compact JSON text, unquoted
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
