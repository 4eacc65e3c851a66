//! Domain types: database rows, request payloads and response shapes.

pub mod activity;
pub mod user;

/// Payload checks all report the same way, named after the JSON field.
pub(crate) fn rule(field: &'static str, ok: bool) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(format!("validation for '{field}' failed"))
    }
}
