//! The stdout JSON boundary.
//!
//! The calling application reads exactly one JSON value from stdout and
//! nothing else; diagnostics belong on stderr. Every failure collapses to
//! the one-field error shape here.

use serde::{Deserialize, Serialize};

/// The single shape every failure flattens to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Print a payload as the single compact JSON line the caller reads.
pub fn emit<T: Serialize>(payload: &T) {
    match serde_json::to_string(payload) {
        Ok(line) => println!("{}", line),
        Err(e) => println!(
            "{}",
            serde_json::json!({ "error": format!("failed to encode output: {}", e) })
        ),
    }
}

/// Print any displayable failure in the error shape.
pub fn emit_error(message: impl std::fmt::Display) {
    emit(&ErrorReport::new(message.to_string()));
}
