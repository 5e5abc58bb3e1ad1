//! Structured error types for the risk engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid input: {field}: {reason}")]
  InvalidInput { field: String, reason: String },

  #[error("config: {0}")]
  Config(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl EngineError {
  pub fn invalid(field: &str, reason: &str) -> Self {
    Self::InvalidInput {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::Config(msg.into())
  }

  /// Field name for `InvalidInput`, if any (used for structured error output).
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::InvalidInput { field, .. } => Some(field),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_input_message_names_field() {
    let err = EngineError::invalid("budget_initial", "must be greater than zero");
    assert_eq!(
      err.to_string(),
      "invalid input: budget_initial: must be greater than zero"
    );
    assert_eq!(err.field(), Some("budget_initial"));
  }

  #[test]
  fn config_error_has_no_field() {
    let err = EngineError::config("weights must sum to 1.0");
    assert!(err.field().is_none());
    assert!(err.to_string().starts_with("config:"));
  }
}
