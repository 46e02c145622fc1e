use alloc::string::String;

/// Human-readable reason reported by a failing caller-supplied function.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FailureReason {
  message: String,
}

impl FailureReason {
  /// Creates a reason from a message.
  #[must_use]
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  /// Returns the message text.
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }
}

impl From<&str> for FailureReason {
  fn from(message: &str) -> Self {
    Self::new(message)
  }
}

impl From<String> for FailureReason {
  fn from(message: String) -> Self {
    Self { message }
  }
}
