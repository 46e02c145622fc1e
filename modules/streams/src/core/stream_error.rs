//! Stream error definitions.

use super::CheckedStreamError;


/// Errors produced by stream consumption.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
  /// A terminal consumer reached elements still carrying failures.
  #[error(transparent)]
  Checked(#[from] CheckedStreamError),
  /// Internal element type mismatch.
  #[error("element type mismatch")]
  TypeMismatch,
}
