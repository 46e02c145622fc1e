use super::{FailureReason, StageId};


/// Failure recorded for one element, tagged with the producing stage.
///
/// The original input value is not retained; terminal consumers only need
/// the message and the stage identity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage}: {reason}")]
pub struct StageFailure {
  stage:  StageId,
  reason: FailureReason,
}

impl StageFailure {
  /// Creates a failure produced by `stage`.
  #[must_use]
  pub const fn new(stage: StageId, reason: FailureReason) -> Self {
    Self { stage, reason }
  }

  /// Returns the producing stage identity.
  #[must_use]
  pub const fn stage(&self) -> StageId {
    self.stage
  }

  /// Returns the human-readable message.
  #[must_use]
  pub fn message(&self) -> &str {
    self.reason.message()
  }

  /// Returns the failure reason.
  #[must_use]
  pub const fn reason(&self) -> &FailureReason {
    &self.reason
  }
}
