use alloc::{vec, vec::Vec};

use super::StageFailure;


/// Aggregate error raised when a terminal consumer cannot resolve an
/// errored element into a value.
///
/// Carries the ordered failure list of every unresolved element
/// encountered up to the point of failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} element(s) held unresolved failures when consumed", failure_lists.len())]
pub struct CheckedStreamError {
  failure_lists: Vec<Vec<StageFailure>>,
}

impl CheckedStreamError {
  /// Creates an aggregate from failure lists in encounter order.
  #[must_use]
  pub const fn new(failure_lists: Vec<Vec<StageFailure>>) -> Self {
    Self { failure_lists }
  }

  /// Creates an aggregate from a single element's failure list.
  #[must_use]
  pub fn single(failures: Vec<StageFailure>) -> Self {
    Self { failure_lists: vec![failures] }
  }

  /// Returns the failure lists in encounter order.
  #[must_use]
  pub fn failure_lists(&self) -> &[Vec<StageFailure>] {
    &self.failure_lists
  }
}
