use alloc::vec::Vec;

use super::StageFailure;

#[cfg(test)]
mod tests;

/// Per-element state carried through the pipeline.
///
/// Every logical element is either a successfully computed value or the
/// ordered record of failures accumulated for it so far. Once errored, the
/// failure list passes through transform and guard stages unchanged until a
/// recovery stage resolves it or an error filter drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element<T> {
  /// Successfully computed value.
  Ok(T),
  /// Accumulated failures, in order of occurrence.
  Errored(Vec<StageFailure>),
}

impl<T> Element<T> {
  /// Returns `true` when this element carries a value.
  #[must_use]
  pub const fn is_ok(&self) -> bool {
    matches!(self, Self::Ok(_))
  }

  /// Returns `true` when this element carries failures.
  #[must_use]
  pub const fn is_errored(&self) -> bool {
    matches!(self, Self::Errored(_))
  }

  /// Returns the recorded failures, if any.
  #[must_use]
  pub fn failures(&self) -> Option<&[StageFailure]> {
    match self {
      | Self::Ok(_) => None,
      | Self::Errored(failures) => Some(failures),
    }
  }

  /// Returns the value, discarding an errored state.
  #[must_use]
  pub fn into_value(self) -> Option<T> {
    match self {
      | Self::Ok(value) => Some(value),
      | Self::Errored(_) => None,
    }
  }
}
