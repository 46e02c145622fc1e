//! Stage identity within a pipeline chain.

use core::fmt;

use super::StageKind;

/// Identity of one stage, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId {
  kind:  StageKind,
  index: usize,
}

impl StageId {
  /// Creates an identifier for the stage at `index` in the chain.
  #[must_use]
  pub const fn new(kind: StageKind, index: usize) -> Self {
    Self { kind, index }
  }

  /// Returns the stage kind.
  #[must_use]
  pub const fn kind(self) -> StageKind {
    self.kind
  }

  /// Returns the zero-based position in the chain.
  #[must_use]
  pub const fn index(self) -> usize {
    self.index
  }
}

impl fmt::Display for StageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.kind.as_str(), self.index)
  }
}
