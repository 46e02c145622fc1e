use super::StageKind;


/// Cardinality classification of a stream.
///
/// A stream built from an already-materialized collection starts out
/// [`Cardinality::Known`]; any stage that can change the number of
/// surviving elements downgrades it to [`Cardinality::Unknown`] from that
/// point on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
  /// Element count known in advance without iterating.
  Known(usize),
  /// Element count unknowable without full consumption.
  Unknown,
}

impl Cardinality {
  /// Returns the classification after passing through a `kind` stage.
  #[must_use]
  pub const fn through(self, kind: StageKind) -> Self {
    if kind.alters_cardinality() {
      return Self::Unknown;
    }
    self
  }
}
