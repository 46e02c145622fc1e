/// Policy applied when `find_first`, `fold` or `reduce` reach a surviving
/// errored element mid-stream.
///
/// The default fails immediately with the aggregate error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
  /// Fail immediately with the aggregate unresolved-failure error.
  #[default]
  Fail,
  /// Skip the errored element, like a guard-dropped one, and keep pulling.
  Skip,
}
