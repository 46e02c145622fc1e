/// Built-in stage kinds of the pipeline chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
  /// Transform stage with an infallible closure.
  Map,
  /// Transform stage with a fallible closure.
  MapChecked,
  /// Guard stage with an infallible predicate.
  Filter,
  /// Guard stage with a fallible predicate.
  FilterChecked,
  /// Deduplicate stage keyed on value equality.
  Distinct,
  /// Recovery stage replacing failure lists with a value.
  OnErrorMap,
  /// Recovery stage with a fallible recovery closure.
  OnErrorMapChecked,
  /// Stage dropping errored elements unconditionally.
  OnErrorFilter,
}

impl StageKind {
  /// Returns the stage name used in diagnostics.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      | Self::Map => "map",
      | Self::MapChecked => "map_checked",
      | Self::Filter => "filter",
      | Self::FilterChecked => "filter_checked",
      | Self::Distinct => "distinct",
      | Self::OnErrorMap => "on_error_map",
      | Self::OnErrorMapChecked => "on_error_map_checked",
      | Self::OnErrorFilter => "on_error_filter",
    }
  }

  /// Returns `true` when the stage can change the number of surviving
  /// elements.
  #[must_use]
  pub const fn alters_cardinality(self) -> bool {
    matches!(self, Self::Filter | Self::FilterChecked | Self::Distinct | Self::OnErrorFilter)
  }
}
