use alloc::{boxed::Box, vec, vec::Vec};
use core::marker::PhantomData;

use super::{
  Cardinality, CheckedStreamError, DynValue, Element, FailureReason, SourceLogic, StageFailure, StageId, StageKind,
  StageLogic, StreamError, UnresolvedPolicy, downcast_value,
  source::{CollectionSourceLogic, IteratorSourceLogic},
  stage::{DistinctStageLogic, FilterStageLogic, MapStageLogic, OnErrorFilterStageLogic, OnErrorMapStageLogic},
};


/// Lazy single-pass stream pipeline with a per-element error channel.
///
/// Elements are pulled on demand by a terminal consumer and driven through
/// the stage chain one at a time, in strict source order. A stage failure
/// is recorded on the element instead of aborting the stream; recovery
/// stages turn it back into a value, and terminal consumers decide whether
/// unresolved failures are tolerated or surfaced.
///
/// Every terminal consumer takes the stream by value, so a pipeline can
/// only ever be consumed once.
///
/// ```
/// use rill_streams_rs::core::Stream;
///
/// let values = Stream::of([1, 2, 3])
///   .map_checked(|value| if value == 2 { Err("even") } else { Ok(value) })
///   .on_error_map(|_failures| 42)
///   .collect_values()?;
/// assert_eq!(values, vec![1, 42, 3]);
/// # Ok::<(), rill_streams_rs::core::StreamError>(())
/// ```
pub struct Stream<Out> {
  source:      Box<dyn SourceLogic>,
  stages:      Vec<Box<dyn StageLogic>>,
  cardinality: Cardinality,
  policy:      UnresolvedPolicy,
  _pd:         PhantomData<fn() -> Out>,
}

impl<Out> Stream<Out>
where
  Out: Send + Sync + 'static,
{
  /// Creates a stream that emits no elements.
  #[must_use]
  pub fn empty() -> Self {
    Self::from_collection(Vec::new())
  }

  /// Creates a stream that emits a single element.
  #[must_use]
  pub fn single(value: Out) -> Self {
    Self::from_collection(vec![value])
  }

  /// Creates a stream over literal values.
  #[must_use]
  pub fn of<const N: usize>(values: [Out; N]) -> Self {
    Self::from_collection(Vec::from(values))
  }

  /// Creates a stream over an already-materialized ordered collection.
  ///
  /// The element count is known in advance, which lets [`Stream::count`]
  /// short-circuit when no later stage can change it.
  #[must_use]
  pub fn from_collection(values: Vec<Out>) -> Self {
    let cardinality = Cardinality::Known(values.len());
    Self {
      source: Box::new(CollectionSourceLogic::new(values)),
      stages: Vec::new(),
      cardinality,
      policy: UnresolvedPolicy::default(),
      _pd: PhantomData,
    }
  }

  /// Creates a stream over an opaque single-pass producer of unknown size.
  #[must_use]
  pub fn from_iterator<I>(values: I) -> Self
  where
    I: IntoIterator<Item = Out>,
    I::IntoIter: Send + 'static, {
    Self {
      source:      Box::new(IteratorSourceLogic::new(values.into_iter())),
      stages:      Vec::new(),
      cardinality: Cardinality::Unknown,
      policy:      UnresolvedPolicy::default(),
      _pd:         PhantomData,
    }
  }

  /// Returns the current cardinality classification.
  #[must_use]
  pub const fn cardinality(&self) -> Cardinality {
    self.cardinality
  }

  /// Sets the policy applied when [`Stream::find_first`], [`Stream::fold`]
  /// or [`Stream::reduce`] reach a surviving errored element.
  #[must_use]
  pub fn unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Adds a transform stage with an infallible closure.
  #[must_use]
  pub fn map<T, F>(self, mut func: F) -> Stream<T>
  where
    T: Send + Sync + 'static,
    F: FnMut(Out) -> T + Send + 'static, {
    self.push_transform(StageKind::Map, move |value| Ok(func(value)))
  }

  /// Adds a transform stage whose closure may fail per element.
  ///
  /// A failure is recorded on the element and does not abort the stream;
  /// the errored element keeps flowing until a recovery stage resolves it
  /// or a terminal consumer decides its fate.
  #[must_use]
  pub fn map_checked<T, F, E>(self, mut func: F) -> Stream<T>
  where
    T: Send + Sync + 'static,
    F: FnMut(Out) -> Result<T, E> + Send + 'static,
    E: Into<FailureReason>, {
    self.push_transform(StageKind::MapChecked, move |value| func(value).map_err(Into::into))
  }

  /// Adds a guard stage with an infallible predicate.
  ///
  /// Errored elements always survive the guard; only values are subject to
  /// the predicate.
  #[must_use]
  pub fn filter<F>(self, mut predicate: F) -> Self
  where
    F: FnMut(&Out) -> bool + Send + 'static, {
    self.push_guard(StageKind::Filter, move |value| Ok(predicate(value)))
  }

  /// Adds a guard stage whose predicate may fail per element.
  #[must_use]
  pub fn filter_checked<F, E>(self, mut predicate: F) -> Self
  where
    F: FnMut(&Out) -> Result<bool, E> + Send + 'static,
    E: Into<FailureReason>, {
    self.push_guard(StageKind::FilterChecked, move |value| predicate(value).map_err(Into::into))
  }

  /// Adds a deduplicate stage keyed on value equality.
  ///
  /// Each distinct value survives once, at the position of its first
  /// occurrence. Errored elements are never deduplicated.
  #[must_use]
  pub fn distinct(mut self) -> Self
  where
    Out: Clone + Eq + core::hash::Hash, {
    self.push_stage(StageKind::Distinct, Box::new(DistinctStageLogic::<Out>::new()));
    self
  }

  /// Adds a recovery stage replacing each errored element's failure list
  /// with a value.
  #[must_use]
  pub fn on_error_map<F>(self, mut recover: F) -> Self
  where
    F: FnMut(Vec<StageFailure>) -> Out + Send + 'static, {
    self.push_recovery(StageKind::OnErrorMap, move |failures| Ok(recover(failures)))
  }

  /// Adds a recovery stage whose closure may itself fail.
  ///
  /// A failing recovery leaves the element errored with a fresh
  /// single-entry failure list tagged to this stage.
  #[must_use]
  pub fn on_error_map_checked<F, E>(self, mut recover: F) -> Self
  where
    F: FnMut(Vec<StageFailure>) -> Result<Out, E> + Send + 'static,
    E: Into<FailureReason>, {
    self.push_recovery(StageKind::OnErrorMapChecked, move |failures| recover(failures).map_err(Into::into))
  }

  /// Adds a stage that drops errored elements unconditionally.
  #[must_use]
  pub fn on_error_filter(mut self) -> Self {
    self.push_stage(StageKind::OnErrorFilter, Box::new(OnErrorFilterStageLogic));
    self
  }

  /// Counts the elements that survive the full stage chain.
  ///
  /// Surviving errored elements count as present; their failure payloads
  /// are never inspected. When the element count is known in advance and no
  /// stage can change it, the count is returned without pulling a single
  /// element.
  ///
  /// # Errors
  ///
  /// Returns [`StreamError::TypeMismatch`] if the internal element types
  /// are inconsistent; this cannot happen through the typed builder API.
  pub fn count(mut self) -> Result<usize, StreamError> {
    if let Cardinality::Known(len) = self.cardinality {
      return Ok(len);
    }
    let mut survivors = 0_usize;
    while self.pull_next()?.is_some() {
      survivors = survivors.saturating_add(1);
    }
    Ok(survivors)
  }

  /// Materializes the surviving element values in source order.
  ///
  /// # Errors
  ///
  /// Returns a [`CheckedStreamError`] the first time an errored element
  /// would have to be unwrapped into a value, carrying its failure list.
  pub fn collect_values(mut self) -> Result<Vec<Out>, StreamError> {
    let mut values = Vec::new();
    while let Some(element) = self.pull_next()? {
      match element {
        | Element::Ok(value) => values.push(downcast_value::<Out>(value)?),
        | Element::Errored(failures) => return Err(CheckedStreamError::single(failures).into()),
      }
    }
    Ok(values)
  }

  /// Compatibility alias of [`Stream::collect_values`].
  ///
  /// # Errors
  ///
  /// See [`Stream::collect_values`].
  pub fn to_collection(self) -> Result<Vec<Out>, StreamError> {
    self.collect_values()
  }

  /// Returns the first surviving element's value, if any.
  ///
  /// Pulls no further than the first surviving element, whatever its
  /// state, and only then resolves or fails on it per the configured
  /// [`UnresolvedPolicy`].
  ///
  /// # Errors
  ///
  /// Returns a [`CheckedStreamError`] when the first survivor is errored
  /// and the policy is [`UnresolvedPolicy::Fail`].
  pub fn find_first(mut self) -> Result<Option<Out>, StreamError> {
    while let Some(element) = self.pull_next()? {
      match element {
        | Element::Ok(value) => return Ok(Some(downcast_value::<Out>(value)?)),
        | Element::Errored(failures) => match self.policy {
          | UnresolvedPolicy::Fail => return Err(CheckedStreamError::single(failures).into()),
          | UnresolvedPolicy::Skip => {},
        },
      }
    }
    Ok(None)
  }

  /// Folds surviving values left to right, starting from `initial`.
  ///
  /// # Errors
  ///
  /// Under [`UnresolvedPolicy::Fail`], returns a [`CheckedStreamError`]
  /// upon the first unresolved errored element, without evaluating
  /// elements beyond it.
  pub fn fold<Acc, F>(mut self, initial: Acc, mut func: F) -> Result<Acc, StreamError>
  where
    F: FnMut(Acc, Out) -> Acc, {
    let mut acc = initial;
    while let Some(element) = self.pull_next()? {
      match element {
        | Element::Ok(value) => acc = func(acc, downcast_value::<Out>(value)?),
        | Element::Errored(failures) => match self.policy {
          | UnresolvedPolicy::Fail => return Err(CheckedStreamError::single(failures).into()),
          | UnresolvedPolicy::Skip => {},
        },
      }
    }
    Ok(acc)
  }

  /// Reduces surviving values with the first one as seed.
  ///
  /// Returns `Ok(None)` when no element survives.
  ///
  /// # Errors
  ///
  /// Same unresolved-element policy as [`Stream::fold`].
  pub fn reduce<F>(mut self, mut func: F) -> Result<Option<Out>, StreamError>
  where
    F: FnMut(Out, Out) -> Out, {
    let mut acc: Option<Out> = None;
    while let Some(element) = self.pull_next()? {
      match element {
        | Element::Ok(value) => {
          let value = downcast_value::<Out>(value)?;
          acc = Some(match acc.take() {
            | Some(current) => func(current, value),
            | None => value,
          });
        },
        | Element::Errored(failures) => match self.policy {
          | UnresolvedPolicy::Fail => return Err(CheckedStreamError::single(failures).into()),
          | UnresolvedPolicy::Skip => {},
        },
      }
    }
    Ok(acc)
  }

  /// Applies a consumer to every surviving value in source order.
  ///
  /// # Errors
  ///
  /// Same unwrap policy as [`Stream::collect_values`]: fails upon the
  /// first errored element it would have to unwrap.
  pub fn for_each<F>(mut self, mut func: F) -> Result<(), StreamError>
  where
    F: FnMut(Out), {
    while let Some(element) = self.pull_next()? {
      match element {
        | Element::Ok(value) => func(downcast_value::<Out>(value)?),
        | Element::Errored(failures) => return Err(CheckedStreamError::single(failures).into()),
      }
    }
    Ok(())
  }

  /// Pulls the next element that survives the full stage chain.
  ///
  /// One logical element is driven end to end through all stages before
  /// the next raw element is pulled; a stage that drops its element sends
  /// the loop back to the source.
  fn pull_next(&mut self) -> Result<Option<Element<DynValue>>, StreamError> {
    'next_raw: loop {
      let Some(raw) = self.source.pull() else {
        return Ok(None);
      };
      let mut element = Element::Ok(raw);
      for stage in &mut self.stages {
        match stage.apply(element)? {
          | Some(output) => element = output,
          | None => continue 'next_raw,
        }
      }
      return Ok(Some(element));
    }
  }

  fn push_transform<T, F>(mut self, kind: StageKind, func: F) -> Stream<T>
  where
    T: Send + Sync + 'static,
    F: FnMut(Out) -> Result<T, FailureReason> + Send + 'static, {
    let id = StageId::new(kind, self.stages.len());
    self.push_stage(kind, Box::new(MapStageLogic::<Out, T, F>::new(id, func)));
    Stream {
      source:      self.source,
      stages:      self.stages,
      cardinality: self.cardinality,
      policy:      self.policy,
      _pd:         PhantomData,
    }
  }

  fn push_guard<F>(mut self, kind: StageKind, predicate: F) -> Self
  where
    F: FnMut(&Out) -> Result<bool, FailureReason> + Send + 'static, {
    let id = StageId::new(kind, self.stages.len());
    self.push_stage(kind, Box::new(FilterStageLogic::<Out, F>::new(id, predicate)));
    self
  }

  fn push_recovery<F>(mut self, kind: StageKind, recover: F) -> Self
  where
    F: FnMut(Vec<StageFailure>) -> Result<Out, FailureReason> + Send + 'static, {
    let id = StageId::new(kind, self.stages.len());
    self.push_stage(kind, Box::new(OnErrorMapStageLogic::<Out, F>::new(id, recover)));
    self
  }

  fn push_stage(&mut self, kind: StageKind, logic: Box<dyn StageLogic>) {
    self.cardinality = self.cardinality.through(kind);
    self.stages.push(logic);
  }
}
