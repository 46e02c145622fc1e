use alloc::{boxed::Box, vec, vec::Vec};
use core::marker::PhantomData;

use hashbrown::HashSet;

use super::{DynValue, Element, FailureReason, StageFailure, StageId, StageLogic, StreamError, downcast_value};

#[cfg(test)]
mod tests;

/// Transform stage.
///
/// An errored input passes through untouched; the closure is only ever
/// invoked for values. A closure failure starts a fresh single-entry
/// failure list tagged to this stage. No retries.
pub(in crate::core) struct MapStageLogic<In, Out, F> {
  id:   StageId,
  func: F,
  _pd:  PhantomData<fn(In) -> Out>,
}

impl<In, Out, F> MapStageLogic<In, Out, F> {
  pub(in crate::core) const fn new(id: StageId, func: F) -> Self {
    Self { id, func, _pd: PhantomData }
  }
}

impl<In, Out, F> StageLogic for MapStageLogic<In, Out, F>
where
  In: Send + Sync + 'static,
  Out: Send + Sync + 'static,
  F: FnMut(In) -> Result<Out, FailureReason> + Send + 'static,
{
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError> {
    match input {
      | Element::Ok(value) => {
        let value = downcast_value::<In>(value)?;
        match (self.func)(value) {
          | Ok(output) => Ok(Some(Element::Ok(Box::new(output) as DynValue))),
          | Err(reason) => Ok(Some(Element::Errored(vec![StageFailure::new(self.id, reason)]))),
        }
      },
      | Element::Errored(failures) => Ok(Some(Element::Errored(failures))),
    }
  }
}

/// Guard stage.
///
/// Values failing the predicate are dropped; errored elements always pass
/// through, since an element that cannot be evaluated cannot be judged
/// absent. A throwing predicate turns the value into an errored element.
pub(in crate::core) struct FilterStageLogic<In, F> {
  id:        StageId,
  predicate: F,
  _pd:       PhantomData<fn(In)>,
}

impl<In, F> FilterStageLogic<In, F> {
  pub(in crate::core) const fn new(id: StageId, predicate: F) -> Self {
    Self { id, predicate, _pd: PhantomData }
  }
}

impl<In, F> StageLogic for FilterStageLogic<In, F>
where
  In: Send + Sync + 'static,
  F: FnMut(&In) -> Result<bool, FailureReason> + Send + 'static,
{
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError> {
    match input {
      | Element::Ok(value) => {
        let value = downcast_value::<In>(value)?;
        match (self.predicate)(&value) {
          | Ok(true) => Ok(Some(Element::Ok(Box::new(value) as DynValue))),
          | Ok(false) => Ok(None),
          | Err(reason) => Ok(Some(Element::Errored(vec![StageFailure::new(self.id, reason)]))),
        }
      },
      | Element::Errored(failures) => Ok(Some(Element::Errored(failures))),
    }
  }
}

/// Deduplicate stage.
///
/// Keeps the first occurrence of each value, drops later equal ones.
/// Errored elements are never compared and never dropped. The seen-set
/// lives for the stage instance's lifetime within one run.
pub(in crate::core) struct DistinctStageLogic<In> {
  seen: HashSet<In>,
}

impl<In> DistinctStageLogic<In> {
  pub(in crate::core) fn new() -> Self {
    Self { seen: HashSet::new() }
  }
}

impl<In> StageLogic for DistinctStageLogic<In>
where
  In: Clone + Eq + core::hash::Hash + Send + Sync + 'static,
{
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError> {
    match input {
      | Element::Ok(value) => {
        let value = downcast_value::<In>(value)?;
        if self.seen.contains(&value) {
          return Ok(None);
        }
        self.seen.insert(value.clone());
        Ok(Some(Element::Ok(Box::new(value) as DynValue)))
      },
      | Element::Errored(failures) => Ok(Some(Element::Errored(failures))),
    }
  }
}

/// Error-recovery stage.
///
/// Values pass through untouched; an errored element is replaced by the
/// recovery result. A failing recovery replaces the old failure list with a
/// fresh single-entry list tagged to this stage.
pub(in crate::core) struct OnErrorMapStageLogic<Out, F> {
  id:      StageId,
  recover: F,
  _pd:     PhantomData<fn() -> Out>,
}

impl<Out, F> OnErrorMapStageLogic<Out, F> {
  pub(in crate::core) const fn new(id: StageId, recover: F) -> Self {
    Self { id, recover, _pd: PhantomData }
  }
}

impl<Out, F> StageLogic for OnErrorMapStageLogic<Out, F>
where
  Out: Send + Sync + 'static,
  F: FnMut(Vec<StageFailure>) -> Result<Out, FailureReason> + Send + 'static,
{
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError> {
    match input {
      | Element::Ok(value) => Ok(Some(Element::Ok(value))),
      | Element::Errored(failures) => match (self.recover)(failures) {
        | Ok(output) => Ok(Some(Element::Ok(Box::new(output) as DynValue))),
        | Err(reason) => Ok(Some(Element::Errored(vec![StageFailure::new(self.id, reason)]))),
      },
    }
  }
}

/// Stage that drops errored elements unconditionally.
pub(in crate::core) struct OnErrorFilterStageLogic;

impl StageLogic for OnErrorFilterStageLogic {
  fn apply(&mut self, input: Element<DynValue>) -> Result<Option<Element<DynValue>>, StreamError> {
    match input {
      | Element::Ok(value) => Ok(Some(Element::Ok(value))),
      | Element::Errored(_) => Ok(None),
    }
  }
}
