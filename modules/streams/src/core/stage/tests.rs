use alloc::{boxed::Box, sync::Arc, vec, vec::Vec};
use core::sync::atomic::{AtomicUsize, Ordering};

use super::{DistinctStageLogic, FilterStageLogic, MapStageLogic, OnErrorFilterStageLogic, OnErrorMapStageLogic};
use crate::core::{
  DynValue, Element, FailureReason, StageFailure, StageId, StageKind, StageLogic, StreamError, downcast_value,
};

fn ok(value: i32) -> Element<DynValue> {
  Element::Ok(Box::new(value) as DynValue)
}

fn errored(message: &str) -> Element<DynValue> {
  Element::Errored(vec![StageFailure::new(StageId::new(StageKind::MapChecked, 0), FailureReason::new(message))])
}

fn unwrap_value(element: Element<DynValue>) -> i32 {
  match element {
    | Element::Ok(value) => downcast_value::<i32>(value).expect("downcast"),
    | Element::Errored(failures) => panic!("unexpected failures: {failures:?}"),
  }
}

#[test]
fn map_transforms_values() {
  let mut stage = MapStageLogic::<i32, i32, _>::new(StageId::new(StageKind::Map, 0), |value: i32| Ok(value * 2));
  let output = stage.apply(ok(21)).expect("apply").expect("element");
  assert_eq!(unwrap_value(output), 42);
}

#[test]
fn map_failure_starts_fresh_single_entry_list() {
  let id = StageId::new(StageKind::MapChecked, 3);
  let mut stage = MapStageLogic::<i32, i32, _>::new(id, |_value: i32| Err(FailureReason::new("boom")));
  let output = stage.apply(ok(1)).expect("apply").expect("element");
  let failures = output.failures().expect("failures");
  assert_eq!(failures.len(), 1);
  assert_eq!(failures[0].stage(), id);
  assert_eq!(failures[0].message(), "boom");
}

#[test]
fn map_never_invokes_closure_on_errored_input() {
  let calls = Arc::new(AtomicUsize::new(0));
  let seen = Arc::clone(&calls);
  let mut stage = MapStageLogic::<i32, i32, _>::new(StageId::new(StageKind::Map, 0), move |value: i32| {
    seen.fetch_add(1, Ordering::Relaxed);
    Ok(value)
  });
  let output = stage.apply(errored("earlier")).expect("apply").expect("element");
  let failures = output.failures().expect("failures");
  assert_eq!(failures.len(), 1);
  assert_eq!(failures[0].message(), "earlier");
  assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn filter_drops_false_and_keeps_true() {
  let mut stage =
    FilterStageLogic::<i32, _>::new(StageId::new(StageKind::Filter, 0), |value: &i32| Ok(*value > 2));
  assert!(stage.apply(ok(1)).expect("apply").is_none());
  let output = stage.apply(ok(3)).expect("apply").expect("element");
  assert_eq!(unwrap_value(output), 3);
}

#[test]
fn filter_never_drops_errored_elements() {
  let calls = Arc::new(AtomicUsize::new(0));
  let seen = Arc::clone(&calls);
  let mut stage = FilterStageLogic::<i32, _>::new(StageId::new(StageKind::Filter, 0), move |_value: &i32| {
    seen.fetch_add(1, Ordering::Relaxed);
    Ok(false)
  });
  let output = stage.apply(errored("earlier")).expect("apply").expect("element");
  let failures = output.failures().expect("failures");
  assert_eq!(failures[0].message(), "earlier");
  assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn filter_predicate_failure_becomes_errored_element() {
  let id = StageId::new(StageKind::FilterChecked, 1);
  let mut stage = FilterStageLogic::<i32, _>::new(id, |_value: &i32| Err(FailureReason::new("cannot judge")));
  let output = stage.apply(ok(5)).expect("apply").expect("element");
  let failures = output.failures().expect("failures");
  assert_eq!(failures[0].stage(), id);
}

#[test]
fn distinct_keeps_first_occurrence_only() {
  let mut stage = DistinctStageLogic::<i32>::new();
  assert_eq!(unwrap_value(stage.apply(ok(1)).expect("apply").expect("element")), 1);
  assert_eq!(unwrap_value(stage.apply(ok(2)).expect("apply").expect("element")), 2);
  assert!(stage.apply(ok(1)).expect("apply").is_none());
  assert!(stage.apply(ok(2)).expect("apply").is_none());
}

#[test]
fn distinct_never_drops_errored_elements() {
  let mut stage = DistinctStageLogic::<i32>::new();
  let first = errored("a");
  let second = errored("a");
  assert!(stage.apply(first).expect("apply").is_some());
  assert!(stage.apply(second).expect("apply").is_some());
}

#[test]
fn on_error_map_resolves_failures_and_passes_values() {
  let mut stage = OnErrorMapStageLogic::<i32, _>::new(StageId::new(StageKind::OnErrorMap, 1), |failures: Vec<StageFailure>| {
    assert_eq!(failures.len(), 1);
    Ok(42)
  });
  let recovered = stage.apply(errored("boom")).expect("apply").expect("element");
  assert_eq!(unwrap_value(recovered), 42);
  let untouched = stage.apply(ok(7)).expect("apply").expect("element");
  assert_eq!(unwrap_value(untouched), 7);
}

#[test]
fn failing_recovery_replaces_the_failure_list() {
  let id = StageId::new(StageKind::OnErrorMapChecked, 2);
  let mut stage =
    OnErrorMapStageLogic::<i32, _>::new(id, |_failures| Err(FailureReason::new("recovery failed")));
  let output = stage.apply(errored("original")).expect("apply").expect("element");
  let failures = output.failures().expect("failures");
  assert_eq!(failures.len(), 1);
  assert_eq!(failures[0].stage(), id);
  assert_eq!(failures[0].message(), "recovery failed");
}

#[test]
fn on_error_filter_drops_only_errored_elements() {
  let mut stage = OnErrorFilterStageLogic;
  assert!(stage.apply(errored("boom")).expect("apply").is_none());
  let output = stage.apply(ok(9)).expect("apply").expect("element");
  assert_eq!(unwrap_value(output), 9);
}

#[test]
fn mismatched_value_type_is_rejected() {
  let mut stage = MapStageLogic::<u64, u64, _>::new(StageId::new(StageKind::Map, 0), |value: u64| Ok(value));
  let result = stage.apply(ok(1));
  assert!(matches!(result, Err(StreamError::TypeMismatch)));
}
