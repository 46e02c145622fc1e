use alloc::vec;

use super::Element;
use crate::core::{FailureReason, StageFailure, StageId, StageKind};

fn failure(message: &str) -> StageFailure {
  StageFailure::new(StageId::new(StageKind::MapChecked, 0), FailureReason::new(message))
}

#[test]
fn ok_element_reports_state() {
  let element = Element::Ok(7_u32);
  assert!(element.is_ok());
  assert!(!element.is_errored());
  assert_eq!(element.failures(), None);
  assert_eq!(element.into_value(), Some(7));
}

#[test]
fn errored_element_keeps_failure_order() {
  let element: Element<u32> = Element::Errored(vec![failure("first"), failure("second")]);
  assert!(element.is_errored());
  let failures = element.failures().expect("failures");
  assert_eq!(failures[0].message(), "first");
  assert_eq!(failures[1].message(), "second");
  assert_eq!(element.into_value(), None);
}
