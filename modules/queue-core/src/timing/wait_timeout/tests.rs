use core::time::Duration;

use super::WaitTimeout;
use crate::error::QueueError;

#[test]
fn minus_one_millis_means_infinite() {
  assert_eq!(WaitTimeout::from_millis(-1), Ok(WaitTimeout::Infinite));
  assert!(WaitTimeout::try_from(-1_i64).unwrap().is_infinite());
}

#[test]
fn other_negative_millis_are_rejected() {
  assert!(matches!(WaitTimeout::from_millis(-2), Err(QueueError::InvalidArgument(_))));
  assert!(matches!(WaitTimeout::try_from(i64::MIN), Err(QueueError::InvalidArgument(_))));
}

#[test]
fn millis_and_duration_forms_are_equivalent() {
  let from_millis = WaitTimeout::from_millis(500).unwrap();
  let from_duration = WaitTimeout::from(Duration::from_millis(500));
  assert_eq!(from_millis, from_duration);
  assert_eq!(from_millis.as_duration(), Some(Duration::from_millis(500)));
}

#[test]
fn zero_millis_is_a_bounded_poll() {
  let timeout = WaitTimeout::from_millis(0).unwrap();
  assert_eq!(timeout, WaitTimeout::Bounded(Duration::ZERO));
  assert!(!timeout.is_infinite());
}

#[test]
fn optional_duration_maps_none_to_infinite() {
  assert_eq!(WaitTimeout::from(None), WaitTimeout::Infinite);
  assert_eq!(WaitTimeout::from(Some(Duration::from_secs(1))), WaitTimeout::bounded(Duration::from_secs(1)));
  assert_eq!(WaitTimeout::default(), WaitTimeout::Infinite);
}
