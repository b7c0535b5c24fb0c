use alloc::string::ToString;

use super::QueueError;

#[test]
fn only_timeout_and_cancel_are_recoverable() {
  assert!(QueueError::Timeout.is_recoverable());
  assert!(QueueError::Cancelled.is_recoverable());
  assert!(!QueueError::Closed.is_recoverable());
  assert!(!QueueError::Disposed.is_recoverable());
  assert!(!QueueError::InvalidArgument("capacity").is_recoverable());
  assert!(!QueueError::InternalInconsistency.is_recoverable());
}

#[test]
fn internal_inconsistency_is_fatal() {
  assert!(QueueError::InternalInconsistency.is_fatal());
  assert!(!QueueError::Timeout.is_fatal());
}

#[test]
fn display_includes_invalid_argument_reason() {
  let message = QueueError::InvalidArgument("capacity must be positive").to_string();
  assert_eq!(message, "invalid argument: capacity must be positive");
  assert_eq!(QueueError::Closed.to_string(), "queue is closed for adding");
}
