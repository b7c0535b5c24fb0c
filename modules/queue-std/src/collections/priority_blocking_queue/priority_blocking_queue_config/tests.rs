use prioq_core_rs::QueueError;

use super::{PriorityBlockingQueueConfig, DEFAULT_TAKE_RETRY_LIMIT};

#[test]
fn defaults_retry_limit() {
  let config = PriorityBlockingQueueConfig::new(8);
  assert_eq!(config.capacity(), 8);
  assert_eq!(config.take_retry_limit(), DEFAULT_TAKE_RETRY_LIMIT);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn retry_limit_is_overridable() {
  let config = PriorityBlockingQueueConfig::new(1).with_take_retry_limit(3);
  assert_eq!(config.take_retry_limit(), 3);
}

#[test]
fn zero_capacity_is_rejected() {
  assert!(matches!(PriorityBlockingQueueConfig::new(0).validate(), Err(QueueError::InvalidArgument(_))));
}
