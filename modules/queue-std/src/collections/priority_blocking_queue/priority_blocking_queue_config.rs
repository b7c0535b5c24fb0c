use prioq_core_rs::QueueError;

#[cfg(test)]
mod tests;

/// Default number of storage rescans a consumer performs after claiming an element.
pub const DEFAULT_TAKE_RETRY_LIMIT: usize = 64;

/// Construction parameters for [`PriorityBlockingQueue`](super::PriorityBlockingQueue).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriorityBlockingQueueConfig {
  capacity:         usize,
  take_retry_limit: usize,
}

impl PriorityBlockingQueueConfig {
  /// Creates a configuration bounding the blocking path to `capacity` elements.
  #[must_use]
  pub const fn new(capacity: usize) -> Self {
    Self { capacity, take_retry_limit: DEFAULT_TAKE_RETRY_LIMIT }
  }

  /// Sets how many extra storage scans a consumer performs when a claimed element is not yet
  /// visible before reporting [`QueueError::InternalInconsistency`].
  #[must_use]
  pub const fn with_take_retry_limit(mut self, limit: usize) -> Self {
    self.take_retry_limit = limit;
    self
  }

  /// Returns the bound enforced on the blocking enqueue path.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the number of extra scans performed after a successful claim.
  #[must_use]
  pub const fn take_retry_limit(&self) -> usize {
    self.take_retry_limit
  }

  /// Checks that the configuration describes a usable queue.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::InvalidArgument`] when the capacity is zero.
  pub const fn validate(&self) -> Result<(), QueueError> {
    if self.capacity == 0 {
      return Err(QueueError::InvalidArgument("capacity must be positive"));
    }
    Ok(())
  }
}
