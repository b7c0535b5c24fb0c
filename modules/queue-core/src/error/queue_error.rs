//! Queue error type.

use core::fmt;

#[cfg(test)]
mod tests;

/// Errors reported by priority blocking queue operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueError {
  /// An argument was rejected before any state was touched.
  InvalidArgument(&'static str),
  /// The queue no longer accepts insertions.
  Closed,
  /// The bounded wait elapsed before the awaited condition held.
  Timeout,
  /// The caller's cancellation token fired before the awaited condition held.
  Cancelled,
  /// The queue was disposed before or while the operation was waiting.
  Disposed,
  /// The gate reported an element as available but none could be taken from storage.
  InternalInconsistency,
}

impl QueueError {
  /// Returns `true` for failures the caller may retry with a fresh call.
  #[must_use]
  pub const fn is_recoverable(&self) -> bool {
    matches!(self, Self::Timeout | Self::Cancelled)
  }

  /// Returns `true` when the failure indicates a broken internal invariant.
  #[must_use]
  pub const fn is_fatal(&self) -> bool {
    matches!(self, Self::InternalInconsistency)
  }
}

impl fmt::Display for QueueError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
      | Self::Closed => f.write_str("queue is closed for adding"),
      | Self::Timeout => f.write_str("timed out waiting on the queue"),
      | Self::Cancelled => f.write_str("queue operation was cancelled"),
      | Self::Disposed => f.write_str("queue has been disposed"),
      | Self::InternalInconsistency => f.write_str("item count and bucket contents disagree"),
    }
  }
}

impl core::error::Error for QueueError {}
