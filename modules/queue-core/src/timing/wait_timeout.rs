use core::time::Duration;

use crate::error::QueueError;

#[cfg(test)]
mod tests;

/// Upper bound on how long a queue operation may wait for room or for an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WaitTimeout {
  /// Waits until the condition holds, the caller cancels, or the queue is disposed.
  #[default]
  Infinite,
  /// Waits at most the given duration.
  Bounded(Duration),
}

impl WaitTimeout {
  /// Millisecond value that stands for an unbounded wait.
  pub const INFINITE_MILLIS: i64 = -1;

  /// Creates a bounded timeout.
  #[must_use]
  pub const fn bounded(duration: Duration) -> Self {
    Self::Bounded(duration)
  }

  /// Creates a timeout from a millisecond count.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::InvalidArgument`] for negative values other than
  /// [`Self::INFINITE_MILLIS`].
  pub const fn from_millis(millis: i64) -> Result<Self, QueueError> {
    if millis == Self::INFINITE_MILLIS {
      Ok(Self::Infinite)
    } else if millis < 0 {
      Err(QueueError::InvalidArgument("timeout must be non-negative or -1 for infinite"))
    } else {
      Ok(Self::Bounded(Duration::from_millis(millis as u64)))
    }
  }

  /// Returns the bound, or `None` when the wait is unbounded.
  #[must_use]
  pub const fn as_duration(&self) -> Option<Duration> {
    match self {
      | Self::Infinite => None,
      | Self::Bounded(duration) => Some(*duration),
    }
  }

  /// Returns `true` when the wait has no bound.
  #[must_use]
  pub const fn is_infinite(&self) -> bool {
    matches!(self, Self::Infinite)
  }
}

impl From<Duration> for WaitTimeout {
  fn from(duration: Duration) -> Self {
    Self::Bounded(duration)
  }
}

impl From<Option<Duration>> for WaitTimeout {
  fn from(duration: Option<Duration>) -> Self {
    duration.map_or(Self::Infinite, Self::Bounded)
  }
}

impl TryFrom<i64> for WaitTimeout {
  type Error = QueueError;

  fn try_from(millis: i64) -> Result<Self, Self::Error> {
    Self::from_millis(millis)
  }
}
