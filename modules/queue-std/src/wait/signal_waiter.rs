use std::fmt;

use futures::future;
use prioq_core_rs::{QueueError, WaitOutcome, WaitTimeout};
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::concurrent::TokioAvailabilitySignal;


/// Per-operation wait context: one deadline, an optional caller token and the queue's shutdown
/// token.
///
/// The deadline is fixed when the waiter is created, so an operation that loops over several
/// wake-ups never waits longer in total than its timeout. When several conditions are ready in the
/// same poll, cancellation wins over disposal, disposal over the signal, and the signal over the
/// deadline.
pub struct SignalWaiter<'a> {
  deadline: Option<Instant>,
  cancel:   Option<&'a CancellationToken>,
  shutdown: &'a CancellationToken,
}

impl<'a> SignalWaiter<'a> {
  /// Creates a waiter whose deadline starts counting now.
  ///
  /// Timeouts too large to be represented as an instant are treated as infinite.
  #[must_use]
  pub fn new(timeout: WaitTimeout, cancel: Option<&'a CancellationToken>, shutdown: &'a CancellationToken) -> Self {
    let deadline = timeout.as_duration().and_then(|duration| Instant::now().checked_add(duration));
    Self { deadline, cancel, shutdown }
  }

  /// Fails fast when the caller already cancelled or the queue was already disposed.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Cancelled`] or [`QueueError::Disposed`].
  pub fn check_interrupted(&self) -> Result<(), QueueError> {
    if self.cancel.is_some_and(CancellationToken::is_cancelled) {
      return Err(QueueError::Cancelled);
    }
    if self.shutdown.is_cancelled() {
      return Err(QueueError::Disposed);
    }
    Ok(())
  }

  /// Waits for one pulse of `signal`.
  ///
  /// On [`WaitOutcome::Signaled`] the pulse has been consumed by this waiter. Every registration
  /// made here is dropped on return, including when the returned future itself is dropped.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Cancelled`] when the caller's token fires first and
  /// [`QueueError::Disposed`] when the queue is disposed first.
  pub async fn wait(&self, signal: &TokioAvailabilitySignal) -> Result<WaitOutcome, QueueError> {
    let cancelled = async {
      match self.cancel {
        | Some(token) => token.cancelled().await,
        | None => future::pending().await,
      }
    };
    let expired = async {
      match self.deadline {
        | Some(deadline) => time::sleep_until(deadline).await,
        | None => future::pending().await,
      }
    };

    tokio::select! {
      biased;
      () = cancelled => Err(QueueError::Cancelled),
      () = self.shutdown.cancelled() => Err(QueueError::Disposed),
      () = signal.notified() => Ok(WaitOutcome::Signaled),
      () = expired => Ok(WaitOutcome::TimedOut),
    }
  }

  /// Returns the instant at which waits report [`WaitOutcome::TimedOut`], if bounded.
  #[must_use]
  pub const fn deadline(&self) -> Option<Instant> {
    self.deadline
  }
}

impl fmt::Debug for SignalWaiter<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SignalWaiter")
      .field("deadline", &self.deadline)
      .field("cancellable", &self.cancel.is_some())
      .field("disposed", &self.shutdown.is_cancelled())
      .finish()
  }
}
