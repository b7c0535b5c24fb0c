//! Tokio availability signal implementation.

use std::fmt;

use prioq_core_rs::AvailabilitySignal;
use tokio::sync::{futures::Notified, Notify};

#[cfg(test)]
mod tests;

/// Auto-reset availability signal backed by [`tokio::sync::Notify`].
///
/// A pulse wakes exactly one registered waiter. When nobody is waiting, the pulse is stored as a
/// single permit and consumed by the next waiter; further pulses before that are coalesced.
#[derive(Default)]
pub struct TokioAvailabilitySignal {
  notify: Notify,
}

impl TokioAvailabilitySignal {
  /// Creates an unarmed signal.
  #[must_use]
  pub fn new() -> Self {
    Self { notify: Notify::new() }
  }

  /// Returns a future that resolves once this waiter consumes a pulse.
  ///
  /// Dropping the future deregisters the waiter. A pulse handed to a waiter that is dropped before
  /// observing it is passed on to the next waiter.
  pub fn notified(&self) -> Notified<'_> {
    self.notify.notified()
  }
}

impl AvailabilitySignal for TokioAvailabilitySignal {
  fn pulse(&self) {
    self.notify.notify_one();
  }
}

impl fmt::Debug for TokioAvailabilitySignal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokioAvailabilitySignal").finish_non_exhaustive()
  }
}
