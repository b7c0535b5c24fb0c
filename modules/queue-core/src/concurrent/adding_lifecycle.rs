use core::{fmt, hint};

use portable_atomic::{AtomicUsize, Ordering};

use crate::error::QueueError;


const CLOSED: usize = 1 << (usize::BITS - 1);
const ADDERS_MASK: usize = !CLOSED;

/// One-way open/closed state word shared by every producer.
///
/// The high bit records that adding was completed; the remaining bits count producers that are
/// currently writing an element. [`complete_adding`](Self::complete_adding) sets the bit and then
/// waits for those writers to finish, so once it returns no further insertion can succeed.
/// Writers hold an [`AddingTicket`] only around synchronous work and never across a suspension
/// point.
pub struct AddingLifecycle {
  state: AtomicUsize,
}

impl AddingLifecycle {
  /// Creates a lifecycle in the open state.
  #[must_use]
  pub const fn new() -> Self {
    Self { state: AtomicUsize::new(0) }
  }

  /// Registers an in-flight insertion.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Closed`] once adding has been completed.
  pub fn try_begin_add(&self) -> Result<AddingTicket<'_>, QueueError> {
    let mut current = self.state.load(Ordering::Acquire);
    loop {
      if current & CLOSED != 0 {
        return Err(QueueError::Closed);
      }
      match self.state.compare_exchange_weak(current, current + 1, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => return Ok(AddingTicket { lifecycle: self }),
        | Err(actual) => current = actual,
      }
    }
  }

  /// Closes the lifecycle and waits for in-flight insertions to finish.
  ///
  /// The wait spins on the calling thread, which may be an async worker. Tickets are only held
  /// around a storage write, so the spin lasts at most as long as the slowest in-flight
  /// `BucketStore::insert`. A caller must never hold a ticket itself while calling this.
  ///
  /// Returns `true` if this call performed the transition.
  pub fn complete_adding(&self) -> bool {
    let previous = self.state.fetch_or(CLOSED, Ordering::AcqRel);
    while self.state.load(Ordering::Acquire) & ADDERS_MASK != 0 {
      hint::spin_loop();
    }
    previous & CLOSED == 0
  }

  /// Returns `true` once adding has been completed.
  #[must_use]
  pub fn is_adding_completed(&self) -> bool {
    self.state.load(Ordering::Acquire) & CLOSED != 0
  }

  fn end_add(&self) {
    self.state.fetch_sub(1, Ordering::AcqRel);
  }
}

impl Default for AddingLifecycle {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for AddingLifecycle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.load(Ordering::Relaxed);
    f.debug_struct("AddingLifecycle")
      .field("closed", &(state & CLOSED != 0))
      .field("in_flight", &(state & ADDERS_MASK))
      .finish()
  }
}

/// Proof that an insertion was admitted before adding was completed.
///
/// Dropping the ticket marks the insertion as finished.
#[must_use = "an insertion is only protected while its ticket is alive"]
pub struct AddingTicket<'a> {
  lifecycle: &'a AddingLifecycle,
}

impl Drop for AddingTicket<'_> {
  fn drop(&mut self) {
    self.lifecycle.end_add();
  }
}

impl fmt::Debug for AddingTicket<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AddingTicket").finish_non_exhaustive()
  }
}
