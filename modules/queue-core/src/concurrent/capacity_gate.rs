use core::fmt;

use portable_atomic::{AtomicUsize, Ordering};

use super::AvailabilitySignal;


/// Tracks queue occupancy against a fixed bound and raises room/items availability pulses.
///
/// Two counters are kept:
///
/// - `occupied` counts slots handed to producers, including elements that are still being written
///   into storage. The blocking path reserves a slot only while `occupied < capacity`; the bypass
///   path reserves unconditionally.
/// - `available` counts elements that are visible in storage and not yet claimed by a consumer.
///
/// A producer reserves, stores, then commits. A consumer claims, takes, then releases. Because a
/// commit always follows the store write, a successful claim guarantees an element is stored.
/// The counters are not updated atomically with the storage itself, so a reader may briefly see
/// them disagree with the bucket contents.
///
/// After every transition the new count is compared against the bound: a count above zero pulses
/// `items`, a count below capacity pulses `room`.
pub struct CapacityGate<S> {
  capacity:  usize,
  occupied:  AtomicUsize,
  available: AtomicUsize,
  room:      S,
  items:     S,
}

impl<S: AvailabilitySignal> CapacityGate<S> {
  /// Creates a gate for `capacity` slots using the given room and items signals.
  ///
  /// The room signal is armed once so that the first producer does not have to wait.
  pub fn new(capacity: usize, room: S, items: S) -> Self {
    let gate = Self { capacity, occupied: AtomicUsize::new(0), available: AtomicUsize::new(0), room, items };
    if capacity > 0 {
      gate.room.pulse();
    }
    gate
  }

  /// Reserves a slot if occupancy is below capacity.
  #[must_use]
  pub fn try_reserve_slot(&self) -> bool {
    let mut current = self.occupied.load(Ordering::Acquire);
    loop {
      if current >= self.capacity {
        return false;
      }
      match self.occupied.compare_exchange_weak(current, current + 1, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => {
          self.after_occupancy_change(current + 1);
          return true;
        },
        | Err(actual) => current = actual,
      }
    }
  }

  /// Reserves a slot regardless of capacity and returns the new occupancy.
  pub fn force_reserve_slot(&self) -> usize {
    let occupied = self.occupied.fetch_add(1, Ordering::AcqRel) + 1;
    self.after_occupancy_change(occupied);
    occupied
  }

  /// Gives a slot back, either after an element left storage or when a reservation is abandoned.
  ///
  /// Saturates at zero, since [`reset`](Self::reset) may already have dropped the slot.
  pub fn release_slot(&self) {
    let previous =
      self.occupied.fetch_update(Ordering::AcqRel, Ordering::Acquire, |occupied| occupied.checked_sub(1)).unwrap_or(0);
    self.after_occupancy_change(previous.saturating_sub(1));
  }

  /// Publishes one stored element to consumers.
  pub fn commit_item(&self) {
    let available = self.available.fetch_add(1, Ordering::AcqRel) + 1;
    self.after_available_change(available);
  }

  /// Claims one published element if any is available.
  #[must_use]
  pub fn try_claim_item(&self) -> bool {
    let mut current = self.available.load(Ordering::Acquire);
    loop {
      if current == 0 {
        return false;
      }
      match self.available.compare_exchange_weak(current, current - 1, Ordering::AcqRel, Ordering::Acquire) {
        | Ok(_) => {
          self.after_available_change(current - 1);
          return true;
        },
        | Err(actual) => current = actual,
      }
    }
  }

  /// Drops both counters to zero and re-arms the room signal.
  pub fn reset(&self) {
    self.available.store(0, Ordering::Release);
    self.occupied.store(0, Ordering::Release);
    self.after_occupancy_change(0);
  }

  /// Returns the number of published, unclaimed elements.
  #[must_use]
  pub fn count(&self) -> usize {
    self.available.load(Ordering::Acquire)
  }

  /// Returns the number of reserved slots.
  #[must_use]
  pub fn occupied(&self) -> usize {
    self.occupied.load(Ordering::Acquire)
  }

  /// Returns the bound enforced on the blocking path.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the signal pulsed when occupancy drops below capacity.
  #[must_use]
  pub const fn room_signal(&self) -> &S {
    &self.room
  }

  /// Returns the signal pulsed while elements are available.
  #[must_use]
  pub const fn items_signal(&self) -> &S {
    &self.items
  }

  fn after_occupancy_change(&self, occupied: usize) {
    if occupied < self.capacity {
      self.room.pulse();
    }
  }

  fn after_available_change(&self, available: usize) {
    if available > 0 {
      self.items.pulse();
    }
  }
}

impl<S> fmt::Debug for CapacityGate<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CapacityGate")
      .field("capacity", &self.capacity)
      .field("occupied", &self.occupied.load(Ordering::Relaxed))
      .field("available", &self.available.load(Ordering::Relaxed))
      .finish()
  }
}
