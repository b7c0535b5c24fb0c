/// Edge-triggered wake hint raised by the [`CapacityGate`](super::CapacityGate).
///
/// A pulse wakes at most one waiter and then resets. Pulses raised while nobody is waiting may be
/// coalesced or dropped by the implementation, so consumers of the signal must re-check the gate
/// after every wake-up instead of trusting the pulse itself.
pub trait AvailabilitySignal {
  /// Wakes one waiter, or arms the signal for the next waiter if none is registered.
  fn pulse(&self);
}
