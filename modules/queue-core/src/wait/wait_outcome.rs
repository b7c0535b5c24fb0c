/// Normal resolution of a single wait on an availability signal.
///
/// Cancellation and disposal are not outcomes; adapters report them as errors so that exactly one
/// of signaled, timed-out or failed is observed per wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
  /// The signal fired and this waiter consumed the occurrence.
  Signaled,
  /// The deadline elapsed first.
  TimedOut,
}

impl WaitOutcome {
  /// Returns `true` when the signal was observed.
  #[must_use]
  pub const fn is_signaled(self) -> bool {
    matches!(self, Self::Signaled)
  }
}
