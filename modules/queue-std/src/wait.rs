//! Wait adapter turning an availability signal into a cancellable, timeout-bounded suspension.

mod signal_waiter;

pub use signal_waiter::SignalWaiter;
