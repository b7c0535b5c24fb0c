//! Timeout values shared by every waiting queue operation.
//!
//! Callers may hand in either a [`core::time::Duration`] or an integer number of milliseconds;
//! both forms normalise to [`WaitTimeout`], where `-1` milliseconds is the unbounded sentinel.

mod wait_timeout;

pub use wait_timeout::WaitTimeout;
