#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_types))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::unnecessary_to_owned)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_self)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]

//! Tokio bindings for the prioq bounded priority blocking queue.
//!
//! This crate wires the `no_std` pieces from `prioq_core_rs` to the Tokio runtime: availability
//! signals are backed by [`tokio::sync::Notify`], waits honour `tokio::time` deadlines and
//! [`tokio_util::sync::CancellationToken`]s, and the default bucket store is a
//! [`dashmap::DashMap`]. [`PriorityBlockingQueue`] is the public entry point.

/// Bucket storage and the queue controller.
pub mod collections;
/// Tokio-backed availability signals.
pub mod concurrent;
/// Cancellable, timeout-bounded waits on availability signals.
pub mod wait;

pub use collections::{DashMapBucketStore, PriorityBlockingQueue, PriorityBlockingQueueConfig};
pub use concurrent::TokioAvailabilitySignal;
pub use prioq_core_rs::{BTreeBucketStore, BucketStore, QueueError, WaitOutcome, WaitTimeout};
pub use wait::SignalWaiter;

/// Prelude module that re-exports commonly used types and traits.
pub mod prelude {
  pub use prioq_core_rs::{
    AddingLifecycle, AvailabilitySignal, BTreeBucketStore, BucketStore, CapacityGate, QueueError, WaitOutcome,
    WaitTimeout,
  };
  pub use tokio_util::sync::CancellationToken;

  pub use crate::{
    collections::{DashMapBucketStore, PriorityBlockingQueue, PriorityBlockingQueueConfig},
    concurrent::TokioAvailabilitySignal,
    wait::SignalWaiter,
  };
}
