#![no_std]
#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_types))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::needless_borrow)]
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

//! Core building blocks for the prioq bounded priority blocking queue.
//!
//! Everything here is `no_std` + `alloc`: priority bucket storage, the capacity gate that tracks
//! occupancy against the bound, the open/closed lifecycle word, and the error and timeout types
//! shared with the std layer. Waiting itself is left to runtime bindings (see `prioq_std_rs`),
//! which plug their wake primitive in through [`AvailabilitySignal`].

extern crate alloc;
#[cfg(test)]
extern crate std;

/// Priority bucket storage.
pub mod collections;
/// Counters, signals and lifecycle primitives coordinating producers and consumers.
pub mod concurrent;
/// Error types.
pub mod error;
/// Timeout values accepted by waiting operations.
pub mod timing;
/// Outcomes reported by wait adapters.
pub mod wait;

pub use collections::{BTreeBucketStore, BucketStore};
pub use concurrent::{AddingLifecycle, AddingTicket, AvailabilitySignal, CapacityGate};
pub use error::QueueError;
pub use timing::WaitTimeout;
pub use wait::WaitOutcome;
