mod wait_outcome;

pub use wait_outcome::WaitOutcome;
