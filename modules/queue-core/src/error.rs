mod queue_error;

pub use queue_error::QueueError;
