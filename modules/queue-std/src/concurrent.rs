mod tokio_availability_signal;

pub use tokio_availability_signal::TokioAvailabilitySignal;
