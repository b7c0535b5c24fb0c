mod adding_lifecycle;
mod availability_signal;
mod capacity_gate;

pub use adding_lifecycle::{AddingLifecycle, AddingTicket};
pub use availability_signal::AvailabilitySignal;
pub use capacity_gate::CapacityGate;
