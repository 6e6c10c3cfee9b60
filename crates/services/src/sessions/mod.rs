mod controller;
mod state;
mod ticket;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{SessionController, StateChange};
pub use state::{Phase, SessionState};
pub use ticket::{Operation, Ticket};
