//! Controller subsystem: raw polling and the input state machine.
//!
//! ```text
//! ControllerSource ──► InputStateMachine ──► EventBus
//!  (gilrs / virtual)    (edges, hold timers)
//! ```
//!
//! [`slot`] defines the polling capability, [`gilrs_source`] implements it on
//! real hardware, and [`state_machine`] diffs successive samples into events.

pub mod clock;
pub mod gilrs_source;
mod hold;
pub mod slot;
pub mod state_machine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use gilrs_source::GilrsSource;
pub use slot::{ControllerSlot, ControllerSource, VirtualControllers, MAX_PLAYERS};
pub use state_machine::{DeltaValue, InputStateMachine, InputValue, PlayerSelector};

/// Errors raised while bringing up a controller backend.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The platform gamepad backend could not be started.
    #[error("Initialization error: {0}")]
    InitializationError(String),
}
