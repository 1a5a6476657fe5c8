//! Gamepad polling with a debounced event stream on top.
//!
//! The crate turns raw per-frame controller snapshots into `down`, `hold`,
//! `up`, `long_press` and `repeat` events and answers "is this control
//! active right now" queries against human-readable control names.
//!
//! ```text
//! ControllerSource ──► InputStateMachine ──► EventBus ──► listeners
//!  (raw slots)          (edges + timers)     (topics)
//! ```

pub mod config;
pub mod controller;
pub mod events;
pub mod mapping;

pub use config::{ConfigError, InputConfig, ThresholdPolicy};
pub use controller::{
    Clock, ControllerError, ControllerSlot, ControllerSource, DeltaValue, GilrsSource,
    InputStateMachine, InputValue, ManualClock, PlayerSelector, SystemClock, VirtualControllers,
    MAX_PLAYERS,
};
pub use events::{ControlKey, EventBus, EventKind, InputEvent, SubscriptionId};
pub use mapping::{ControlMapping, MappingTable};
