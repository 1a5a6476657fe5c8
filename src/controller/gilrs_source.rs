//! [`ControllerSource`] backed by [`gilrs`].
//!
//! Pads are laid out in the standard gamepad order (17 buttons, 4 axes) so
//! the built-in name presets line up with real hardware. gilrs reports
//! stick Y as positive-up; the standard layout is positive-down, so Y axes
//! are flipped.

use gilrs::{Axis, Button, EventType, Gamepad, Gilrs};
use tracing::{debug, error, info, trace, warn};

use super::slot::{ControllerSlot, ControllerSource, MAX_PLAYERS};
use super::ControllerError;

const STANDARD_BUTTONS: [Button; 17] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
    Button::Mode,
];

const STANDARD_AXES: [Axis; 4] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
];

pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn new() -> Result<Self, ControllerError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => g,
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(ControllerError::InitializationError(e.to_string()));
            }
        };

        let pads: Vec<_> = gilrs.gamepads().collect();
        if pads.is_empty() {
            warn!("No gamepad connected yet, waiting for hot-plug");
        }
        for (id, gamepad) in pads {
            info!("  [{}] {} ({:?})", id, gamepad.name(), gamepad.power_info());
        }

        Ok(Self { gilrs })
    }
}

impl ControllerSource for GilrsSource {
    fn poll(&mut self) -> Vec<Option<ControllerSlot>> {
        // gilrs only refreshes cached pad state while its queue is drained.
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::Connected => info!("Controller {} connected", event.id),
                EventType::Disconnected => warn!("Controller {} disconnected", event.id),
                other => trace!("gilrs event from {}: {:?}", event.id, other),
            }
        }

        let mut slots = vec![None; MAX_PLAYERS];
        for (id, gamepad) in self.gilrs.gamepads() {
            let player = usize::from(id);
            match slots.get_mut(player) {
                Some(slot) => *slot = Some(read_slot(&gamepad)),
                None => debug!("Ignoring controller {} beyond player slots", id),
            }
        }
        slots
    }
}

fn read_slot(gamepad: &Gamepad<'_>) -> ControllerSlot {
    let buttons = STANDARD_BUTTONS
        .iter()
        .map(|&button| gamepad.button_data(button).map_or(0.0, |data| data.value()))
        .collect();
    let axes = STANDARD_AXES
        .iter()
        .map(|&axis| {
            let value = gamepad.value(axis);
            match axis {
                Axis::LeftStickY | Axis::RightStickY => -value,
                _ => value,
            }
        })
        .collect();

    ControllerSlot {
        connected: gamepad.is_connected(),
        buttons,
        axes,
    }
}
