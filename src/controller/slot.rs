use std::cell::RefCell;
use std::rc::Rc;

/// Number of independently tracked player slots.
pub const MAX_PLAYERS: usize = 4;

/// Raw per-tick sample of one controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerSlot {
    pub connected: bool,
    /// Button values in `0.0..=1.0`.
    pub buttons: Vec<f32>,
    /// Axis values in `-1.0..=1.0`.
    pub axes: Vec<f32>,
}

impl ControllerSlot {
    /// A connected controller with every control at rest.
    pub fn new(buttons: usize, axes: usize) -> Self {
        Self {
            connected: true,
            buttons: vec![0.0; buttons],
            axes: vec![0.0; axes],
        }
    }
}

/// Host capability that samples every controller once per call.
pub trait ControllerSource {
    /// One entry per player slot, `None` where no controller is plugged in.
    /// Entries past [`MAX_PLAYERS`] are ignored.
    fn poll(&mut self) -> Vec<Option<ControllerSlot>>;
}

/// In-memory controllers driven by hand.
///
/// Clones share the same pads, so a test can keep one handle while the state
/// machine owns another.
#[derive(Debug, Clone, Default)]
pub struct VirtualControllers {
    slots: Rc<RefCell<[Option<ControllerSlot>; MAX_PLAYERS]>>,
}

impl VirtualControllers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug a pad with `buttons` buttons and `axes` axes into `player`.
    pub fn connect(&self, player: usize, buttons: usize, axes: usize) {
        self.with_slot(player, |slot| *slot = Some(ControllerSlot::new(buttons, axes)));
    }

    /// Keep the pad in its slot but report it as disconnected.
    pub fn disconnect(&self, player: usize) {
        self.with_pad(player, |pad| pad.connected = false);
    }

    pub fn reconnect(&self, player: usize) {
        self.with_pad(player, |pad| pad.connected = true);
    }

    /// Empty the slot entirely.
    pub fn unplug(&self, player: usize) {
        self.with_slot(player, |slot| *slot = None);
    }

    /// Set a button value, growing the button list if `index` is past its end.
    pub fn set_button(&self, player: usize, index: usize, value: f32) {
        self.with_pad(player, |pad| set_grow(&mut pad.buttons, index, value));
    }

    /// Set an axis value, growing the axis list if `index` is past its end.
    pub fn set_axis(&self, player: usize, index: usize, value: f32) {
        self.with_pad(player, |pad| set_grow(&mut pad.axes, index, value));
    }

    pub fn press(&self, player: usize, index: usize) {
        self.set_button(player, index, 1.0);
    }

    pub fn release(&self, player: usize, index: usize) {
        self.set_button(player, index, 0.0);
    }

    fn with_slot(&self, player: usize, f: impl FnOnce(&mut Option<ControllerSlot>)) {
        if let Some(slot) = self.slots.borrow_mut().get_mut(player) {
            f(slot);
        }
    }

    fn with_pad(&self, player: usize, f: impl FnOnce(&mut ControllerSlot)) {
        self.with_slot(player, |slot| {
            if let Some(pad) = slot.as_mut() {
                f(pad);
            }
        });
    }
}

impl ControllerSource for VirtualControllers {
    fn poll(&mut self) -> Vec<Option<ControllerSlot>> {
        self.slots.borrow().to_vec()
    }
}

fn set_grow(values: &mut Vec<f32>, index: usize, value: f32) {
    if index >= values.len() {
        values.resize(index + 1, 0.0);
    }
    values[index] = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_pads() {
        let pads = VirtualControllers::new();
        let mut source = pads.clone();
        pads.connect(1, 4, 2);
        pads.press(1, 3);
        pads.set_axis(1, 0, -0.5);

        let slots = source.poll();
        assert_eq!(slots.len(), MAX_PLAYERS);
        assert!(slots[0].is_none());
        let pad = slots[1].as_ref().unwrap();
        assert!(pad.connected);
        assert_eq!(pad.buttons, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(pad.axes, [-0.5, 0.0]);
    }

    #[test]
    fn test_disconnect_and_unplug() {
        let pads = VirtualControllers::new();
        let mut source = pads.clone();
        pads.connect(0, 2, 2);
        pads.disconnect(0);
        assert!(!source.poll()[0].as_ref().unwrap().connected);
        pads.reconnect(0);
        assert!(source.poll()[0].as_ref().unwrap().connected);
        pads.unplug(0);
        assert!(source.poll()[0].is_none());
    }

    #[test]
    fn test_out_of_range_player_is_ignored() {
        let pads = VirtualControllers::new();
        pads.connect(MAX_PLAYERS, 2, 2);
        pads.press(7, 0);
        let mut source = pads.clone();
        assert!(source.poll().iter().all(Option::is_none));
    }

    #[test]
    fn test_setting_past_end_grows_pad() {
        let pads = VirtualControllers::new();
        let mut source = pads.clone();
        pads.connect(0, 1, 0);
        pads.set_button(0, 3, 0.4);
        let pad = source.poll()[0].clone().unwrap();
        assert_eq!(pad.buttons, [0.0, 0.0, 0.0, 0.4]);
    }
}
