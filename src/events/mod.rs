//! Event types published by the input state machine and the topic bus that
//! carries them.
//!
//! Every event goes out twice: under its bare kind (`down`) and under the
//! compound `<kind>:<control key>` topic (`down:button_0`).

mod bus;
mod topic;

pub use bus::{EventBus, SubscriptionId};
pub use topic::resolve_topic;

use std::fmt::{self, Display};

/// The five event kinds derived from raw controller samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Control crossed from inactive to active.
    Down,
    /// Control stayed active across a tick.
    Hold,
    /// Control crossed from active to inactive.
    Up,
    /// Control has been held past the long-press threshold. Once per hold.
    LongPress,
    /// Control has been held past the repeat threshold, then every repeat rate.
    Repeat,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Down,
        EventKind::Hold,
        EventKind::Up,
        EventKind::LongPress,
        EventKind::Repeat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Down => "down",
            EventKind::Hold => "hold",
            EventKind::Up => "up",
            EventKind::LongPress => "long_press",
            EventKind::Repeat => "repeat",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw identity of a control, independent of any mapping name.
///
/// Displays as `button_<i>` / `axis_<i>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlKey {
    Button(usize),
    Axis(usize),
}

impl Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKey::Button(index) => write!(f, "button_{index}"),
            ControlKey::Axis(index) => write!(f, "axis_{index}"),
        }
    }
}

/// Payload delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub player: usize,
    pub control: ControlKey,
    /// `0.0..=1.0` for buttons, signed `-1.0..=1.0` for axes.
    pub value: f32,
}

impl InputEvent {
    /// The compound topic this event is published under, e.g. `up:axis_2`.
    pub fn topic(&self) -> String {
        format!("{}:{}", self.kind, self.control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = EventKind::ALL.iter().map(EventKind::as_str).collect();
        assert_eq!(names, ["down", "hold", "up", "long_press", "repeat"]);
    }

    #[test]
    fn test_event_topic() {
        let event = InputEvent {
            kind: EventKind::LongPress,
            player: 2,
            control: ControlKey::Axis(3),
            value: -0.75,
        };
        assert_eq!(event.topic(), "long_press:axis_3");
        assert_eq!(ControlKey::Button(12).to_string(), "button_12");
    }
}
