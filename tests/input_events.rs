use padwatch::{
    ControlKey, EventKind, InputConfig, InputEvent, InputStateMachine, InputValue, ManualClock,
    PlayerSelector, VirtualControllers,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Rig {
    input: InputStateMachine<VirtualControllers>,
    pads: VirtualControllers,
    clock: ManualClock,
    events: Rc<RefCell<Vec<(String, InputEvent)>>>,
}

impl Rig {
    fn new(config: InputConfig) -> Self {
        let pads = VirtualControllers::new();
        let clock = ManualClock::new();
        let input = InputStateMachine::new(pads.clone(), config).with_clock(clock.clone());
        Self {
            input,
            pads,
            clock,
            events: Rc::default(),
        }
    }

    fn listen(&mut self, topic: &'static str) {
        let events = Rc::clone(&self.events);
        self.input
            .subscribe(topic, move |event| events.borrow_mut().push((topic.to_string(), *event)));
    }

    fn count(&self, topic: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(t, _)| t == topic)
            .count()
    }

    /// Tick every `step_ms` for `total_ms`.
    fn hold_for(&mut self, total_ms: u64, step_ms: u64) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            self.clock.advance_ms(step_ms);
            self.input.update();
            elapsed += step_ms;
        }
    }
}

#[test]
fn button_press_emits_single_down_then_holds() {
    let mut rig = Rig::new(InputConfig::default());
    rig.listen("down");
    rig.listen("down:button_0");
    rig.listen("hold");
    rig.pads.connect(0, 17, 4);

    rig.input.update();
    rig.pads.press(0, 0);
    rig.input.update();
    assert_eq!(rig.count("down"), 1);
    assert_eq!(rig.count("down:button_0"), 1);

    for _ in 0..4 {
        rig.input.update();
    }
    assert_eq!(rig.count("down"), 1);
    assert_eq!(rig.count("hold"), 4);
}

#[test]
fn long_press_fires_once_over_fifty_ms() {
    let mut rig = Rig::new(InputConfig {
        longpress_threshold_ms: 10,
        ..Default::default()
    });
    rig.listen("long_press");
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    rig.pads.press(0, 0);
    rig.input.update();
    rig.hold_for(50, 10);

    assert_eq!(rig.count("long_press"), 1);
}

#[test]
fn repeat_fires_while_held() {
    let mut rig = Rig::new(InputConfig {
        repeat_threshold_ms: 10,
        repeat_rate_ms: 20,
        ..Default::default()
    });
    rig.listen("repeat");
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    rig.pads.press(0, 0);
    rig.input.update();
    rig.clock.advance_ms(10);
    rig.input.update();
    assert_eq!(rig.count("repeat"), 0);

    rig.hold_for(90, 10);
    // Fires at 20ms, then every 30ms (first tick strictly past the rate).
    assert_eq!(rig.count("repeat"), 3);
}

#[test]
fn small_axis_movement_is_ignored() {
    let mut rig = Rig::new(InputConfig::default());
    rig.listen("down");
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    rig.pads.set_axis(0, 0, 0.05);
    rig.input.update();
    rig.input.update();
    assert_eq!(rig.count("down"), 0);

    rig.pads.set_axis(0, 0, 0.5);
    rig.input.update();
    rig.input.update();
    assert_eq!(rig.count("down"), 1);
}

#[test]
fn mapping_name_subscriptions_match_raw_keys() {
    let mut rig = Rig::new(InputConfig::default());
    rig.listen("down:ps4_circle");
    rig.listen("down:button_1");
    rig.listen("up:left_stick_y");
    rig.listen("up:axis_1");
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    rig.pads.press(0, 1);
    rig.pads.set_axis(0, 1, 0.8);
    rig.input.update();
    rig.pads.set_axis(0, 1, 0.0);
    rig.input.update();

    let events = rig.events.borrow();
    let circle: Vec<_> = events.iter().filter(|(t, _)| t == "down:ps4_circle").collect();
    assert_eq!(circle.len(), 1);
    assert_eq!(circle[0].1.control, ControlKey::Button(1));
    drop(events);
    assert_eq!(rig.count("down:button_1"), 1);
    assert_eq!(rig.count("up:left_stick_y"), 1);
    assert_eq!(rig.count("up:axis_1"), 1);
}

#[test]
fn button_held_at_connect_is_reported_after_baseline() {
    let mut rig = Rig::new(InputConfig::default());
    rig.listen("down");
    rig.pads.connect(1, 17, 4);
    rig.pads.press(1, 0);

    rig.input.update();
    assert_eq!(rig.count("down"), 0);

    rig.input.update();
    assert_eq!(rig.count("down"), 1);
    assert_eq!(rig.events.borrow()[0].1.player, 1);
}

#[test]
fn unknown_names_read_as_zero() {
    let mut rig = Rig::new(InputConfig::default());
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    for player in [PlayerSelector::All, PlayerSelector::Player(0), PlayerSelector::Player(3)] {
        assert!(!rig.input.is_down("triangle_button", player));
        assert_eq!(rig.input.value("triangle_button", player), InputValue::Scalar(0.0));
    }
}

#[test]
fn all_kinds_report_in_press_cycle() {
    let mut rig = Rig::new(InputConfig {
        longpress_threshold_ms: 15,
        repeat_threshold_ms: 15,
        repeat_rate_ms: 100,
        ..Default::default()
    });
    for kind in EventKind::ALL {
        let topic: &'static str = kind.as_str();
        rig.listen(topic);
    }
    rig.pads.connect(0, 17, 4);
    rig.input.update();

    rig.pads.press(0, 12);
    rig.input.update();
    rig.hold_for(20, 10);
    rig.pads.release(0, 12);
    rig.input.update();

    let kinds: Vec<EventKind> = rig.events.borrow().iter().map(|(_, e)| e.kind).collect();
    assert_eq!(
        kinds,
        [
            EventKind::Down,
            EventKind::Hold,
            EventKind::Hold,
            EventKind::LongPress,
            EventKind::Repeat,
            EventKind::Up,
        ]
    );
    assert!(!rig.input.is_down("dpad_up", 0));
}
