use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use tracing::{debug, info, trace};

use super::clock::{Clock, SystemClock};
use super::hold::HoldTimers;
use super::slot::{ControllerSlot, ControllerSource, MAX_PLAYERS};
use crate::config::InputConfig;
use crate::events::{resolve_topic, ControlKey, EventBus, EventKind, InputEvent, SubscriptionId};
use crate::mapping::{ControlMapping, MappingTable};

/// Which player(s) a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerSelector {
    /// Every player slot in ascending order.
    #[default]
    All,
    Player(usize),
}

impl From<usize> for PlayerSelector {
    fn from(player: usize) -> Self {
        PlayerSelector::Player(player)
    }
}

/// Result of [`InputStateMachine::value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    /// Button (`0.0..=1.0`) or axis (`-1.0..=1.0`) value.
    Scalar(f32),
    Stick(Vec2),
}

impl InputValue {
    pub fn scalar(self) -> Option<f32> {
        match self {
            InputValue::Scalar(value) => Some(value),
            InputValue::Stick(_) => None,
        }
    }

    pub fn stick(self) -> Option<Vec2> {
        match self {
            InputValue::Stick(value) => Some(value),
            InputValue::Scalar(_) => None,
        }
    }
}

/// Marker left in a player's delta map for a control that changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaValue {
    /// `true` on the tick a button went down, `false` on the tick it came up.
    Button(bool),
    /// Signed axis value while deflected.
    Axis(f32),
}

#[derive(Debug, Clone, Default)]
struct Snapshot {
    buttons: Vec<f32>,
    axes: Vec<f32>,
}

impl Snapshot {
    fn zeroed(slot: &ControllerSlot) -> Self {
        Self {
            buttons: vec![0.0; slot.buttons.len()],
            axes: vec![0.0; slot.axes.len()],
        }
    }

    fn button(&self, index: usize) -> f32 {
        self.buttons.get(index).copied().unwrap_or(0.0)
    }

    fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}

impl From<ControllerSlot> for Snapshot {
    fn from(slot: ControllerSlot) -> Self {
        Self {
            buttons: slot.buttons,
            axes: slot.axes,
        }
    }
}

#[derive(Debug, Default)]
struct PlayerState {
    snapshot: Option<Snapshot>,
    delta: HashMap<ControlKey, DeltaValue>,
    timers: HoldTimers,
}

/// Turns raw controller samples into `down` / `hold` / `up` / `long_press` /
/// `repeat` events and answers point-in-time queries by control name.
///
/// Call [`update`](Self::update) once per frame. Timers only advance inside
/// `update`, so event timing is fully determined by when it is called and
/// what the [`Clock`] reports.
///
/// # Examples
///
/// ```rust
/// use padwatch::{InputConfig, InputStateMachine, ManualClock, VirtualControllers};
///
/// let pads = VirtualControllers::new();
/// let clock = ManualClock::new();
/// let mut input = InputStateMachine::new(pads.clone(), InputConfig::default())
///     .with_clock(clock.clone());
///
/// pads.connect(0, 17, 4);
/// input.update(); // first sight of player 0 records a zero baseline
///
/// input.subscribe("down:ps4_circle", |event| println!("{event:?}"));
/// pads.press(0, 1);
/// input.update();
/// assert!(input.is_down("ps4_circle", 0));
/// ```
pub struct InputStateMachine<S> {
    source: S,
    config: InputConfig,
    mappings: Arc<MappingTable>,
    clock: Box<dyn Clock>,
    bus: EventBus,
    players: [PlayerState; MAX_PLAYERS],
}

impl<S: ControllerSource> InputStateMachine<S> {
    pub fn new(source: S, config: InputConfig) -> Self {
        debug!("Creating input state machine with config: {:?}", config);
        Self {
            source,
            config,
            mappings: MappingTable::builtin(),
            clock: Box::new(SystemClock),
            bus: EventBus::new(),
            players: Default::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_mappings(mut self, mappings: Arc<MappingTable>) -> Self {
        self.mappings = mappings;
        self
    }

    /// Poll the source once and emit events for every change since the last
    /// call.
    ///
    /// Players are processed in ascending order, buttons before axes, each in
    /// ascending index order. An absent or disconnected pad is skipped and
    /// its stored state kept. A pad seen for the first time only records an
    /// all-zero baseline, so anything already held at connect time is
    /// reported as `down` on the next tick.
    pub fn update(&mut self) {
        let slots = self.source.poll();
        let now = self.clock.now();
        trace!("Input tick over {} slots", slots.len());

        for (player, slot) in slots.into_iter().take(MAX_PLAYERS).enumerate() {
            let Some(slot) = slot.filter(|slot| slot.connected) else {
                continue;
            };

            let Some(previous) = self.players[player].snapshot.take() else {
                info!(
                    "Player {} connected with {} buttons and {} axes",
                    player,
                    slot.buttons.len(),
                    slot.axes.len()
                );
                self.players[player].snapshot = Some(Snapshot::zeroed(&slot));
                continue;
            };

            for (index, &value) in slot.buttons.iter().enumerate() {
                let key = ControlKey::Button(index);
                self.update_control(player, key, value, previous.button(index), now);
            }
            for (index, &value) in slot.axes.iter().enumerate() {
                let key = ControlKey::Axis(index);
                self.update_control(player, key, value, previous.axis(index), now);
            }

            self.players[player].snapshot = Some(Snapshot::from(slot));
        }
    }

    /// Whether the named control is active.
    ///
    /// Buttons and axes are compared against their thresholds. A stick is
    /// "down" whenever both its axes resolve and the player has state.
    /// With [`PlayerSelector::All`] any player with recorded state counts.
    pub fn is_down(&self, name: &str, player: impl Into<PlayerSelector>) -> bool {
        let player = player.into();
        match self.mappings.get(name) {
            Some(ControlMapping::Button(index)) => self
                .snapshots(player)
                .any(|snapshot| self.is_active(ControlKey::Button(index), snapshot.button(index))),
            Some(ControlMapping::Axis(index)) => self
                .snapshots(player)
                .any(|snapshot| self.is_active(ControlKey::Axis(index), snapshot.axis(index))),
            Some(ControlMapping::Stick(_)) => {
                self.mappings.stick_axes(name).is_some() && self.snapshots(player).next().is_some()
            }
            None => false,
        }
    }

    /// Latest raw value of the named control, read from the selected player
    /// (or the first player with state for [`PlayerSelector::All`]).
    /// Anything unresolved reads as zero.
    pub fn value(&self, name: &str, player: impl Into<PlayerSelector>) -> InputValue {
        let player = player.into();
        let snapshot = self.snapshots(player).next();
        match self.mappings.get(name) {
            Some(ControlMapping::Button(index)) => {
                InputValue::Scalar(snapshot.map_or(0.0, |s| s.button(index)))
            }
            Some(ControlMapping::Axis(index)) => {
                InputValue::Scalar(snapshot.map_or(0.0, |s| s.axis(index)))
            }
            Some(ControlMapping::Stick(_)) => InputValue::Stick(self.stick(name, player)),
            None => InputValue::Scalar(0.0),
        }
    }

    /// The `<name>_x` / `<name>_y` axis pair as a vector, zero if either
    /// companion is missing.
    pub fn stick(&self, name: &str, player: impl Into<PlayerSelector>) -> Vec2 {
        let Some((x, y)) = self.mappings.stick_axes(name) else {
            return Vec2::ZERO;
        };
        self.snapshots(player.into())
            .next()
            .map_or(Vec2::ZERO, |s| Vec2::new(s.axis(x), s.axis(y)))
    }

    /// Controls that changed for `player` on recent ticks.
    pub fn delta(&self, player: usize) -> Option<&HashMap<ControlKey, DeltaValue>> {
        self.players.get(player).map(|state| &state.delta)
    }

    /// Whether `player` has been seen connected at least once.
    pub fn has_state(&self, player: usize) -> bool {
        self.players
            .get(player)
            .is_some_and(|state| state.snapshot.is_some())
    }

    /// Subscribe to a bare kind (`down`) or compound topic (`down:button_1`).
    /// Mapping names in compound topics are rewritten, so `down:ps4_circle`
    /// is the same subscription as `down:button_1`.
    pub fn subscribe<F>(&mut self, topic: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let topic = self.resolve(topic);
        self.bus.subscribe(topic, callback)
    }

    /// Like [`subscribe`](Self::subscribe), but the listener is dropped after
    /// its first event.
    pub fn once<F>(&mut self, topic: &str, callback: F) -> SubscriptionId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let topic = self.resolve(topic);
        self.bus.once(topic, callback)
    }

    pub fn unsubscribe(&mut self, topic: &str, id: SubscriptionId) -> bool {
        let topic = self.resolve(topic);
        self.bus.unsubscribe(&topic, id)
    }

    /// Drop every listener on `topic`.
    pub fn clear_listeners(&mut self, topic: &str) -> usize {
        let topic = self.resolve(topic);
        self.bus.clear(&topic)
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn update_control(
        &mut self,
        player: usize,
        key: ControlKey,
        current: f32,
        previous: f32,
        now: Instant,
    ) {
        let active = self.is_active(key, current);
        let was_active = self.is_active(key, previous);

        match (active, was_active) {
            (true, false) => {
                let state = &mut self.players[player];
                state.timers.start(key, now);
                state.delta.insert(key, active_delta(key, current));
                self.emit(EventKind::Down, player, key, current);
            }
            (true, true) => {
                let longpress = self.config.longpress_threshold();
                let repeat_threshold = self.config.repeat_threshold();
                let repeat_rate = self.config.repeat_rate();

                let state = &mut self.players[player];
                state.timers.start(key, now);
                match key {
                    ControlKey::Button(_) => {
                        state.delta.remove(&key);
                    }
                    ControlKey::Axis(_) => {
                        state.delta.insert(key, DeltaValue::Axis(current));
                    }
                }
                let long_press = state.timers.take_long_press(key, now, longpress);
                let repeat = state
                    .timers
                    .take_repeat(key, now, repeat_threshold, repeat_rate);

                self.emit(EventKind::Hold, player, key, current);
                if long_press {
                    self.emit(EventKind::LongPress, player, key, current);
                }
                if repeat {
                    self.emit(EventKind::Repeat, player, key, current);
                }
            }
            (false, true) => {
                let state = &mut self.players[player];
                state.timers.clear(key);
                match key {
                    ControlKey::Button(_) => {
                        state.delta.insert(key, DeltaValue::Button(false));
                    }
                    // An axis that comes to rest leaves no marker behind.
                    ControlKey::Axis(_) => {
                        state.delta.remove(&key);
                    }
                }
                self.emit(EventKind::Up, player, key, current);
            }
            (false, false) => {
                let state = &mut self.players[player];
                match key {
                    ControlKey::Button(_) => {
                        state.delta.remove(&key);
                    }
                    ControlKey::Axis(_) => {
                        if current == 0.0 {
                            state.delta.remove(&key);
                        }
                    }
                }
            }
        }
    }

    fn emit(&mut self, kind: EventKind, player: usize, control: ControlKey, value: f32) {
        let event = InputEvent {
            kind,
            player,
            control,
            value,
        };
        debug!("Player {} {} {} ({:.3})", player, kind, control, value);
        self.bus.publish(kind.as_str(), &event);
        self.bus.publish(&event.topic(), &event);
    }

    fn is_active(&self, key: ControlKey, value: f32) -> bool {
        let policy = self.config.threshold_policy;
        match key {
            ControlKey::Button(_) => policy.is_active(value, self.config.button_threshold),
            ControlKey::Axis(_) => policy.is_active(value.abs(), self.config.axis_threshold),
        }
    }

    fn snapshots(&self, player: PlayerSelector) -> impl Iterator<Item = &Snapshot> + '_ {
        let selected: &[PlayerState] = match player {
            PlayerSelector::All => &self.players,
            PlayerSelector::Player(index) => self
                .players
                .get(index..=index)
                .unwrap_or(&[]),
        };
        selected.iter().filter_map(|state| state.snapshot.as_ref())
    }

    fn resolve(&self, topic: &str) -> String {
        let resolved = resolve_topic(&self.mappings, topic);
        if let Cow::Owned(rewritten) = &resolved {
            debug!("Subscription topic {} resolved to {}", topic, rewritten);
        }
        resolved.into_owned()
    }
}

fn active_delta(key: ControlKey, value: f32) -> DeltaValue {
    match key {
        ControlKey::Button(_) => DeltaValue::Button(true),
        ControlKey::Axis(_) => DeltaValue::Axis(value),
    }
}
