//! Long-press and repeat timers for controls that are currently active.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::events::ControlKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    pub start: Instant,
    pub fired: bool,
}

impl HoldTimer {
    fn started(now: Instant) -> Self {
        Self {
            start: now,
            fired: false,
        }
    }

    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }
}

/// Both timer tables for one player.
///
/// A key has timers exactly while the control is active: they are started on
/// the down edge and dropped on the up edge.
#[derive(Debug, Clone, Default)]
pub(crate) struct HoldTimers {
    longpress: HashMap<ControlKey, HoldTimer>,
    repeat: HashMap<ControlKey, HoldTimer>,
}

impl HoldTimers {
    /// Start both timers for `key`. Running timers are left alone.
    pub fn start(&mut self, key: ControlKey, now: Instant) {
        self.longpress
            .entry(key)
            .or_insert_with(|| HoldTimer::started(now));
        self.repeat
            .entry(key)
            .or_insert_with(|| HoldTimer::started(now));
    }

    pub fn clear(&mut self, key: ControlKey) {
        self.longpress.remove(&key);
        self.repeat.remove(&key);
    }

    pub fn is_running(&self, key: ControlKey) -> bool {
        self.longpress.contains_key(&key)
    }

    /// True at most once per hold, the first time the hold exceeds `threshold`.
    pub fn take_long_press(&mut self, key: ControlKey, now: Instant, threshold: Duration) -> bool {
        match self.longpress.get_mut(&key) {
            Some(timer) if !timer.fired && timer.elapsed(now) > threshold => {
                timer.fired = true;
                true
            }
            _ => false,
        }
    }

    /// True once the hold exceeds `threshold`, then each time a further
    /// `rate` has passed since the previous repeat.
    pub fn take_repeat(
        &mut self,
        key: ControlKey,
        now: Instant,
        threshold: Duration,
        rate: Duration,
    ) -> bool {
        let Some(timer) = self.repeat.get_mut(&key) else {
            return false;
        };
        let due = if timer.fired { rate } else { threshold };
        if timer.elapsed(now) > due {
            timer.start = now;
            timer.fired = true;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.longpress.len()
    }
}
