//! Built-in control name presets.
//!
//! Three layouts share one table and differ only by prefix. Index collisions
//! across presets are expected: `ps4_x` and `xbox_a` are both button 0.

use super::ControlMapping::{self, Axis, Button, Stick};

pub(super) const PS4: &[(&str, ControlMapping)] = &[
    ("ps4_x", Button(0)),
    ("ps4_circle", Button(1)),
    ("ps4_square", Button(2)),
    ("ps4_triangle", Button(3)),
    ("ps4_l1", Button(4)),
    ("ps4_r1", Button(5)),
    ("ps4_l2", Button(6)),
    ("ps4_r2", Button(7)),
    ("ps4_share", Button(8)),
    ("ps4_options", Button(9)),
    ("ps4_left_stick_in", Button(10)),
    ("ps4_right_stick_in", Button(11)),
    ("ps4_dpad_up", Button(12)),
    ("ps4_dpad_down", Button(13)),
    ("ps4_dpad_left", Button(14)),
    ("ps4_dpad_right", Button(15)),
    ("ps4_ps", Button(16)),
    ("ps4_left_stick_x", Axis(0)),
    ("ps4_left_stick_y", Axis(1)),
    ("ps4_right_stick_x", Axis(2)),
    ("ps4_right_stick_y", Axis(3)),
    ("ps4_left_stick", Stick(0)),
    ("ps4_right_stick", Stick(1)),
];

pub(super) const XBOX: &[(&str, ControlMapping)] = &[
    ("xbox_a", Button(0)),
    ("xbox_b", Button(1)),
    ("xbox_x", Button(2)),
    ("xbox_y", Button(3)),
    ("xbox_lb", Button(4)),
    ("xbox_rb", Button(5)),
    ("xbox_lt", Button(6)),
    ("xbox_rt", Button(7)),
    ("xbox_back", Button(8)),
    ("xbox_start", Button(9)),
    ("xbox_left_stick_in", Button(10)),
    ("xbox_right_stick_in", Button(11)),
    ("xbox_dpad_up", Button(12)),
    ("xbox_dpad_down", Button(13)),
    ("xbox_dpad_left", Button(14)),
    ("xbox_dpad_right", Button(15)),
    ("xbox_left_stick_x", Axis(0)),
    ("xbox_left_stick_y", Axis(1)),
    ("xbox_right_stick_x", Axis(2)),
    ("xbox_right_stick_y", Axis(3)),
    ("xbox_left_stick", Stick(0)),
    ("xbox_right_stick", Stick(1)),
];

/// Position-based names for pads without a known vendor layout.
pub(super) const GENERIC: &[(&str, ControlMapping)] = &[
    ("rc_bottom", Button(0)),
    ("rc_right", Button(1)),
    ("rc_left", Button(2)),
    ("rc_top", Button(3)),
    ("l1", Button(4)),
    ("r1", Button(5)),
    ("l2", Button(6)),
    ("r2", Button(7)),
    ("center_left", Button(8)),
    ("center_right", Button(9)),
    ("left_stick_in", Button(10)),
    ("right_stick_in", Button(11)),
    ("dpad_up", Button(12)),
    ("dpad_down", Button(13)),
    ("dpad_left", Button(14)),
    ("dpad_right", Button(15)),
    ("center_center", Button(16)),
    ("left_stick_x", Axis(0)),
    ("left_stick_y", Axis(1)),
    ("right_stick_x", Axis(2)),
    ("right_stick_y", Axis(3)),
    ("left_stick", Stick(0)),
    ("right_stick", Stick(1)),
];
