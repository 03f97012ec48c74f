//! Canonical gamepad state with per-channel validity and change tracking.

use crate::TOTAL_AXIS_COUNT;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// What a single decode pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// The button set differs from before the decode
    pub buttons: bool,
    /// Bit `i` set when channel `i` took a new value
    pub axes: u64,
}

impl ChangeSet {
    pub const NONE: ChangeSet = ChangeSet {
        buttons: false,
        axes: 0,
    };

    pub fn is_empty(&self) -> bool {
        !self.buttons && self.axes == 0
    }

    pub fn merge(&mut self, other: ChangeSet) {
        self.buttons |= other.buttons;
        self.axes |= other.axes;
    }

    /// Whether this change may wake the consumer under `notify_mask`.
    pub fn raises_event(&self, notify_mask: u64) -> bool {
        self.buttons || self.axes & notify_mask != 0
    }
}

/// Decoded buttons and channels of one connection.
///
/// Only decoders write `buttons` and `axis`. `changed_mask` accumulates until
/// the consumer drains it; `valid_mask` only grows while the connection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalState {
    buttons: u32,
    axis: [i32; TOTAL_AXIS_COUNT],
    valid_mask: u64,
    changed_mask: u64,
    notify_mask: u64,
}

impl Default for CanonicalState {
    fn default() -> Self {
        Self::new(0x3FF)
    }
}

impl CanonicalState {
    pub fn new(notify_mask: u64) -> Self {
        Self {
            buttons: 0,
            axis: [0; TOTAL_AXIS_COUNT],
            valid_mask: 0,
            changed_mask: 0,
            notify_mask,
        }
    }

    pub fn buttons(&self) -> u32 {
        self.buttons
    }

    /// Logical button `id` (1-based) is held.
    pub fn is_pressed(&self, id: u32) -> bool {
        match id.checked_sub(1) {
            Some(bit) if bit < 32 => self.buttons & (1 << bit) != 0,
            _ => false,
        }
    }

    pub fn axis(&self, index: usize) -> Option<i32> {
        self.axis.get(index).copied()
    }

    pub fn axes(&self) -> &[i32; TOTAL_AXIS_COUNT] {
        &self.axis
    }

    pub fn valid_mask(&self) -> u64 {
        self.valid_mask
    }

    pub fn changed_mask(&self) -> u64 {
        self.changed_mask
    }

    pub fn notify_mask(&self) -> u64 {
        self.notify_mask
    }

    pub fn set_notify_mask(&mut self, mask: u64) {
        self.notify_mask = mask;
    }

    /// Replace the whole button set. Returns whether it differed.
    pub fn update_buttons(&mut self, value: u32) -> bool {
        if self.buttons == value {
            return false;
        }
        self.buttons = value;
        true
    }

    /// Set or clear one button bit (0-based). Out-of-range bits are ignored.
    pub fn update_button_bit(&mut self, bit: u32, pressed: bool) -> bool {
        let Some(flag) = 1u32.checked_shl(bit) else {
            return false;
        };
        let value = if pressed {
            self.buttons | flag
        } else {
            self.buttons & !flag
        };
        self.update_buttons(value)
    }

    /// Store `value` on channel `index`, marking it valid.
    ///
    /// Returns `None` for an index beyond capacity (nothing is touched), or
    /// `Some(changed)` otherwise.
    pub fn update_axis(&mut self, index: usize, value: i32) -> Option<bool> {
        let slot = self.axis.get_mut(index)?;
        let bit = 1u64 << index;
        self.valid_mask |= bit;
        if *slot == value {
            return Some(false);
        }
        *slot = value;
        self.changed_mask |= bit;
        Some(true)
    }

    /// [`update_buttons`](Self::update_buttons) recording into `changes`.
    pub fn apply_buttons(&mut self, value: u32, changes: &mut ChangeSet) {
        if self.update_buttons(value) {
            changes.buttons = true;
        }
    }

    /// [`update_axis`](Self::update_axis) recording into `changes`.
    pub fn apply_axis(&mut self, index: usize, value: i32, changes: &mut ChangeSet) {
        if self.update_axis(index, value) == Some(true) {
            changes.axes |= 1u64 << index;
        }
    }

    /// Snapshot for the consumer, then forget which channels changed.
    pub fn drain(&mut self) -> CanonicalState {
        let snapshot = self.clone();
        self.changed_mask = 0;
        snapshot
    }

    /// Drop validity and change tracking (device gone). Values are kept.
    pub fn clear_masks(&mut self) {
        self.valid_mask = 0;
        self.changed_mask = 0;
    }

    /// Fresh state for a new claim.
    pub fn reset(&mut self, notify_mask: u64) {
        *self = CanonicalState::new(notify_mask);
    }
}

impl Serialize for CanonicalState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CanonicalState", 5)?;
        s.serialize_field("buttons", &self.buttons)?;
        s.serialize_field("axis", &self.axis[..])?;
        s.serialize_field("valid_mask", &self.valid_mask)?;
        s.serialize_field("changed_mask", &self.changed_mask)?;
        s.serialize_field("notify_mask", &self.notify_mask)?;
        s.end()
    }
}
