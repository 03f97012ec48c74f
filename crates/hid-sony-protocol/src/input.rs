//! Bluetooth input report decoding.
//!
//! Two framings arrive on the interrupt channel, selected by the first byte:
//!
//! * `0x01`: the plain HID report. DualShock 3 and Move have fixed
//!   layouts; anything else is copied byte-for-byte onto channels.
//! * `0x11`: the DualShock 4 extended report. Two header bytes are dropped
//!   and the button bytes are repacked before the same per-channel copy.
//!
//! Decoding never reads past the buffer. A report shorter than its layout
//! leaves the state untouched and returns an empty [`ChangeSet`].

use crate::ids::report_ids;
use openpad_gamepad_types::{CanonicalState, ChangeSet, ControllerFamily, TOTAL_AXIS_COUNT};
use openpad_hid_common::ReportReader;
use tracing::trace;

/// Minimum length of a DualShock 3 plain report.
pub const PS3_REPORT_MIN_LEN: usize = 20;
/// Minimum length of a Move plain report.
pub const PS3_MOTION_REPORT_MIN_LEN: usize = 5;
/// Minimum length of a DualShock 4 extended report.
pub const PS4_EXTENDED_MIN_LEN: usize = 12;

/// Header bytes ahead of the DualShock 4 extended payload.
const EXTENDED_HEADER_LEN: usize = 2;
/// Channel that carries the D-pad hat after repacking.
pub const PS4_DPAD_CHANNEL: usize = 10;
/// Move payload bytes start here and land on channel 0.
const PS3_MOTION_CHANNEL_OFFSET: usize = 5;

/// Decode one Bluetooth block for `family`, dispatching on its report ID.
pub fn decode_bluetooth_report(
    family: ControllerFamily,
    data: &[u8],
    state: &mut CanonicalState,
) -> ChangeSet {
    match data.first() {
        Some(&report_ids::BT_INPUT) => decode_plain_report(family, data, state),
        Some(&report_ids::BT_EXTENDED_INPUT) => decode_extended_report(data, state),
        id => {
            trace!(?id, len = data.len(), "bluetooth block without input report id");
            ChangeSet::NONE
        }
    }
}

/// Decode a `0x01` report. Length is clamped to the channel capacity.
pub fn decode_plain_report(
    family: ControllerFamily,
    data: &[u8],
    state: &mut CanonicalState,
) -> ChangeSet {
    let data = data.get(..TOTAL_AXIS_COUNT).unwrap_or(data);
    let r = ReportReader::new(data);
    let mut changes = ChangeSet::NONE;

    match family {
        ControllerFamily::Ps3 => {
            if r.len() < PS3_REPORT_MIN_LEN {
                trace!(len = r.len(), "short DualShock 3 report");
                return ChangeSet::NONE;
            }
            let Some(buttons) = r.u24_le_at(2) else {
                return ChangeSet::NONE;
            };
            state.apply_buttons(buttons, &mut changes);
            // Left stick X/Y, right stick X on 0..=2, right stick Y on 5,
            // analog L2/R2 on 3/4.
            for (channel, offset) in [(0, 6), (1, 7), (2, 8), (5, 9), (3, 18), (4, 19)] {
                if let Some(v) = r.u8_at(offset) {
                    state.apply_axis(channel, i32::from(v), &mut changes);
                }
            }
            copy_channels(data, 10, 0, state, &mut changes);
        }
        ControllerFamily::Ps3Motion => {
            if r.len() < PS3_MOTION_REPORT_MIN_LEN {
                trace!(len = r.len(), "short Move report");
                return ChangeSet::NONE;
            }
            let Some(buttons) = r.u24_le_at(1) else {
                return ChangeSet::NONE;
            };
            state.apply_buttons(buttons, &mut changes);
            copy_channels(
                data,
                PS3_MOTION_CHANNEL_OFFSET,
                PS3_MOTION_CHANNEL_OFFSET,
                state,
                &mut changes,
            );
        }
        _ => copy_channels(data, 0, 0, state, &mut changes),
    }
    changes
}

/// DualShock 4 extended payload with its button bytes repacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepackedReport {
    bytes: [u8; TOTAL_AXIS_COUNT],
    len: usize,
    /// D-pad hat, 0..=7 clockwise from north, 8 = released
    pub dpad: u8,
    /// Square, cross, circle, triangle in bits 0..=3
    pub face: u8,
    /// L1, R1, L2, R2, share, options, L3, R3
    pub shoulder: u8,
    pub ps: bool,
    pub touchpad_click: bool,
}

impl RepackedReport {
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&self.bytes)
    }
}

/// Drop the two-byte header of a `0x11` report and repack the buttons.
///
/// Payload layout (offsets after the header): 1..=4 sticks, 5 face nibble
/// and D-pad nibble, 6 shoulder/stick buttons, 7 counter with PS (bit 0)
/// and touch-pad click (bit 1), 8/9 analog triggers, 10.. timestamp and
/// motion data. After repacking, byte 5 holds the face nibble, byte 7 the
/// PS bit and byte 10 the D-pad.
pub fn repack_extended_report(data: &[u8]) -> Option<RepackedReport> {
    if data.len() < PS4_EXTENDED_MIN_LEN || data.first() != Some(&report_ids::BT_EXTENDED_INPUT) {
        return None;
    }
    let payload = data.get(EXTENDED_HEADER_LEN..)?;
    let r = ReportReader::new(payload);
    let b5 = r.u8_at(5)?;
    let b6 = r.u8_at(6)?;
    let b7 = r.u8_at(7)?;

    let mut bytes = [0u8; TOTAL_AXIS_COUNT];
    let copy_len = payload.len().min(TOTAL_AXIS_COUNT);
    for (dst, src) in bytes.iter_mut().zip(payload.iter()).take(copy_len) {
        *dst = *src;
    }

    let dpad = b5 & 0x0F;
    let face = b5 >> 4;
    let ps = b7 & 0x01 != 0;
    let touchpad_click = (b7 >> 1) & 0x01 != 0;

    bytes[5] = face;
    bytes[7] = u8::from(ps);
    bytes[PS4_DPAD_CHANNEL] = dpad;

    Some(RepackedReport {
        bytes,
        len: copy_len.max(PS4_DPAD_CHANNEL + 1),
        dpad,
        face,
        shoulder: b6,
        ps,
        touchpad_click,
    })
}

/// Canonical button word of a repacked report.
///
/// Bits 0..=3 face, 4..=11 shoulder byte, 12 PS, 13 touch-pad click.
/// This mapping has not been checked against every firmware revision.
pub fn ps4_extended_buttons(report: &RepackedReport) -> u32 {
    u32::from(report.face & 0x0F)
        | (u32::from(report.shoulder) << 4)
        | (u32::from(report.ps) << 12)
        | (u32::from(report.touchpad_click) << 13)
}

/// Decode a DualShock 4 `0x11` report.
pub fn decode_extended_report(data: &[u8], state: &mut CanonicalState) -> ChangeSet {
    let Some(report) = repack_extended_report(data) else {
        trace!(len = data.len(), "short DualShock 4 extended report");
        return ChangeSet::NONE;
    };
    let mut changes = ChangeSet::NONE;
    state.apply_buttons(ps4_extended_buttons(&report), &mut changes);

    let r = ReportReader::new(report.as_bytes());
    for (channel, offset) in [(0, 1), (1, 2), (2, 3), (5, 4), (3, 8), (4, 9)] {
        if let Some(v) = r.u8_at(offset) {
            state.apply_axis(channel, i32::from(v), &mut changes);
        }
    }
    copy_channels(report.as_bytes(), 6, 0, state, &mut changes);
    changes
}

/// Copy `data[from..]` onto channels `i - shift`, one byte per channel.
fn copy_channels(
    data: &[u8],
    from: usize,
    shift: usize,
    state: &mut CanonicalState,
    changes: &mut ChangeSet,
) {
    for (i, value) in data.iter().enumerate().skip(from) {
        state.apply_axis(i - shift, i32::from(*value), changes);
    }
}
