//! Raw input report parsing for the Xbox families.
//!
//! Parsing and applying are separate steps: `parse_*` turns a buffer into a
//! typed report (or `None` when the buffer is too short or the type byte
//! does not match), and `apply` folds a report into a [`CanonicalState`].
//! The wireless 360 receiver multiplexes link, status, chatpad and pad data
//! on one endpoint, so its parser returns a packet enum instead.

use crate::ids::{report_ids, wireless};
use crate::types::ChatpadLedState;
use openpad_gamepad_types::{CanonicalState, ChangeSet};
use openpad_hid_common::ReportReader;

pub const XBOXONE_INPUT_MIN_LEN: usize = 18;
pub const XBOX360_WIRED_INPUT_MIN_LEN: usize = 14;
pub const XBOX360_WIRELESS_INPUT_MIN_LEN: usize = 18;
pub const DUKE_INPUT_MIN_LEN: usize = 20;

/// Offset of the pad block inside a wired 360 report.
const WIRED_PAD_OFFSET: usize = 2;
/// Offset of the pad block inside a wireless 360 input packet.
const WIRELESS_PAD_OFFSET: usize = 6;

/// Wire order LT, RT, LX, LY, RX, RY onto canonical channels.
const XBOXONE_AXIS_ORDER: [usize; 6] = [3, 4, 0, 1, 2, 5];

/// Xbox One GIP input report (type `0x20`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XboxOneInput {
    /// sync, -, menu, view, A, B, X, Y, d-pad up/down/left/right, LB, RB, LS, RS
    pub buttons: u16,
    /// LT, RT, LX, LY, RX, RY as transmitted
    pub raw_axes: [i16; 6],
}

impl XboxOneInput {
    /// Canonical value of wire axis `i`; the two triggers are unsigned.
    pub fn axis_value(&self, i: usize) -> i32 {
        let raw = self.raw_axes.get(i).copied().unwrap_or(0);
        if i < 2 {
            i32::from(raw.cast_unsigned())
        } else {
            i32::from(raw)
        }
    }

    pub fn apply(&self, state: &mut CanonicalState) -> ChangeSet {
        let mut changes = ChangeSet::NONE;
        state.apply_buttons(u32::from(self.buttons), &mut changes);
        for (i, channel) in XBOXONE_AXIS_ORDER.iter().enumerate() {
            state.apply_axis(*channel, self.axis_value(i), &mut changes);
        }
        changes
    }
}

pub fn parse_xboxone_input(data: &[u8]) -> Option<XboxOneInput> {
    if data.len() < XBOXONE_INPUT_MIN_LEN || data.first() != Some(&report_ids::XBOXONE_INPUT) {
        return None;
    }
    let r = ReportReader::new(data);
    let mut raw_axes = [0i16; 6];
    for (i, slot) in raw_axes.iter_mut().enumerate() {
        *slot = r.i16_le_at(6 + 2 * i)?;
    }
    Some(XboxOneInput {
        buttons: r.u16_le_at(4)?,
        raw_axes,
    })
}

/// Pad block shared by the wired 360 report and the wireless input packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xbox360Pad {
    /// d-pad up/down/left/right, start, back, LS, RS, LB, RB, guide, sync, A, B, X, Y
    pub buttons: u16,
    pub lt: u8,
    pub rt: u8,
    /// LX, LY, RX, RY
    pub sticks: [i16; 4],
}

impl Xbox360Pad {
    fn parse_at(r: &ReportReader<'_>, base: usize) -> Option<Self> {
        let mut sticks = [0i16; 4];
        for (i, slot) in sticks.iter_mut().enumerate() {
            *slot = r.i16_le_at(base + 4 + 2 * i)?;
        }
        Some(Self {
            buttons: r.u16_le_at(base)?,
            lt: r.u8_at(base + 2)?,
            rt: r.u8_at(base + 3)?,
            sticks,
        })
    }

    pub fn apply(&self, state: &mut CanonicalState) -> ChangeSet {
        let mut changes = ChangeSet::NONE;
        state.apply_buttons(u32::from(self.buttons), &mut changes);
        for (channel, value) in self.sticks.iter().enumerate() {
            state.apply_axis(channel, i32::from(*value), &mut changes);
        }
        state.apply_axis(4, i32::from(self.lt), &mut changes);
        state.apply_axis(5, i32::from(self.rt), &mut changes);
        changes
    }
}

/// Original Xbox input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DukeInput {
    /// d-pad up/down/left/right, start, back, LS, RS
    pub buttons: u8,
    /// A, B, X, Y, black, white, LT, RT
    pub analog: [u8; 8],
    /// LX, LY, RX, RY
    pub sticks: [i16; 4],
}

impl DukeInput {
    pub fn apply(&self, state: &mut CanonicalState) -> ChangeSet {
        let mut changes = ChangeSet::NONE;
        state.apply_buttons(u32::from(self.buttons), &mut changes);
        for (channel, value) in self.analog.iter().enumerate() {
            state.apply_axis(channel, i32::from(*value), &mut changes);
        }
        for (i, value) in self.sticks.iter().enumerate() {
            state.apply_axis(self.analog.len() + i, i32::from(*value), &mut changes);
        }
        changes
    }
}

pub fn parse_duke_input(data: &[u8]) -> Option<DukeInput> {
    if data.len() < DUKE_INPUT_MIN_LEN || data.get(..2) != Some(&report_ids::XBOX360_INPUT[..]) {
        return None;
    }
    let r = ReportReader::new(data);
    let analog: [u8; 8] = r.slice(4, 8)?.try_into().ok()?;
    let mut sticks = [0i16; 4];
    for (i, slot) in sticks.iter_mut().enumerate() {
        *slot = r.i16_le_at(12 + 2 * i)?;
    }
    Some(DukeInput {
        buttons: r.u8_at(2)?,
        analog,
        sticks,
    })
}

/// Packets arriving on a wired 360 pad's IN endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Xbox360WiredPacket {
    Input(Xbox360Pad),
    /// `03 03 xx`
    RumbleStatus(u8),
    /// `01 03 xx`
    LedStatus(u8),
    Unknown,
}

pub fn parse_360_wired_packet(data: &[u8]) -> Xbox360WiredPacket {
    let r = ReportReader::new(data);
    let header = data.get(..2);
    if header == Some(&report_ids::XBOX360_RUMBLE_STATUS[..]) {
        return r
            .u8_at(2)
            .map_or(Xbox360WiredPacket::Unknown, Xbox360WiredPacket::RumbleStatus);
    }
    if header == Some(&report_ids::XBOX360_LED_STATUS[..]) {
        return r
            .u8_at(2)
            .map_or(Xbox360WiredPacket::Unknown, Xbox360WiredPacket::LedStatus);
    }
    if header == Some(&report_ids::XBOX360_INPUT[..]) && data.len() >= XBOX360_WIRED_INPUT_MIN_LEN
    {
        if let Some(pad) = Xbox360Pad::parse_at(&r, WIRED_PAD_OFFSET) {
            return Xbox360WiredPacket::Input(pad);
        }
    }
    Xbox360WiredPacket::Unknown
}

/// Chatpad sub-report carried in a wireless input packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatpadReport {
    /// Three key status bytes.
    Keys([u8; 3]),
    /// The chatpad lost its session and wants the init packet again.
    InitNeeded,
    LedStatus(ChatpadLedState),
}

/// Packets arriving on the wireless 360 receiver's IN endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Xbox360WirelessPacket {
    /// Controller attach/detach; `controller == 0` means none attached.
    LinkStatus { controller: u8 },
    ControllerStatus(u16),
    EndOfEvents,
    Info,
    ChatpadHandshake,
    Input {
        pad: Option<Xbox360Pad>,
        chatpad: Option<ChatpadReport>,
    },
    Unknown,
}

/// Classify one receiver packet. The tests run in a fixed order; the first
/// that matches wins.
pub fn parse_360_wireless_packet(data: &[u8]) -> Xbox360WirelessPacket {
    let r = ReportReader::new(data);
    let (Some(b0), Some(b1), Some(b3)) = (r.u8_at(0), r.u8_at(1), r.u8_at(3)) else {
        return Xbox360WirelessPacket::Unknown;
    };
    let b4 = r.u8_at(4).unwrap_or(0);

    if b0 == wireless::LINK_STATUS && b3 == wireless::STATUS_MARKER {
        return Xbox360WirelessPacket::LinkStatus { controller: b1 };
    }
    if b1 == 0x00
        && b3 & wireless::CONTROLLER_STATUS_MASK != 0
        && b4 >= wireless::CONTROLLER_STATUS_MIN
    {
        return Xbox360WirelessPacket::ControllerStatus((u16::from(b3) << 8) | u16::from(b4));
    }
    if b1 == 0x00 && b3 == wireless::STATUS_MARKER {
        return Xbox360WirelessPacket::EndOfEvents;
    }
    if b1 == wireless::INFO && b3 == wireless::STATUS_MARKER {
        return Xbox360WirelessPacket::Info;
    }
    if b1 == wireless::CHATPAD_HANDSHAKE {
        return Xbox360WirelessPacket::ChatpadHandshake;
    }
    if b1 & (wireless::CONTROLLER_DATA | wireless::CHATPAD_DATA) != 0 {
        let pad = if b1 & wireless::CONTROLLER_DATA != 0
            && r.u8_at(5) == Some(wireless::CONTROLLER_INPUT)
            && data.len() >= XBOX360_WIRELESS_INPUT_MIN_LEN
        {
            Xbox360Pad::parse_at(&r, WIRELESS_PAD_OFFSET)
        } else {
            None
        };
        let chatpad = if b1 & wireless::CHATPAD_DATA != 0 {
            parse_chatpad(&r)
        } else {
            None
        };
        return Xbox360WirelessPacket::Input { pad, chatpad };
    }
    Xbox360WirelessPacket::Unknown
}

fn parse_chatpad(r: &ReportReader<'_>) -> Option<ChatpadReport> {
    let at = wireless::CHATPAD_OFFSET;
    match (r.u8_at(at)?, r.u8_at(at + 1)) {
        (0x00, _) => {
            let keys: [u8; 3] = r.slice(at + 1, 3)?.try_into().ok()?;
            Some(ChatpadReport::Keys(keys))
        }
        (wireless::STATUS_MARKER, Some(wireless::CHATPAD_INIT_NEEDED)) => {
            Some(ChatpadReport::InitNeeded)
        }
        (wireless::STATUS_MARKER, Some(wireless::CHATPAD_LED_STATUS)) => {
            ChatpadLedState::from_status(r.u8_at(at + 2)?).map(ChatpadReport::LedStatus)
        }
        _ => None,
    }
}
