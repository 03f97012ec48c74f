//! Per-family tables: notify masks, HID axis windows, decoders and encoders.
//!
//! The family enum is closed, so every table is an exhaustive `match`.
//! Nothing here touches a transport; encoders return a [`Command`] that
//! names the route and carries the bytes.

use openpad_gamepad_types::{CanonicalState, ChangeSet, ControllerFamily, FeedbackState};
use openpad_hid_common::{ControlSetup, l2cap};
use openpad_hid_sony_protocol::{self as sony, ids::PS4_OUTPUT_CHANNEL};
use openpad_hid_xbox_protocol::{
    self as xbox, ChatpadLedState, ChatpadReport, Xbox360WiredPacket, Xbox360WirelessPacket,
};
use tracing::trace;

/// How a connection is bound to its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Interface claimed directly; raw interrupt pipes.
    UsbClass,
    /// Generic HID collection; usages arrive from the host parser.
    HidCollection,
    /// L2CAP channels of a paired pad.
    Bluetooth,
}

/// Vendor usage range mapped onto channels after the standard ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisWindow {
    pub usage_page: u16,
    pub first_usage: u16,
    pub count: u16,
    /// Notify mask used while the collection is claimed.
    pub notify_mask: u64,
}

impl AxisWindow {
    /// Channel offset of `usage` within the window.
    pub fn offset_of(&self, page: u16, usage: u16) -> Option<usize> {
        if page != self.usage_page {
            return None;
        }
        let offset = usage.checked_sub(self.first_usage)?;
        (offset < self.count).then_some(usize::from(offset))
    }
}

/// Static facts about a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyProfile {
    pub family: ControllerFamily,
    /// Notify mask for raw and Bluetooth streams.
    pub stream_notify_mask: u64,
    pub hid_window: AxisWindow,
    /// Needs traffic on every timer tick to keep the link up.
    pub keepalive: bool,
}

const SONY_DESKTOP_WINDOW: AxisWindow = AxisWindow {
    usage_page: 0x0001,
    first_usage: 0x0100,
    count: 39,
    notify_mask: u64::MAX,
};

/// Channels 10 and 11 carry the D-pad hat and a report counter.
const PS4_VENDOR_WINDOW: AxisWindow = AxisWindow {
    usage_page: 0xFF00,
    first_usage: 0x21,
    count: 54,
    notify_mask: 0xFFFF_FFFF_FFFF_F3FF,
};

const DEFAULT_WINDOW: AxisWindow = AxisWindow {
    usage_page: 0x0009,
    first_usage: 0x21,
    count: 5,
    notify_mask: 0x3FF,
};

pub fn profile(family: ControllerFamily) -> FamilyProfile {
    let (stream_notify_mask, hid_window, keepalive) = match family {
        ControllerFamily::Ps3 => (0x3FF, SONY_DESKTOP_WINDOW, false),
        ControllerFamily::Ps3Motion => (0x3, SONY_DESKTOP_WINDOW, false),
        ControllerFamily::Ps4 => (0x7FF, PS4_VENDOR_WINDOW, false),
        ControllerFamily::XboxOne => (0x3F, DEFAULT_WINDOW, false),
        ControllerFamily::Xbox360Wireless => (0x3F, DEFAULT_WINDOW, true),
        ControllerFamily::Xbox360Wired => (0x3F, DEFAULT_WINDOW, false),
        ControllerFamily::XboxDuke => (0xFFF, DEFAULT_WINDOW, false),
        ControllerFamily::Unknown => (0x3FF, DEFAULT_WINDOW, false),
    };
    FamilyProfile {
        family,
        stream_notify_mask,
        hid_window,
        keepalive,
    }
}

/// Side effect a raw packet asks the session to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Wireless receiver reported a (dis)connect; 0 means no pad.
    LinkStatus(u8),
    SendChatpadInit,
    /// Chatpad LEDs as the pad reports them.
    ChatpadLeds(ChatpadLedState),
    /// Wired pad echoed a rumble command.
    RumbleOff,
    /// Wired pad lost its LED pattern.
    ResetIndicator,
}

/// Result of decoding one raw packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawOutcome {
    pub changes: ChangeSet,
    pub reaction: Option<Reaction>,
}

impl RawOutcome {
    fn changes(changes: ChangeSet) -> Self {
        Self {
            changes,
            reaction: None,
        }
    }

    fn react(reaction: Reaction) -> Self {
        Self {
            changes: ChangeSet::NONE,
            reaction: Some(reaction),
        }
    }
}

/// Decode one buffer from a class-claimed interface.
pub fn decode_raw(family: ControllerFamily, data: &[u8], state: &mut CanonicalState) -> RawOutcome {
    match family {
        ControllerFamily::XboxOne => xbox::parse_xboxone_input(data)
            .map(|input| RawOutcome::changes(input.apply(state)))
            .unwrap_or_default(),
        ControllerFamily::XboxDuke => xbox::parse_duke_input(data)
            .map(|input| RawOutcome::changes(input.apply(state)))
            .unwrap_or_default(),
        ControllerFamily::Xbox360Wired => match xbox::parse_360_wired_packet(data) {
            Xbox360WiredPacket::Input(pad) => RawOutcome::changes(pad.apply(state)),
            Xbox360WiredPacket::RumbleStatus(status) => {
                trace!(status, "wired rumble status");
                RawOutcome::react(Reaction::RumbleOff)
            }
            Xbox360WiredPacket::LedStatus(xbox::ids::report_ids::XBOX360_LED_INVALID) => {
                RawOutcome::react(Reaction::ResetIndicator)
            }
            Xbox360WiredPacket::LedStatus(status) => {
                trace!(status, "wired LED status");
                RawOutcome::default()
            }
            Xbox360WiredPacket::Unknown => unrecognised(family, data),
        },
        ControllerFamily::Xbox360Wireless => decode_wireless(data, state),
        _ => unrecognised(family, data),
    }
}

fn decode_wireless(data: &[u8], state: &mut CanonicalState) -> RawOutcome {
    match xbox::parse_360_wireless_packet(data) {
        Xbox360WirelessPacket::LinkStatus { controller } => {
            RawOutcome::react(Reaction::LinkStatus(controller))
        }
        Xbox360WirelessPacket::ControllerStatus(status) => {
            trace!(status = format_args!("{status:04X}"), "controller status");
            RawOutcome::default()
        }
        Xbox360WirelessPacket::EndOfEvents | Xbox360WirelessPacket::Info => RawOutcome::default(),
        Xbox360WirelessPacket::ChatpadHandshake => RawOutcome::react(Reaction::SendChatpadInit),
        Xbox360WirelessPacket::Input { pad, chatpad } => {
            let changes = pad.map(|p| p.apply(state)).unwrap_or_default();
            let reaction = match chatpad {
                Some(ChatpadReport::Keys(keys)) => {
                    trace!(keys = ?keys, "chatpad keys");
                    None
                }
                Some(ChatpadReport::InitNeeded) => Some(Reaction::SendChatpadInit),
                Some(ChatpadReport::LedStatus(leds)) => Some(Reaction::ChatpadLeds(leds)),
                None => None,
            };
            RawOutcome { changes, reaction }
        }
        Xbox360WirelessPacket::Unknown => unrecognised(ControllerFamily::Xbox360Wireless, data),
    }
}

fn unrecognised(family: ControllerFamily, data: &[u8]) -> RawOutcome {
    trace!(%family, bytes = %openpad_hid_common::hex_dump(data), "unrecognised packet");
    RawOutcome::default()
}

/// Decode one Bluetooth interrupt-channel block.
pub fn decode_bluetooth(family: ControllerFamily, data: &[u8], state: &mut CanonicalState) -> ChangeSet {
    sony::decode_bluetooth_report(family, data, state)
}

/// Largest packet any encoder produces.
pub const MAX_PACKET_LEN: usize = 80;

/// Owned, fixed-capacity output packet.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    bytes: [u8; MAX_PACKET_LEN],
    len: usize,
}

impl Packet {
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        let mut bytes = [0u8; MAX_PACKET_LEN];
        bytes.get_mut(..data.len())?.copy_from_slice(data);
        Some(Self {
            bytes,
            len: data.len(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or_default()
    }
}

impl std::fmt::Debug for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Packet({})", openpad_hid_common::hex_dump(self.as_bytes()))
    }
}

/// Where an output packet goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Interrupt OUT pipe of a class-claimed interface.
    Pipe,
    /// Output report through the HID parser.
    HidReport,
    /// Control transfer on endpoint 0.
    Control(ControlSetup),
    /// L2CAP channel.
    Channel(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub route: Route,
    pub packet: Packet,
}

impl Command {
    pub fn new(route: Route, data: &[u8]) -> Option<Self> {
        Packet::from_slice(data).map(|packet| Self { route, packet })
    }

    pub fn bytes(&self) -> &[u8] {
        self.packet.as_bytes()
    }
}

/// Sony pads carry rumble and LEDs in one report, so both requests encode
/// the same way.
fn encode_sony_feedback(family: ControllerFamily, link: LinkKind, fb: &FeedbackState) -> Option<Command> {
    match (family, link) {
        (ControllerFamily::Ps3, LinkKind::HidCollection) => Command::new(
            Route::Control(sony::PS3_FEEDBACK_SETUP),
            &sony::build_ps3_feedback(fb),
        ),
        (ControllerFamily::Ps3, LinkKind::Bluetooth) => {
            Command::new(Route::Channel(l2cap::CONTROL), &sony::build_ps3_bt_feedback(fb))
        }
        (ControllerFamily::Ps3Motion, LinkKind::HidCollection) => {
            Command::new(Route::HidReport, &sony::build_ps3_motion_feedback(fb))
        }
        (ControllerFamily::Ps3Motion, LinkKind::Bluetooth) => Command::new(
            Route::Channel(l2cap::INTERRUPT),
            &sony::build_ps3_motion_bt_feedback(fb),
        ),
        (ControllerFamily::Ps4, LinkKind::HidCollection) => {
            Command::new(Route::HidReport, &sony::build_ps4_feedback(fb))
        }
        (ControllerFamily::Ps4, LinkKind::Bluetooth) => Command::new(
            Route::Channel(PS4_OUTPUT_CHANNEL),
            &sony::build_ps4_bt_feedback(fb),
        ),
        _ => None,
    }
}

/// Rumble command for `family` over `link`, or `None` when unsupported.
pub fn encode_rumble(family: ControllerFamily, link: LinkKind, fb: &FeedbackState) -> Option<Command> {
    let (low, high) = (fb.rumble_low, fb.rumble_high);
    match (family, link) {
        (ControllerFamily::XboxOne, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_xboxone_rumble(low, high))
        }
        (ControllerFamily::Xbox360Wireless, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_360_wireless_rumble(low, high))
        }
        (ControllerFamily::Xbox360Wired, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_360_wired_rumble(low, high))
        }
        (ControllerFamily::XboxDuke, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_duke_rumble(low, high))
        }
        _ => encode_sony_feedback(family, link, fb),
    }
}

/// Indicator command. Xbox pads take the blue slot as an LED pattern.
pub fn encode_indicator(family: ControllerFamily, link: LinkKind, fb: &FeedbackState) -> Option<Command> {
    match (family, link) {
        (ControllerFamily::Xbox360Wireless, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_360_wireless_led(fb.blue()))
        }
        (ControllerFamily::Xbox360Wired, LinkKind::UsbClass) => {
            Command::new(Route::Pipe, &xbox::build_360_wired_led(fb.blue()))
        }
        _ => encode_sony_feedback(family, link, fb),
    }
}

/// Pairing command that stores `host` as the pad's Bluetooth master.
pub fn encode_pairing(family: ControllerFamily, link: LinkKind, host: &[u8; 6]) -> Option<Command> {
    match (family, link) {
        (ControllerFamily::Ps3, LinkKind::HidCollection) => Command::new(
            Route::Control(sony::PS3_PAIRING_SETUP),
            &sony::build_ps3_pairing(host),
        ),
        (ControllerFamily::Ps3Motion, LinkKind::HidCollection) => Command::new(
            Route::Control(sony::PS3_MOTION_PAIRING_SETUP),
            &sony::build_ps3_motion_pairing(host),
        ),
        _ => None,
    }
}

/// Packets queued when a class-claimed interface starts streaming.
pub fn init_commands(family: ControllerFamily, vendor_id: u16, product_id: u16) -> Vec<Command> {
    match family {
        ControllerFamily::XboxOne => xbox::xboxone_init_sequence(vendor_id, product_id)
            .iter()
            .filter_map(|packet| Command::new(Route::Pipe, packet))
            .collect(),
        ControllerFamily::Xbox360Wireless => {
            Command::new(Route::Pipe, &xbox::output::XBOX360_WIRELESS_INQUIRE)
                .into_iter()
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Commands sent once a Bluetooth link is confirmed.
pub fn bluetooth_connect_command(family: ControllerFamily) -> Option<Command> {
    match family {
        ControllerFamily::Ps4 => Command::new(
            Route::Channel(PS4_OUTPUT_CHANNEL),
            &sony::PS4_BT_REQUEST_CALIBRATION,
        ),
        ControllerFamily::Ps3 => {
            Command::new(Route::Channel(l2cap::CONTROL), &sony::PS3_BT_ENABLE_SIXAXIS)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_family_has_a_profile() {
        for family in ControllerFamily::ALL {
            assert_eq!(profile(family).family, family);
        }
        assert!(profile(ControllerFamily::Xbox360Wireless).keepalive);
        assert!(!profile(ControllerFamily::Xbox360Wired).keepalive);
    }

    #[test]
    fn test_axis_window_bounds() {
        let window = profile(ControllerFamily::Ps4).hid_window;
        assert_eq!(window.offset_of(0xFF00, 0x21), Some(0));
        assert_eq!(window.offset_of(0xFF00, 0x21 + 53), Some(53));
        assert_eq!(window.offset_of(0xFF00, 0x21 + 54), None);
        assert_eq!(window.offset_of(0xFF00, 0x20), None);
        assert_eq!(window.offset_of(0x0001, 0x21), None);
    }

    #[test]
    fn test_rumble_routes() -> Result<(), Box<dyn std::error::Error>> {
        let fb = FeedbackState {
            rumble_low: 50,
            rumble_high: 75,
            rumble_timeout: 10,
            led: [0; 3],
        };
        let one = encode_rumble(ControllerFamily::XboxOne, LinkKind::UsbClass, &fb).ok_or("xbox one")?;
        assert_eq!(one.route, Route::Pipe);
        assert_eq!(one.bytes().len(), 13);

        let ps3 = encode_rumble(ControllerFamily::Ps3, LinkKind::HidCollection, &fb).ok_or("ps3")?;
        assert_eq!(ps3.route, Route::Control(sony::PS3_FEEDBACK_SETUP));

        let ps4 = encode_rumble(ControllerFamily::Ps4, LinkKind::Bluetooth, &fb).ok_or("ps4")?;
        assert_eq!(ps4.route, Route::Channel(0x40));
        assert_eq!(ps4.bytes().len(), 79);

        assert!(encode_rumble(ControllerFamily::Unknown, LinkKind::UsbClass, &fb).is_none());
        assert!(encode_rumble(ControllerFamily::XboxOne, LinkKind::Bluetooth, &fb).is_none());
        Ok(())
    }

    #[test]
    fn test_indicator_unsupported_on_xbox_one_and_duke() {
        let fb = FeedbackState::default();
        assert!(encode_indicator(ControllerFamily::XboxOne, LinkKind::UsbClass, &fb).is_none());
        assert!(encode_indicator(ControllerFamily::XboxDuke, LinkKind::UsbClass, &fb).is_none());
    }

    #[test]
    fn test_wired_status_reactions() {
        let mut state = CanonicalState::default();
        assert_eq!(
            decode_raw(ControllerFamily::Xbox360Wired, &[0x03, 0x03, 0x00], &mut state).reaction,
            Some(Reaction::RumbleOff)
        );
        assert_eq!(
            decode_raw(ControllerFamily::Xbox360Wired, &[0x01, 0x03, 0x0E], &mut state).reaction,
            Some(Reaction::ResetIndicator)
        );
        assert_eq!(
            decode_raw(ControllerFamily::Xbox360Wired, &[0x01, 0x03, 0x06], &mut state),
            RawOutcome::default()
        );
    }

    #[test]
    fn test_packet_capacity() {
        assert!(Packet::from_slice(&[0u8; MAX_PACKET_LEN]).is_some());
        assert!(Packet::from_slice(&[0u8; MAX_PACKET_LEN + 1]).is_none());
    }

    #[test]
    fn test_init_commands() {
        assert_eq!(init_commands(ControllerFamily::XboxOne, 0x0E6F, 0x02A4).len(), 4);
        assert_eq!(init_commands(ControllerFamily::Xbox360Wireless, 0x045E, 0x0719).len(), 1);
        assert!(init_commands(ControllerFamily::XboxDuke, 0x045E, 0x0202).is_empty());
    }
}
