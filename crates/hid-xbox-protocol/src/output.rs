//! Rumble, LED, init and keep-alive packets for the Xbox families.
//!
//! Every packet is written to the interrupt OUT endpoint resolved at claim.
//!
//! | Packet | Len | Layout |
//! |---|---|---|
//! | Xbox One rumble | 13 | `09 00 00 09 00 0F 00 00 L R FF 00 00` (L/R ≤ 100) |
//! | 360 wireless rumble | 12 | `00 01 0F C0 00 L R 00..` |
//! | 360 wired rumble | 8 | `00 08 00 L R 00 00 00` |
//! | Duke rumble | 6 | `00 06 L L R R` |
//! | 360 wireless LED | 12 | `00 00 08 (40 + p) 00..` |
//! | 360 wired LED | 3 | `01 03 p` |
//! | Chatpad LED | 4 | `00 00 0C (idx \| on << 3)` |

use crate::ids::{MICROSOFT_VENDOR_ID, PDP_VENDOR_ID, product_ids};
use crate::types::ChatpadLed;

pub const XBOXONE_RUMBLE_LEN: usize = 13;
pub const XBOX360_WIRELESS_RUMBLE_LEN: usize = 12;
pub const XBOX360_WIRED_RUMBLE_LEN: usize = 8;
pub const DUKE_RUMBLE_LEN: usize = 6;
pub const XBOX360_WIRELESS_LED_LEN: usize = 12;
pub const XBOX360_WIRED_LED_LEN: usize = 3;
pub const CHATPAD_LED_LEN: usize = 4;

/// Xbox One motor force ceiling.
pub const XBOXONE_MAX_FORCE: u8 = 100;

/// Start streaming input.
pub const XBOXONE_START_INPUT: [u8; 5] = [0x05, 0x20, 0x00, 0x01, 0x00];
/// Xbox One S / Elite 2: leave Bluetooth mode.
pub const XBOXONE_S_INIT: [u8; 5] = [0x05, 0x20, 0x00, 0x0F, 0x06];
pub const XBOXONE_PDP_INIT_1: [u8; 7] = [0x0A, 0x20, 0x00, 0x03, 0x00, 0x01, 0x14];
pub const XBOXONE_PDP_INIT_2: [u8; 2] = [0x06, 0x30];
pub const XBOXONE_PDP_INIT_3: [u8; 6] = [0x06, 0x20, 0x00, 0x02, 0x01, 0x00];

/// Ask the wireless receiver whether a controller is linked.
pub const XBOX360_WIRELESS_INQUIRE: [u8; 12] = [
    0x08, 0x00, 0x0F, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
pub const XBOX360_WIRELESS_CONNECTION_REFRESH: [u8; 4] = [0x08, 0x00, 0x00, 0x00];
pub const XBOX360_WIRELESS_CONTROLLER_INFO: [u8; 4] = [0x00, 0x00, 0x00, 0x40];
pub const CHATPAD_INIT: [u8; 4] = [0x00, 0x00, 0x0C, 0x1B];
pub const CHATPAD_KEEPALIVE_1: [u8; 4] = [0x00, 0x00, 0x0C, 0x1F];
pub const CHATPAD_KEEPALIVE_2: [u8; 4] = [0x00, 0x00, 0x0C, 0x1E];

pub fn build_xboxone_rumble(left: u8, right: u8) -> [u8; XBOXONE_RUMBLE_LEN] {
    [
        0x09,
        0x00,
        0x00,
        0x09, // substructure
        0x00, // mode
        0x0F, // motor mask: LT RT L R
        0x00, // LT force
        0x00, // RT force
        left.min(XBOXONE_MAX_FORCE),
        right.min(XBOXONE_MAX_FORCE),
        0xFF, // pulse length
        0x00, // pulse period
        0x00, // repeat
    ]
}

pub fn build_360_wireless_rumble(left: u8, right: u8) -> [u8; XBOX360_WIRELESS_RUMBLE_LEN] {
    let mut out = [0u8; XBOX360_WIRELESS_RUMBLE_LEN];
    out[..5].copy_from_slice(&[0x00, 0x01, 0x0F, 0xC0, 0x00]);
    out[5] = left;
    out[6] = right;
    out
}

pub fn build_360_wired_rumble(left: u8, right: u8) -> [u8; XBOX360_WIRED_RUMBLE_LEN] {
    [0x00, 0x08, 0x00, left, right, 0x00, 0x00, 0x00]
}

pub fn build_duke_rumble(left: u8, right: u8) -> [u8; DUKE_RUMBLE_LEN] {
    [0x00, 0x06, left, left, right, right]
}

/// Ring LED pattern on a wireless pad.
///
/// `0` off, `1` all blink, `2..=5` blink then hold one quadrant,
/// `6..=9` hold one quadrant.
pub fn build_360_wireless_led(pattern: u8) -> [u8; XBOX360_WIRELESS_LED_LEN] {
    let mut out = [0u8; XBOX360_WIRELESS_LED_LEN];
    out[2] = 0x08;
    out[3] = 0x40u8.wrapping_add(pattern);
    out
}

pub fn build_360_wired_led(pattern: u8) -> [u8; XBOX360_WIRED_LED_LEN] {
    [0x01, 0x03, pattern]
}

pub fn build_chatpad_led(led: ChatpadLed, on: bool) -> [u8; CHATPAD_LED_LEN] {
    [0x00, 0x00, 0x0C, led.index() | (u8::from(on) << 3)]
}

/// Quadrant LED for the pad behind receiver endpoint `rx_endpoint`.
///
/// Receiver IN endpoints are 1, 3, 5, 7, one per pad slot.
pub fn wireless_led_quadrant(rx_endpoint: u8) -> u8 {
    2 + (rx_endpoint & 0x0F) / 2
}

/// Packets sent to an Xbox One pad right after claim, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSequence {
    packets: [&'static [u8]; 4],
    len: usize,
}

impl InitSequence {
    pub fn as_slice(&self) -> &[&'static [u8]] {
        self.packets.get(..self.len).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static [u8]> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub fn xboxone_init_sequence(vendor_id: u16, product_id: u16) -> InitSequence {
    let mut packets: [&'static [u8]; 4] = [&XBOXONE_START_INPUT, &[], &[], &[]];
    let mut len = 1;
    if vendor_id == MICROSOFT_VENDOR_ID
        && matches!(product_id, product_ids::XBOX_ONE_S | product_ids::XBOX_ELITE_2)
    {
        packets[1] = &XBOXONE_S_INIT;
        len = 2;
    } else if vendor_id == PDP_VENDOR_ID {
        packets[1] = &XBOXONE_PDP_INIT_1;
        packets[2] = &XBOXONE_PDP_INIT_2;
        packets[3] = &XBOXONE_PDP_INIT_3;
        len = 4;
    }
    InitSequence { packets, len }
}

/// Wireless receiver keep-alive burst. `odd_tick` selects the chatpad packet.
pub fn keepalive_packets(odd_tick: bool) -> [&'static [u8]; 3] {
    let chatpad: &'static [u8] = if odd_tick {
        &CHATPAD_KEEPALIVE_1
    } else {
        &CHATPAD_KEEPALIVE_2
    };
    [
        &XBOX360_WIRELESS_CONNECTION_REFRESH,
        &XBOX360_WIRELESS_CONTROLLER_INFO,
        chatpad,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xboxone_rumble_clamps_force() {
        let out = build_xboxone_rumble(150, 255);
        assert_eq!(out[8], 100);
        assert_eq!(out[9], 100);
        assert_eq!(build_xboxone_rumble(50, 75)[8..10], [50, 75]);
    }

    #[test]
    fn test_wired_rumble_passes_values_through() {
        assert_eq!(build_360_wired_rumble(150, 0)[3], 150);
        assert_eq!(build_360_wired_rumble(0, 0), [0, 8, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_chatpad_led_command() {
        assert_eq!(build_chatpad_led(ChatpadLed::Orange, true)[3], 0x0A);
        assert_eq!(build_chatpad_led(ChatpadLed::Messenger, false)[3], 0x03);
    }

    #[test]
    fn test_wireless_quadrant_per_endpoint() {
        assert_eq!(wireless_led_quadrant(0x81), 2);
        assert_eq!(wireless_led_quadrant(0x83), 3);
        assert_eq!(wireless_led_quadrant(0x87), 5);
    }

    #[test]
    fn test_init_sequence_variants() {
        assert_eq!(xboxone_init_sequence(0x045E, 0x02D1).len(), 1);

        let elite = xboxone_init_sequence(0x045E, 0x0B00);
        assert_eq!(elite.as_slice(), &[&XBOXONE_START_INPUT[..], &XBOXONE_S_INIT[..]]);

        let pdp = xboxone_init_sequence(0x0E6F, 0x02A4);
        assert_eq!(pdp.len(), 4);
        assert_eq!(pdp.iter().last(), Some(&XBOXONE_PDP_INIT_3[..]));
    }

    #[test]
    fn test_keepalive_alternates_chatpad_packet() {
        assert_eq!(keepalive_packets(false)[2], &CHATPAD_KEEPALIVE_2[..]);
        assert_eq!(keepalive_packets(true)[2], &CHATPAD_KEEPALIVE_1[..]);
        assert_eq!(keepalive_packets(true)[0], &XBOX360_WIRELESS_CONNECTION_REFRESH[..]);
    }
}
