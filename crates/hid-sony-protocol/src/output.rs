//! Feedback, enable and pairing packets.
//!
//! All functions are pure and allocation-free. Rumble and LED values come
//! from a [`FeedbackState`]; the same state encodes differently per model
//! and per transport.
//!
//! # Packet summary
//!
//! | Packet | Len | Transport |
//! |---|---|---|
//! | DualShock 3 feedback | 48 | USB SET_REPORT(output, 0x01) |
//! | DualShock 3 feedback | 50 | L2CAP control, `52 01` + USB body |
//! | Move feedback | 7 | USB interrupt output |
//! | Move feedback | 50 | L2CAP interrupt, `A2 02` prefix |
//! | DualShock 4 feedback | 32 | USB interrupt output |
//! | DualShock 4 feedback | 79 | L2CAP channel 0x40, `52 11` prefix |

use crate::ids::{bt_transaction, report_ids};
use openpad_gamepad_types::FeedbackState;
use openpad_hid_common::ControlSetup;

/// HID report type code for output reports in SET_REPORT.
const REPORT_TYPE_OUTPUT: u8 = 0x02;
/// HID report type code for feature reports in SET_REPORT.
const REPORT_TYPE_FEATURE: u8 = 0x03;

pub const PS3_FEEDBACK_LEN: usize = 48;
pub const PS3_BT_FEEDBACK_LEN: usize = 50;
pub const PS3_MOTION_FEEDBACK_LEN: usize = 7;
pub const PS3_MOTION_BT_FEEDBACK_LEN: usize = 50;
pub const PS4_FEEDBACK_LEN: usize = 32;
pub const PS4_BT_FEEDBACK_LEN: usize = 79;
pub const PS3_PAIRING_LEN: usize = 8;
pub const PS3_MOTION_PAIRING_LEN: usize = 11;

/// DualShock 3 output report body before rumble and LED fields are filled.
///
/// Bytes 10..30 are four LED blink descriptors (`ff 27 10 00 32`).
pub const PS3_FEEDBACK_TEMPLATE: [u8; PS3_FEEDBACK_LEN] = [
    0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, //
    0xFF, 0x27, 0x10, 0x00, 0x32, //
    0xFF, 0x27, 0x10, 0x00, 0x32, //
    0xFF, 0x27, 0x10, 0x00, 0x32, //
    0xFF, 0x27, 0x10, 0x00, 0x32, //
    0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00,
];

/// SET_REPORT(output, 0x01) carrying [`build_ps3_feedback`].
pub const PS3_FEEDBACK_SETUP: ControlSetup =
    ControlSetup::set_report(REPORT_TYPE_OUTPUT, report_ids::PS3_OUTPUT);

/// SET_REPORT(feature, 0xF5) carrying [`build_ps3_pairing`].
pub const PS3_PAIRING_SETUP: ControlSetup =
    ControlSetup::set_report(REPORT_TYPE_FEATURE, report_ids::PS3_PAIRING);

/// SET_REPORT(feature, 0x05) carrying [`build_ps3_motion_pairing`].
pub const PS3_MOTION_PAIRING_SETUP: ControlSetup =
    ControlSetup::set_report(REPORT_TYPE_FEATURE, report_ids::PS3_MOTION_PAIRING);

/// GET_REPORT(feature 0x02) sent to a DualShock 4 once its link is up.
pub const PS4_BT_REQUEST_CALIBRATION: [u8; 2] =
    [bt_transaction::GET_FEATURE, report_ids::PS4_CALIBRATION];

/// SET_REPORT(feature 0xF4) that starts DualShock 3 input streaming over Bluetooth.
pub const PS3_BT_ENABLE_SIXAXIS: [u8; 6] = [
    bt_transaction::SET_FEATURE,
    report_ids::PS3_ENABLE,
    0x42,
    0x03,
    0x00,
    0x00,
];

/// Fill the DualShock 3 rumble and LED slots starting at `base`.
fn fill_ps3_fields(out: &mut [u8], base: usize, fb: &FeedbackState) {
    let fields = [
        (base + 1, fb.low_timeout()),
        (base + 2, fb.rumble_low),
        (base + 3, fb.high_timeout()),
        (base + 4, fb.rumble_high),
        // Player LEDs 1..=4 live in bits 1..=4.
        (base + 9, fb.blue() << 1),
    ];
    for (offset, value) in fields {
        if let Some(slot) = out.get_mut(offset) {
            *slot = value;
        }
    }
}

/// DualShock 3 output report for USB SET_REPORT.
pub fn build_ps3_feedback(fb: &FeedbackState) -> [u8; PS3_FEEDBACK_LEN] {
    let mut out = PS3_FEEDBACK_TEMPLATE;
    fill_ps3_fields(&mut out, 0, fb);
    out
}

/// DualShock 3 output report wrapped for the Bluetooth control channel.
pub fn build_ps3_bt_feedback(fb: &FeedbackState) -> [u8; PS3_BT_FEEDBACK_LEN] {
    let mut out = [0u8; PS3_BT_FEEDBACK_LEN];
    out[0] = bt_transaction::SET_OUTPUT;
    out[1] = report_ids::PS3_OUTPUT;
    for (dst, src) in out.iter_mut().skip(2).zip(PS3_FEEDBACK_TEMPLATE.iter()) {
        *dst = *src;
    }
    fill_ps3_fields(&mut out, 2, fb);
    out
}

/// Move output report for the USB interrupt endpoint: `02 00 r g b 00 rumble`.
pub fn build_ps3_motion_feedback(fb: &FeedbackState) -> [u8; PS3_MOTION_FEEDBACK_LEN] {
    [
        report_ids::PS3_MOTION_OUTPUT,
        0x00,
        fb.red(),
        fb.green(),
        fb.blue(),
        0x00,
        fb.rumble_low,
    ]
}

/// Move output report for the Bluetooth interrupt channel.
pub fn build_ps3_motion_bt_feedback(fb: &FeedbackState) -> [u8; PS3_MOTION_BT_FEEDBACK_LEN] {
    let mut out = [0u8; PS3_MOTION_BT_FEEDBACK_LEN];
    out[0] = bt_transaction::DATA_OUTPUT;
    out[1] = report_ids::PS3_MOTION_OUTPUT;
    out[3] = fb.red();
    out[4] = fb.green();
    out[5] = fb.blue();
    out[7] = fb.rumble_low;
    out
}

/// DualShock 4 USB output report 0x05.
pub fn build_ps4_feedback(fb: &FeedbackState) -> [u8; PS4_FEEDBACK_LEN] {
    let mut out = [0u8; PS4_FEEDBACK_LEN];
    out[0] = report_ids::PS4_USB_OUTPUT;
    out[1] = 0xFF; // enable rumble + lightbar
    out[4] = fb.rumble_low;
    out[5] = fb.rumble_high;
    out[6] = fb.red();
    out[7] = fb.green();
    out[8] = fb.blue();
    out
}

/// DualShock 4 Bluetooth output report 0x11.
pub fn build_ps4_bt_feedback(fb: &FeedbackState) -> [u8; PS4_BT_FEEDBACK_LEN] {
    let mut out = [0u8; PS4_BT_FEEDBACK_LEN];
    out[0] = bt_transaction::SET_OUTPUT;
    out[1] = report_ids::BT_EXTENDED_INPUT;
    out[2] = 0x80; // HID + no CRC
    out[4] = 0xFF;
    out[7] = fb.rumble_low;
    out[8] = fb.rumble_high;
    out[9] = fb.red();
    out[10] = fb.green();
    out[11] = fb.blue();
    out
}

/// DualShock 3 pairing payload for [`PS3_PAIRING_SETUP`].
///
/// `bdaddr` is least significant byte first; the pad wants it most
/// significant first.
pub fn build_ps3_pairing(bdaddr: &[u8; 6]) -> [u8; PS3_PAIRING_LEN] {
    let mut out = [0u8; PS3_PAIRING_LEN];
    out[0] = 0x01;
    for (dst, src) in out.iter_mut().skip(2).zip(bdaddr.iter().rev()) {
        *dst = *src;
    }
    out
}

/// Move pairing payload for [`PS3_MOTION_PAIRING_SETUP`]; address kept in order.
pub fn build_ps3_motion_pairing(bdaddr: &[u8; 6]) -> [u8; PS3_MOTION_PAIRING_LEN] {
    let mut out = [0u8; PS3_MOTION_PAIRING_LEN];
    out[0] = report_ids::PS3_MOTION_PAIRING;
    for (dst, src) in out.iter_mut().skip(1).zip(bdaddr.iter()) {
        *dst = *src;
    }
    out[7] = 0x10;
    out[8] = 0x01;
    out[9] = 0x02;
    out[10] = 0x12;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(low: u8, high: u8, timeout: u8, led: [u8; 3]) -> FeedbackState {
        FeedbackState {
            rumble_low: low,
            rumble_high: high,
            rumble_timeout: timeout,
            led,
        }
    }

    #[test]
    fn test_ps3_feedback_fields() {
        let out = build_ps3_feedback(&feedback(0x40, 0, 0x0A, [0, 0, 0x01]));
        assert_eq!(out[1], 0x0A);
        assert_eq!(out[2], 0x40);
        assert_eq!(out[3], 0x00); // high motor off, no timeout
        assert_eq!(out[4], 0x00);
        assert_eq!(out[9], 0x02);
        assert_eq!(&out[10..15], &[0xFF, 0x27, 0x10, 0x00, 0x32]);
        assert_eq!(&out[30..], &[0u8; 18]);
    }

    #[test]
    fn test_ps3_bt_feedback_is_shifted_usb_body() {
        let fb = feedback(1, 2, 3, [0, 0, 4]);
        let usb = build_ps3_feedback(&fb);
        let bt = build_ps3_bt_feedback(&fb);
        assert_eq!(&bt[..2], &[0x52, 0x01]);
        assert_eq!(&bt[2..], &usb[..]);
    }

    #[test]
    fn test_ps3_pairing_reverses_address() {
        let out = build_ps3_pairing(&[0x13, 0x71, 0xDA, 0x7D, 0x1A, 0x00]);
        assert_eq!(out, [0x01, 0x00, 0x00, 0x1A, 0x7D, 0xDA, 0x71, 0x13]);
    }

    #[test]
    fn test_ps3_motion_pairing_keeps_order() {
        let out = build_ps3_motion_pairing(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(out, [0x05, 1, 2, 3, 4, 5, 6, 0x10, 0x01, 0x02, 0x12]);
    }

    #[test]
    fn test_setup_packets() {
        assert_eq!(PS3_FEEDBACK_SETUP.value, 0x0201);
        assert_eq!(PS3_PAIRING_SETUP.value, 0x03F5);
        assert_eq!(PS3_MOTION_PAIRING_SETUP.value, 0x0305);
        assert_eq!(PS3_FEEDBACK_SETUP.request_type, 0x21);
        assert_eq!(PS3_FEEDBACK_SETUP.request, 0x09);
    }
}
