//! Snapshot tests for Sony wire-format encoding.
//!
//! Any byte that moves in these packets is a wire-format regression.

use insta::assert_snapshot;
use openpad_gamepad_types::FeedbackState;
use openpad_hid_sony_protocol as sony;

fn feedback(low: u8, high: u8, timeout: u8, led: [u8; 3]) -> FeedbackState {
    FeedbackState {
        rumble_low: low,
        rumble_high: high,
        rumble_timeout: timeout,
        led,
    }
}

// ── DualShock 4 ──────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_ps4_usb_feedback() {
    let out = sony::build_ps4_feedback(&feedback(0x40, 0x80, 0, [0x10, 0x20, 0x30]));
    assert_snapshot!(format!("{out:02X?}"), @"[05, FF, 00, 00, 40, 80, 10, 20, 30, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]");
}

#[test]
fn test_snapshot_ps4_bt_feedback() {
    let out = sony::build_ps4_bt_feedback(&feedback(0x40, 0x80, 0, [0x10, 0x20, 0x30]));
    assert_snapshot!(format!("{out:02X?}"), @"[52, 11, 80, 00, FF, 00, 00, 40, 80, 10, 20, 30, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]");
}

#[test]
fn test_snapshot_ps4_bt_calibration_request() {
    assert_snapshot!(format!("{:02X?}", sony::PS4_BT_REQUEST_CALIBRATION), @"[43, 02]");
}

// ── DualShock 3 ──────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_ps3_usb_feedback() {
    let out = sony::build_ps3_feedback(&feedback(0x40, 0x80, 0x0A, [0, 0, 0x02]));
    assert_snapshot!(format!("{out:02X?}"), @"[00, 0A, 40, 0A, 80, 00, 00, 00, 00, 04, FF, 27, 10, 00, 32, FF, 27, 10, 00, 32, FF, 27, 10, 00, 32, FF, 27, 10, 00, 32, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]");
}

#[test]
fn test_snapshot_ps3_enable_sixaxis() {
    assert_snapshot!(format!("{:02X?}", sony::PS3_BT_ENABLE_SIXAXIS), @"[53, F4, 42, 03, 00, 00]");
}

#[test]
fn test_snapshot_ps3_pairing() {
    let out = sony::build_ps3_pairing(&[0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    assert_snapshot!(format!("{out:02X?}"), @"[01, 00, 11, 22, 33, 44, 55, 66]");
}

// ── Move ─────────────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_ps3_motion_usb_feedback() {
    let out = sony::build_ps3_motion_feedback(&feedback(0x7F, 0, 0, [0xFF, 0x00, 0x80]));
    assert_snapshot!(format!("{out:02X?}"), @"[02, 00, FF, 00, 80, 00, 7F]");
}

#[test]
fn test_snapshot_ps3_motion_bt_feedback() {
    let out = sony::build_ps3_motion_bt_feedback(&feedback(0x7F, 0, 0, [0xFF, 0x00, 0x80]));
    assert_snapshot!(format!("{out:02X?}"), @"[A2, 02, 00, FF, 00, 80, 00, 7F, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]");
}

#[test]
fn test_snapshot_ps3_motion_pairing() {
    let out = sony::build_ps3_motion_pairing(&[0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    assert_snapshot!(format!("{out:02X?}"), @"[05, 66, 55, 44, 33, 22, 11, 10, 01, 02, 12]");
}
