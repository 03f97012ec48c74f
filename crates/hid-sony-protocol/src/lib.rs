//! Sony controller protocol: Bluetooth input decoding, feedback and pairing packets.
//!
//! Covers the DualShock 3 (and Navigation controller), the Move motion
//! controller and the DualShock 4. USB input from these pads arrives as
//! generic HID usages and is handled upstream; this crate decodes the raw
//! Bluetooth reports and builds every output packet.
//!
//! This crate is I/O-free and allocation-free on decode and encode paths.

#![deny(static_mut_refs)]

pub mod ids;
pub mod input;
pub mod output;
pub mod types;

pub use ids::{SONY_VENDOR_ID, product_ids, report_ids};
pub use input::{
    decode_bluetooth_report, decode_extended_report, decode_plain_report, ps4_extended_buttons,
    repack_extended_report, RepackedReport,
};
pub use output::{
    build_ps3_bt_feedback, build_ps3_feedback, build_ps3_motion_bt_feedback,
    build_ps3_motion_feedback, build_ps3_motion_pairing, build_ps3_pairing,
    build_ps4_bt_feedback, build_ps4_feedback, PS3_BT_ENABLE_SIXAXIS, PS3_BT_FEEDBACK_LEN,
    PS3_FEEDBACK_LEN, PS3_FEEDBACK_SETUP, PS3_FEEDBACK_TEMPLATE, PS3_MOTION_BT_FEEDBACK_LEN,
    PS3_MOTION_FEEDBACK_LEN, PS3_MOTION_PAIRING_LEN, PS3_MOTION_PAIRING_SETUP, PS3_PAIRING_LEN,
    PS3_PAIRING_SETUP, PS4_BT_FEEDBACK_LEN, PS4_BT_REQUEST_CALIBRATION, PS4_FEEDBACK_LEN,
};
pub use types::{family_from_remote_name, SonyModel};
