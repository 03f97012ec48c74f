//! Xbox controller protocol: interface probing, raw report decoding and commands.
//!
//! Xbox pads do not speak generic HID. They are claimed at the USB
//! interface level, identified by interface class/subclass/protocol bytes,
//! and exchange fixed binary layouts over one interrupt IN and one
//! interrupt OUT endpoint.
//!
//! This crate is I/O-free and allocation-free. It provides pure functions
//! and types that can be tested without hardware.

#![deny(static_mut_refs)]

pub mod descriptor;
pub mod ids;
pub mod input;
pub mod output;
pub mod types;

pub use descriptor::{EndpointInfo, EndpointPlan, probe_interface, resolve_endpoints};
pub use ids::{MICROSOFT_VENDOR_ID, PDP_VENDOR_ID, product_ids};
pub use input::{
    ChatpadReport, DukeInput, Xbox360Pad, Xbox360WiredPacket, Xbox360WirelessPacket,
    XboxOneInput, parse_360_wired_packet, parse_360_wireless_packet, parse_duke_input,
    parse_xboxone_input,
};
pub use output::{
    InitSequence, build_360_wired_led, build_360_wired_rumble, build_360_wireless_led,
    build_360_wireless_rumble, build_chatpad_led, build_duke_rumble, build_xboxone_rumble,
    keepalive_packets, wireless_led_quadrant, xboxone_init_sequence,
};
pub use types::{ChatpadLed, ChatpadLedState};
