//! Fuzzes interface probing and endpoint resolution on arbitrary
//! descriptor blocks.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_interface_descriptor

#![no_main]

use libfuzzer_sys::fuzz_target;
use openpad_gamepad_types::ControllerFamily;
use openpad_hid_xbox_protocol::{probe_interface, resolve_endpoints};
use openpad_session::classify_usb;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some(family)) = probe_interface(data) {
        assert!(family.is_xbox());
        let _ = resolve_endpoints(data, family);
    }

    for family in ControllerFamily::ALL {
        let _ = resolve_endpoints(data, family);
    }

    if data.len() >= 4 {
        let vendor_id = u16::from_le_bytes([data[0], data[1]]);
        let product_id = u16::from_le_bytes([data[2], data[3]]);
        let _ = classify_usb(vendor_id, product_id, data.get(4..).unwrap_or_default());
    }
});
