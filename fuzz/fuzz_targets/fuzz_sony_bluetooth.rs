//! Fuzzes the Sony Bluetooth block decoders and the extended-report repack.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_sony_bluetooth

#![no_main]

use libfuzzer_sys::fuzz_target;
use openpad_gamepad_types::{CanonicalState, ControllerFamily};
use openpad_hid_sony_protocol::{decode_bluetooth_report, repack_extended_report};

fuzz_target!(|data: &[u8]| {
    for family in [
        ControllerFamily::Ps3,
        ControllerFamily::Ps3Motion,
        ControllerFamily::Ps4,
    ] {
        let mut state = CanonicalState::new(u64::MAX);
        decode_bluetooth_report(family, data, &mut state);
        let again = decode_bluetooth_report(family, data, &mut state);
        assert!(again.is_empty());
    }

    if let Some(report) = repack_extended_report(data) {
        let _ = report.as_bytes();
    }
});
