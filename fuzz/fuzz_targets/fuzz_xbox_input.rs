//! Fuzzes every raw decoder through the per-family dispatch.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_xbox_input

#![no_main]

use libfuzzer_sys::fuzz_target;
use openpad_gamepad_types::{CanonicalState, ControllerFamily};
use openpad_session::dispatch::decode_raw;
use openpad_session::profile;

fuzz_target!(|data: &[u8]| {
    for family in ControllerFamily::ALL {
        let mut state = CanonicalState::new(profile(family).stream_notify_mask);
        decode_raw(family, data, &mut state);
        // Replaying the same packet never reports new changes.
        let again = decode_raw(family, data, &mut state);
        assert!(again.changes.is_empty());
    }
});
