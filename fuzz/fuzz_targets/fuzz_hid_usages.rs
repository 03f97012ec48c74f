//! Feeds arbitrary usage/value triples to a HID collection claim.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_hid_usages

#![no_main]

use libfuzzer_sys::fuzz_target;
use openpad_hid_common::{UsbDeviceInfo, top_usage};
use openpad_session::{GamepadConnection, IDENTITY_TABLE};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let index = usize::from(selector) % IDENTITY_TABLE.len();
    let Some(record) = IDENTITY_TABLE.get(index) else {
        return;
    };

    let mut conn = GamepadConnection::default();
    if conn
        .claim_collection(
            UsbDeviceInfo::new(record.vendor_id, record.product_id),
            top_usage::GAMEPAD,
        )
        .is_err()
    {
        return;
    }

    conn.hid_input_begin();
    for chunk in rest.chunks_exact(8) {
        let usage = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let value = i32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
        conn.hid_input_data(usage, value);
    }
    conn.hid_input_end();
    conn.drain_event();
});
