//! Drives a claimed connection with arbitrary receive completions and
//! timer ticks.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_session_receive

#![no_main]

use libfuzzer_sys::fuzz_target;
use openpad_hid_common::UsbDeviceInfo;
use openpad_hid_common::mock::{MockTimer, MockTransport};
use openpad_session::GamepadConnection;

/// Wireless 360 receiver interface: vendor class, two interrupt endpoints.
const RECEIVER_INTERFACE: [u8; 27] = [
    0x09, 0x04, 0x00, 0x00, 0x02, 0xFF, 0x5D, 0x81, 0x00, //
    0x04, 0x21, 0x00, 0x01, //
    0x07, 0x05, 0x81, 0x03, 0x20, 0x00, 0x01, //
    0x07, 0x05, 0x01, 0x03, 0x20, 0x00, 0x08,
];

fuzz_target!(|data: &[u8]| {
    let mut conn = GamepadConnection::default();
    let mut transport = MockTransport::new();
    let mut timer = MockTimer::new();
    if conn
        .claim_usb(
            UsbDeviceInfo::new(0x045E, 0x0719),
            &RECEIVER_INTERFACE,
            &mut transport,
            &mut timer,
        )
        .is_err()
    {
        return;
    }

    // First byte picks the chunk size; the rest is split into packets.
    let Some((&size, rest)) = data.split_first() else {
        return;
    };
    let size = usize::from(size % 64).max(1);
    for (n, packet) in rest.chunks(size).enumerate() {
        conn.on_receive_complete(packet, &mut transport);
        if n % 4 == 3 {
            conn.timer_event(&mut transport, &mut timer);
        }
        if conn.has_pending_event() {
            conn.drain_event();
        }
        transport.take_sent();
    }
    conn.disconnect(&mut timer);
    assert!(!conn.has_pending_event());
});
