//! Decode benchmarks
//!
//! Raw and Bluetooth decode throughput per family, plus the full receive
//! path of a class-claimed connection.

use criterion::{Criterion, criterion_group, criterion_main};
use openpad_gamepad_types::{CanonicalState, ControllerFamily};
use openpad_hid_common::UsbDeviceInfo;
use openpad_hid_common::mock::{MockTimer, MockTransport};
use openpad_session::{GamepadConnection, dispatch};

fn xboxone_report(seq: u8) -> [u8; 18] {
    [
        0x20, 0x00, seq, 0x0E, 0x10, 0x00, 0x00, 0x00, 0xFF, 0x03, 0x34, 0x12, 0xCC, 0xED, 0x00,
        0x40, 0x00, 0xC0,
    ]
}

fn wireless_input() -> [u8; 29] {
    let mut packet = [0u8; 29];
    for (slot, value) in packet.iter_mut().zip([
        0x00, 0x01, 0x00, 0xF0, 0x00, 0x13, 0x10, 0x00, 0x80, 0x40, 0x34, 0x12, 0xCC, 0xED,
    ]) {
        *slot = value;
    }
    packet
}

fn ps4_extended() -> [u8; 78] {
    let mut report = [0u8; 78];
    for (slot, value) in report
        .iter_mut()
        .zip([0x11, 0xC0, 0x00, 0x80, 0x7F, 0x81, 0x80, 0x28, 0x05, 0x01, 0x00, 0x40])
    {
        *slot = value;
    }
    report
}

fn bench_decode_xboxone(c: &mut Criterion) {
    let mut state = CanonicalState::default();
    let reports = [xboxone_report(1), xboxone_report(2)];
    let mut n = 0usize;

    c.bench_function("decode_xboxone", |b| {
        b.iter(|| {
            n ^= 1;
            let report = reports.get(n).map_or(&[][..], |r| &r[..]);
            dispatch::decode_raw(
                ControllerFamily::XboxOne,
                std::hint::black_box(report),
                std::hint::black_box(&mut state),
            )
        })
    });
}

fn bench_decode_360_wireless(c: &mut Criterion) {
    let mut state = CanonicalState::default();
    let packet = wireless_input();

    c.bench_function("decode_360_wireless", |b| {
        b.iter(|| {
            dispatch::decode_raw(
                ControllerFamily::Xbox360Wireless,
                std::hint::black_box(&packet),
                std::hint::black_box(&mut state),
            )
        })
    });
}

fn bench_decode_ps4_extended(c: &mut Criterion) {
    let mut state = CanonicalState::default();
    let report = ps4_extended();

    c.bench_function("decode_ps4_extended", |b| {
        b.iter(|| {
            dispatch::decode_bluetooth(
                ControllerFamily::Ps4,
                std::hint::black_box(&report),
                std::hint::black_box(&mut state),
            )
        })
    });
}

fn bench_receive_path(c: &mut Criterion) {
    let interface = [
        0x09, 0x04, 0x00, 0x00, 0x02, 0xFF, 0x47, 0xD0, 0x00, 0x07, 0x05, 0x02, 0x03, 0x40, 0x00,
        0x04, 0x07, 0x05, 0x82, 0x03, 0x40, 0x00, 0x04,
    ];
    let mut conn = GamepadConnection::default();
    let mut transport = MockTransport::new();
    if conn
        .claim_usb(
            UsbDeviceInfo::new(0x045E, 0x02D1),
            &interface,
            &mut transport,
            &mut MockTimer::new(),
        )
        .is_err()
    {
        return;
    }
    let report = xboxone_report(7);

    c.bench_function("receive_path_xboxone", |b| {
        b.iter(|| {
            transport.clear();
            let changes = conn.on_receive_complete(std::hint::black_box(&report), &mut transport);
            conn.drain_event();
            changes
        })
    });
}

criterion_group!(
    benches,
    bench_decode_xboxone,
    bench_decode_360_wireless,
    bench_decode_ps4_extended,
    bench_receive_path,
);

criterion_main!(benches);
