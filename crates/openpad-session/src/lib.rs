//! Controller sessions for OpenPad.
//!
//! Ties the protocol crates together: attach-time classification, the
//! per-family decode/encode tables, HID collection ingestion and the
//! connection state machine that drives a [`Transport`] and a
//! [`TimerService`] supplied by the host.
//!
//! ```
//! use openpad_hid_common::mock::MockTransport;
//! use openpad_hid_common::{UsbDeviceInfo, make_usage, top_usage};
//! use openpad_session::GamepadConnection;
//!
//! let mut conn = GamepadConnection::default();
//! let pad = UsbDeviceInfo::new(0x054C, 0x05C4);
//! conn.claim_collection(pad, top_usage::GAMEPAD)?;
//!
//! conn.hid_input_begin();
//! conn.hid_input_data(make_usage(0x0009, 5), 1);
//! assert!(conn.hid_input_end());
//!
//! let snapshot = conn.drain_event();
//! assert_eq!(snapshot.buttons(), 1 << 4);
//!
//! let mut transport = MockTransport::new();
//! assert!(conn.set_rumble(0x40, 0x80, 0, &mut transport));
//! # Ok::<(), openpad_errors::GamepadError>(())
//! ```
//!
//! [`Transport`]: openpad_hid_common::Transport
//! [`TimerService`]: openpad_hid_common::TimerService

#![deny(static_mut_refs)]

pub mod adapter;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod notification;
pub mod session;

pub use adapter::{HidReportAdapter, UsageTarget, map_usage};
pub use classifier::{
    BluetoothQuirk, BluetoothVerdict, ClassifyInput, IDENTITY_TABLE, IdentityRecord, classify,
    classify_bluetooth, classify_usb, lookup_identity,
};
pub use config::SessionConfig;
pub use dispatch::{
    AxisWindow, Command, FamilyProfile, LinkKind, MAX_PACKET_LEN, Packet, RawOutcome, Reaction,
    Route, profile,
};
pub use notification::EventLatch;
pub use session::{GamepadConnection, MAX_RAW_SEND, SessionPhase};
