//! Command argument definitions and handlers

pub mod classify;
pub mod config;
pub mod decode;
pub mod feedback;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use openpad_gamepad_types::ControllerFamily;
use openpad_session::LinkKind;

use crate::parse::{parse_class_of_device, parse_hex_u16};

/// How the pad is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkArg {
    /// Interface claimed directly (Xbox families)
    Usb,
    /// Generic HID collection (Sony pads on USB)
    Hid,
    /// Paired over Bluetooth (Sony pads)
    Bluetooth,
}

impl From<LinkArg> for LinkKind {
    fn from(link: LinkArg) -> Self {
        match link {
            LinkArg::Usb => LinkKind::UsbClass,
            LinkArg::Hid => LinkKind::HidCollection,
            LinkArg::Bluetooth => LinkKind::Bluetooth,
        }
    }
}

/// Link a family is normally attached with when `--link` is omitted.
pub fn default_link(family: ControllerFamily) -> LinkKind {
    if family.is_playstation() {
        LinkKind::HidCollection
    } else {
        LinkKind::UsbClass
    }
}

/// Readable link name for messages.
pub fn link_name(link: LinkKind) -> &'static str {
    match link {
        LinkKind::UsbClass => "usb",
        LinkKind::HidCollection => "hid",
        LinkKind::Bluetooth => "bluetooth",
    }
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// USB vendor ID (hex)
    #[arg(long, value_parser = parse_hex_u16, requires = "pid")]
    pub vid: Option<u16>,

    /// USB product ID (hex)
    #[arg(long, value_parser = parse_hex_u16, requires = "vid")]
    pub pid: Option<u16>,

    /// Interface descriptor block (hex) for a class-level claim
    #[arg(long, requires = "vid")]
    pub descriptor: Option<String>,

    /// Bluetooth class of device (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_class_of_device, conflicts_with = "vid")]
    pub bt_class: Option<u32>,

    /// Bluetooth remote name
    #[arg(long, conflicts_with = "vid")]
    pub bt_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Controller family whose decoder runs
    #[arg(short, long)]
    pub family: ControllerFamily,

    /// Reports as hex strings, one argument per report
    #[arg(value_name = "HEX")]
    pub reports: Vec<String>,

    /// File with one hex report per line; '#' starts a comment
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Treat reports as Bluetooth interrupt-channel data
    #[arg(long)]
    pub bluetooth: bool,
}

#[derive(Subcommand, Debug)]
pub enum FeedbackCommands {
    /// Encode a rumble request
    Rumble {
        #[arg(short, long)]
        family: ControllerFamily,

        #[arg(long, value_enum)]
        link: Option<LinkArg>,

        /// Small / left motor strength
        low: u8,

        /// Big / right motor strength
        high: u8,

        /// Duration in pad ticks (PS3 only)
        #[arg(long, default_value_t = 0)]
        timeout: u8,
    },

    /// Encode an indicator request; Xbox pads read the blue value as an LED pattern
    Indicator {
        #[arg(short, long)]
        family: ControllerFamily,

        #[arg(long, value_enum)]
        link: Option<LinkArg>,

        red: u8,
        green: u8,
        blue: u8,
    },

    /// Encode a Bluetooth pairing request for a PS3 or Move controller
    Pair {
        #[arg(short, long)]
        family: ControllerFamily,

        /// Host Bluetooth address (AA:BB:CC:DD:EE:FF)
        address: String,
    },

    /// Show the packets sent when a pad starts streaming
    Init {
        #[arg(short, long)]
        family: ControllerFamily,

        /// USB vendor ID (hex)
        #[arg(long, value_parser = parse_hex_u16, default_value = "045e")]
        vid: u16,

        /// USB product ID (hex)
        #[arg(long, value_parser = parse_hex_u16, default_value = "0000")]
        pid: u16,

        /// Show the Bluetooth connect sequence instead of the USB one
        #[arg(long)]
        bluetooth: bool,
    },

    /// Show the wireless 360 keep-alive bursts
    Keepalive {
        /// Number of timer ticks to render
        #[arg(long, default_value_t = 2)]
        ticks: u8,
    },

    /// Encode a chatpad LED command (wireless 360)
    ChatpadLed {
        #[arg(value_enum)]
        led: ChatpadLedArg,

        /// Turn the LED on (off when omitted)
        #[arg(long)]
        on: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChatpadLedArg {
    CapsLock,
    Green,
    Orange,
    Messenger,
}

impl From<ChatpadLedArg> for openpad_hid_xbox_protocol::ChatpadLed {
    fn from(led: ChatpadLedArg) -> Self {
        use openpad_hid_xbox_protocol::ChatpadLed;
        match led {
            ChatpadLedArg::CapsLock => ChatpadLed::CapsLock,
            ChatpadLedArg::Green => ChatpadLed::Green,
            ChatpadLedArg::Orange => ChatpadLed::Orange,
            ChatpadLedArg::Messenger => ChatpadLed::Messenger,
        }
    }
}
