//! Sony USB IDs, report IDs and Bluetooth HID transaction headers.

/// Sony Interactive Entertainment USB vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// Known Sony controller product IDs.
pub mod product_ids {
    /// DualShock 3 / SIXAXIS.
    pub const DUALSHOCK3: u16 = 0x0268;
    /// PlayStation Move Navigation controller (reports like a DualShock 3).
    pub const NAVIGATION: u16 = 0x042F;
    /// PlayStation Move motion controller.
    pub const MOTION: u16 = 0x03D5;
    /// DualShock 4, first revision (CUH-ZCT1).
    pub const DUALSHOCK4: u16 = 0x05C4;
    /// DualShock 4, second revision (CUH-ZCT2).
    pub const DUALSHOCK4_V2: u16 = 0x09CC;
}

/// Report IDs.
pub mod report_ids {
    /// Plain Bluetooth input report.
    pub const BT_INPUT: u8 = 0x01;
    /// DualShock 4 extended Bluetooth input report.
    pub const BT_EXTENDED_INPUT: u8 = 0x11;
    /// DualShock 3 output report (rumble + LEDs).
    pub const PS3_OUTPUT: u8 = 0x01;
    /// Move output report (sphere colour + rumble).
    pub const PS3_MOTION_OUTPUT: u8 = 0x02;
    /// DualShock 4 USB output report.
    pub const PS4_USB_OUTPUT: u8 = 0x05;
    /// DualShock 4 calibration feature report; reading it over Bluetooth
    /// switches the pad to extended reports.
    pub const PS4_CALIBRATION: u8 = 0x02;
    /// DualShock 3 operational-mode feature report.
    pub const PS3_ENABLE: u8 = 0xF4;
    /// DualShock 3 pairing-address feature report.
    pub const PS3_PAIRING: u8 = 0xF5;
    /// Move pairing-address feature report.
    pub const PS3_MOTION_PAIRING: u8 = 0x05;
}

/// HID-over-L2CAP transaction header bytes (transaction type | report type).
pub mod bt_transaction {
    /// GET_REPORT, feature.
    pub const GET_FEATURE: u8 = 0x43;
    /// SET_REPORT, output.
    pub const SET_OUTPUT: u8 = 0x52;
    /// SET_REPORT, feature.
    pub const SET_FEATURE: u8 = 0x53;
    /// DATA, output.
    pub const DATA_OUTPUT: u8 = 0xA2;
}

/// L2CAP channel the DualShock 4 expects its output on.
pub const PS4_OUTPUT_CHANNEL: u16 = 0x0040;

/// Bluetooth remote-name prefixes, checked in this order.
pub mod remote_names {
    pub const DUALSHOCK4: &str = "Wireless Controller";
    pub const DUALSHOCK3: &str = "PLAYSTATION(R)3";
    pub const NAVIGATION: &str = "Navigation Controller";
    pub const MOTION: &str = "Motion Controller";
}
