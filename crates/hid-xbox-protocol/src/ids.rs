//! Microsoft USB IDs, interface signatures and command bytes.

/// Microsoft USB vendor ID.
pub const MICROSOFT_VENDOR_ID: u16 = 0x045E;

/// PDP (Performance Designed Products) vendor ID; their Xbox One pads need
/// extra init packets.
pub const PDP_VENDOR_ID: u16 = 0x0E6F;

/// Product IDs that change the init sequence.
pub mod product_ids {
    /// Xbox One S controller (returns from Bluetooth mode on init).
    pub const XBOX_ONE_S: u16 = 0x02EA;
    /// Xbox Elite Series 2 controller.
    pub const XBOX_ELITE_2: u16 = 0x0B00;
}

/// Interface descriptor signatures, offsets into the interface block.
pub mod interface {
    /// `bNumEndpoints`.
    pub const NUM_ENDPOINTS_OFFSET: usize = 4;
    /// `bInterfaceClass`.
    pub const CLASS_OFFSET: usize = 5;
    /// `bInterfaceSubClass`.
    pub const SUBCLASS_OFFSET: usize = 6;
    /// `bInterfaceProtocol`.
    pub const PROTOCOL_OFFSET: usize = 7;

    /// Xbox 360 subclass (wired and wireless receiver).
    pub const XBOX360_SUBCLASS: u8 = 0x5D;
    pub const XBOX360_WIRED_PROTOCOL: u8 = 0x01;
    pub const XBOX360_WIRELESS_PROTOCOL: u8 = 0x81;

    /// Xbox One (GIP) subclass.
    pub const XBOXONE_SUBCLASS: u8 = 0x47;
    pub const XBOXONE_PROTOCOL: u8 = 0xD0;
    /// Both GIP endpoints poll at 4; Series X|S pads expose other interfaces
    /// with the same signature and different intervals.
    pub const XBOXONE_INTERVAL: u8 = 0x04;
    /// `bInterval` of the first and second endpoint descriptors.
    pub const XBOXONE_INTERVAL_OFFSETS: [usize; 2] = [15, 22];

    /// Original Xbox class and subclass.
    pub const DUKE_CLASS: u8 = 0x58;
    pub const DUKE_SUBCLASS: u8 = 0x42;
}

/// USB descriptor type and transfer type codes.
pub mod usb {
    pub const ENDPOINT_DESCRIPTOR_TYPE: u8 = 0x05;
    pub const ENDPOINT_DESCRIPTOR_LEN: u8 = 7;
    pub const INTERFACE_DESCRIPTOR_LEN: usize = 9;
    pub const TRANSFER_INTERRUPT: u8 = 0x03;
    pub const ENDPOINT_DIR_IN: u8 = 0x80;
    pub const MAX_INTERRUPT_PACKET: u8 = 64;
}

/// Input packet type bytes.
pub mod report_ids {
    /// Xbox One GIP input report.
    pub const XBOXONE_INPUT: u8 = 0x20;
    /// Xbox 360 / Duke input: `00 14`.
    pub const XBOX360_INPUT: [u8; 2] = [0x00, 0x14];
    /// Xbox 360 wired rumble status: `03 03 xx`.
    pub const XBOX360_RUMBLE_STATUS: [u8; 2] = [0x03, 0x03];
    /// Xbox 360 wired LED status: `01 03 xx`.
    pub const XBOX360_LED_STATUS: [u8; 2] = [0x01, 0x03];
    /// LED status value meaning "no valid pattern" (seen right after attach).
    pub const XBOX360_LED_INVALID: u8 = 0x0E;
}

/// Xbox 360 wireless receiver envelope bytes.
pub mod wireless {
    /// `b0` of a link status packet.
    pub const LINK_STATUS: u8 = 0x08;
    /// `b3` marker of status / end-of-events / info packets.
    pub const STATUS_MARKER: u8 = 0xF0;
    /// `b1` of an info packet.
    pub const INFO: u8 = 0x0F;
    /// `b1` of a chatpad handshake request.
    pub const CHATPAD_HANDSHAKE: u8 = 0xF8;
    /// `b1` flag: controller data present.
    pub const CONTROLLER_DATA: u8 = 0x01;
    /// `b1` flag: chatpad data present.
    pub const CHATPAD_DATA: u8 = 0x02;
    /// `b5` marker of a controller input block.
    pub const CONTROLLER_INPUT: u8 = 0x13;
    /// Controller-status packet: `b3 & MASK != 0 && b4 >= MIN`.
    pub const CONTROLLER_STATUS_MASK: u8 = 0x13;
    pub const CONTROLLER_STATUS_MIN: u8 = 0x22;
    /// Offset of the chatpad sub-report.
    pub const CHATPAD_OFFSET: usize = 24;
    /// Chatpad sub-report type bytes following `F0`.
    pub const CHATPAD_INIT_NEEDED: u8 = 0x03;
    pub const CHATPAD_LED_STATUS: u8 = 0x04;
}
