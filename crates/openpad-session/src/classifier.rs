//! Attach-time family classification.
//!
//! Three sources feed it: the interface descriptor block (Xbox pads), the
//! vendor/product table (HID-compliant pads) and the Bluetooth class of
//! device plus remote name. Everything here is pure; the session stores the
//! result as the connection's family.

use openpad_errors::GamepadError;
use openpad_gamepad_types::ControllerFamily;
use openpad_hid_sony_protocol::{self as sony, SONY_VENDOR_ID};
use openpad_hid_xbox_protocol as xbox;
use tracing::{debug, trace};

/// One row of the identity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRecord {
    pub vendor_id: u16,
    pub product_id: u16,
    pub family: ControllerFamily,
    /// Also claimable through the generic HID collection path.
    pub hid_device: bool,
}

const fn sony(product_id: u16, family: ControllerFamily) -> IdentityRecord {
    IdentityRecord {
        vendor_id: SONY_VENDOR_ID,
        product_id,
        family,
        hid_device: true,
    }
}

/// Known pads by USB identity. First exact match wins.
pub const IDENTITY_TABLE: [IdentityRecord; 5] = [
    sony(sony::product_ids::DUALSHOCK3, ControllerFamily::Ps3),
    sony(sony::product_ids::NAVIGATION, ControllerFamily::Ps3),
    sony(sony::product_ids::MOTION, ControllerFamily::Ps3Motion),
    sony(sony::product_ids::DUALSHOCK4, ControllerFamily::Ps4),
    sony(sony::product_ids::DUALSHOCK4_V2, ControllerFamily::Ps4),
];

/// Table lookup. With `exclude_hid`, rows that the HID collection path can
/// claim resolve to `Unknown` so a class-level claim does not shadow it.
pub fn lookup_identity(vendor_id: u16, product_id: u16, exclude_hid: bool) -> ControllerFamily {
    let Some(record) = IDENTITY_TABLE
        .iter()
        .find(|r| r.vendor_id == vendor_id && r.product_id == product_id)
    else {
        return ControllerFamily::Unknown;
    };
    trace!(
        vendor_id = format_args!("{vendor_id:04X}"),
        product_id = format_args!("{product_id:04X}"),
        family = %record.family,
        "identity table match"
    );
    if exclude_hid && record.hid_device {
        ControllerFamily::Unknown
    } else {
        record.family
    }
}

/// Classify a USB interface for a class-level claim.
///
/// Descriptor signatures are tried first, then the identity table with HID
/// rows excluded.
///
/// # Errors
///
/// `MalformedDescriptor` when the block is short or has fewer than two
/// endpoints, `ClassificationRejected` when nothing matches.
pub fn classify_usb(
    vendor_id: u16,
    product_id: u16,
    descriptors: &[u8],
) -> Result<ControllerFamily, GamepadError> {
    if let Some(family) = xbox::probe_interface(descriptors)? {
        debug!(%family, "interface signature matched");
        return Ok(family);
    }
    match lookup_identity(vendor_id, product_id, true) {
        ControllerFamily::Unknown => Err(GamepadError::rejected(vendor_id, product_id)),
        family => Ok(family),
    }
}

/// Peripheral major class (0x05, optionally with the limited discoverable
/// bit 0x20 set) and a joystick or gamepad minor class.
pub fn bluetooth_class_matches(class_of_device: u32) -> bool {
    let major = class_of_device & 0xFF00;
    (major == 0x2500 || major == 0x0500) && class_of_device & 0x3C == 0x08
}

/// Family for a Bluetooth remote name, by prefix.
pub fn family_from_name(name: &str) -> Option<ControllerFamily> {
    sony::family_from_remote_name(name).or_else(|| {
        name.starts_with(XBOX_WIRELESS_NAME)
            .then_some(ControllerFamily::XboxOne)
    })
}

const XBOX_WIRELESS_NAME: &str = "Xbox Wireless";

/// Link-setup quirk remembered for a Bluetooth pad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BluetoothQuirk {
    #[default]
    None,
    /// Streaming needs an explicit request once the link is up (DualShock 4).
    NeedConnect,
    /// The pad opens its HID channels with non-standard IDs (PS3 family).
    Ps3ChannelIds,
}

impl BluetoothQuirk {
    pub fn for_family(family: ControllerFamily) -> Self {
        match family {
            ControllerFamily::Ps4 => BluetoothQuirk::NeedConnect,
            ControllerFamily::Ps3 | ControllerFamily::Ps3Motion => BluetoothQuirk::Ps3ChannelIds,
            _ => BluetoothQuirk::None,
        }
    }
}

/// Outcome of a Bluetooth claim probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BluetoothVerdict {
    pub family: ControllerFamily,
    pub quirk: BluetoothQuirk,
}

/// Decide whether a Bluetooth device is ours.
///
/// A matching class of device is accepted even before the name is known.
/// Otherwise only PS3-family names are accepted, since those pads advertise
/// an unhelpful class.
pub fn classify_bluetooth(class_of_device: u32, remote_name: Option<&str>) -> Option<BluetoothVerdict> {
    let named = remote_name.and_then(family_from_name);
    if bluetooth_class_matches(class_of_device) {
        return Some(BluetoothVerdict {
            family: named.unwrap_or_default(),
            quirk: BluetoothQuirk::None,
        });
    }
    match named {
        Some(family @ (ControllerFamily::Ps3 | ControllerFamily::Ps3Motion)) => {
            Some(BluetoothVerdict {
                family,
                quirk: BluetoothQuirk::Ps3ChannelIds,
            })
        }
        _ => None,
    }
}

/// Where a classification request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyInput<'a> {
    Usb {
        vendor_id: u16,
        product_id: u16,
        descriptors: Option<&'a [u8]>,
    },
    Bluetooth {
        class_of_device: u32,
        remote_name: Option<&'a str>,
    },
}

/// Single entry point over every source. Never fails; unresolved input is
/// `Unknown`.
pub fn classify(input: ClassifyInput<'_>) -> ControllerFamily {
    match input {
        ClassifyInput::Usb {
            vendor_id,
            product_id,
            descriptors: Some(descriptors),
        } => classify_usb(vendor_id, product_id, descriptors).unwrap_or_default(),
        ClassifyInput::Usb {
            vendor_id,
            product_id,
            descriptors: None,
        } => lookup_identity(vendor_id, product_id, false),
        ClassifyInput::Bluetooth {
            class_of_device,
            remote_name,
        } => classify_bluetooth(class_of_device, remote_name)
            .map(|v| v.family)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_identity_row_resolves() {
        for record in IDENTITY_TABLE {
            assert_eq!(
                lookup_identity(record.vendor_id, record.product_id, false),
                record.family
            );
            assert_eq!(
                lookup_identity(record.vendor_id, record.product_id, true),
                ControllerFamily::Unknown
            );
        }
        assert_eq!(lookup_identity(0x054C, 0xFFFF, false), ControllerFamily::Unknown);
    }

    #[test]
    fn test_bluetooth_class_bits() {
        assert!(bluetooth_class_matches(0x002508));
        assert!(bluetooth_class_matches(0x000508));
        assert!(!bluetooth_class_matches(0x002540)); // keyboard
        assert!(!bluetooth_class_matches(0x000404)); // headset
    }

    #[test]
    fn test_name_prefixes() {
        assert_eq!(family_from_name("Wireless Controller"), Some(ControllerFamily::Ps4));
        assert_eq!(family_from_name("PLAYSTATION(R)3 Controller"), Some(ControllerFamily::Ps3));
        assert_eq!(family_from_name("Navigation Controller"), Some(ControllerFamily::Ps3));
        assert_eq!(family_from_name("Motion Controller"), Some(ControllerFamily::Ps3Motion));
        assert_eq!(family_from_name("Xbox Wireless Controller"), Some(ControllerFamily::XboxOne));
        assert_eq!(family_from_name("Pro Controller"), None);
    }

    #[test]
    fn test_bluetooth_claim_rules() {
        let by_class = classify_bluetooth(0x002508, None);
        assert_eq!(
            by_class,
            Some(BluetoothVerdict {
                family: ControllerFamily::Unknown,
                quirk: BluetoothQuirk::None
            })
        );
        let ps3 = classify_bluetooth(0, Some("PLAYSTATION(R)3 Controller"));
        assert_eq!(ps3.map(|v| v.quirk), Some(BluetoothQuirk::Ps3ChannelIds));
        assert_eq!(classify_bluetooth(0, Some("Wireless Controller")), None);
    }

    #[test]
    fn test_classify_usb_rejects_plain_hid() {
        let mut block = [0u8; 23];
        block[4] = 2;
        assert_eq!(
            classify_usb(0x054C, 0x05C4, &block),
            Err(GamepadError::rejected(0x054C, 0x05C4))
        );
        assert!(matches!(
            classify_usb(0x045E, 0x02EA, &block[..9]),
            Err(GamepadError::MalformedDescriptor(_))
        ));
    }

    #[test]
    fn test_classify_entry_point() {
        assert_eq!(
            classify(ClassifyInput::Usb {
                vendor_id: 0x054C,
                product_id: 0x09CC,
                descriptors: None
            }),
            ControllerFamily::Ps4
        );
        assert_eq!(
            classify(ClassifyInput::Bluetooth {
                class_of_device: 0x002508,
                remote_name: Some("Motion Controller")
            }),
            ControllerFamily::Ps3Motion
        );
    }
}
