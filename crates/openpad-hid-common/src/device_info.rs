//! Identity of an attached controller as reported by the host stack.

use serde::{Deserialize, Serialize};

/// Identity strings and IDs captured when a device is claimed.
///
/// USB devices fill in the string descriptors the host fetched at
/// enumeration. Bluetooth devices carry the remote name as `product`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsbDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub serial_number: Option<String>,
}

impl UsbDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            ..Self::default()
        }
    }

    /// Identity of a Bluetooth peer: no IDs, remote name as product.
    pub fn from_remote_name(name: impl Into<String>) -> Self {
        Self::default().with_product(name)
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, name: impl Into<String>) -> Self {
        self.product = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    /// Whether two identities describe the same physical device.
    ///
    /// A serial number, when both sides carry one, must agree.
    pub fn same_device(&self, other: &UsbDeviceInfo) -> bool {
        if !self.matches(other.vendor_id, other.product_id) {
            return false;
        }
        match (&self.serial_number, &other.serial_number) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    pub fn display_name(&self) -> String {
        self.product
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_creation() {
        let info = UsbDeviceInfo::new(0x045e, 0x028e);
        assert_eq!(info.vendor_id, 0x045e);
        assert_eq!(info.product_id, 0x028e);
        assert!(info.matches(0x045e, 0x028e));
        assert!(!info.matches(0x045e, 0x02d1));
    }

    #[test]
    fn test_device_info_display_name() {
        let info = UsbDeviceInfo::new(0x054c, 0x0268).with_product("PLAYSTATION(R)3 Controller");
        assert_eq!(info.display_name(), "PLAYSTATION(R)3 Controller");

        let info = UsbDeviceInfo::new(0x054c, 0x0268).with_manufacturer("Sony");
        assert_eq!(info.display_name(), "Sony");

        let info = UsbDeviceInfo::new(0x054c, 0x0268);
        assert_eq!(info.display_name(), "054c:0268");
    }

    #[test]
    fn test_same_device_checks_serial() {
        let a = UsbDeviceInfo::new(0x054c, 0x05c4).with_serial("A1");
        let b = UsbDeviceInfo::new(0x054c, 0x05c4).with_serial("B2");
        let anon = UsbDeviceInfo::new(0x054c, 0x05c4);

        assert!(a.same_device(&a.clone()));
        assert!(!a.same_device(&b));
        assert!(a.same_device(&anon));
        assert!(!a.same_device(&UsbDeviceInfo::new(0x054c, 0x09cc)));
    }

    #[test]
    fn test_remote_name_identity() {
        let info = UsbDeviceInfo::from_remote_name("Wireless Controller");
        assert_eq!(info.vendor_id, 0);
        assert_eq!(info.product.as_deref(), Some("Wireless Controller"));
    }
}
