//! HID usage helpers for the generic joystick/gamepad collections.
//!
//! Usages travel as `page << 16 | id`, the form the host HID parser hands
//! to collection drivers.

/// Generic Desktop page.
pub const USAGE_PAGE_GENERIC_DESKTOP: u16 = 0x0001;
/// Button page.
pub const USAGE_PAGE_BUTTON: u16 = 0x0009;
/// First vendor-defined page.
pub const USAGE_PAGE_VENDOR: u16 = 0xFF00;

/// Top-level collection usages a gamepad driver may claim.
pub mod top_usage {
    pub const JOYSTICK: u32 = 0x0001_0004;
    pub const GAMEPAD: u32 = 0x0001_0005;
    pub const MULTI_AXIS: u32 = 0x0001_0008;
}

/// Highest button usage mapped into the 32-bit button set.
pub const MAX_BUTTON_USAGE: u16 = 32;
/// Generic Desktop X.
pub const AXIS_USAGE_FIRST: u16 = 0x30;
/// Last Generic Desktop usage treated as a standard axis.
pub const AXIS_USAGE_LAST: u16 = 0x39;

pub const fn make_usage(page: u16, id: u16) -> u32 {
    ((page as u32) << 16) | id as u32
}

pub const fn usage_page(usage: u32) -> u16 {
    (usage >> 16) as u16
}

pub const fn usage_id(usage: u32) -> u16 {
    (usage & 0xFFFF) as u16
}

pub fn is_claimable_top_usage(usage: u32) -> bool {
    matches!(
        usage,
        top_usage::JOYSTICK | top_usage::GAMEPAD | top_usage::MULTI_AXIS
    )
}

/// Bit index in the button set for a button-page usage, if in range.
pub fn standard_button_bit(page: u16, id: u16) -> Option<u32> {
    if page == USAGE_PAGE_BUTTON && (1..=MAX_BUTTON_USAGE).contains(&id) {
        Some(u32::from(id) - 1)
    } else {
        None
    }
}

/// Channel index for a Generic Desktop axis usage, if in range.
pub fn standard_axis_index(page: u16, id: u16) -> Option<usize> {
    if page == USAGE_PAGE_GENERIC_DESKTOP && (AXIS_USAGE_FIRST..=AXIS_USAGE_LAST).contains(&id) {
        Some(usize::from(id - AXIS_USAGE_FIRST))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_split() {
        let u = make_usage(0xFF00, 0x21);
        assert_eq!(u, 0xFF00_0021);
        assert_eq!(usage_page(u), 0xFF00);
        assert_eq!(usage_id(u), 0x21);
    }

    #[test]
    fn test_top_usage_filter() {
        assert!(is_claimable_top_usage(0x10004));
        assert!(is_claimable_top_usage(0x10005));
        assert!(is_claimable_top_usage(0x10008));
        assert!(!is_claimable_top_usage(0x10002)); // mouse
        assert!(!is_claimable_top_usage(0x10006)); // keyboard
    }

    #[test]
    fn test_standard_buttons() {
        assert_eq!(standard_button_bit(9, 1), Some(0));
        assert_eq!(standard_button_bit(9, 5), Some(4));
        assert_eq!(standard_button_bit(9, 32), Some(31));
        assert_eq!(standard_button_bit(9, 0), None);
        assert_eq!(standard_button_bit(9, 33), None);
        assert_eq!(standard_button_bit(1, 5), None);
    }

    #[test]
    fn test_standard_axes() {
        assert_eq!(standard_axis_index(1, 0x30), Some(0));
        assert_eq!(standard_axis_index(1, 0x39), Some(9));
        assert_eq!(standard_axis_index(1, 0x3A), None);
        assert_eq!(standard_axis_index(1, 0x2F), None);
        assert_eq!(standard_axis_index(9, 0x30), None);
    }
}
