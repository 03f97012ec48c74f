//! Common abstractions for OpenPad controller drivers.
//!
//! Controller drivers never own their transport. Every operation that puts
//! bytes on the wire borrows a [`Transport`] (and, for periodic work, a
//! [`TimerService`]) from the host stack for the duration of the call.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod report_reader;
pub mod transport;
pub mod usage;

pub mod mock;

pub use device_info::*;
pub use report_reader::*;
pub use transport::*;
pub use usage::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HidCommonError {
    #[error("Hex string has odd length {0}")]
    OddHexLength(usize),

    #[error("Invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit { digit: char, position: usize },

    #[error("Bluetooth address must be 6 bytes, got {0}")]
    InvalidAddressLength(usize),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

/// Parse a Bluetooth device address written as `AA:BB:CC:DD:EE:FF`
/// (colons optional) into the on-wire byte order, least significant byte
/// first.
pub fn parse_bdaddr(text: &str) -> HidCommonResult<[u8; 6]> {
    let digits: String = text.chars().filter(|c| *c != ':' && *c != '-').collect();
    let bytes = hex::decode(&digits).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => HidCommonError::InvalidHexDigit {
            digit: c,
            position: index,
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            HidCommonError::OddHexLength(digits.len())
        }
    })?;
    let mut out: [u8; 6] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| HidCommonError::InvalidAddressLength(bytes.len()))?;
    // Written most significant byte first, stored least significant first.
    out.reverse();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = HidCommonError::OddHexLength(3);
        assert_eq!(format!("{}", err), "Hex string has odd length 3");

        let err = HidCommonError::InvalidAddressLength(4);
        assert_eq!(format!("{}", err), "Bluetooth address must be 6 bytes, got 4");
    }

    #[test]
    fn test_parse_bdaddr() -> Result<(), Box<dyn std::error::Error>> {
        let addr = parse_bdaddr("00:1A:7D:DA:71:13")?;
        assert_eq!(addr, [0x13, 0x71, 0xDA, 0x7D, 0x1A, 0x00]);

        let addr = parse_bdaddr("001a7dda7113")?;
        assert_eq!(addr, [0x13, 0x71, 0xDA, 0x7D, 0x1A, 0x00]);
        Ok(())
    }

    #[test]
    fn test_parse_bdaddr_rejects_garbage() {
        assert_eq!(parse_bdaddr("00:1A:7D"), Err(HidCommonError::InvalidAddressLength(3)));
        assert_eq!(parse_bdaddr("0:1A"), Err(HidCommonError::OddHexLength(3)));
        assert!(matches!(
            parse_bdaddr("00:1A:7D:DA:71:1G"),
            Err(HidCommonError::InvalidHexDigit { digit: 'G', position: 11 })
        ));
    }

    #[test]
    fn test_parse_bdaddr_accepts_dashes_and_lower_case() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(parse_bdaddr("00-1b-dc-0f-aa-58")?, [0x58, 0xAA, 0x0F, 0xDC, 0x1B, 0x00]);
        Ok(())
    }
}
