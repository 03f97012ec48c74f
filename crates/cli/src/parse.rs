//! Argument parsers for hex-heavy input.

use crate::error::CliError;

/// Parse whitespace/colon separated hex bytes, with or without `0x` prefixes.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, CliError> {
    let compact: String = text
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let chunk = chunk
                .strip_prefix("0x")
                .or_else(|| chunk.strip_prefix("0X"))
                .unwrap_or(chunk);
            if chunk.len() == 1 {
                format!("0{chunk}")
            } else {
                chunk.to_string()
            }
        })
        .collect();
    hex::decode(&compact).map_err(|e| CliError::InvalidHex(format!("'{}': {e}", text.trim())))
}

/// Parse a 16-bit identifier written in hex (`054c`, `0x054C`).
pub fn parse_hex_u16(text: &str) -> Result<u16, String> {
    let digits = text
        .trim()
        .strip_prefix("0x")
        .or_else(|| text.trim().strip_prefix("0X"))
        .unwrap_or(text.trim());
    u16::from_str_radix(digits, 16).map_err(|e| format!("'{text}' is not a 16-bit hex value: {e}"))
}

/// Parse a 32-bit class of device, hex (`0x002508`) or decimal.
pub fn parse_class_of_device(text: &str) -> Result<u32, String> {
    let trimmed = text.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => trimmed.parse::<u32>(),
    };
    parsed.map_err(|e| format!("'{text}' is not a class of device: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_bytes_accept_common_spellings() -> Result<(), CliError> {
        assert_eq!(parse_hex_bytes("20 00 01 0e")?, vec![0x20, 0x00, 0x01, 0x0E]);
        assert_eq!(parse_hex_bytes("0x20,0x0,0xff")?, vec![0x20, 0x00, 0xFF]);
        assert_eq!(parse_hex_bytes("de:ad:be:ef")?, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(parse_hex_bytes("01020304")?, vec![1, 2, 3, 4]);
        assert_eq!(parse_hex_bytes("")?, Vec::<u8>::new());
        Ok(())
    }

    #[test]
    fn test_hex_bytes_reject_garbage() {
        assert!(matches!(parse_hex_bytes("zz 01"), Err(CliError::InvalidHex(_))));
        assert!(matches!(parse_hex_bytes("123"), Err(CliError::InvalidHex(_))));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(parse_hex_u16("054c"), Ok(0x054C));
        assert_eq!(parse_hex_u16("0x02EA"), Ok(0x02EA));
        assert!(matches!(parse_hex_u16("10000"), Err(_)));
        assert_eq!(parse_class_of_device("0x002508"), Ok(0x2508));
        assert_eq!(parse_class_of_device("9480"), Ok(9480));
    }
}
