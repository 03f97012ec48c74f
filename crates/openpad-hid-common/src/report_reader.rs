//! Bounds-checked field access over raw report bytes.
//!
//! Every accessor returns `None` when the field would run past the end of
//! the buffer, so decoders can treat short reports as "no update" with `?`.

#[derive(Debug, Clone, Copy)]
pub struct ReportReader<'a> {
    buffer: &'a [u8],
}

impl<'a> ReportReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.buffer
    }

    pub fn u8_at(&self, offset: usize) -> Option<u8> {
        self.buffer.get(offset).copied()
    }

    pub fn u16_le_at(&self, offset: usize) -> Option<u16> {
        let lo = self.u8_at(offset)?;
        let hi = self.u8_at(offset.checked_add(1)?)?;
        Some(u16::from_le_bytes([lo, hi]))
    }

    pub fn i16_le_at(&self, offset: usize) -> Option<i16> {
        self.u16_le_at(offset).map(|v| v as i16)
    }

    /// Three bytes little-endian into the low 24 bits of a `u32`.
    pub fn u24_le_at(&self, offset: usize) -> Option<u32> {
        let b0 = self.u8_at(offset)?;
        let b1 = self.u8_at(offset.checked_add(1)?)?;
        let b2 = self.u8_at(offset.checked_add(2)?)?;
        Some(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    pub fn slice(&self, offset: usize, count: usize) -> Option<&'a [u8]> {
        self.buffer.get(offset..offset.checked_add(count)?)
    }

    /// Sub-reader starting at `offset`; empty when past the end.
    pub fn skip(&self, offset: usize) -> ReportReader<'a> {
        ReportReader::new(self.buffer.get(offset..).unwrap_or(&[]))
    }
}

/// Render bytes as space-separated upper-case hex for trace logs.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{b:02X}"));
    }
    out
}
