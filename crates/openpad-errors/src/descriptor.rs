//! USB interface descriptor faults found while probing a class-specific claim.

/// Why an interface descriptor block could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorFault {
    /// Descriptor block shorter than interface + two endpoint descriptors.
    #[error("descriptor block too short: {len} bytes")]
    TooShort {
        /// Length of the descriptor block handed to the probe
        len: usize,
    },

    /// Interface advertises fewer than two endpoints.
    #[error("interface has {count} endpoint(s), need at least 2")]
    TooFewEndpoints {
        /// `bNumEndpoints` from the interface descriptor
        count: u8,
    },

    /// A descriptor where an endpoint descriptor was expected.
    #[error("unexpected descriptor at offset {offset}: length {length}, type {kind:#04x}")]
    UnexpectedDescriptor {
        /// Offset into the descriptor block
        offset: usize,
        /// `bLength` found at that offset
        length: u8,
        /// `bDescriptorType` found at that offset
        kind: u8,
    },

    /// No usable interrupt IN/OUT endpoint pair.
    #[error("interface is missing an interrupt IN or OUT endpoint")]
    MissingEndpoint,
}

impl DescriptorFault {
    /// Offset of the offending descriptor, when the fault points at one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DescriptorFault::UnexpectedDescriptor { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
