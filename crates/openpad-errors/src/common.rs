//! Top-level error type, categories and severities.

use crate::descriptor::DescriptorFault;
use std::fmt;

/// Error severity levels for categorizing error impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, nothing was lost
    Info = 0,
    /// A packet or request was dropped; the connection carries on
    Warning = 1,
    /// A claim or operation failed
    Error = 2,
    /// The connection cannot be established at all
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Broad grouping of [`GamepadError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Device identification and claim
    Claim = 0,
    /// Transport send/receive
    Transfer = 1,
    /// Channel or buffer index bounds
    Bounds = 2,
    /// Capability of the active controller family
    Capability = 3,
    /// Pipe and buffer allocation
    Resource = 4,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Claim => write!(f, "Claim"),
            ErrorCategory::Transfer => write!(f, "Transfer"),
            ErrorCategory::Bounds => write!(f, "Bounds"),
            ErrorCategory::Capability => write!(f, "Capability"),
            ErrorCategory::Resource => write!(f, "Resource"),
        }
    }
}

/// Errors produced by claim, decode and feedback paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GamepadError {
    /// Vendor/product or class/name did not match any supported controller.
    #[error("not a supported controller: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    ClassificationRejected {
        /// USB or Bluetooth vendor ID (0 when unknown)
        vendor_id: u16,
        /// USB or Bluetooth product ID (0 when unknown)
        product_id: u16,
    },

    /// Interface descriptor shape is unusable.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(#[from] DescriptorFault),

    /// Transport refused a submission.
    #[error("transfer submission failed: {what}")]
    TransferSubmissionFailed {
        /// Which transfer was refused
        what: &'static str,
    },

    /// A usage or index fell outside channel capacity.
    #[error("index {index} outside capacity {capacity}")]
    BufferBoundsGuard {
        /// Offending index
        index: usize,
        /// Capacity of the target buffer
        capacity: usize,
    },

    /// The active controller family cannot perform this operation.
    #[error("{operation} not supported by {family}")]
    UnsupportedOperation {
        /// Controller family name
        family: &'static str,
        /// Operation name
        operation: &'static str,
    },

    /// Pipe or buffer acquisition failed during a claim.
    #[error("resource exhausted: {resource}")]
    ResourceExhausted {
        /// Which resource could not be acquired
        resource: &'static str,
    },
}

impl GamepadError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GamepadError::ClassificationRejected { .. } | GamepadError::MalformedDescriptor(_) => {
                ErrorCategory::Claim
            }
            GamepadError::TransferSubmissionFailed { .. } => ErrorCategory::Transfer,
            GamepadError::BufferBoundsGuard { .. } => ErrorCategory::Bounds,
            GamepadError::UnsupportedOperation { .. } => ErrorCategory::Capability,
            GamepadError::ResourceExhausted { .. } => ErrorCategory::Resource,
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GamepadError::ClassificationRejected { .. } => ErrorSeverity::Info,
            GamepadError::MalformedDescriptor(_) => ErrorSeverity::Error,
            GamepadError::TransferSubmissionFailed { .. } => ErrorSeverity::Warning,
            GamepadError::BufferBoundsGuard { .. } => ErrorSeverity::Info,
            GamepadError::UnsupportedOperation { .. } => ErrorSeverity::Info,
            GamepadError::ResourceExhausted { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether this error means the device must not be claimed.
    pub fn rejects_claim(&self) -> bool {
        matches!(
            self,
            GamepadError::ClassificationRejected { .. }
                | GamepadError::MalformedDescriptor(_)
                | GamepadError::ResourceExhausted { .. }
        )
    }

    /// Whether a later attempt at the same operation might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GamepadError::TransferSubmissionFailed { .. })
    }

    /// Create a classification rejection.
    pub fn rejected(vendor_id: u16, product_id: u16) -> Self {
        GamepadError::ClassificationRejected {
            vendor_id,
            product_id,
        }
    }

    /// Create a transfer failure.
    pub fn transfer(what: &'static str) -> Self {
        GamepadError::TransferSubmissionFailed { what }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(family: &'static str, operation: &'static str) -> Self {
        GamepadError::UnsupportedOperation { family, operation }
    }

    /// Create a resource-exhaustion error.
    pub fn exhausted(resource: &'static str) -> Self {
        GamepadError::ResourceExhausted { resource }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Info.to_string(), "INFO");
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
        assert_eq!(ErrorSeverity::Error.to_string(), "ERROR");
        assert_eq!(ErrorSeverity::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(GamepadError::rejected(1, 2).category(), ErrorCategory::Claim);
        assert_eq!(
            GamepadError::from(DescriptorFault::MissingEndpoint).category(),
            ErrorCategory::Claim
        );
        assert_eq!(GamepadError::transfer("rx").category(), ErrorCategory::Transfer);
        assert_eq!(
            GamepadError::unsupported("Duke", "rumble").category(),
            ErrorCategory::Capability
        );
        assert_eq!(GamepadError::exhausted("pipe").category(), ErrorCategory::Resource);
    }

    #[test]
    fn test_rejects_claim() {
        assert!(GamepadError::rejected(0x045e, 0x028e).rejects_claim());
        assert!(GamepadError::exhausted("rx pipe").rejects_claim());
        assert!(!GamepadError::transfer("tx").rejects_claim());
        assert!(
            !GamepadError::BufferBoundsGuard {
                index: 70,
                capacity: 64
            }
            .rejects_claim()
        );
    }

    #[test]
    fn test_display_carries_ids() {
        let msg = GamepadError::rejected(0x054c, 0x0268).to_string();
        assert!(msg.contains("0x054c"));
        assert!(msg.contains("0x0268"));
    }
}
