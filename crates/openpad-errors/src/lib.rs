//! Error taxonomy for OpenPad.
//!
//! Controller drivers fail in a small number of well-understood ways, and most
//! of them are not fatal:
//!
//! - [`GamepadError::ClassificationRejected`]: the device is not a controller we
//!   recognise; another driver may claim it.
//! - [`GamepadError::MalformedDescriptor`]: the interface looked like ours but the
//!   descriptor shape is wrong; the claim is rejected.
//! - [`GamepadError::TransferSubmissionFailed`]: the transport refused a send or
//!   receive; the packet is dropped and logged.
//! - [`GamepadError::BufferBoundsGuard`]: a usage or index mapped outside channel
//!   capacity; silently discarded.
//! - [`GamepadError::UnsupportedOperation`]: a feedback call the active family
//!   cannot express; reported as `false`.
//! - [`GamepadError::ResourceExhausted`]: pipe or buffer acquisition failed at
//!   claim time; the only error that aborts an otherwise valid claim.
//!
//! # Example
//!
//! ```
//! use openpad_errors::{DescriptorFault, GamepadError};
//!
//! let err = GamepadError::from(DescriptorFault::TooFewEndpoints { count: 1 });
//! assert!(err.rejects_claim());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod descriptor;

pub use common::{ErrorCategory, ErrorSeverity, GamepadError};
pub use descriptor::DescriptorFault;

/// A specialized `Result` type for OpenPad operations.
pub type Result<T> = std::result::Result<T, GamepadError>;
