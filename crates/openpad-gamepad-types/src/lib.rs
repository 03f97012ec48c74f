//! Family-independent gamepad types.
//!
//! Every supported controller decodes into the same [`CanonicalState`]: a
//! 32-bit button set plus 64 integer channels with validity and change
//! tracking. Feedback requests are held in a [`FeedbackState`] until a
//! family encoder turns them into bytes.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod family;
pub mod feedback;
pub mod state;

pub use family::{ControllerFamily, UnknownFamily};
pub use feedback::FeedbackState;
pub use state::{CanonicalState, ChangeSet};

/// Channels fed by the Generic Desktop X..=0x39 usages.
pub const STANDARD_AXIS_COUNT: usize = 10;
/// Total channel capacity of a [`CanonicalState`].
pub const TOTAL_AXIS_COUNT: usize = 64;
/// Width of the button set.
pub const BUTTON_COUNT: usize = 32;
