//! Event-ready latch between the decoders and the consumer.

use openpad_gamepad_types::ChangeSet;

/// Pending-event flag of one connection.
///
/// A decode raises it only when buttons or a notify-masked channel changed.
/// The consumer clears it by draining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventLatch {
    pending: bool,
    force_next: bool,
}

impl EventLatch {
    /// Raise on the next commit even if nothing changed.
    pub fn arm_initial(&mut self) {
        self.force_next = true;
    }

    /// Commit one decode. Returns whether the latch is now raised.
    pub fn raise_if(&mut self, changes: ChangeSet, notify_mask: u64) -> bool {
        if std::mem::take(&mut self.force_next) || changes.raises_event(notify_mask) {
            self.pending = true;
        }
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
