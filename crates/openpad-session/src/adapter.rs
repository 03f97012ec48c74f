//! HID collection ingestion: `(usage, value)` triples bounded by report
//! begin/end markers.
//!
//! Values land in [`CanonicalState`] as they arrive, but the change set is
//! only handed back at the end marker so one report yields one commit.

use openpad_errors::GamepadError;
use openpad_gamepad_types::{CanonicalState, ChangeSet, STANDARD_AXIS_COUNT, TOTAL_AXIS_COUNT};
use openpad_hid_common::{standard_axis_index, standard_button_bit, usage_id, usage_page};
use tracing::trace;

use crate::dispatch::AxisWindow;

/// Where a usage lands in the canonical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTarget {
    /// Button bit, 0-based.
    Button(u32),
    /// Channel index.
    Axis(usize),
}

/// Map one usage through the standard pages and the family window.
///
/// Window channels past capacity are a [`GamepadError::BufferBoundsGuard`];
/// usages nobody claims are `Ok(None)`.
pub fn map_usage(window: &AxisWindow, usage: u32) -> Result<Option<UsageTarget>, GamepadError> {
    let (page, id) = (usage_page(usage), usage_id(usage));
    if let Some(bit) = standard_button_bit(page, id) {
        return Ok(Some(UsageTarget::Button(bit)));
    }
    if let Some(index) = standard_axis_index(page, id) {
        return Ok(Some(UsageTarget::Axis(index)));
    }
    let Some(offset) = window.offset_of(page, id) else {
        return Ok(None);
    };
    let index = STANDARD_AXIS_COUNT.saturating_add(offset);
    if index >= TOTAL_AXIS_COUNT {
        return Err(GamepadError::BufferBoundsGuard {
            index,
            capacity: TOTAL_AXIS_COUNT,
        });
    }
    Ok(Some(UsageTarget::Axis(index)))
}

/// Per-connection report assembler for the HID collection path.
#[derive(Debug, Clone, Copy)]
pub struct HidReportAdapter {
    window: AxisWindow,
    pending: ChangeSet,
    in_report: bool,
}

impl HidReportAdapter {
    pub fn new(window: AxisWindow) -> Self {
        Self {
            window,
            pending: ChangeSet::NONE,
            in_report: false,
        }
    }

    pub fn window(&self) -> &AxisWindow {
        &self.window
    }

    pub fn begin(&mut self) {
        self.pending = ChangeSet::NONE;
        self.in_report = true;
    }

    /// Apply one value. Out-of-capacity usages are discarded.
    pub fn value(&mut self, usage: u32, value: i32, state: &mut CanonicalState) {
        match map_usage(&self.window, usage) {
            Ok(Some(UsageTarget::Button(bit))) => {
                if state.update_button_bit(bit, value != 0) {
                    self.pending.buttons = true;
                }
            }
            Ok(Some(UsageTarget::Axis(index))) => state.apply_axis(index, value, &mut self.pending),
            Ok(None) => {}
            Err(err) => trace!(usage = format_args!("{usage:#010X}"), %err, "usage discarded"),
        }
    }

    /// Close the report and hand back everything it changed.
    pub fn end(&mut self) -> ChangeSet {
        if !self.in_report {
            trace!("report end without begin");
        }
        self.in_report = false;
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::profile;
    use openpad_gamepad_types::ControllerFamily;
    use openpad_hid_common::make_usage;

    #[test]
    fn test_button_usage_sets_bit() {
        let window = profile(ControllerFamily::Unknown).hid_window;
        let mut adapter = HidReportAdapter::new(window);
        let mut state = CanonicalState::default();

        adapter.begin();
        for usage in 1..=4 {
            adapter.value(make_usage(0x0009, usage), 0, &mut state);
        }
        adapter.value(make_usage(0x0009, 5), 1, &mut state);
        let changes = adapter.end();

        assert_eq!(state.buttons(), 1 << 4);
        assert!(changes.buttons);
        assert_eq!(changes.axes, 0);
    }

    #[test]
    fn test_window_maps_past_standard_axes() -> Result<(), Box<dyn std::error::Error>> {
        let window = profile(ControllerFamily::Ps4).hid_window;
        assert_eq!(
            map_usage(&window, make_usage(0xFF00, 0x21))?,
            Some(UsageTarget::Axis(STANDARD_AXIS_COUNT))
        );
        assert_eq!(
            map_usage(&window, make_usage(0xFF00, 0x21 + 53))?,
            Some(UsageTarget::Axis(63))
        );
        Ok(())
    }

    #[test]
    fn test_oversized_window_is_guarded() {
        let window = AxisWindow {
            usage_page: 0xFF00,
            first_usage: 0,
            count: 100,
            notify_mask: 0,
        };
        assert_eq!(
            map_usage(&window, make_usage(0xFF00, 60)),
            Err(GamepadError::BufferBoundsGuard {
                index: 70,
                capacity: TOTAL_AXIS_COUNT
            })
        );

        let mut adapter = HidReportAdapter::new(window);
        let mut state = CanonicalState::default();
        adapter.begin();
        adapter.value(make_usage(0xFF00, 60), 7, &mut state);
        assert!(adapter.end().is_empty());
        assert_eq!(state.valid_mask(), 0);
    }

    #[test]
    fn test_empty_report_changes_nothing() {
        let mut adapter = HidReportAdapter::new(profile(ControllerFamily::Ps3).hid_window);
        adapter.begin();
        assert_eq!(adapter.end(), ChangeSet::NONE);
    }
}
