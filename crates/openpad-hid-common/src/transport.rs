//! Collaborator traits implemented by the host USB / Bluetooth stack.
//!
//! All submissions are fire-and-forget: a `false` return means the stack
//! refused the request. Nothing here blocks.

use serde::{Deserialize, Serialize};

/// Opaque handle to a pipe owned by the host stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipeHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeDirection {
    In,
    Out,
}

/// Interrupt pipe to be opened on the claimed interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeRequest {
    /// Endpoint number without the direction bit
    pub endpoint: u8,
    pub direction: PipeDirection,
    pub max_packet: u16,
    /// Polling interval in frames
    pub interval: u8,
}

impl PipeRequest {
    pub fn interrupt_in(endpoint: u8, max_packet: u16, interval: u8) -> Self {
        Self {
            endpoint: endpoint & 0x0F,
            direction: PipeDirection::In,
            max_packet,
            interval,
        }
    }

    pub fn interrupt_out(endpoint: u8, max_packet: u16, interval: u8) -> Self {
        Self {
            endpoint: endpoint & 0x0F,
            direction: PipeDirection::Out,
            max_packet,
            interval,
        }
    }
}

/// USB control transfer setup packet (length is taken from the data slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlSetup {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
}

impl ControlSetup {
    /// Host-to-device, class, interface.
    pub const CLASS_INTERFACE_OUT: u8 = 0x21;
    /// HID SET_REPORT.
    pub const SET_REPORT: u8 = 0x09;

    /// HID SET_REPORT of `report_type` (2 = output, 3 = feature) and `report_id`.
    pub const fn set_report(report_type: u8, report_id: u8) -> Self {
        Self {
            request_type: Self::CLASS_INTERFACE_OUT,
            request: Self::SET_REPORT,
            value: ((report_type as u16) << 8) | report_id as u16,
            index: 0,
        }
    }
}

/// Well-known L2CAP source channel IDs of the host Bluetooth stack.
pub mod l2cap {
    /// HID control channel.
    pub const CONTROL: u16 = 0x0070;
    /// HID interrupt channel.
    pub const INTERRUPT: u16 = 0x0071;
}

/// Bytes-out and receive-arming surface of the host stack.
///
/// Receive completions are delivered back into the driver by the host
/// calling the driver's completion handler with the received bytes.
pub trait Transport {
    /// Open an interrupt pipe on the claimed interface.
    fn open_pipe(&mut self, request: PipeRequest) -> Option<PipeHandle>;

    /// Release a pipe from [`Transport::open_pipe`].
    fn close_pipe(&mut self, pipe: PipeHandle);

    /// Arm the receive buffer of `pipe` for up to `len` bytes.
    fn submit_receive(&mut self, pipe: PipeHandle, len: usize) -> bool;

    /// Queue `data` on an OUT pipe.
    fn submit_transmit(&mut self, pipe: PipeHandle, data: &[u8]) -> bool;

    /// Queue a control transfer on endpoint 0.
    fn submit_control(&mut self, setup: ControlSetup, data: &[u8]) -> bool;

    /// Send an output report through the HID parser that owns the collection.
    fn send_hid_report(&mut self, data: &[u8]) -> bool;

    /// Send an L2CAP payload on `channel`.
    fn send_channel_data(&mut self, data: &[u8], channel: u16) -> bool;
}

/// Single-shot timer owned by the host; re-armed from inside its callback.
pub trait TimerService {
    fn start(&mut self, interval_us: u32);

    /// Must be safe when the timer was never started.
    fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_report_setup() {
        let setup = ControlSetup::set_report(0x03, 0xF5);
        assert_eq!(setup.request_type, 0x21);
        assert_eq!(setup.request, 0x09);
        assert_eq!(setup.value, 0x03F5);
        assert_eq!(setup.index, 0);

        assert_eq!(ControlSetup::set_report(0x02, 0x01).value, 0x0201);
    }

    #[test]
    fn test_pipe_request_strips_direction_bit() {
        let rx = PipeRequest::interrupt_in(0x81, 32, 4);
        assert_eq!(rx.endpoint, 1);
        assert_eq!(rx.direction, PipeDirection::In);

        let tx = PipeRequest::interrupt_out(0x02, 32, 8);
        assert_eq!(tx.endpoint, 2);
        assert_eq!(tx.direction, PipeDirection::Out);
    }
}
