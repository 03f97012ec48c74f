//! Recording implementations of [`Transport`] and [`TimerService`].
//!
//! Used by tests throughout the workspace and by `padctl` to render the
//! packets a driver would put on the wire without touching hardware.

use crate::transport::{ControlSetup, PipeHandle, PipeRequest, TimerService, Transport};

/// One accepted submission, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentPacket {
    Transmit { pipe: PipeHandle, data: Vec<u8> },
    Control { setup: ControlSetup, data: Vec<u8> },
    HidReport(Vec<u8>),
    Channel { channel: u16, data: Vec<u8> },
}

impl SentPacket {
    pub fn bytes(&self) -> &[u8] {
        match self {
            SentPacket::Transmit { data, .. }
            | SentPacket::Control { data, .. }
            | SentPacket::HidReport(data)
            | SentPacket::Channel { data, .. } => data,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SentPacket::Transmit { .. } => "transmit",
            SentPacket::Control { .. } => "control",
            SentPacket::HidReport(_) => "hid-report",
            SentPacket::Channel { .. } => "channel",
        }
    }
}

#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Vec<SentPacket>,
    receives: Vec<(PipeHandle, usize)>,
    opened: Vec<PipeRequest>,
    closed: Vec<PipeHandle>,
    pipe_budget: Option<usize>,
    refuse_transmit: bool,
    refuse_receive: bool,
    next_pipe: u32,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most `pipes` successful `open_pipe` calls.
    pub fn with_pipe_budget(mut self, pipes: usize) -> Self {
        self.pipe_budget = Some(pipes);
        self
    }

    pub fn refuse_transmits(&mut self, refuse: bool) {
        self.refuse_transmit = refuse;
    }

    pub fn refuse_receives(&mut self, refuse: bool) {
        self.refuse_receive = refuse;
    }

    pub fn sent(&self) -> &[SentPacket] {
        &self.sent
    }

    pub fn sent_bytes(&self) -> Vec<Vec<u8>> {
        self.sent.iter().map(|p| p.bytes().to_vec()).collect()
    }

    pub fn take_sent(&mut self) -> Vec<SentPacket> {
        std::mem::take(&mut self.sent)
    }

    pub fn receives(&self) -> &[(PipeHandle, usize)] {
        &self.receives
    }

    pub fn opened_pipes(&self) -> &[PipeRequest] {
        &self.opened
    }

    pub fn closed_pipes(&self) -> &[PipeHandle] {
        &self.closed
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.receives.clear();
    }
}

impl Transport for MockTransport {
    fn open_pipe(&mut self, request: PipeRequest) -> Option<PipeHandle> {
        if let Some(budget) = self.pipe_budget {
            if self.opened.len() >= budget {
                return None;
            }
        }
        self.opened.push(request);
        self.next_pipe = self.next_pipe.wrapping_add(1);
        Some(PipeHandle(self.next_pipe))
    }

    fn close_pipe(&mut self, pipe: PipeHandle) {
        self.closed.push(pipe);
    }

    fn submit_receive(&mut self, pipe: PipeHandle, len: usize) -> bool {
        if self.refuse_receive {
            return false;
        }
        self.receives.push((pipe, len));
        true
    }

    fn submit_transmit(&mut self, pipe: PipeHandle, data: &[u8]) -> bool {
        if self.refuse_transmit {
            return false;
        }
        self.sent.push(SentPacket::Transmit {
            pipe,
            data: data.to_vec(),
        });
        true
    }

    fn submit_control(&mut self, setup: ControlSetup, data: &[u8]) -> bool {
        if self.refuse_transmit {
            return false;
        }
        self.sent.push(SentPacket::Control {
            setup,
            data: data.to_vec(),
        });
        true
    }

    fn send_hid_report(&mut self, data: &[u8]) -> bool {
        if self.refuse_transmit {
            return false;
        }
        self.sent.push(SentPacket::HidReport(data.to_vec()));
        true
    }

    fn send_channel_data(&mut self, data: &[u8], channel: u16) -> bool {
        if self.refuse_transmit {
            return false;
        }
        self.sent.push(SentPacket::Channel {
            channel,
            data: data.to_vec(),
        });
        true
    }
}

#[derive(Debug, Default)]
pub struct MockTimer {
    starts: Vec<u32>,
    stops: usize,
    running: bool,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn starts(&self) -> &[u32] {
        &self.starts
    }

    pub fn stop_count(&self) -> usize {
        self.stops
    }
}

impl TimerService for MockTimer {
    fn start(&mut self, interval_us: u32) {
        self.starts.push(interval_us);
        self.running = true;
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.running = false;
    }
}
