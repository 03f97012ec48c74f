//! One controller connection: claim, stream, refresh, disconnect.
//!
//! A [`GamepadConnection`] owns the canonical and feedback state of exactly
//! one pad. Every entry point is a non-blocking handler; the transport and
//! timer are borrowed for the duration of the call and never stored.

use openpad_errors::GamepadError;
use openpad_gamepad_types::{CanonicalState, ChangeSet, ControllerFamily, FeedbackState};
use openpad_hid_common::{
    PipeHandle, TimerService, Transport, UsbDeviceInfo, is_claimable_top_usage, l2cap,
};
use openpad_hid_xbox_protocol::{
    self as xbox, ChatpadLed, ChatpadLedState, resolve_endpoints, wireless_led_quadrant,
};
use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::adapter::HidReportAdapter;
use crate::classifier::{self, BluetoothQuirk};
use crate::config::SessionConfig;
use crate::dispatch::{self, Command, LinkKind, Reaction, Route};
use crate::notification::EventLatch;

/// Largest payload accepted by [`GamepadConnection::send_raw`].
pub const MAX_RAW_SEND: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    #[default]
    Unclaimed,
    Classifying,
    Streaming,
    /// Inside a timer tick.
    PeriodicRefresh,
    /// Bluetooth pad named but its link not yet confirmed.
    PairingPending,
    Disconnected,
}

/// Interrupt pipes of a class-claimed interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawPipes {
    rx: PipeHandle,
    tx: PipeHandle,
    rx_len: usize,
    rx_endpoint: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    UsbClass(RawPipes),
    HidCollection { claims: u32 },
    Bluetooth { quirk: BluetoothQuirk },
}

impl Link {
    fn kind(&self) -> LinkKind {
        match self {
            Link::UsbClass(_) => LinkKind::UsbClass,
            Link::HidCollection { .. } => LinkKind::HidCollection,
            Link::Bluetooth { .. } => LinkKind::Bluetooth,
        }
    }
}

/// Session of one attached controller.
#[derive(Debug)]
pub struct GamepadConnection {
    config: SessionConfig,
    phase: SessionPhase,
    family: ControllerFamily,
    link: Option<Link>,
    device: UsbDeviceInfo,
    state: CanonicalState,
    feedback: FeedbackState,
    latch: EventLatch,
    hid: HidReportAdapter,
    keepalive_odd: bool,
    wireless_controller: u8,
    chatpad_wanted: ChatpadLedState,
}

impl Default for GamepadConnection {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GamepadConnection {
    pub fn new(config: SessionConfig) -> Self {
        let profile = dispatch::profile(ControllerFamily::Unknown);
        Self {
            config,
            phase: SessionPhase::Unclaimed,
            family: ControllerFamily::Unknown,
            link: None,
            device: UsbDeviceInfo::default(),
            state: CanonicalState::new(profile.stream_notify_mask),
            feedback: FeedbackState::default(),
            latch: EventLatch::default(),
            hid: HidReportAdapter::new(profile.hid_window),
            keepalive_odd: false,
            wireless_controller: 0,
            chatpad_wanted: ChatpadLedState::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn family(&self) -> ControllerFamily {
        self.family
    }

    pub fn link_kind(&self) -> Option<LinkKind> {
        self.link.as_ref().map(Link::kind)
    }

    pub fn vendor_id(&self) -> u16 {
        self.device.vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.device.product_id
    }

    pub fn device_info(&self) -> &UsbDeviceInfo {
        &self.device
    }

    pub fn state(&self) -> &CanonicalState {
        &self.state
    }

    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    /// Controller id last reported by a wireless 360 receiver (0 = none).
    pub fn wireless_controller(&self) -> u8 {
        self.wireless_controller
    }

    fn is_streaming(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Streaming | SessionPhase::PeriodicRefresh
        )
    }

    fn can_claim(&self) -> bool {
        self.link.is_none()
            && matches!(
                self.phase,
                SessionPhase::Unclaimed | SessionPhase::Disconnected
            )
    }

    fn bind(&mut self, family: ControllerFamily, link: Link, device: UsbDeviceInfo) {
        let profile = dispatch::profile(family);
        let notify = match link {
            Link::HidCollection { .. } => profile.hid_window.notify_mask,
            _ => profile.stream_notify_mask,
        };
        self.family = family;
        self.link = Some(link);
        self.device = device;
        self.state.reset(notify);
        self.feedback = FeedbackState::default();
        self.latch.clear();
        self.hid = HidReportAdapter::new(profile.hid_window);
        self.keepalive_odd = false;
        self.wireless_controller = 0;
        self.chatpad_wanted = ChatpadLedState::default();
    }

    /// Forget the device entirely. The connection can be claimed again.
    fn unbind(&mut self) {
        let profile = dispatch::profile(ControllerFamily::Unknown);
        self.family = ControllerFamily::Unknown;
        self.link = None;
        self.device = UsbDeviceInfo::default();
        self.state.reset(profile.stream_notify_mask);
        self.latch.clear();
        self.hid = HidReportAdapter::new(profile.hid_window);
        self.phase = SessionPhase::Unclaimed;
    }

    // ----- class-specific USB path -----

    /// Claim a USB interface at class level (Xbox pads).
    ///
    /// `interface` is the interface descriptor followed by its class and
    /// endpoint descriptors. On success the pipes are open, the receive
    /// buffer armed, the init sequence queued and the refresh timer running.
    ///
    /// # Errors
    ///
    /// Descriptor and identity failures reject the claim and leave the
    /// connection unclaimed. Pipe or receive-buffer acquisition failure is
    /// `ResourceExhausted`.
    pub fn claim_usb(
        &mut self,
        device: UsbDeviceInfo,
        interface: &[u8],
        transport: &mut dyn Transport,
        timer: &mut dyn TimerService,
    ) -> Result<ControllerFamily, GamepadError> {
        if !self.can_claim() {
            return Err(GamepadError::rejected(device.vendor_id, device.product_id));
        }
        self.phase = SessionPhase::Classifying;
        match self.try_claim_usb(device, interface, transport) {
            Ok(family) => {
                timer.start(self.config.keepalive_interval_us());
                info!(%family, "class-level claim streaming");
                Ok(family)
            }
            Err(err) => {
                debug!(%err, "class-level claim rejected");
                self.unbind();
                Err(err)
            }
        }
    }

    fn try_claim_usb(
        &mut self,
        device: UsbDeviceInfo,
        interface: &[u8],
        transport: &mut dyn Transport,
    ) -> Result<ControllerFamily, GamepadError> {
        let family = classifier::classify_usb(device.vendor_id, device.product_id, interface)?;
        if !family.is_xbox() {
            return Err(GamepadError::rejected(device.vendor_id, device.product_id));
        }
        let plan = resolve_endpoints(interface, family)?;
        let rx = transport
            .open_pipe(plan.rx_request())
            .ok_or_else(|| GamepadError::exhausted("interrupt IN pipe"))?;
        let Some(tx) = transport.open_pipe(plan.tx_request()) else {
            transport.close_pipe(rx);
            return Err(GamepadError::exhausted("interrupt OUT pipe"));
        };
        let pipes = RawPipes {
            rx,
            tx,
            rx_len: usize::from(plan.rx.max_packet),
            rx_endpoint: plan.rx.address,
        };
        if !transport.submit_receive(pipes.rx, pipes.rx_len) {
            transport.close_pipe(tx);
            transport.close_pipe(rx);
            return Err(GamepadError::exhausted("receive buffer"));
        }

        let (vendor_id, product_id) = (device.vendor_id, device.product_id);
        self.bind(family, Link::UsbClass(pipes), device);
        self.phase = SessionPhase::Streaming;

        let init = dispatch::init_commands(family, vendor_id, product_id);
        debug!(%family, packets = init.len(), "queueing init sequence");
        for command in &init {
            self.dispatch(command, transport, "init");
        }
        if family == ControllerFamily::Xbox360Wired {
            let quadrant = self.config.xbox360_wired_led_quadrant;
            self.reset_indicator(quadrant, transport);
        }
        Ok(family)
    }

    /// Receive completion of the interrupt IN pipe.
    ///
    /// The buffer is re-armed before anything is decoded. Returns what the
    /// packet changed.
    pub fn on_receive_complete(&mut self, data: &[u8], transport: &mut dyn Transport) -> ChangeSet {
        let Some(Link::UsbClass(pipes)) = self.link else {
            return ChangeSet::NONE;
        };
        if !self.is_streaming() {
            return ChangeSet::NONE;
        }
        if !transport.submit_receive(pipes.rx, pipes.rx_len) {
            error!(pipe = pipes.rx.0, "receive re-arm refused; stream stalled");
        }

        let outcome = dispatch::decode_raw(self.family, data, &mut self.state);
        self.latch.raise_if(outcome.changes, self.state.notify_mask());
        if let Some(reaction) = outcome.reaction {
            self.react(reaction, pipes, transport);
        }
        outcome.changes
    }

    fn react(&mut self, reaction: Reaction, pipes: RawPipes, transport: &mut dyn Transport) {
        match reaction {
            Reaction::LinkStatus(controller) => {
                if controller == self.wireless_controller {
                    return;
                }
                self.wireless_controller = controller;
                if controller != 0 {
                    info!(controller, "wireless pad connected");
                    let quadrant = wireless_led_quadrant(pipes.rx_endpoint);
                    self.reset_indicator(quadrant, transport);
                } else {
                    info!("wireless pad disconnected");
                    self.set_indicator(0, 0, 0, transport);
                }
            }
            Reaction::SendChatpadInit => {
                debug!("chatpad init");
                self.send_raw(&xbox::output::CHATPAD_INIT, transport);
            }
            Reaction::ChatpadLeds(reported) => {
                for (led, on) in reported.mismatches(self.chatpad_wanted) {
                    trace!(?led, on, "chatpad LED sync");
                    self.send_raw(&xbox::build_chatpad_led(led, on), transport);
                }
            }
            Reaction::RumbleOff => {
                self.set_rumble(0, 0, 0, transport);
            }
            Reaction::ResetIndicator => {
                let quadrant = self.config.xbox360_wired_led_quadrant;
                self.reset_indicator(quadrant, transport);
            }
        }
    }

    /// Indicator off, then `pattern` on.
    fn reset_indicator(&mut self, pattern: u8, transport: &mut dyn Transport) {
        self.set_indicator(0, 0, 0, transport);
        self.set_indicator(0, 0, pattern, transport);
    }

    /// Timer expiry. Sends the keep-alive burst when the family needs one
    /// and re-arms the timer while the connection streams.
    pub fn timer_event(&mut self, transport: &mut dyn Transport, timer: &mut dyn TimerService) {
        if self.phase != SessionPhase::Streaming {
            return;
        }
        self.phase = SessionPhase::PeriodicRefresh;
        if dispatch::profile(self.family).keepalive
            && matches!(self.link, Some(Link::UsbClass(_)))
        {
            trace!(odd = self.keepalive_odd, "keep-alive tick");
            for packet in xbox::keepalive_packets(self.keepalive_odd) {
                self.send_raw(packet, transport);
            }
            self.keepalive_odd = !self.keepalive_odd;
        }
        timer.start(self.config.keepalive_interval_us());
        self.phase = SessionPhase::Streaming;
    }

    /// Device removal. Safe to call repeatedly and before any timer start.
    pub fn disconnect(&mut self, timer: &mut dyn TimerService) {
        timer.stop();
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.phase != SessionPhase::Disconnected {
            info!(family = %self.family, "connection closed");
        }
        self.state.clear_masks();
        self.latch.clear();
        self.link = None;
        self.wireless_controller = 0;
        self.phase = SessionPhase::Disconnected;
    }

    // ----- HID collection path -----

    /// Claim a generic HID collection.
    ///
    /// A second claim of the same physical device only bumps the claim count.
    ///
    /// # Errors
    ///
    /// `ClassificationRejected` for a top usage that is not a joystick,
    /// gamepad or multi-axis controller, while another link kind is bound,
    /// or for a different device than the one already bound.
    pub fn claim_collection(
        &mut self,
        device: UsbDeviceInfo,
        top_usage: u32,
    ) -> Result<ControllerFamily, GamepadError> {
        let rejected = GamepadError::rejected(device.vendor_id, device.product_id);
        if !is_claimable_top_usage(top_usage) {
            return Err(rejected);
        }
        match self.link {
            Some(Link::HidCollection { claims }) if self.device.same_device(&device) => {
                let claims = claims.saturating_add(1);
                self.link = Some(Link::HidCollection { claims });
                debug!(claims, "additional collection claimed");
                return Ok(self.family);
            }
            Some(_) => return Err(rejected),
            None if !self.can_claim() => return Err(rejected),
            None => {}
        }

        self.phase = SessionPhase::Classifying;
        let family = classifier::lookup_identity(device.vendor_id, device.product_id, false);
        self.bind(family, Link::HidCollection { claims: 1 }, device);
        if self.config.report_initial_state {
            self.latch.arm_initial();
        }
        self.phase = SessionPhase::Streaming;
        info!(%family, top_usage = format_args!("{top_usage:#X}"), "collection claimed");
        Ok(family)
    }

    /// Release one collection claim. The binding goes away with the last one.
    /// Returns the claims still held.
    pub fn disconnect_collection(&mut self) -> u32 {
        let Some(Link::HidCollection { claims }) = self.link else {
            return 0;
        };
        let claims = claims.saturating_sub(1);
        if claims == 0 {
            self.teardown();
        } else {
            self.link = Some(Link::HidCollection { claims });
        }
        claims
    }

    fn hid_active(&self) -> bool {
        self.is_streaming() && matches!(self.link, Some(Link::HidCollection { .. }))
    }

    pub fn hid_input_begin(&mut self) {
        if self.hid_active() {
            self.hid.begin();
        }
    }

    pub fn hid_input_data(&mut self, usage: u32, value: i32) {
        if self.hid_active() {
            self.hid.value(usage, value, &mut self.state);
        }
    }

    /// Commit the report. Returns whether an event is pending afterwards.
    pub fn hid_input_end(&mut self) -> bool {
        if !self.hid_active() {
            return false;
        }
        let changes = self.hid.end();
        self.latch.raise_if(changes, self.state.notify_mask())
    }

    // ----- Bluetooth path -----

    /// Probe a Bluetooth device for a claim.
    ///
    /// # Errors
    ///
    /// `ClassificationRejected` when neither class of device nor name match,
    /// or when something is already bound.
    pub fn claim_bluetooth(
        &mut self,
        class_of_device: u32,
        remote_name: Option<&str>,
    ) -> Result<ControllerFamily, GamepadError> {
        if !self.can_claim() {
            return Err(GamepadError::rejected(0, 0));
        }
        let verdict = classifier::classify_bluetooth(class_of_device, remote_name)
            .ok_or_else(|| GamepadError::rejected(0, 0))?;
        let device = remote_name
            .map(UsbDeviceInfo::from_remote_name)
            .unwrap_or_default();
        let quirk = match verdict.quirk {
            BluetoothQuirk::None => BluetoothQuirk::for_family(verdict.family),
            quirk => quirk,
        };
        self.bind(verdict.family, Link::Bluetooth { quirk }, device);
        self.phase = if verdict.family.is_known() {
            SessionPhase::PairingPending
        } else {
            SessionPhase::Classifying
        };
        debug!(family = %verdict.family, ?quirk, class_of_device = format_args!("{class_of_device:#08X}"), "bluetooth claim");
        Ok(verdict.family)
    }

    /// Remote name resolved. Settles the family and quirk while the link is
    /// still being set up; once streaming, only the device name is updated.
    pub fn remote_name_complete(&mut self, name: &str) -> ControllerFamily {
        if !matches!(self.link, Some(Link::Bluetooth { .. })) {
            return self.family;
        }
        self.device = UsbDeviceInfo::from_remote_name(name);
        if self.is_streaming() {
            trace!(family = %self.family, name, "remote name while streaming");
            return self.family;
        }
        if let Some(family) = classifier::family_from_name(name) {
            if family != self.family {
                debug!(%family, name, "family from remote name");
            }
            self.family = family;
            self.state.reset(dispatch::profile(family).stream_notify_mask);
            self.link = Some(Link::Bluetooth {
                quirk: BluetoothQuirk::for_family(family),
            });
        }
        if self.phase == SessionPhase::Classifying && self.family.is_known() {
            self.phase = SessionPhase::PairingPending;
        }
        self.family
    }

    pub fn bluetooth_quirk(&self) -> Option<BluetoothQuirk> {
        match self.link {
            Some(Link::Bluetooth { quirk }) => Some(quirk),
            _ => None,
        }
    }

    /// L2CAP link confirmed. Sends the family's start request and begins
    /// streaming.
    ///
    /// # Errors
    ///
    /// `ClassificationRejected` when no Bluetooth link is bound or its family
    /// is still unknown.
    pub fn connection_complete(&mut self, transport: &mut dyn Transport) -> Result<(), GamepadError> {
        if !matches!(self.link, Some(Link::Bluetooth { .. })) || !self.family.is_known() {
            return Err(GamepadError::rejected(0, 0));
        }
        if self.is_streaming() {
            return Ok(());
        }
        if let Some(command) = dispatch::bluetooth_connect_command(self.family) {
            self.dispatch(&command, transport, "connect");
        }
        self.phase = SessionPhase::Streaming;
        if self.family == ControllerFamily::Ps3Motion {
            let [r, g, b] = self.config.ps3_motion_connect_color;
            self.set_indicator(r, g, b, transport);
        }
        info!(family = %self.family, "bluetooth link streaming");
        Ok(())
    }

    /// Drop the Bluetooth binding and its quirk.
    pub fn release_bluetooth(&mut self) {
        if matches!(self.link, Some(Link::Bluetooth { .. })) {
            self.teardown();
        }
    }

    /// One block from the interrupt channel.
    pub fn process_bluetooth_data(&mut self, data: &[u8]) -> ChangeSet {
        if !self.is_streaming() || !matches!(self.link, Some(Link::Bluetooth { .. })) {
            return ChangeSet::NONE;
        }
        let changes = dispatch::decode_bluetooth(self.family, data, &mut self.state);
        self.latch.raise_if(changes, self.state.notify_mask());
        changes
    }

    // ----- feedback -----

    /// Route one command. Refusals are logged and reported as `false`.
    fn dispatch(&self, command: &Command, transport: &mut dyn Transport, what: &'static str) -> bool {
        let bytes = command.bytes();
        let sent = match (command.route, self.link) {
            (Route::Pipe, Some(Link::UsbClass(pipes))) => transport.submit_transmit(pipes.tx, bytes),
            (Route::Pipe, _) => false,
            (Route::HidReport, _) => transport.send_hid_report(bytes),
            (Route::Control(setup), _) => transport.submit_control(setup, bytes),
            (Route::Channel(channel), _) => transport.send_channel_data(bytes, channel),
        };
        if !sent {
            warn!(
                family = %self.family,
                route = ?command.route,
                err = %GamepadError::transfer(what),
                "output dropped"
            );
        }
        sent
    }

    fn unsupported(&self, operation: &'static str) -> bool {
        debug!(err = %GamepadError::unsupported(self.family.name(), operation), "ignored");
        false
    }

    /// Set both motors. `timeout` only matters to PS3 pads.
    pub fn set_rumble(&mut self, low: u8, high: u8, timeout: u8, transport: &mut dyn Transport) -> bool {
        let Some(kind) = self.link_kind().filter(|_| self.is_streaming()) else {
            return false;
        };
        self.feedback.set_rumble(low, high, timeout);
        match dispatch::encode_rumble(self.family, kind, &self.feedback) {
            Some(command) => self.dispatch(&command, transport, "rumble"),
            None => self.unsupported("rumble"),
        }
    }

    /// Set the indicator colour. Returns `false` for families without an
    /// indicator and for an unchanged colour, which sends nothing.
    pub fn set_indicator(&mut self, r: u8, g: u8, b: u8, transport: &mut dyn Transport) -> bool {
        let Some(kind) = self.link_kind().filter(|_| self.is_streaming()) else {
            return false;
        };
        let mut next = self.feedback;
        let changed = next.set_led(r, g, b);
        let Some(command) = dispatch::encode_indicator(self.family, kind, &next) else {
            return self.unsupported("indicator");
        };
        if !changed {
            return false;
        }
        self.feedback = next;
        self.dispatch(&command, transport, "indicator")
    }

    /// Record the wanted state of one chatpad LED. It is applied when the
    /// pad next reports its LED status.
    pub fn set_chatpad_led(&mut self, led: ChatpadLed, on: bool) -> bool {
        if self.family != ControllerFamily::Xbox360Wireless {
            return self.unsupported("chatpad LED");
        }
        self.chatpad_wanted.set(led, on);
        true
    }

    /// Send bytes as they are on the connection's output channel.
    pub fn send_raw(&mut self, data: &[u8], transport: &mut dyn Transport) -> bool {
        if data.len() > MAX_RAW_SEND {
            return false;
        }
        let route = match self.link {
            Some(Link::UsbClass(_)) => Route::Pipe,
            Some(Link::HidCollection { .. }) => Route::HidReport,
            Some(Link::Bluetooth { .. }) => Route::Channel(l2cap::INTERRUPT),
            None => return false,
        };
        match Command::new(route, data) {
            Some(command) => self.dispatch(&command, transport, "raw"),
            None => false,
        }
    }

    /// Store `host` as the pad's Bluetooth master (PS3 and Move over USB).
    pub fn pair_ps3(&mut self, host: &[u8; 6], transport: &mut dyn Transport) -> bool {
        let Some(kind) = self.link_kind() else {
            return false;
        };
        match dispatch::encode_pairing(self.family, kind, host) {
            Some(command) => {
                info!(family = %self.family, "writing pairing address");
                self.dispatch(&command, transport, "pairing")
            }
            None => self.unsupported("pairing"),
        }
    }

    // ----- consumer -----

    pub fn has_pending_event(&self) -> bool {
        self.latch.is_pending()
    }

    /// Snapshot for the consumer. Clears the changed mask and the pending flag.
    pub fn drain_event(&mut self) -> CanonicalState {
        self.latch.take();
        self.state.drain()
    }
}
