//! Chatpad LED bookkeeping for the Xbox 360 wireless receiver.

/// Chatpad indicator LEDs, in command index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChatpadLed {
    CapsLock = 0,
    Green = 1,
    Orange = 2,
    Messenger = 3,
}

impl ChatpadLed {
    pub const ALL: [ChatpadLed; 4] = [
        ChatpadLed::CapsLock,
        ChatpadLed::Green,
        ChatpadLed::Orange,
        ChatpadLed::Messenger,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Bit in the chatpad LED status byte.
    pub fn status_bit(self) -> u8 {
        match self {
            ChatpadLed::CapsLock => 0x20,
            ChatpadLed::Green => 0x08,
            ChatpadLed::Orange => 0x10,
            ChatpadLed::Messenger => 0x01,
        }
    }
}

/// On/off state of all four chatpad LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatpadLedState {
    on: [bool; 4],
}

impl ChatpadLedState {
    /// Status byte has bit 7 set when the LED bits are meaningful.
    pub const STATUS_VALID: u8 = 0x80;

    pub fn from_status(status: u8) -> Option<Self> {
        if status & Self::STATUS_VALID == 0 {
            return None;
        }
        let mut state = Self::default();
        for led in ChatpadLed::ALL {
            state.set(led, status & led.status_bit() != 0);
        }
        Some(state)
    }

    pub fn get(&self, led: ChatpadLed) -> bool {
        self.on.get(usize::from(led.index())).copied().unwrap_or(false)
    }

    pub fn set(&mut self, led: ChatpadLed, on: bool) {
        if let Some(slot) = self.on.get_mut(usize::from(led.index())) {
            *slot = on;
        }
    }

    /// LEDs whose state in `self` differs from `wanted`, with the wanted state.
    pub fn mismatches(self, wanted: ChatpadLedState) -> impl Iterator<Item = (ChatpadLed, bool)> {
        ChatpadLed::ALL
            .into_iter()
            .filter(move |led| self.get(*led) != wanted.get(*led))
            .map(move |led| (led, wanted.get(led)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_requires_valid_bit() {
        assert_eq!(ChatpadLedState::from_status(0x29), None);
    }

    #[test]
    fn test_status_decode() -> Result<(), Box<dyn std::error::Error>> {
        let state = ChatpadLedState::from_status(0x80 | 0x20 | 0x01).ok_or("invalid")?;
        assert!(state.get(ChatpadLed::CapsLock));
        assert!(state.get(ChatpadLed::Messenger));
        assert!(!state.get(ChatpadLed::Green));
        assert!(!state.get(ChatpadLed::Orange));
        Ok(())
    }

    #[test]
    fn test_mismatches() {
        let mut wanted = ChatpadLedState::default();
        wanted.set(ChatpadLed::Green, true);
        let mut actual = ChatpadLedState::default();
        actual.set(ChatpadLed::CapsLock, true);

        let diff: Vec<_> = actual.mismatches(wanted).collect();
        assert_eq!(
            diff,
            vec![(ChatpadLed::CapsLock, false), (ChatpadLed::Green, true)]
        );
        assert_eq!(wanted.mismatches(wanted).count(), 0);
    }
}
