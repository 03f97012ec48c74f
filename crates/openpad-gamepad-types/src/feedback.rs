//! Consumer-requested rumble and indicator values.

use serde::{Deserialize, Serialize};

/// Last rumble and LED request. Written only by explicit consumer calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackState {
    /// Small / left motor
    pub rumble_low: u8,
    /// Big / right motor
    pub rumble_high: u8,
    /// Duration in family-specific ticks (PS3 only)
    pub rumble_timeout: u8,
    /// Red, green, blue. Xbox families use the blue slot as an LED pattern.
    pub led: [u8; 3],
}

impl FeedbackState {
    pub fn set_rumble(&mut self, low: u8, high: u8, timeout: u8) {
        self.rumble_low = low;
        self.rumble_high = high;
        self.rumble_timeout = timeout;
    }

    /// Store a new colour. Returns `false` when it equals the current one.
    pub fn set_led(&mut self, r: u8, g: u8, b: u8) -> bool {
        let led = [r, g, b];
        if self.led == led {
            return false;
        }
        self.led = led;
        true
    }

    pub fn red(&self) -> u8 {
        self.led[0]
    }

    pub fn green(&self) -> u8 {
        self.led[1]
    }

    pub fn blue(&self) -> u8 {
        self.led[2]
    }

    /// Timeout for the low motor, zero when that motor is off.
    pub fn low_timeout(&self) -> u8 {
        if self.rumble_low != 0 {
            self.rumble_timeout
        } else {
            0
        }
    }

    /// Timeout for the high motor, zero when that motor is off.
    pub fn high_timeout(&self) -> u8 {
        if self.rumble_high != 0 {
            self.rumble_timeout
        } else {
            0
        }
    }
}
