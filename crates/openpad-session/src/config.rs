//! Connection tuning knobs.
//!
//! Defaults match the hardware's expectations; the environment can override
//! the two values that are useful to tweak on a bench.

use serde::{Deserialize, Serialize};
use tracing::warn;

const KEEPALIVE_ENV: &str = "OPENPAD_KEEPALIVE_MS";
const REPORT_INITIAL_STATE_ENV: &str = "OPENPAD_REPORT_INITIAL_STATE";

/// Default keep-alive period of the wireless 360 receiver.
pub const DEFAULT_KEEPALIVE_MS: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Periodic refresh interval in milliseconds.
    pub keepalive_interval_ms: u32,
    /// Raise an event for the first HID report after a collection claim
    /// even when nothing changed.
    pub report_initial_state: bool,
    /// LED pattern a wired 360 pad shows after claim.
    pub xbox360_wired_led_quadrant: u8,
    /// Indicator colour sent to a Move controller once its link is up.
    pub ps3_motion_connect_color: [u8; 3],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keepalive_interval_ms: DEFAULT_KEEPALIVE_MS,
            report_initial_state: true,
            xbox360_wired_led_quadrant: 2,
            ps3_motion_connect_color: [0x00, 0xFF, 0x00],
        }
    }
}

impl SessionConfig {
    /// Defaults with `OPENPAD_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(KEEPALIVE_ENV).ok().as_deref(),
            std::env::var(REPORT_INITIAL_STATE_ENV).ok().as_deref(),
        )
    }

    /// Apply raw override strings. Malformed values keep the current setting.
    pub fn with_overrides(mut self, keepalive_ms: Option<&str>, report_initial: Option<&str>) -> Self {
        if let Some(raw) = keepalive_ms {
            match raw.trim().parse::<u32>() {
                Ok(ms) if ms > 0 => self.keepalive_interval_ms = ms,
                _ => warn!(
                    value = raw,
                    "ignoring {KEEPALIVE_ENV}; expected a positive integer"
                ),
            }
        }
        if let Some(raw) = report_initial {
            match parse_bool(raw) {
                Some(flag) => self.report_initial_state = flag,
                None => warn!(
                    value = raw,
                    "ignoring {REPORT_INITIAL_STATE_ENV}; expected a boolean"
                ),
            }
        }
        self
    }

    /// Interval handed to the timer service.
    pub fn keepalive_interval_us(&self) -> u32 {
        self.keepalive_interval_ms.saturating_mul(1000)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.keepalive_interval_us(), 2_000_000);
        assert!(config.report_initial_state);
        assert_eq!(config.xbox360_wired_led_quadrant, 2);
        assert_eq!(config.ps3_motion_connect_color, [0, 0xFF, 0]);
    }

    #[test]
    fn test_overrides_applied() {
        let config = SessionConfig::default().with_overrides(Some(" 500 "), Some("off"));
        assert_eq!(config.keepalive_interval_ms, 500);
        assert!(!config.report_initial_state);
    }

    #[test]
    fn test_malformed_overrides_ignored() {
        let config = SessionConfig::default().with_overrides(Some("soon"), Some("maybe"));
        assert_eq!(config, SessionConfig::default());
        let zero = SessionConfig::default().with_overrides(Some("0"), None);
        assert_eq!(zero.keepalive_interval_ms, DEFAULT_KEEPALIVE_MS);
    }

    #[test]
    fn test_interval_saturates() {
        let config = SessionConfig {
            keepalive_interval_ms: u32::MAX,
            ..SessionConfig::default()
        };
        assert_eq!(config.keepalive_interval_us(), u32::MAX);
    }
}
