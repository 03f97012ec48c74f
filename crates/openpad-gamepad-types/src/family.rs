//! Closed set of supported controller families.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Controller hardware/protocol variant, fixed for the life of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerFamily {
    /// DualShock 3 and the Navigation controller
    Ps3,
    /// PlayStation Move motion controller
    Ps3Motion,
    /// DualShock 4 (both revisions)
    Ps4,
    /// Xbox One / Series pads over the GIP interface
    XboxOne,
    /// Xbox 360 wireless receiver
    Xbox360Wireless,
    /// Wired Xbox 360 pad
    Xbox360Wired,
    /// Original Xbox "Duke" and compatible pads
    XboxDuke,
    #[default]
    Unknown,
}

impl ControllerFamily {
    pub const ALL: [ControllerFamily; 8] = [
        ControllerFamily::Ps3,
        ControllerFamily::Ps3Motion,
        ControllerFamily::Ps4,
        ControllerFamily::XboxOne,
        ControllerFamily::Xbox360Wireless,
        ControllerFamily::Xbox360Wired,
        ControllerFamily::XboxDuke,
        ControllerFamily::Unknown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControllerFamily::Ps3 => "PS3",
            ControllerFamily::Ps3Motion => "PS3 Motion",
            ControllerFamily::Ps4 => "PS4",
            ControllerFamily::XboxOne => "Xbox One",
            ControllerFamily::Xbox360Wireless => "Xbox 360 Wireless",
            ControllerFamily::Xbox360Wired => "Xbox 360 Wired",
            ControllerFamily::XboxDuke => "Xbox Duke",
            ControllerFamily::Unknown => "Unknown",
        }
    }

    /// Command-line / config spelling.
    pub fn slug(self) -> &'static str {
        match self {
            ControllerFamily::Ps3 => "ps3",
            ControllerFamily::Ps3Motion => "ps3-motion",
            ControllerFamily::Ps4 => "ps4",
            ControllerFamily::XboxOne => "xbox-one",
            ControllerFamily::Xbox360Wireless => "xbox360-wireless",
            ControllerFamily::Xbox360Wired => "xbox360-wired",
            ControllerFamily::XboxDuke => "xbox-duke",
            ControllerFamily::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != ControllerFamily::Unknown
    }

    pub fn is_playstation(self) -> bool {
        matches!(
            self,
            ControllerFamily::Ps3 | ControllerFamily::Ps3Motion | ControllerFamily::Ps4
        )
    }

    pub fn is_xbox(self) -> bool {
        matches!(
            self,
            ControllerFamily::XboxOne
                | ControllerFamily::Xbox360Wireless
                | ControllerFamily::Xbox360Wired
                | ControllerFamily::XboxDuke
        )
    }
}

impl fmt::Display for ControllerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFamily(pub String);

impl fmt::Display for UnknownFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown controller family '{}'", self.0)
    }
}

impl std::error::Error for UnknownFamily {}

impl FromStr for ControllerFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ControllerFamily::ALL
            .into_iter()
            .find(|f| f.slug() == wanted)
            .ok_or_else(|| UnknownFamily(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        for family in ControllerFamily::ALL {
            assert_eq!(family.slug().parse::<ControllerFamily>()?, family);
        }
        assert_eq!("XBOX360_WIRED".parse::<ControllerFamily>()?, ControllerFamily::Xbox360Wired);
        Ok(())
    }

    #[test]
    fn test_unknown_slug() {
        assert!(matches!("spacenav".parse::<ControllerFamily>(), Err(UnknownFamily(_))));
    }

    #[test]
    fn test_groups() {
        assert!(ControllerFamily::Ps3Motion.is_playstation());
        assert!(!ControllerFamily::Ps3Motion.is_xbox());
        assert!(ControllerFamily::XboxDuke.is_xbox());
        assert!(!ControllerFamily::Unknown.is_known());
        assert!(!ControllerFamily::Unknown.is_xbox());
        assert!(!ControllerFamily::Unknown.is_playstation());
    }
}
