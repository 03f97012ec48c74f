//! Sony controller models.

use crate::ids::{SONY_VENDOR_ID, product_ids, remote_names};
use openpad_gamepad_types::ControllerFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SonyModel {
    DualShock3,
    Navigation,
    MotionController,
    DualShock4,
    DualShock4V2,
}

impl SonyModel {
    pub const ALL: [SonyModel; 5] = [
        SonyModel::DualShock3,
        SonyModel::Navigation,
        SonyModel::MotionController,
        SonyModel::DualShock4,
        SonyModel::DualShock4V2,
    ];

    pub fn from_ids(vendor_id: u16, product_id: u16) -> Option<Self> {
        if vendor_id != SONY_VENDOR_ID {
            return None;
        }
        Self::from_product_id(product_id)
    }

    pub fn from_product_id(product_id: u16) -> Option<Self> {
        match product_id {
            product_ids::DUALSHOCK3 => Some(SonyModel::DualShock3),
            product_ids::NAVIGATION => Some(SonyModel::Navigation),
            product_ids::MOTION => Some(SonyModel::MotionController),
            product_ids::DUALSHOCK4 => Some(SonyModel::DualShock4),
            product_ids::DUALSHOCK4_V2 => Some(SonyModel::DualShock4V2),
            _ => None,
        }
    }

    pub fn product_id(self) -> u16 {
        match self {
            SonyModel::DualShock3 => product_ids::DUALSHOCK3,
            SonyModel::Navigation => product_ids::NAVIGATION,
            SonyModel::MotionController => product_ids::MOTION,
            SonyModel::DualShock4 => product_ids::DUALSHOCK4,
            SonyModel::DualShock4V2 => product_ids::DUALSHOCK4_V2,
        }
    }

    pub fn family(self) -> ControllerFamily {
        match self {
            SonyModel::DualShock3 | SonyModel::Navigation => ControllerFamily::Ps3,
            SonyModel::MotionController => ControllerFamily::Ps3Motion,
            SonyModel::DualShock4 | SonyModel::DualShock4V2 => ControllerFamily::Ps4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SonyModel::DualShock3 => "DualShock 3",
            SonyModel::Navigation => "Navigation Controller",
            SonyModel::MotionController => "Move Motion Controller",
            SonyModel::DualShock4 => "DualShock 4",
            SonyModel::DualShock4V2 => "DualShock 4 v2",
        }
    }
}

/// Family for a Sony Bluetooth remote name, by prefix.
pub fn family_from_remote_name(name: &str) -> Option<ControllerFamily> {
    const PREFIXES: [(&str, ControllerFamily); 4] = [
        (remote_names::DUALSHOCK4, ControllerFamily::Ps4),
        (remote_names::DUALSHOCK3, ControllerFamily::Ps3),
        (remote_names::NAVIGATION, ControllerFamily::Ps3),
        (remote_names::MOTION, ControllerFamily::Ps3Motion),
    ];
    PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(*prefix))
        .map(|(_, family)| *family)
}
