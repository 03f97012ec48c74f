//! Property tests for Xbox probing, decoding and rumble encoding.

use openpad_gamepad_types::{CanonicalState, ControllerFamily};
use openpad_hid_xbox_protocol as xbox;
use proptest::prelude::*;

fn xbox_family() -> impl Strategy<Value = ControllerFamily> {
    prop::sample::select(vec![
        ControllerFamily::XboxOne,
        ControllerFamily::Xbox360Wireless,
        ControllerFamily::Xbox360Wired,
        ControllerFamily::XboxDuke,
    ])
}

/// Parse and apply `data` the way the session does for `family`.
fn decode(family: ControllerFamily, data: &[u8], state: &mut CanonicalState) -> bool {
    let changes = match family {
        ControllerFamily::XboxOne => xbox::parse_xboxone_input(data).map(|i| i.apply(state)),
        ControllerFamily::Xbox360Wired => match xbox::parse_360_wired_packet(data) {
            xbox::Xbox360WiredPacket::Input(pad) => Some(pad.apply(state)),
            _ => None,
        },
        ControllerFamily::Xbox360Wireless => match xbox::parse_360_wireless_packet(data) {
            xbox::Xbox360WirelessPacket::Input { pad: Some(pad), .. } => Some(pad.apply(state)),
            _ => None,
        },
        ControllerFamily::XboxDuke => xbox::parse_duke_input(data).map(|i| i.apply(state)),
        _ => None,
    };
    changes.is_some_and(|c| !c.is_empty())
}

/// Buffer that starts with the input header of `family`.
fn framed(family: ControllerFamily, mut body: Vec<u8>) -> Vec<u8> {
    let header: &[u8] = match family {
        ControllerFamily::XboxOne => &[0x20],
        ControllerFamily::Xbox360Wireless => &[0x00, 0x01, 0x00, 0x00, 0x00, 0x13],
        _ => &[0x00, 0x14],
    };
    for (slot, b) in body.iter_mut().zip(header) {
        *slot = *b;
    }
    body
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_parsers_never_panic(data in proptest::collection::vec(any::<u8>(), 0..80)) {
        let _ = xbox::parse_xboxone_input(&data);
        let _ = xbox::parse_360_wired_packet(&data);
        let _ = xbox::parse_360_wireless_packet(&data);
        let _ = xbox::parse_duke_input(&data);
    }

    #[test]
    fn prop_probe_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        if let Ok(Some(family)) = xbox::probe_interface(&data) {
            let _ = xbox::resolve_endpoints(&data, family);
        }
    }

    #[test]
    fn prop_probe_rejects_single_endpoint(mut data in proptest::collection::vec(any::<u8>(), 23..64), count in 0u8..2) {
        data[4] = count;
        prop_assert!(xbox::probe_interface(&data).is_err());
    }

    #[test]
    fn prop_decode_is_idempotent(
        family in xbox_family(),
        body in proptest::collection::vec(any::<u8>(), 20..40),
    ) {
        let data = framed(family, body);
        let mut state = CanonicalState::new(u64::MAX);
        decode(family, &data, &mut state);
        prop_assert!(!decode(family, &data, &mut state));
    }

    #[test]
    fn prop_valid_mask_only_grows(
        family in xbox_family(),
        bodies in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..40), 1..6),
    ) {
        let mut state = CanonicalState::new(u64::MAX);
        let mut last_valid = 0u64;
        for body in bodies {
            decode(family, &framed(family, body), &mut state);
            prop_assert_eq!(state.valid_mask() & last_valid, last_valid);
            prop_assert_eq!(state.changed_mask() & !state.valid_mask(), 0);
            last_valid = state.valid_mask();
        }
    }

    #[test]
    fn prop_xboxone_rumble_clamped(left in any::<u8>(), right in any::<u8>()) {
        let out = xbox::build_xboxone_rumble(left, right);
        prop_assert_eq!(out[8], left.min(100));
        prop_assert_eq!(out[9], right.min(100));
        prop_assert_eq!(out.len(), 13);
    }

    #[test]
    fn prop_360_rumble_passthrough(left in any::<u8>(), right in any::<u8>()) {
        let wired = xbox::build_360_wired_rumble(left, right);
        let wireless = xbox::build_360_wireless_rumble(left, right);
        prop_assert_eq!((wired[3], wired[4]), (left, right));
        prop_assert_eq!((wireless[5], wireless[6]), (left, right));
        prop_assert_eq!(xbox::build_duke_rumble(left, right), [0, 6, left, left, right, right]);
    }
}
