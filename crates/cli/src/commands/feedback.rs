//! Feedback, pairing and setup packet rendering

use anyhow::Result;
use openpad_gamepad_types::{ControllerFamily, FeedbackState};
use openpad_hid_common::parse_bdaddr;
use openpad_hid_xbox_protocol as xbox;
use openpad_session::dispatch::{
    bluetooth_connect_command, encode_indicator, encode_pairing, encode_rumble, init_commands,
};
use openpad_session::{Command, LinkKind, Route, SessionConfig};
use tracing::debug;

use crate::commands::{FeedbackCommands, default_link, link_name};
use crate::error::CliError;
use crate::output;

fn unsupported(family: ControllerFamily, operation: &'static str, link: LinkKind) -> CliError {
    CliError::Unsupported {
        family: family.name().to_string(),
        operation,
        link: link_name(link).to_string(),
    }
}

fn raw(data: &[u8]) -> Result<Command, CliError> {
    Command::new(Route::Pipe, data)
        .ok_or_else(|| CliError::Validation(format!("{} byte packet does not fit", data.len())))
}

/// Commands for one feedback request, without printing them.
///
/// # Errors
///
/// `Unsupported` for a family/link pair that has no such packet, and
/// `Validation` for a malformed pairing address.
pub fn render(cmd: &FeedbackCommands, config: &SessionConfig) -> Result<(String, Vec<Command>), CliError> {
    match cmd {
        FeedbackCommands::Rumble {
            family,
            link,
            low,
            high,
            timeout,
        } => {
            let link = link.map_or_else(|| default_link(*family), LinkKind::from);
            let mut fb = FeedbackState::default();
            fb.set_rumble(*low, *high, *timeout);
            let command =
                encode_rumble(*family, link, &fb).ok_or_else(|| unsupported(*family, "rumble", link))?;
            Ok((format!("{family} rumble {low}/{high}"), vec![command]))
        }
        FeedbackCommands::Indicator {
            family,
            link,
            red,
            green,
            blue,
        } => {
            let link = link.map_or_else(|| default_link(*family), LinkKind::from);
            let mut fb = FeedbackState::default();
            fb.set_led(*red, *green, *blue);
            let command = encode_indicator(*family, link, &fb)
                .ok_or_else(|| unsupported(*family, "indicator", link))?;
            Ok((format!("{family} indicator #{red:02x}{green:02x}{blue:02x}"), vec![command]))
        }
        FeedbackCommands::Pair { family, address } => {
            let host = parse_bdaddr(address).map_err(|e| CliError::Validation(e.to_string()))?;
            let command = encode_pairing(*family, LinkKind::HidCollection, &host)
                .ok_or_else(|| unsupported(*family, "pairing", LinkKind::HidCollection))?;
            Ok((format!("{family} pair with {address}"), vec![command]))
        }
        FeedbackCommands::Init {
            family,
            vid,
            pid,
            bluetooth,
        } => {
            if *bluetooth {
                return bluetooth_init(*family, config);
            }
            if !family.is_xbox() {
                return Err(unsupported(*family, "interface init", LinkKind::UsbClass));
            }
            let mut commands = init_commands(*family, *vid, *pid);
            if *family == ControllerFamily::Xbox360Wired {
                let mut fb = FeedbackState::default();
                fb.set_led(0, 0, config.xbox360_wired_led_quadrant);
                commands.extend(encode_indicator(*family, LinkKind::UsbClass, &fb));
            }
            debug!(%family, count = commands.len(), "rendered init sequence");
            Ok((format!("{family} init ({vid:04x}:{pid:04x})"), commands))
        }
        FeedbackCommands::Keepalive { ticks } => {
            let mut commands = Vec::new();
            for tick in 0..*ticks {
                for packet in xbox::keepalive_packets(tick % 2 == 1) {
                    commands.push(raw(packet)?);
                }
            }
            Ok((
                format!(
                    "{} keep-alive, {ticks} tick(s) every {} ms",
                    ControllerFamily::Xbox360Wireless,
                    config.keepalive_interval_ms
                ),
                commands,
            ))
        }
        FeedbackCommands::ChatpadLed { led, on } => {
            let packet = xbox::build_chatpad_led((*led).into(), *on);
            Ok((
                format!("chatpad {led:?} {}", if *on { "on" } else { "off" }),
                vec![raw(&packet)?],
            ))
        }
    }
}

fn bluetooth_init(family: ControllerFamily, config: &SessionConfig) -> Result<(String, Vec<Command>), CliError> {
    if !family.is_playstation() {
        return Err(unsupported(family, "connect", LinkKind::Bluetooth));
    }
    let mut commands: Vec<Command> = bluetooth_connect_command(family).into_iter().collect();
    if family == ControllerFamily::Ps3Motion {
        let [r, g, b] = config.ps3_motion_connect_color;
        let mut fb = FeedbackState::default();
        fb.set_led(r, g, b);
        commands.extend(encode_indicator(family, LinkKind::Bluetooth, &fb));
    }
    Ok((format!("{family} bluetooth connect"), commands))
}

pub fn execute(cmd: &FeedbackCommands, config: &SessionConfig, json: bool) -> Result<()> {
    let (label, commands) = render(cmd, config)?;
    output::print_commands(&label, &commands, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LinkArg;
    use openpad_hid_common::l2cap;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_xbox_rumble_defaults_to_the_pipe() -> TestResult {
        let cmd = FeedbackCommands::Rumble {
            family: ControllerFamily::Xbox360Wired,
            link: None,
            low: 0x40,
            high: 0x80,
            timeout: 0,
        };
        let (_, commands) = render(&cmd, &SessionConfig::default())?;
        let command = commands.first().ok_or("no command")?;
        assert_eq!(command.route, Route::Pipe);
        assert_eq!(command.bytes(), &[0x00, 0x08, 0x00, 0x40, 0x80, 0x00, 0x00, 0x00]);
        Ok(())
    }

    #[test]
    fn test_ps3_motion_bluetooth_connect_lights_the_ball() -> TestResult {
        let cmd = FeedbackCommands::Init {
            family: ControllerFamily::Ps3Motion,
            vid: 0x054C,
            pid: 0x03D5,
            bluetooth: true,
        };
        let (_, commands) = render(&cmd, &SessionConfig::default())?;
        assert_eq!(commands.len(), 1);
        assert!(commands.first().is_some_and(|c| c.route == Route::Channel(l2cap::INTERRUPT)));
        Ok(())
    }

    #[test]
    fn test_unsupported_pairs_are_reported() {
        let cmd = FeedbackCommands::Indicator {
            family: ControllerFamily::XboxOne,
            link: Some(LinkArg::Usb),
            red: 1,
            green: 2,
            blue: 3,
        };
        assert!(matches!(
            render(&cmd, &SessionConfig::default()),
            Err(CliError::Unsupported { operation: "indicator", .. })
        ));
    }

    #[test]
    fn test_keepalive_alternates_chatpad_packets() -> TestResult {
        let (_, commands) = render(&FeedbackCommands::Keepalive { ticks: 2 }, &SessionConfig::default())?;
        assert_eq!(commands.len(), 6);
        let chatpad: Vec<&[u8]> = commands.iter().skip(2).step_by(3).map(Command::bytes).collect();
        assert_eq!(chatpad, vec![&xbox::output::CHATPAD_KEEPALIVE_2[..], &xbox::output::CHATPAD_KEEPALIVE_1[..]]);
        Ok(())
    }

    #[test]
    fn test_pdp_init_sequence() -> TestResult {
        let cmd = FeedbackCommands::Init {
            family: ControllerFamily::XboxOne,
            vid: 0x0E6F,
            pid: 0x02A4,
            bluetooth: false,
        };
        let (_, commands) = render(&cmd, &SessionConfig::default())?;
        let dump: Vec<String> = commands.iter().map(|c| openpad_hid_common::hex_dump(c.bytes())).collect();
        insta::assert_snapshot!(dump.join("\n"), @r"
        05 20 00 01 00
        0A 20 00 03 00 01 14
        06 30
        06 20 00 02 01 00
        ");
        Ok(())
    }

    #[test]
    fn test_bad_address_is_a_validation_error() {
        let cmd = FeedbackCommands::Pair {
            family: ControllerFamily::Ps3,
            address: "00:11:22".to_string(),
        };
        assert!(matches!(render(&cmd, &SessionConfig::default()), Err(CliError::Validation(_))));
    }
}
