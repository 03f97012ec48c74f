//! Report replay through the family decoders

use anyhow::Result;
use openpad_gamepad_types::{CanonicalState, ChangeSet, ControllerFamily};
use openpad_session::dispatch::{decode_bluetooth, decode_raw};
use openpad_session::{Reaction, profile};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::commands::DecodeArgs;
use crate::error::CliError;
use crate::output;
use crate::parse::parse_hex_bytes;

/// What one replayed report did.
#[derive(Debug, Serialize)]
pub struct ReportOutcome {
    pub index: usize,
    pub bytes: String,
    pub buttons_changed: bool,
    pub axes_changed: String,
    pub event: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    #[serde(skip)]
    pub changes: ChangeSet,
    /// State right after this report.
    #[serde(skip)]
    pub snapshot: CanonicalState,
}

fn reaction_name(reaction: Reaction) -> String {
    match reaction {
        Reaction::LinkStatus(0) => "pad-disconnected".to_string(),
        Reaction::LinkStatus(status) => format!("pad-connected ({status:#04x})"),
        Reaction::SendChatpadInit => "chatpad-init".to_string(),
        Reaction::ChatpadLeds(_) => "chatpad-leds".to_string(),
        Reaction::RumbleOff => "rumble-off".to_string(),
        Reaction::ResetIndicator => "reset-indicator".to_string(),
    }
}

/// Collect reports from arguments and the optional file, in that order.
fn gather_reports(args: &DecodeArgs) -> Result<Vec<Vec<u8>>> {
    let mut reports = args
        .reports
        .iter()
        .map(|text| parse_hex_bytes(text))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)?;
        for line in text.lines() {
            let content = line.split_once('#').map_or(line, |(before, _)| before).trim();
            if content.is_empty() {
                continue;
            }
            reports.push(parse_hex_bytes(content)?);
        }
        debug!(path = %path.display(), count = reports.len(), "loaded capture file");
    }

    if reports.is_empty() {
        return Err(CliError::Validation("no reports given; pass hex arguments or --file".to_string()).into());
    }
    Ok(reports)
}

/// Replay `reports` through `family`'s decoder against a fresh state.
///
/// Sony pads only stream raw reports over Bluetooth; on USB their input
/// arrives through the HID parser instead.
///
/// # Errors
///
/// `Unsupported` when `family` has no decoder for the chosen link.
pub fn replay(
    family: ControllerFamily,
    bluetooth: bool,
    reports: &[Vec<u8>],
) -> Result<(Vec<ReportOutcome>, CanonicalState), CliError> {
    if !family.is_known() || bluetooth != family.is_playstation() {
        return Err(CliError::Unsupported {
            family: family.name().to_string(),
            operation: "raw decode",
            link: if bluetooth { "bluetooth" } else { "usb" }.to_string(),
        });
    }
    let mask = profile(family).stream_notify_mask;
    let mut state = CanonicalState::new(mask);
    let mut outcomes = Vec::with_capacity(reports.len());
    for (index, data) in reports.iter().enumerate() {
        let (changes, reaction) = if bluetooth {
            (decode_bluetooth(family, data, &mut state), None)
        } else {
            let outcome = decode_raw(family, data, &mut state);
            (outcome.changes, outcome.reaction)
        };
        outcomes.push(ReportOutcome {
            index,
            bytes: hex::encode(data),
            buttons_changed: changes.buttons,
            axes_changed: format!("{:#x}", changes.axes),
            event: changes.raises_event(mask),
            reaction: reaction.map(reaction_name),
            changes,
            snapshot: state.clone(),
        });
    }
    Ok((outcomes, state))
}

pub fn execute(args: &DecodeArgs, json: bool) -> Result<()> {
    let reports = gather_reports(args)?;
    info!(family = %args.family, count = reports.len(), bluetooth = args.bluetooth, "replaying reports");
    let (outcomes, state) = replay(args.family, args.bluetooth, &reports)?;

    if json {
        output::print_success(
            "decode",
            json!({
                "family": args.family,
                "reports": outcomes,
                "state": state,
            }),
        );
        return Ok(());
    }

    for (outcome, data) in outcomes.iter().zip(&reports) {
        output::print_report_human(outcome.index, data, &outcome.changes, outcome.event, &outcome.snapshot);
        if let Some(reaction) = &outcome.reaction {
            println!("    reaction: {reaction}");
        }
    }
    output::print_final_state_human(&state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn xboxone_report(buttons: u16) -> Vec<u8> {
        let mut report = vec![0x20, 0x00, 0x01, 0x0E];
        report.extend_from_slice(&buttons.to_le_bytes());
        report.resize(18, 0);
        report
    }

    #[test]
    fn test_replay_reports_only_new_values() -> TestResult {
        let report = xboxone_report(0x0010);
        let (outcomes, state) = replay(ControllerFamily::XboxOne, false, &[report.clone(), report])?;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.first().is_some_and(|o| o.event));
        assert!(outcomes.get(1).is_some_and(|o| !o.event && !o.buttons_changed));
        assert_ne!(state.buttons(), 0);
        Ok(())
    }

    #[test]
    fn test_link_must_match_the_family() {
        assert!(matches!(
            replay(ControllerFamily::XboxDuke, true, &[vec![0xA1, 0x01]]),
            Err(CliError::Unsupported { .. })
        ));
        assert!(matches!(
            replay(ControllerFamily::Ps4, false, &[vec![0x01]]),
            Err(CliError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_short_packets_are_quiet() -> TestResult {
        let (outcomes, state) = replay(ControllerFamily::Xbox360Wired, false, &[vec![0x00, 0x14]])?;
        assert!(outcomes.iter().all(|o| !o.event && o.reaction.is_none()));
        assert_eq!(state.valid_mask(), 0);
        Ok(())
    }
}
