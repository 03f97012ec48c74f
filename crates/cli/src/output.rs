//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use openpad_gamepad_types::{BUTTON_COUNT, CanonicalState, ChangeSet, ControllerFamily};
use openpad_hid_common::hex_dump;
use openpad_session::{Command, Route, SessionConfig, profile};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {error}", "Error:".red().bold());

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {err}", "Caused by:".yellow());
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::Rejected(_)) => "rejected",
        Some(CliError::InvalidHex(_)) => "invalid_hex",
        Some(CliError::Validation(_)) => "validation",
        Some(CliError::Unsupported { .. }) => "unsupported",
        Some(CliError::Config { .. }) => "config",
        Some(CliError::Io(_)) => "io",
        Some(CliError::Json(_)) => "json",
        None => "unknown",
    }
}

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print a successful response wrapped the way every JSON answer is.
pub fn print_success(key: &str, value: Value) {
    let mut output = serde_json::Map::new();
    output.insert("success".to_string(), Value::Bool(true));
    output.insert(key.to_string(), value);
    print_json(&Value::Object(output));
}

/// Print the supported family table.
pub fn print_families(json: bool) {
    let known = ControllerFamily::ALL.into_iter().filter(|f| f.is_known());
    if json {
        let families: Vec<Value> = known
            .map(|family| {
                let p = profile(family);
                json!({
                    "family": family,
                    "name": family.name(),
                    "stream_notify_mask": format!("{:#x}", p.stream_notify_mask),
                    "hid_notify_mask": format!("{:#x}", p.hid_window.notify_mask),
                    "keepalive": p.keepalive,
                })
            })
            .collect();
        print_success("families", Value::Array(families));
        return;
    }

    println!("{}", "Supported Families:".bold());
    for family in known {
        let p = profile(family);
        let vendor = if family.is_playstation() {
            "Sony".blue()
        } else {
            "Microsoft".green()
        };
        print!("  {} {:<18} {}", "●".color("cyan"), family.slug().bold(), vendor);
        if p.keepalive {
            print!(" {}", "(keep-alive)".dimmed());
        }
        println!();
    }
}

/// Print a classification verdict.
pub fn print_classification(source: &str, family: ControllerFamily, json: bool) {
    if json {
        print_success(
            "classification",
            json!({
                "source": source,
                "family": family,
                "known": family.is_known(),
            }),
        );
        return;
    }
    if family.is_known() {
        println!("{} {} ({})", "Family:".bold(), family.name().green(), family.slug());
    } else {
        println!("{} {}", "Family:".bold(), "Unknown".yellow());
    }
    println!("  Source: {source}");
}

fn describe_route(route: &Route) -> String {
    match route {
        Route::Pipe => "interrupt OUT pipe".to_string(),
        Route::HidReport => "HID output report".to_string(),
        Route::Control(setup) => format!(
            "control transfer (type {:#04x}, request {:#04x}, value {:#06x}, index {})",
            setup.request_type, setup.request, setup.value, setup.index
        ),
        Route::Channel(channel) => format!("L2CAP channel {channel:#06x}"),
    }
}

fn command_json(command: &Command) -> Value {
    json!({
        "route": describe_route(&command.route),
        "length": command.bytes().len(),
        "bytes": hex::encode(command.bytes()),
    })
}

/// Print one or more encoded commands under `label`.
pub fn print_commands(label: &str, commands: &[Command], json: bool) {
    if json {
        let rendered: Vec<Value> = commands.iter().map(command_json).collect();
        print_success(
            "commands",
            json!({ "operation": label, "packets": rendered }),
        );
        return;
    }
    if commands.is_empty() {
        println!("{} {}", label.bold(), "(nothing to send)".yellow());
        return;
    }
    println!("{}", label.bold());
    for command in commands {
        println!(
            "  {} {} ({} bytes)",
            "→".cyan(),
            describe_route(&command.route),
            command.bytes().len()
        );
        println!("    {}", hex_dump(command.bytes()));
    }
}

/// Held buttons, 1-based.
fn pressed_buttons(state: &CanonicalState) -> Vec<u32> {
    let count = u32::try_from(BUTTON_COUNT).unwrap_or(u32::MAX);
    (1..=count).filter(|id| state.is_pressed(*id)).collect()
}

fn format_axes(state: &CanonicalState, mask: u64) -> String {
    state
        .axes()
        .iter()
        .enumerate()
        .filter(|(index, _)| u32::try_from(*index).is_ok_and(|i| mask.checked_shr(i).unwrap_or(0) & 1 == 1))
        .map(|(index, value)| format!("a{index}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print what one report did to the state.
pub fn print_report_human(index: usize, data: &[u8], changes: &ChangeSet, event: bool, state: &CanonicalState) {
    let marker = if event { "event".green() } else { "quiet".dimmed() };
    println!("{} {} [{}]", format!("#{index}").bold(), hex_dump(data).dimmed(), marker);
    if changes.is_empty() {
        println!("    no changes");
        return;
    }
    if changes.buttons {
        let pressed = pressed_buttons(state);
        if pressed.is_empty() {
            println!("    buttons: none");
        } else {
            let list: Vec<String> = pressed.iter().map(|b| format!("B{b}")).collect();
            println!("    buttons: {}", list.join(" "));
        }
    }
    if changes.axes != 0 {
        println!("    axes: {}", format_axes(state, changes.axes));
    }
}

/// Print the state left after a replay.
pub fn print_final_state_human(state: &CanonicalState) {
    println!("{}", "Final state:".bold());
    println!("  buttons: {:#010x}", state.buttons());
    println!("  valid axes: {}", format_axes(state, state.valid_mask()));
}

/// Print the effective session configuration.
pub fn print_config(config: &SessionConfig, json: bool) {
    if json {
        print_success("config", json!(config));
        return;
    }
    println!("{}", "Session Configuration:".bold());
    println!("  Keep-alive interval: {} ms", config.keepalive_interval_ms);
    println!(
        "  Report initial HID state: {}",
        if config.report_initial_state {
            "Yes".green()
        } else {
            "No".red()
        }
    );
    println!("  Wired 360 LED quadrant: {}", config.xbox360_wired_led_quadrant);
    let [r, g, b] = config.ps3_motion_connect_color;
    println!("  Move connect colour: #{r:02x}{g:02x}{b:02x}");
}
