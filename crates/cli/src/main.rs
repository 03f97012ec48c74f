//! padctl - OpenPad controller diagnostics
//!
//! Classifies controller identities, replays captured reports through the
//! decoders and renders the exact bytes a feedback request puts on the wire.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;
mod parse;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ClassifyArgs, DecodeArgs, FeedbackCommands};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "padctl")]
#[command(about = "OpenPad controller diagnostics - classify pads, replay reports, render feedback")]
#[command(version)]
#[command(long_about = "
padctl drives the OpenPad protocol core without any hardware attached.
It classifies USB and Bluetooth identities, decodes captured reports into
the canonical button/axis state and prints the packets that rumble, LED,
pairing and keep-alive requests produce for every supported controller.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(long, global = true, help = "Output in JSON format for machine parsing")]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Session configuration file (JSON); defaults plus OPENPAD_* overrides otherwise
    #[arg(long, global = true, env = "PADCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the controller family of a USB or Bluetooth identity
    Classify(ClassifyArgs),

    /// Replay captured reports through a family's decoder
    Decode(DecodeArgs),

    /// Render feedback, pairing and setup packets
    #[command(subcommand)]
    Feedback(FeedbackCommands),

    /// Show the effective session configuration
    Config,

    /// List supported controller families
    Families,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("padctl={log_level},openpad={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = match e.downcast_ref::<CliError>() {
                Some(CliError::Rejected(_)) => 2,
                Some(CliError::InvalidHex(_)) | Some(CliError::Validation(_)) => 4,
                Some(CliError::Unsupported { .. }) => 5,
                Some(CliError::Config { .. }) | Some(CliError::Json(_)) => 6,
                _ => 1,
            };

            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = commands::config::load(cli.config.as_deref())?;
    match &cli.command {
        Commands::Classify(args) => commands::classify::execute(args, cli.json),
        Commands::Decode(args) => commands::decode::execute(args, cli.json),
        Commands::Feedback(cmd) => commands::feedback::execute(cmd, &config, cli.json),
        Commands::Config => commands::config::show(&config, cli.json),
        Commands::Families => {
            output::print_families(cli.json);
            Ok(())
        }
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LinkArg;
    use openpad_gamepad_types::ControllerFamily;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_classify_usb() -> TestResult {
        let cli = Cli::try_parse_from(["padctl", "classify", "--vid", "054c", "--pid", "0x05C4"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.vid, Some(0x054C));
                assert_eq!(args.pid, Some(0x05C4));
            }
            _ => return Err("expected classify".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_decode_with_family_and_reports() -> TestResult {
        let cli = Cli::try_parse_from([
            "padctl", "-vv", "--json", "decode", "--family", "xbox-one", "20 00 01 0e",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Decode(args) => {
                assert_eq!(args.family, ControllerFamily::XboxOne);
                assert_eq!(args.reports.len(), 1);
            }
            _ => return Err("expected decode".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_feedback_rumble_link() -> TestResult {
        let cli = Cli::try_parse_from([
            "padctl", "feedback", "rumble", "--family", "ps4", "--link", "bluetooth", "10", "20",
        ])?;
        match cli.command {
            Commands::Feedback(FeedbackCommands::Rumble { link, low, high, .. }) => {
                assert_eq!(link, Some(LinkArg::Bluetooth));
                assert_eq!((low, high), (10, 20));
            }
            _ => return Err("expected feedback rumble".into()),
        }
        Ok(())
    }

    #[test]
    fn unknown_family_is_a_parse_error() {
        assert!(Cli::try_parse_from(["padctl", "decode", "--family", "gamecube", "00"]).is_err_and(
            |e| e.kind() == clap::error::ErrorKind::ValueValidation
        ));
    }
}
