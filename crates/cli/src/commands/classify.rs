//! Family classification from the command line

use anyhow::Result;
use openpad_session::{BluetoothQuirk, ClassifyInput, classify, classify_bluetooth, classify_usb};
use serde_json::json;
use tracing::debug;

use crate::commands::ClassifyArgs;
use crate::error::CliError;
use crate::output;
use crate::parse::parse_hex_bytes;

pub fn execute(args: &ClassifyArgs, json: bool) -> Result<()> {
    if let (Some(vendor_id), Some(product_id)) = (args.vid, args.pid) {
        return classify_usb_identity(vendor_id, product_id, args.descriptor.as_deref(), json);
    }
    if args.bt_class.is_some() || args.bt_name.is_some() {
        return classify_bluetooth_identity(args.bt_class.unwrap_or(0), args.bt_name.as_deref(), json);
    }
    Err(CliError::Validation("give --vid/--pid or --bt-class/--bt-name".to_string()).into())
}

fn classify_usb_identity(vendor_id: u16, product_id: u16, descriptor: Option<&str>, json: bool) -> Result<()> {
    let source = format!("usb {vendor_id:04x}:{product_id:04x}");
    let family = match descriptor {
        Some(text) => {
            let block = parse_hex_bytes(text)?;
            debug!(len = block.len(), "classifying interface descriptor block");
            classify_usb(vendor_id, product_id, &block).map_err(CliError::from)?
        }
        None => classify(ClassifyInput::Usb {
            vendor_id,
            product_id,
            descriptors: None,
        }),
    };
    output::print_classification(&source, family, json);
    Ok(())
}

fn classify_bluetooth_identity(class_of_device: u32, name: Option<&str>, json: bool) -> Result<()> {
    let source = match name {
        Some(name) => format!("bluetooth class {class_of_device:#08x} name \"{name}\""),
        None => format!("bluetooth class {class_of_device:#08x}"),
    };
    let verdict = classify_bluetooth(class_of_device, name);
    if json {
        output::print_success(
            "classification",
            json!({
                "source": source,
                "accepted": verdict.is_some(),
                "family": verdict.map(|v| v.family).unwrap_or_default(),
                "quirk": verdict.map(|v| v.quirk).unwrap_or_default(),
            }),
        );
        return Ok(());
    }
    match verdict {
        Some(v) => {
            output::print_classification(&source, v.family, false);
            if v.quirk != BluetoothQuirk::None {
                println!("  Quirk: {:?}", v.quirk);
            }
        }
        None => println!("Not a controller: {source}"),
    }
    Ok(())
}
