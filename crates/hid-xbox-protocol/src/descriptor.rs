//! Interface descriptor probing and endpoint resolution.
//!
//! The host hands over the descriptor block of one interface: the 9-byte
//! interface descriptor followed by (optionally) one class descriptor and
//! the endpoint descriptors.

use crate::ids::{interface, usb};
use openpad_errors::DescriptorFault;
use openpad_gamepad_types::ControllerFamily;
use openpad_hid_common::{PipeRequest, ReportReader};

/// Interface descriptor plus two endpoint descriptors.
pub const MIN_INTERFACE_BLOCK_LEN: usize = usb::INTERFACE_DESCRIPTOR_LEN + 7 + 7;

/// Identify an Xbox interface from its descriptor block.
///
/// Returns `Ok(None)` when the block is well-formed but matches no Xbox
/// signature, so the caller can fall back to an identity lookup.
pub fn probe_interface(descriptors: &[u8]) -> Result<Option<ControllerFamily>, DescriptorFault> {
    if descriptors.len() < MIN_INTERFACE_BLOCK_LEN {
        return Err(DescriptorFault::TooShort {
            len: descriptors.len(),
        });
    }
    let d = ReportReader::new(descriptors);
    let byte = |offset: usize| d.u8_at(offset).unwrap_or(0);

    let count = byte(interface::NUM_ENDPOINTS_OFFSET);
    if count < 2 {
        return Err(DescriptorFault::TooFewEndpoints { count });
    }

    let class = byte(interface::CLASS_OFFSET);
    let subclass = byte(interface::SUBCLASS_OFFSET);
    let protocol = byte(interface::PROTOCOL_OFFSET);

    let family = if subclass == interface::XBOX360_SUBCLASS
        && protocol == interface::XBOX360_WIRED_PROTOCOL
    {
        Some(ControllerFamily::Xbox360Wired)
    } else if subclass == interface::XBOX360_SUBCLASS
        && protocol == interface::XBOX360_WIRELESS_PROTOCOL
    {
        Some(ControllerFamily::Xbox360Wireless)
    } else if subclass == interface::XBOXONE_SUBCLASS
        && protocol == interface::XBOXONE_PROTOCOL
        && interface::XBOXONE_INTERVAL_OFFSETS
            .iter()
            .all(|&offset| byte(offset) == interface::XBOXONE_INTERVAL)
    {
        Some(ControllerFamily::XboxOne)
    } else if class == interface::DUKE_CLASS && subclass == interface::DUKE_SUBCLASS {
        Some(ControllerFamily::XboxDuke)
    } else {
        None
    };
    Ok(family)
}

/// One interrupt endpoint picked from the descriptor block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    /// `bEndpointAddress`, direction bit included
    pub address: u8,
    pub max_packet: u8,
    pub interval: u8,
}

impl EndpointInfo {
    pub fn number(&self) -> u8 {
        self.address & 0x0F
    }
}

/// The receive and transmit endpoints of a claimed interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointPlan {
    pub rx: EndpointInfo,
    pub tx: EndpointInfo,
}

impl EndpointPlan {
    pub fn rx_request(&self) -> PipeRequest {
        PipeRequest::interrupt_in(
            self.rx.address,
            u16::from(self.rx.max_packet),
            self.rx.interval,
        )
    }

    pub fn tx_request(&self) -> PipeRequest {
        PipeRequest::interrupt_out(
            self.tx.address,
            u16::from(self.tx.max_packet),
            self.tx.interval,
        )
    }
}

/// Walk the endpoint descriptors and pick the interrupt IN/OUT pair.
///
/// One non-endpoint descriptor directly after the interface descriptor is
/// skipped. The wireless 360 receiver reports its IN interval in
/// milliseconds; it is scaled by 8 to microframes.
pub fn resolve_endpoints(
    descriptors: &[u8],
    family: ControllerFamily,
) -> Result<EndpointPlan, DescriptorFault> {
    let d = ReportReader::new(descriptors);
    let short = || DescriptorFault::TooShort {
        len: descriptors.len(),
    };

    let mut count = d.u8_at(interface::NUM_ENDPOINTS_OFFSET).ok_or_else(short)?;
    let mut index = usb::INTERFACE_DESCRIPTOR_LEN;
    if d.u8_at(index + 1).ok_or_else(short)? != usb::ENDPOINT_DESCRIPTOR_TYPE {
        index += usize::from(d.u8_at(index).ok_or_else(short)?);
    }

    let mut rx: Option<EndpointInfo> = None;
    let mut tx: Option<EndpointInfo> = None;

    while count > 0 && (rx.is_none() || tx.is_none()) {
        let ep = d.slice(index, usize::from(usb::ENDPOINT_DESCRIPTOR_LEN));
        let length = d.u8_at(index).ok_or_else(short)?;
        let kind = d.u8_at(index + 1).ok_or_else(short)?;
        if length != usb::ENDPOINT_DESCRIPTOR_LEN || kind != usb::ENDPOINT_DESCRIPTOR_TYPE {
            return Err(DescriptorFault::UnexpectedDescriptor {
                offset: index,
                length,
                kind,
            });
        }
        let ep = ep.ok_or_else(short)?;
        let (address, attributes, size_lo, size_hi, interval) = match *ep {
            [_, _, address, attributes, size_lo, size_hi, interval] => {
                (address, attributes, size_lo, size_hi, interval)
            }
            _ => return Err(short()),
        };

        if attributes == usb::TRANSFER_INTERRUPT
            && size_lo <= usb::MAX_INTERRUPT_PACKET
            && size_hi == 0
        {
            if address & usb::ENDPOINT_DIR_IN != 0 {
                let interval = if family == ControllerFamily::Xbox360Wireless {
                    interval.saturating_mul(8)
                } else {
                    interval
                };
                rx = Some(EndpointInfo {
                    address,
                    max_packet: size_lo,
                    interval,
                });
            } else {
                tx = Some(EndpointInfo {
                    address,
                    max_packet: size_lo,
                    interval,
                });
            }
        }
        index += usize::from(usb::ENDPOINT_DESCRIPTOR_LEN);
        count -= 1;
    }

    match (rx, tx) {
        (Some(rx), Some(tx)) => {
            tracing::debug!(
                rx = rx.address,
                tx = tx.address,
                rx_interval = rx.interval,
                "resolved interrupt endpoints"
            );
            Ok(EndpointPlan { rx, tx })
        }
        _ => Err(DescriptorFault::MissingEndpoint),
    }
}
