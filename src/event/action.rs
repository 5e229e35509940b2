// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of JSON actions into discovery events.
//!
//! Actions are JSON objects tagged by a `"type"` string. Payload shapes:
//!
//! | `type` | Payload |
//! |---|---|
//! | `DISCOVERY_SCAN_STARTED`, `DISCOVERY_SCAN_STOPPED`, `DISCOVERY_CLEAR_LIST` | none |
//! | `ERROR_OCCURED` | `error`: any JSON value |
//! | `DISCOVERY_TOGGLE_EXPANDED` | `deviceAddress`: string |
//! | `DEVICE_DISCOVERED` | `device`: raw device object |
//! | `DEVICE_CONNECT`, `DEVICE_CONNECTED` | `device`: `{ "address": ... }` |
//! | `DEVICE_CONNECT_TIMEOUT` | `deviceAddress`: `{ "address": ... }` |
//! | `DEVICE_CANCEL_CONNECT`, `ADAPTER_RESET_PERFORMED`, `ADAPTER_CLOSED` | none |
//!
//! Any other `type` decodes to [`DiscoveryEvent::Unknown`]. Extra fields are
//! ignored everywhere.

use serde::Deserialize;
use serde_json::Value;

use crate::device::{ErrorRecord, RawDevice};
use crate::error::ParseError;
use crate::types::DeviceAddress;

use super::DiscoveryEvent;

/// Wire shape of an action.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Action {
    #[serde(rename = "DISCOVERY_SCAN_STARTED")]
    ScanStarted,

    #[serde(rename = "DISCOVERY_SCAN_STOPPED")]
    ScanStopped,

    #[serde(rename = "DISCOVERY_CLEAR_LIST")]
    ClearList,

    // Spelling matches the kind emitted by the adapter layer.
    #[serde(rename = "ERROR_OCCURED")]
    ErrorOccurred {
        #[serde(default)]
        error: ErrorRecord,
    },

    #[serde(rename = "DISCOVERY_TOGGLE_EXPANDED")]
    ToggleExpanded {
        #[serde(rename = "deviceAddress")]
        device_address: DeviceAddress,
    },

    #[serde(rename = "DEVICE_DISCOVERED")]
    DeviceDiscovered { device: RawDevice },

    #[serde(rename = "DEVICE_CONNECT")]
    DeviceConnect { device: AddressRef },

    #[serde(rename = "DEVICE_CONNECTED")]
    DeviceConnected { device: AddressRef },

    #[serde(rename = "DEVICE_CONNECT_TIMEOUT")]
    DeviceConnectTimeout {
        #[serde(rename = "deviceAddress")]
        device_address: AddressRef,
    },

    #[serde(rename = "DEVICE_CANCEL_CONNECT")]
    DeviceCancelConnect,

    #[serde(rename = "ADAPTER_RESET_PERFORMED")]
    AdapterResetPerformed,

    #[serde(rename = "ADAPTER_CLOSED")]
    AdapterClosed,

    #[serde(other)]
    Unknown,
}

/// An object carrying at least an `address` field.
#[derive(Debug, Deserialize)]
struct AddressRef {
    address: DeviceAddress,
}

impl From<Action> for DiscoveryEvent {
    fn from(action: Action) -> Self {
        match action {
            Action::ScanStarted => Self::ScanStarted,
            Action::ScanStopped => Self::ScanStopped,
            Action::ClearList => Self::ClearList,
            Action::ErrorOccurred { error } => Self::ErrorOccurred(error),
            Action::ToggleExpanded { device_address } => Self::ToggleExpanded(device_address),
            Action::DeviceDiscovered { device } => Self::DeviceDiscovered(device),
            Action::DeviceConnect { device } => Self::DeviceConnect(device.address),
            Action::DeviceConnected { device } => Self::DeviceConnected(device.address),
            Action::DeviceConnectTimeout { device_address } => {
                Self::DeviceConnectTimeout(device_address.address)
            }
            Action::DeviceCancelConnect => Self::DeviceCancelConnect,
            Action::AdapterResetPerformed => Self::AdapterResetPerformed,
            Action::AdapterClosed => Self::AdapterClosed,
            Action::Unknown => Self::Unknown,
        }
    }
}

/// Decodes an action from a JSON string.
///
/// # Errors
///
/// Returns [`ParseError::Json`] for invalid JSON, [`ParseError::MissingKind`]
/// when the object has no string `type`, and [`ParseError::InvalidPayload`]
/// when a recognized action has a malformed payload.
///
/// # Examples
///
/// ```
/// use bledisco_lib::event::{DiscoveryEvent, parse_action};
///
/// let event = parse_action(r#"{"type":"DEVICE_CONNECT","device":{"address":"AA:BB"}}"#).unwrap();
/// assert_eq!(event, DiscoveryEvent::connect("AA:BB"));
///
/// let event = parse_action(r#"{"type":"SERVER_SETUP_DONE"}"#).unwrap();
/// assert_eq!(event, DiscoveryEvent::Unknown);
/// ```
pub fn parse_action(json: &str) -> Result<DiscoveryEvent, ParseError> {
    let value: Value = serde_json::from_str(json)?;
    parse_action_value(value)
}

/// Decodes an action from an already parsed JSON value.
///
/// # Errors
///
/// Same as [`parse_action`], minus JSON syntax errors.
pub fn parse_action_value(value: Value) -> Result<DiscoveryEvent, ParseError> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingKind)?
        .to_string();

    let action: Action = serde_json::from_value(value).map_err(|source| {
        ParseError::InvalidPayload {
            kind: kind.clone(),
            source,
        }
    })?;

    if matches!(action, Action::Unknown) {
        tracing::debug!(kind = %kind, "Ignoring unhandled action");
    } else {
        tracing::trace!(kind = %kind, "Decoded action");
    }

    Ok(action.into())
}
