// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw scan result as emitted by the adapter layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DeviceAddress;

use super::AdData;

/// A device sighting as reported by the adapter, before normalization.
///
/// Only `address` is mandatory. Every other field defaults when absent,
/// since individual advertising packets rarely carry all of them.
///
/// # Examples
///
/// ```
/// use bledisco_lib::device::RawDevice;
///
/// let json = r#"{
///     "address": "C4:5A:2B:19:0E:F1",
///     "name": "Thingy",
///     "rssi": -61,
///     "advType": "ADV_IND",
///     "adData": {"BLE_GAP_AD_TYPE_FLAGS": ["BLE_GAP_ADV_FLAG_LE_GENERAL_DISC_MODE"]}
/// }"#;
///
/// let raw: RawDevice = serde_json::from_str(json).unwrap();
/// assert_eq!(raw.address.as_str(), "C4:5A:2B:19:0E:F1");
/// assert!(raw.services.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    /// Peer address.
    pub address: DeviceAddress,
    /// GAP address type as a driver string.
    #[serde(default)]
    pub address_type: Option<String>,
    /// Advertised name, if the packet carried one.
    #[serde(default)]
    pub name: Option<String>,
    /// Advertised service UUIDs.
    #[serde(default)]
    pub services: Vec<String>,
    /// Advertisement fields keyed by AD type.
    #[serde(default)]
    pub ad_data: AdData,
    /// Signal strength in dBm.
    #[serde(default)]
    pub rssi: Option<i32>,
    /// Advertised TX power in dBm.
    #[serde(default)]
    pub tx_power: Option<i32>,
    /// Advertising PDU type as a driver string.
    #[serde(default)]
    pub adv_type: Option<String>,
    /// When the packet was received.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl RawDevice {
    /// Creates a sighting carrying only an address.
    #[must_use]
    pub fn new(address: impl Into<DeviceAddress>) -> Self {
        Self {
            address: address.into(),
            address_type: None,
            name: None,
            services: Vec::new(),
            ad_data: AdData::new(),
            rssi: None,
            tx_power: None,
            adv_type: None,
            time: None,
        }
    }

    /// Sets the advertised name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the advertised services.
    #[must_use]
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one advertisement field.
    #[must_use]
    pub fn with_ad_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.ad_data.insert(key.into(), value);
        self
    }

    /// Sets the signal strength.
    #[must_use]
    pub fn with_rssi(mut self, dbm: i32) -> Self {
        self.rssi = Some(dbm);
        self
    }

    /// Sets the advertising PDU type.
    #[must_use]
    pub fn with_adv_type(mut self, adv_type: impl Into<String>) -> Self {
        self.adv_type = Some(adv_type.into());
        self
    }
}
