// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical device record and error payload.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AddressType, AdvType, DeviceAddress, Rssi};

use super::AdData;

/// Canonical per-device state tracked by the discovery store.
///
/// Records are produced by a [`Normalize`](super::Normalize) implementation
/// from a [`RawDevice`](super::RawDevice) and then reconciled against any
/// previously stored record for the same address.
///
/// The sighting attributes (`rssi`, `tx_power`, `adv_type`, ...) always
/// describe the newest packet. `name`, `services` and `ad_data` may carry
/// values learned from earlier packets. `is_expanded` and `is_connecting`
/// are UI and connection flags owned by the store.
///
/// # Examples
///
/// ```
/// use bledisco_lib::device::DeviceRecord;
///
/// let record = DeviceRecord::new("AA:BB").with_name("Thingy");
/// assert_eq!(record.name(), "Thingy");
/// assert!(!record.is_expanded());
/// assert!(!record.is_connecting());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Device address, the record's identity.
    address: DeviceAddress,
    /// GAP address type, if reported.
    address_type: Option<AddressType>,
    /// Display name, empty until one has been seen.
    name: String,
    /// Advertised service UUIDs, in advertisement order.
    services: Vec<String>,
    /// Advertisement fields keyed by AD type.
    ad_data: AdData,
    /// Signal strength of the newest sighting.
    rssi: Option<Rssi>,
    /// Signal bar count derived from `rssi`.
    rssi_level: Option<u8>,
    /// Advertised TX power in dBm.
    tx_power: Option<i8>,
    /// Advertising PDU type of the newest sighting.
    adv_type: Option<AdvType>,
    /// Connectability derived from `adv_type`.
    connectable: Option<bool>,
    /// When the device was last seen.
    time: Option<DateTime<Utc>>,
    /// Whether the entry is expanded in the device list.
    is_expanded: bool,
    /// Whether a connection attempt is in progress.
    is_connecting: bool,
}

impl DeviceRecord {
    /// Creates a record with an empty name, no services, and no
    /// advertisement data.
    #[must_use]
    pub fn new(address: impl Into<DeviceAddress>) -> Self {
        Self {
            address: address.into(),
            address_type: None,
            name: String::new(),
            services: Vec::new(),
            ad_data: AdData::new(),
            rssi: None,
            rssi_level: None,
            tx_power: None,
            adv_type: None,
            connectable: None,
            time: None,
            is_expanded: false,
            is_connecting: false,
        }
    }

    // ========== Builders ==========

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the service list.
    #[must_use]
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the advertisement data.
    #[must_use]
    pub fn with_ad_data(mut self, ad_data: AdData) -> Self {
        self.ad_data = ad_data;
        self
    }

    /// Sets the address type.
    #[must_use]
    pub fn with_address_type(mut self, address_type: Option<AddressType>) -> Self {
        self.address_type = address_type;
        self
    }

    /// Sets the signal strength and its precomputed level.
    #[must_use]
    pub fn with_rssi(mut self, rssi: Option<Rssi>, level: Option<u8>) -> Self {
        self.rssi = rssi;
        self.rssi_level = level;
        self
    }

    /// Sets the advertised TX power.
    #[must_use]
    pub fn with_tx_power(mut self, tx_power: Option<i8>) -> Self {
        self.tx_power = tx_power;
        self
    }

    /// Sets the advertising PDU type and derives connectability from it.
    #[must_use]
    pub fn with_adv_type(mut self, adv_type: Option<AdvType>) -> Self {
        self.adv_type = adv_type;
        self.connectable = adv_type.and_then(|t| t.connectable());
        self
    }

    /// Sets the sighting timestamp.
    #[must_use]
    pub fn with_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.time = time;
        self
    }

    // ========== Accessors ==========

    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// Returns the address type, if reported.
    #[must_use]
    pub fn address_type(&self) -> Option<AddressType> {
        self.address_type
    }

    /// Returns the name. Empty when no name has been seen.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the advertised service UUIDs.
    #[must_use]
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Returns the advertisement data.
    #[must_use]
    pub fn ad_data(&self) -> &AdData {
        &self.ad_data
    }

    /// Returns the signal strength of the newest sighting.
    #[must_use]
    pub fn rssi(&self) -> Option<Rssi> {
        self.rssi
    }

    /// Returns the signal level (bar count) of the newest sighting.
    #[must_use]
    pub fn rssi_level(&self) -> Option<u8> {
        self.rssi_level
    }

    /// Returns the advertised TX power in dBm.
    #[must_use]
    pub fn tx_power(&self) -> Option<i8> {
        self.tx_power
    }

    /// Returns the advertising PDU type of the newest sighting.
    #[must_use]
    pub fn adv_type(&self) -> Option<AdvType> {
        self.adv_type
    }

    /// Returns whether the device accepts connections, if known.
    #[must_use]
    pub fn connectable(&self) -> Option<bool> {
        self.connectable
    }

    /// Returns when the device was last seen.
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Returns the UI expansion flag.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Returns whether a connection attempt is in progress.
    #[must_use]
    pub fn is_connecting(&self) -> bool {
        self.is_connecting
    }

    // ========== Store-owned fields ==========

    pub(crate) fn set_address(&mut self, address: DeviceAddress) {
        self.address = address;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_services(&mut self, services: Vec<String>) {
        self.services = services;
    }

    pub(crate) fn ad_data_mut(&mut self) -> &mut AdData {
        &mut self.ad_data
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    pub(crate) fn set_connecting(&mut self, connecting: bool) {
        self.is_connecting = connecting;
    }
}

/// Opaque error payload recorded by the store.
///
/// The payload is kept exactly as supplied; the store never inspects it.
///
/// # Examples
///
/// ```
/// use bledisco_lib::device::ErrorRecord;
///
/// let err = ErrorRecord::from("Scan failed: NRF_ERROR_INVALID_STATE");
/// assert_eq!(err.to_string(), "Scan failed: NRF_ERROR_INVALID_STATE");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorRecord(serde_json::Value);

impl ErrorRecord {
    /// Wraps an arbitrary JSON payload.
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the record and returns the payload.
    #[must_use]
    pub fn into_payload(self) -> serde_json::Value {
        self.0
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<serde_json::Value> for ErrorRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<&str> for ErrorRecord {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

impl From<String> for ErrorRecord {
    fn from(value: String) -> Self {
        Self(serde_json::Value::String(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_has_defaults() {
        let record = DeviceRecord::new("AA");
        assert_eq!(record.address().as_str(), "AA");
        assert_eq!(record.name(), "");
        assert!(record.services().is_empty());
        assert!(record.ad_data().is_empty());
        assert!(!record.is_expanded());
        assert!(!record.is_connecting());
        assert!(record.connectable().is_none());
    }

    #[test]
    fn adv_type_sets_connectable() {
        let record = DeviceRecord::new("AA").with_adv_type(Some(AdvType::AdvNonconnInd));
        assert_eq!(record.connectable(), Some(false));

        let record = record.with_adv_type(None);
        assert_eq!(record.connectable(), None);
    }

    #[test]
    fn record_serializes_camel_case() {
        let value = serde_json::to_value(DeviceRecord::new("AA").with_name("n")).unwrap();
        assert_eq!(value["address"], "AA");
        assert_eq!(value["name"], "n");
        assert_eq!(value["isExpanded"], false);
        assert_eq!(value["isConnecting"], false);
        assert_eq!(value["adData"], json!({}));
    }

    #[test]
    fn error_record_display() {
        assert_eq!(ErrorRecord::from("boom").to_string(), "boom");
        assert_eq!(
            ErrorRecord::new(json!({"code": 8})).to_string(),
            r#"{"code":8}"#
        );
    }

    #[test]
    fn error_record_keeps_payload() {
        let payload = json!({"message": "timeout", "errno": 13});
        let record = ErrorRecord::from(payload.clone());
        assert_eq!(record.payload(), &payload);
        assert_eq!(record.into_payload(), payload);
    }
}
