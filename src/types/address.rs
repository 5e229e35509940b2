// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device address types.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identity key of a discovered device.
///
/// The address is kept verbatim as reported by the adapter (for example
/// `"C4:5A:2B:19:0E:F1"`). Two sightings belong to the same device exactly
/// when their address strings are equal; no case folding is applied.
///
/// # Examples
///
/// ```
/// use bledisco_lib::types::DeviceAddress;
///
/// let addr = DeviceAddress::from("C4:5A:2B:19:0E:F1");
/// assert_eq!(addr.as_str(), "C4:5A:2B:19:0E:F1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceAddress(String);

impl DeviceAddress {
    /// Creates an address from any string-like value.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DeviceAddress {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DeviceAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceAddress {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DeviceAddress {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// GAP address type of a peer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AddressType {
    /// Public device address.
    Public,
    /// Random static address.
    RandomStatic,
    /// Random private resolvable address.
    RandomPrivateResolvable,
    /// Random private non-resolvable address.
    RandomPrivateNonResolvable,
}

impl AddressType {
    /// Returns the driver constant for this address type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "BLE_GAP_ADDR_TYPE_PUBLIC",
            Self::RandomStatic => "BLE_GAP_ADDR_TYPE_RANDOM_STATIC",
            Self::RandomPrivateResolvable => "BLE_GAP_ADDR_TYPE_RANDOM_PRIVATE_RESOLVABLE",
            Self::RandomPrivateNonResolvable => {
                "BLE_GAP_ADDR_TYPE_RANDOM_PRIVATE_NON_RESOLVABLE"
            }
        }
    }

    /// Returns `true` for any of the random address types.
    #[must_use]
    pub const fn is_random(&self) -> bool {
        !matches!(self, Self::Public)
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        let short = upper.strip_prefix("BLE_GAP_ADDR_TYPE_").unwrap_or(&upper);
        match short {
            "PUBLIC" => Ok(Self::Public),
            "RANDOM_STATIC" => Ok(Self::RandomStatic),
            "RANDOM_PRIVATE_RESOLVABLE" => Ok(Self::RandomPrivateResolvable),
            "RANDOM_PRIVATE_NON_RESOLVABLE" => Ok(Self::RandomPrivateNonResolvable),
            _ => Err(ValueError::InvalidAddressType(s.to_string())),
        }
    }
}

impl TryFrom<String> for AddressType {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AddressType> for String {
    fn from(value: AddressType) -> Self {
        value.as_str().to_string()
    }
}

/// Advertising PDU type of a sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AdvType {
    /// Connectable undirected advertising.
    AdvInd,
    /// Connectable directed advertising.
    AdvDirectInd,
    /// Scannable undirected advertising.
    AdvScanInd,
    /// Non-connectable undirected advertising.
    AdvNonconnInd,
    /// Scan response.
    ScanRsp,
}

impl AdvType {
    /// Returns the PDU name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AdvInd => "ADV_IND",
            Self::AdvDirectInd => "ADV_DIRECT_IND",
            Self::AdvScanInd => "ADV_SCAN_IND",
            Self::AdvNonconnInd => "ADV_NONCONN_IND",
            Self::ScanRsp => "SCAN_RSP",
        }
    }

    /// Whether the advertiser accepts connections.
    ///
    /// Scan responses carry no connectability information, so they
    /// return `None`.
    #[must_use]
    pub const fn connectable(&self) -> Option<bool> {
        match self {
            Self::AdvInd | Self::AdvDirectInd => Some(true),
            Self::AdvScanInd | Self::AdvNonconnInd => Some(false),
            Self::ScanRsp => None,
        }
    }
}

impl fmt::Display for AdvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADV_IND" => Ok(Self::AdvInd),
            "ADV_DIRECT_IND" => Ok(Self::AdvDirectInd),
            "ADV_SCAN_IND" => Ok(Self::AdvScanInd),
            "ADV_NONCONN_IND" => Ok(Self::AdvNonconnInd),
            "SCAN_RSP" => Ok(Self::ScanRsp),
            _ => Err(ValueError::InvalidAdvType(s.to_string())),
        }
    }
}

impl TryFrom<String> for AdvType {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AdvType> for String {
    fn from(value: AdvType) -> Self {
        value.as_str().to_string()
    }
}
