// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for BLE discovery.
//!
//! # Types
//!
//! - [`DeviceAddress`] - Identity key of a discovered device
//! - [`AddressType`] - GAP address type (public, random static, ...)
//! - [`AdvType`] - Advertising PDU type of a sighting
//! - [`Rssi`] - Received signal strength in dBm

mod address;
mod rssi;

pub use address::{AddressType, AdvType, DeviceAddress};
pub use rssi::Rssi;
