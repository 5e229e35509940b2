// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device data model.
//!
//! - [`RawDevice`] - A sighting as emitted by the adapter layer
//! - [`DeviceRecord`] - The canonical record kept by the store
//! - [`Normalize`] / [`DefaultNormalizer`] - Raw-to-canonical conversion
//! - [`ErrorRecord`] - Opaque scan or connection error payload
//!
//! # Examples
//!
//! ```
//! use bledisco_lib::device::{DefaultNormalizer, Normalize, RawDevice};
//!
//! let raw = RawDevice::new("C4:5A:2B:19:0E:F1")
//!     .with_name("Thingy")
//!     .with_services(["EF680100-9B35-4933-9B10-52FFA9740042"])
//!     .with_rssi(-58);
//!
//! let record = DefaultNormalizer::new().normalize(&raw);
//! assert_eq!(record.name(), "Thingy");
//! assert_eq!(record.rssi_level(), Some(3));
//! ```

mod normalize;
mod raw;
mod record;

use std::collections::BTreeMap;

pub use normalize::{AD_COMPLETE_LOCAL_NAME, AD_SHORT_LOCAL_NAME, DefaultNormalizer, Normalize};
pub use raw::RawDevice;
pub use record::{DeviceRecord, ErrorRecord};

/// Advertisement fields keyed by AD type identifier.
pub type AdData = BTreeMap<String, serde_json::Value>;
