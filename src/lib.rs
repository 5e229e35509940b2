// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BleDisco` Lib - discovery state for Bluetooth Low Energy scanners.
//!
//! This library keeps track of the devices seen while scanning: their
//! names, advertised services, advertisement data and signal strength, which
//! of them is being connected to, and the errors the adapter reported. It
//! does no radio work itself; the host feeds it events and renders the
//! resulting snapshots.
//!
//! # Supported Features
//!
//! - **Discovery merge**: repeated sightings of a device refine one record
//!   instead of overwriting what earlier packets taught
//! - **Connection tracking**: connect, timeout, cancel and success events
//! - **Error log**: opaque adapter errors kept in arrival order
//! - **Persistent snapshots**: every transition yields a new value and
//!   leaves older snapshots untouched
//! - **JSON actions**: events decode from `{"type": "...", ...}` objects
//!
//! # Quick Start
//!
//! ## Pure transitions
//!
//! ```
//! use bledisco_lib::{DiscoveryEvent, DiscoveryState, RawDevice};
//!
//! let state = DiscoveryState::new()
//!     .apply(DiscoveryEvent::DeviceDiscovered(
//!         RawDevice::new("EE:A2:11:2C:45:01").with_name("Thingy").with_rssi(-58),
//!     ))
//!     .apply(DiscoveryEvent::connect("EE:A2:11:2C:45:01"));
//!
//! let device = state.device("EE:A2:11:2C:45:01").unwrap();
//! assert_eq!(device.name(), "Thingy");
//! assert!(device.is_connecting());
//!
//! let state = state.apply(DiscoveryEvent::connected("EE:A2:11:2C:45:01"));
//! assert_eq!(state.device_count(), 0);
//! ```
//!
//! ## Store with subscriptions
//!
//! ```
//! use bledisco_lib::DiscoveryStore;
//!
//! # fn main() -> bledisco_lib::Result<()> {
//! let store = DiscoveryStore::new();
//! store.on_error(|error| eprintln!("adapter error: {error}"));
//!
//! store.dispatch_json(r#"{"type":"DISCOVERY_SCAN_STARTED"}"#)?;
//! store.dispatch_json(r#"{"type":"ERROR_OCCURED","error":"Scan timed out"}"#)?;
//!
//! assert_eq!(store.state().errors().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod state;
pub mod store;
pub mod types;

pub use config::{NormalizerConfig, StoreConfig};
pub use device::{DefaultNormalizer, DeviceRecord, ErrorRecord, Normalize, RawDevice};
pub use error::{Error, ParseError, Result, ValueError};
pub use event::{DiscoveryEvent, parse_action};
pub use state::{DiscoveryReducer, DiscoveryState};
pub use store::{DiscoveryStore, SubscriptionId};
pub use types::{AddressType, AdvType, DeviceAddress, Rssi};
