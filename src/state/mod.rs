// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discovery state and its transition function.
//!
//! [`DiscoveryState`] is an immutable snapshot of the devices and errors seen
//! during a discovery session. [`DiscoveryReducer::apply`] (or the shorthand
//! [`apply`] / [`DiscoveryState::apply`]) derives the next snapshot from an
//! event. The caller threads the current snapshot through successive calls.
//!
//! | Event | Effect |
//! |---|---|
//! | `ScanStarted`, `ScanStopped` | none (logged) |
//! | `ClearList` | all devices dropped, errors kept |
//! | `ErrorOccurred` | error appended |
//! | `ToggleExpanded` | expansion flag flipped |
//! | `DeviceDiscovered` | sighting merged via [`merge_sighting`] |
//! | `DeviceConnect` / `DeviceConnectTimeout` | connecting flag set / cleared |
//! | `DeviceConnected` | device dropped from the list |
//! | `DeviceCancelConnect` | connecting flag cleared on every device |
//! | `AdapterResetPerformed`, `AdapterClosed` | back to the zero state |
//! | `Unknown` | none |
//!
//! Events addressing a device that is not in the list change nothing.
//!
//! # Examples
//!
//! ```
//! use bledisco_lib::device::RawDevice;
//! use bledisco_lib::event::DiscoveryEvent;
//! use bledisco_lib::state::DiscoveryState;
//!
//! let state = DiscoveryState::new()
//!     .apply(DiscoveryEvent::ScanStarted)
//!     .apply(DiscoveryEvent::DeviceDiscovered(RawDevice::new("AA").with_name("Thingy")))
//!     .apply(DiscoveryEvent::DeviceDiscovered(RawDevice::new("AA")))
//!     .apply(DiscoveryEvent::toggle_expanded("AA"));
//!
//! let device = state.device("AA").unwrap();
//! assert_eq!(device.name(), "Thingy");
//! assert!(device.is_expanded());
//! ```

mod discovery_state;
mod merge;
mod reducer;

pub use discovery_state::DiscoveryState;
pub use merge::merge_sighting;
pub use reducer::{DiscoveryReducer, apply};
