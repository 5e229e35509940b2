// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discovery event types.

use crate::device::{ErrorRecord, RawDevice};
use crate::types::DeviceAddress;

/// Events consumed by the discovery reducer.
///
/// Events come from the scan UI (expansion toggles, list clearing) and from
/// the adapter layer (sightings, connection progress, adapter lifecycle).
/// [`DiscoveryEvent::Unknown`] stands for any action the reducer does not
/// handle; it leaves the state untouched.
///
/// # Examples
///
/// ```
/// use bledisco_lib::event::DiscoveryEvent;
/// use bledisco_lib::device::RawDevice;
///
/// let seen = DiscoveryEvent::DeviceDiscovered(RawDevice::new("AA:BB").with_name("Thingy"));
/// assert_eq!(seen.address().map(|a| a.as_str()), Some("AA:BB"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryEvent {
    /// Scanning started.
    ScanStarted,

    /// Scanning stopped.
    ScanStopped,

    /// The user cleared the device list.
    ClearList,

    /// A scan or connection error was reported.
    ErrorOccurred(ErrorRecord),

    /// The user expanded or collapsed a device entry.
    ToggleExpanded(DeviceAddress),

    /// An advertising packet was received.
    DeviceDiscovered(RawDevice),

    /// A connection attempt to a device started.
    DeviceConnect(DeviceAddress),

    /// A device was connected and leaves the discovery list.
    DeviceConnected(DeviceAddress),

    /// A connection attempt to a device timed out.
    DeviceConnectTimeout(DeviceAddress),

    /// All pending connection attempts were cancelled.
    DeviceCancelConnect,

    /// The adapter was reset.
    AdapterResetPerformed,

    /// The adapter was closed.
    AdapterClosed,

    /// An action the discovery reducer does not handle.
    Unknown,
}

impl DiscoveryEvent {
    /// Creates an error event.
    #[must_use]
    pub fn error(error: impl Into<ErrorRecord>) -> Self {
        Self::ErrorOccurred(error.into())
    }

    /// Creates an expansion toggle event.
    #[must_use]
    pub fn toggle_expanded(address: impl Into<DeviceAddress>) -> Self {
        Self::ToggleExpanded(address.into())
    }

    /// Creates a connection-started event.
    #[must_use]
    pub fn connect(address: impl Into<DeviceAddress>) -> Self {
        Self::DeviceConnect(address.into())
    }

    /// Creates a connected event.
    #[must_use]
    pub fn connected(address: impl Into<DeviceAddress>) -> Self {
        Self::DeviceConnected(address.into())
    }

    /// Creates a connection-timeout event.
    #[must_use]
    pub fn connect_timeout(address: impl Into<DeviceAddress>) -> Self {
        Self::DeviceConnectTimeout(address.into())
    }

    /// Returns the device address this event targets, if any.
    #[must_use]
    pub fn address(&self) -> Option<&DeviceAddress> {
        match self {
            Self::ToggleExpanded(address)
            | Self::DeviceConnect(address)
            | Self::DeviceConnected(address)
            | Self::DeviceConnectTimeout(address) => Some(address),
            Self::DeviceDiscovered(raw) => Some(&raw.address),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_extraction() {
        assert_eq!(
            DiscoveryEvent::toggle_expanded("A").address(),
            Some(&DeviceAddress::from("A"))
        );
        assert_eq!(
            DiscoveryEvent::connect_timeout("B").address(),
            Some(&DeviceAddress::from("B"))
        );
        assert_eq!(
            DiscoveryEvent::DeviceDiscovered(RawDevice::new("C")).address(),
            Some(&DeviceAddress::from("C"))
        );
        assert!(DiscoveryEvent::DeviceCancelConnect.address().is_none());
        assert!(DiscoveryEvent::Unknown.address().is_none());
    }
}
