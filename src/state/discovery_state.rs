// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable discovery snapshot.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::device::{DeviceRecord, ErrorRecord};
use crate::types::DeviceAddress;

/// Ordered device map: iteration follows first discovery.
pub(crate) type DeviceMap = IndexMap<DeviceAddress, Arc<DeviceRecord>>;

/// Snapshot of everything seen during a discovery session.
///
/// A `DiscoveryState` is a value: once handed out it never changes. The
/// reducer derives successors copy-on-write, so cloning a snapshot is cheap
/// and older snapshots stay valid (and unchanged) for as long as anyone holds
/// them.
///
/// The default value is the canonical zero state: no devices, no errors.
///
/// # Examples
///
/// ```
/// use bledisco_lib::event::DiscoveryEvent;
/// use bledisco_lib::device::RawDevice;
/// use bledisco_lib::state::DiscoveryState;
///
/// let before = DiscoveryState::new();
/// let after = before
///     .clone()
///     .apply(DiscoveryEvent::DeviceDiscovered(RawDevice::new("AA").with_name("Thingy")));
///
/// assert!(before.is_zero());
/// assert_eq!(after.device("AA").map(|d| d.name()), Some("Thingy"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryState {
    devices: Arc<DeviceMap>,
    errors: Arc<Vec<ErrorRecord>>,
}

impl DiscoveryState {
    /// Creates the canonical zero state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Devices ==========

    /// Looks up a device by address.
    #[must_use]
    pub fn device(&self, address: &str) -> Option<&DeviceRecord> {
        self.devices.get(address).map(Arc::as_ref)
    }

    /// Returns `true` if a device with this address is tracked.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.devices.contains_key(address)
    }

    /// Iterates over devices in order of first discovery.
    pub fn devices(&self) -> impl ExactSizeIterator<Item = &DeviceRecord> {
        self.devices.values().map(Arc::as_ref)
    }

    /// Iterates over device addresses in order of first discovery.
    pub fn addresses(&self) -> impl ExactSizeIterator<Item = &DeviceAddress> {
        self.devices.keys()
    }

    /// Iterates over devices with a connection attempt in progress.
    pub fn connecting_devices(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices().filter(|d| d.is_connecting())
    }

    /// Returns the number of tracked devices.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    // ========== Errors ==========

    /// Returns recorded errors, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Returns the most recent error.
    #[must_use]
    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.errors.last()
    }

    // ========== Identity ==========

    /// Returns `true` if this is the canonical zero state.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.devices.is_empty() && self.errors.is_empty()
    }

    /// Returns `true` if both snapshots are the same value in memory.
    ///
    /// A transition that changes nothing hands back its input, so this is a
    /// cheap change check for subscribers.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.devices, &other.devices) && Arc::ptr_eq(&self.errors, &other.errors)
    }

    // ========== Copy-on-write access for the reducer ==========

    /// Mutable access to one device, cloning only what is shared.
    ///
    /// Returns `None` without touching anything when the address is absent.
    pub(crate) fn device_mut(&mut self, address: &str) -> Option<&mut DeviceRecord> {
        if !self.devices.contains_key(address) {
            return None;
        }
        Arc::make_mut(&mut self.devices)
            .get_mut(address)
            .map(Arc::make_mut)
    }

    pub(crate) fn devices_mut(&mut self) -> &mut DeviceMap {
        Arc::make_mut(&mut self.devices)
    }

    pub(crate) fn errors_mut(&mut self) -> &mut Vec<ErrorRecord> {
        Arc::make_mut(&mut self.errors)
    }

    pub(crate) fn clear_devices(&mut self) {
        if !self.devices.is_empty() {
            self.devices = Arc::default();
        }
    }
}

impl PartialEq for DiscoveryState {
    /// Structural equality, including device order.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.devices.len() == other.devices.len()
                && self.devices.iter().eq(other.devices.iter())
                && self.errors == other.errors)
    }
}
