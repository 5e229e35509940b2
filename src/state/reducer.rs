// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The discovery transition function.

use std::sync::{Arc, LazyLock};

use crate::device::{DefaultNormalizer, Normalize, RawDevice};
use crate::event::DiscoveryEvent;
use crate::types::DeviceAddress;

use super::{DiscoveryState, merge_sighting};

static DEFAULT_REDUCER: LazyLock<DiscoveryReducer> = LazyLock::new(DiscoveryReducer::new);

/// Derives the next [`DiscoveryState`] from the current one and an event.
///
/// The reducer is total: every event yields a state, and events it does not
/// handle hand back the input unchanged. It performs no I/O apart from
/// `tracing` output.
///
/// The normalizer that turns raw sightings into records is pluggable; the
/// default is [`DefaultNormalizer`].
///
/// # Examples
///
/// ```
/// use bledisco_lib::device::RawDevice;
/// use bledisco_lib::event::DiscoveryEvent;
/// use bledisco_lib::state::{DiscoveryReducer, DiscoveryState};
///
/// let reducer = DiscoveryReducer::new();
///
/// let state = reducer.apply(
///     DiscoveryState::new(),
///     DiscoveryEvent::DeviceDiscovered(RawDevice::new("AA").with_name("Thingy")),
/// );
/// let state = reducer.apply(state, DiscoveryEvent::connect("AA"));
///
/// assert!(state.device("AA").unwrap().is_connecting());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReducer<N = DefaultNormalizer> {
    normalizer: N,
}

impl DiscoveryReducer {
    /// Creates a reducer using the default normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Normalize> DiscoveryReducer<N> {
    /// Creates a reducer using a custom normalizer.
    #[must_use]
    pub fn with_normalizer(normalizer: N) -> Self {
        Self { normalizer }
    }

    /// Returns the normalizer.
    #[must_use]
    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    /// Applies one event.
    ///
    /// Nothing reachable from `state` is modified in place while another
    /// snapshot shares it; see [`DiscoveryState`].
    #[must_use]
    pub fn apply(&self, mut state: DiscoveryState, event: DiscoveryEvent) -> DiscoveryState {
        match event {
            DiscoveryEvent::ScanStarted => {
                tracing::info!("Scan started");
                state
            }
            DiscoveryEvent::ScanStopped => {
                tracing::info!("Scan stopped");
                state
            }
            DiscoveryEvent::ClearList => {
                tracing::debug!(cleared = state.device_count(), "Clearing device list");
                state.clear_devices();
                state
            }
            DiscoveryEvent::ErrorOccurred(error) => {
                tracing::debug!(%error, "Recording discovery error");
                state.errors_mut().push(error);
                state
            }
            DiscoveryEvent::ToggleExpanded(address) => {
                match state.device_mut(address.as_str()) {
                    Some(device) => device.set_expanded(!device.is_expanded()),
                    None => tracing::debug!(%address, "Toggle for unknown device ignored"),
                }
                state
            }
            DiscoveryEvent::DeviceDiscovered(raw) => self.device_discovered(state, &raw),
            DiscoveryEvent::DeviceConnect(address) => set_connecting(state, &address, true),
            DiscoveryEvent::DeviceConnected(address) => {
                if state.contains(address.as_str()) {
                    state.devices_mut().shift_remove(address.as_str());
                    tracing::debug!(%address, "Device connected, removed from discovery list");
                }
                state
            }
            DiscoveryEvent::DeviceConnectTimeout(address) => {
                tracing::info!("Connection to device timed out");
                set_connecting(state, &address, false)
            }
            DiscoveryEvent::DeviceCancelConnect => cancel_connect(state),
            DiscoveryEvent::AdapterResetPerformed | DiscoveryEvent::AdapterClosed => {
                tracing::debug!("Adapter lifecycle event, resetting discovery state");
                DiscoveryState::new()
            }
            DiscoveryEvent::Unknown => state,
        }
    }

    fn device_discovered(&self, mut state: DiscoveryState, raw: &RawDevice) -> DiscoveryState {
        let mut incoming = self.normalizer.normalize(raw);
        if incoming.address() != &raw.address {
            tracing::warn!(
                raw = %raw.address,
                normalized = %incoming.address(),
                "Normalizer changed the device address, keeping the raw one"
            );
            incoming.set_address(raw.address.clone());
        }

        let merged = merge_sighting(state.device(raw.address.as_str()), incoming);
        tracing::trace!(
            address = %raw.address,
            known = state.contains(raw.address.as_str()),
            "Device discovered"
        );

        // Existing keys keep their position, new keys are appended.
        state
            .devices_mut()
            .insert(raw.address.clone(), Arc::new(merged));
        state
    }
}

fn set_connecting(
    mut state: DiscoveryState,
    address: &DeviceAddress,
    connecting: bool,
) -> DiscoveryState {
    match state.device_mut(address.as_str()) {
        Some(device) => device.set_connecting(connecting),
        None => tracing::debug!(
            %address,
            connecting,
            "Connection update for unknown device ignored"
        ),
    }
    state
}

fn cancel_connect(mut state: DiscoveryState) -> DiscoveryState {
    if state.connecting_devices().next().is_none() {
        return state;
    }
    for device in state.devices_mut().values_mut() {
        if device.is_connecting() {
            Arc::make_mut(device).set_connecting(false);
        }
    }
    state
}

/// Applies one event using the default reducer.
///
/// # Examples
///
/// ```
/// use bledisco_lib::event::DiscoveryEvent;
/// use bledisco_lib::state::{self, DiscoveryState};
///
/// let before = DiscoveryState::new();
/// let after = state::apply(before.clone(), DiscoveryEvent::Unknown);
/// assert!(after.ptr_eq(&before));
/// ```
#[must_use]
pub fn apply(state: DiscoveryState, event: DiscoveryEvent) -> DiscoveryState {
    DEFAULT_REDUCER.apply(state, event)
}

impl DiscoveryState {
    /// Applies one event using the default reducer and returns the successor.
    #[must_use]
    pub fn apply(self, event: DiscoveryEvent) -> Self {
        apply(self, event)
    }
}
