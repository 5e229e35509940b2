// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation of a new sighting with the stored record.

use crate::device::DeviceRecord;

/// Merges a freshly normalized sighting with the record already stored for
/// the same address.
///
/// Without a stored record the sighting is returned untouched. Otherwise:
///
/// - An empty name or an empty service list in the sighting does not erase
///   a previously learned one. Many advertising packets omit both.
/// - The expansion flag is carried over. Sightings never come from the UI.
/// - Advertisement data is the union of both sides. On overlapping keys the
///   **stored** value wins over the new one.
/// - The connecting flag is never carried over. It keeps whatever the
///   normalizer produced.
///
/// All sighting attributes (RSSI, TX power, PDU type, timestamp) come from
/// the new sighting.
#[must_use]
pub fn merge_sighting(existing: Option<&DeviceRecord>, mut incoming: DeviceRecord) -> DeviceRecord {
    let Some(existing) = existing else {
        return incoming;
    };

    if !existing.name().is_empty() && incoming.name().is_empty() {
        incoming.set_name(existing.name().to_string());
    }

    if !existing.services().is_empty() && incoming.services().is_empty() {
        incoming.set_services(existing.services().to_vec());
    }

    incoming.set_expanded(existing.is_expanded());

    // Stored values overwrite incoming ones key by key.
    incoming.ad_data_mut().extend(
        existing
            .ad_data()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    incoming
}
