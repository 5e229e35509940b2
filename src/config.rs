// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for normalization and the discovery store.
//!
//! Both types deserialize with defaults for every missing field, so an empty
//! JSON object is a valid configuration.
//!
//! # Examples
//!
//! ```
//! use bledisco_lib::config::{NormalizerConfig, StoreConfig};
//!
//! let config = StoreConfig::new()
//!     .with_normalizer(NormalizerConfig::new().with_rssi_thresholds(vec![-90, -75, -60]))
//!     .with_notify_unchanged(true);
//!
//! assert_eq!(config.normalizer().rssi_thresholds(), &[-90, -75, -60]);
//! ```

use serde::{Deserialize, Serialize};

/// Default signal bar thresholds in dBm, weakest first.
pub const DEFAULT_RSSI_THRESHOLDS: [i8; 4] = [-80, -70, -60, -50];

/// Settings for the default device normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizerConfig {
    /// RSSI thresholds used to compute a device's signal level.
    rssi_thresholds: Vec<i8>,
    /// Fill a missing name from the local-name advertisement fields.
    name_from_ad_data: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            rssi_thresholds: DEFAULT_RSSI_THRESHOLDS.to_vec(),
            name_from_ad_data: true,
        }
    }
}

impl NormalizerConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the RSSI level thresholds.
    ///
    /// Thresholds are stored sorted ascending.
    #[must_use]
    pub fn with_rssi_thresholds(mut self, mut thresholds: Vec<i8>) -> Self {
        thresholds.sort_unstable();
        self.rssi_thresholds = thresholds;
        self
    }

    /// Enables or disables the advertisement local-name fallback.
    #[must_use]
    pub fn with_name_from_ad_data(mut self, enabled: bool) -> Self {
        self.name_from_ad_data = enabled;
        self
    }

    /// Returns the RSSI level thresholds.
    #[must_use]
    pub fn rssi_thresholds(&self) -> &[i8] {
        &self.rssi_thresholds
    }

    /// Returns whether the local-name fallback is enabled.
    #[must_use]
    pub fn name_from_ad_data(&self) -> bool {
        self.name_from_ad_data
    }
}

/// Settings for a [`DiscoveryStore`](crate::store::DiscoveryStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Normalizer settings.
    normalizer: NormalizerConfig,
    /// Notify subscribers even when a dispatch left the state untouched.
    notify_unchanged: bool,
}

impl StoreConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalizer settings.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sets whether subscribers see dispatches that changed nothing.
    #[must_use]
    pub fn with_notify_unchanged(mut self, notify: bool) -> Self {
        self.notify_unchanged = notify;
        self
    }

    /// Returns the normalizer settings.
    #[must_use]
    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    /// Returns whether unchanged dispatches are notified.
    #[must_use]
    pub fn notify_unchanged(&self) -> bool {
        self.notify_unchanged
    }
}
