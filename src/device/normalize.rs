// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion of raw scan results into canonical device records.

use crate::config::NormalizerConfig;
use crate::types::{AddressType, AdvType, Rssi};

use super::{DeviceRecord, RawDevice};

/// Advertisement field holding the complete local name.
pub const AD_COMPLETE_LOCAL_NAME: &str = "BLE_GAP_AD_TYPE_COMPLETE_LOCAL_NAME";

/// Advertisement field holding the shortened local name.
pub const AD_SHORT_LOCAL_NAME: &str = "BLE_GAP_AD_TYPE_SHORT_LOCAL_NAME";

/// Converts a raw sighting into a canonical [`DeviceRecord`].
///
/// Implementations must be total: every raw device yields a record, and the
/// record's address must equal the raw address. The reducer relies on both.
///
/// Closures implement this trait, which is convenient in tests:
///
/// ```
/// use bledisco_lib::device::{DeviceRecord, Normalize, RawDevice};
///
/// let upper = |raw: &RawDevice| {
///     DeviceRecord::new(raw.address.clone())
///         .with_name(raw.name.as_deref().unwrap_or_default().to_uppercase())
/// };
///
/// let record = upper.normalize(&RawDevice::new("AA").with_name("thingy"));
/// assert_eq!(record.name(), "THINGY");
/// ```
pub trait Normalize {
    /// Builds the record for one sighting.
    fn normalize(&self, raw: &RawDevice) -> DeviceRecord;
}

impl<F> Normalize for F
where
    F: Fn(&RawDevice) -> DeviceRecord,
{
    fn normalize(&self, raw: &RawDevice) -> DeviceRecord {
        self(raw)
    }
}

/// Normalizer used when no custom one is supplied.
///
/// - The name comes from the raw `name`, falling back to the complete and
///   then the shortened local-name advertisement fields (when enabled).
///   Otherwise it is empty.
/// - Services keep their advertised order with duplicates removed.
/// - Advertisement data is copied as-is.
/// - Unparseable address or PDU types are dropped rather than rejected.
/// - `is_expanded` and `is_connecting` start out `false`.
#[derive(Debug, Clone, Default)]
pub struct DefaultNormalizer {
    config: NormalizerConfig,
}

impl DefaultNormalizer {
    /// Creates a normalizer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer with the given settings.
    #[must_use]
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn name(&self, raw: &RawDevice) -> String {
        if let Some(name) = &raw.name {
            return name.clone();
        }
        if !self.config.name_from_ad_data() {
            return String::new();
        }
        [AD_COMPLETE_LOCAL_NAME, AD_SHORT_LOCAL_NAME]
            .iter()
            .find_map(|key| raw.ad_data.get(*key).and_then(serde_json::Value::as_str))
            .unwrap_or_default()
            .to_string()
    }

    fn services(raw: &RawDevice) -> Vec<String> {
        let mut services: Vec<String> = Vec::with_capacity(raw.services.len());
        for uuid in &raw.services {
            if !services.contains(uuid) {
                services.push(uuid.clone());
            }
        }
        services
    }
}

impl Normalize for DefaultNormalizer {
    fn normalize(&self, raw: &RawDevice) -> DeviceRecord {
        let rssi = raw.rssi.and_then(Rssi::from_dbm);
        let level = rssi.map(|r| r.level(self.config.rssi_thresholds()));

        DeviceRecord::new(raw.address.clone())
            .with_address_type(
                raw.address_type
                    .as_deref()
                    .and_then(|s| s.parse::<AddressType>().ok()),
            )
            .with_name(self.name(raw))
            .with_services(Self::services(raw))
            .with_ad_data(raw.ad_data.clone())
            .with_rssi(rssi, level)
            .with_tx_power(raw.tx_power.and_then(|p| i8::try_from(p).ok()))
            .with_adv_type(
                raw.adv_type
                    .as_deref()
                    .and_then(|s| s.parse::<AdvType>().ok()),
            )
            .with_time(raw.time)
    }
}
