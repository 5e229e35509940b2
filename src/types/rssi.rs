// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Received signal strength.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Received Signal Strength Indicator in dBm.
///
/// # Examples
///
/// ```
/// use bledisco_lib::types::Rssi;
///
/// let rssi = Rssi::from_dbm(-63).unwrap();
/// assert_eq!(rssi.level(&[-80, -70, -60, -50]), 2);
///
/// // 127 is the "not available" marker
/// assert!(Rssi::from_dbm(127).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rssi(i8);

impl Rssi {
    /// Value reported when the controller has no RSSI for a packet.
    pub const NOT_AVAILABLE: i32 = 127;

    /// Creates an RSSI from a raw dBm reading.
    ///
    /// Returns `None` for the "not available" marker and for readings that
    /// do not fit a signed byte.
    #[must_use]
    pub fn from_dbm(dbm: i32) -> Option<Self> {
        if dbm == Self::NOT_AVAILABLE {
            return None;
        }
        i8::try_from(dbm).ok().map(Self)
    }

    /// Returns the reading in dBm.
    #[must_use]
    pub const fn dbm(&self) -> i8 {
        self.0
    }

    /// Returns how many of `thresholds` this reading meets or exceeds.
    ///
    /// With thresholds sorted ascending this is a signal "bar count"
    /// between 0 and `thresholds.len()`.
    #[must_use]
    pub fn level(&self, thresholds: &[i8]) -> u8 {
        let count = thresholds.iter().filter(|t| self.0 >= **t).count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }
}

impl fmt::Display for Rssi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dBm", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARS: [i8; 4] = [-80, -70, -60, -50];

    #[test]
    fn from_dbm_bounds() {
        assert_eq!(Rssi::from_dbm(-40).map(|r| r.dbm()), Some(-40));
        assert_eq!(Rssi::from_dbm(-128).map(|r| r.dbm()), Some(-128));
        assert!(Rssi::from_dbm(-129).is_none());
        assert!(Rssi::from_dbm(127).is_none());
    }

    #[test]
    fn level_counts_thresholds_met() {
        assert_eq!(Rssi::from_dbm(-95).unwrap().level(&BARS), 0);
        assert_eq!(Rssi::from_dbm(-80).unwrap().level(&BARS), 1);
        assert_eq!(Rssi::from_dbm(-65).unwrap().level(&BARS), 2);
        assert_eq!(Rssi::from_dbm(-30).unwrap().level(&BARS), 4);
    }

    #[test]
    fn level_without_thresholds_is_zero() {
        assert_eq!(Rssi::from_dbm(-30).unwrap().level(&[]), 0);
    }

    #[test]
    fn display_includes_unit() {
        assert_eq!(Rssi::from_dbm(-63).unwrap().to_string(), "-63 dBm");
    }
}
