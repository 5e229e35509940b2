// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events driving the discovery store.
//!
//! [`DiscoveryEvent`] is the typed event consumed by the reducer. Host
//! applications that receive actions as JSON (for example from a UI bridge)
//! can decode them with [`parse_action`].
//!
//! # Examples
//!
//! ```
//! use bledisco_lib::event::{DiscoveryEvent, parse_action};
//!
//! let event = parse_action(r#"{"type":"DISCOVERY_CLEAR_LIST"}"#).unwrap();
//! assert_eq!(event, DiscoveryEvent::ClearList);
//! ```

mod action;
mod discovery_event;

pub use action::{parse_action, parse_action_value};
pub use discovery_event::DiscoveryEvent;
