// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `BleDisco` library.
//!
//! The discovery reducer itself cannot fail: every event, including
//! unrecognized ones, maps to a defined state. Errors only arise at the
//! boundary, when actions are decoded from their JSON representation or when
//! typed values are parsed from driver strings.
//!
//! Scan and connection failures reported by the adapter are *not* represented
//! here. They travel through the store as opaque
//! [`ErrorRecord`](crate::device::ErrorRecord) payloads.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while decoding an action.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An address type string was not recognized.
    #[error("invalid address type: {0}")]
    InvalidAddressType(String),

    /// An advertising PDU type string was not recognized.
    #[error("invalid advertising type: {0}")]
    InvalidAdvType(String),
}

/// Errors related to decoding actions from JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The action object has no string `type` tag.
    #[error("action has no \"type\" tag")]
    MissingKind,

    /// A recognized action carried a malformed payload.
    #[error("invalid payload for {kind}: {source}")]
    InvalidPayload {
        /// The action kind that failed to decode.
        kind: String,
        /// The underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
