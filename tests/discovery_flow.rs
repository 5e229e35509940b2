// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end discovery sessions driven by JSON actions.
//!
//! Each test replays a sequence of actions as a host application would emit
//! them and checks the resulting snapshots through the public API only.

use bledisco_lib::{
    AddressType, AdvType, DeviceAddress, DiscoveryState, DiscoveryStore, ErrorRecord, ParseError,
    Rssi, parse_action,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn action(value: &Value) -> bledisco_lib::DiscoveryEvent {
    parse_action(&value.to_string()).expect("action should decode")
}

fn replay(state: DiscoveryState, actions: &[Value]) -> DiscoveryState {
    actions
        .iter()
        .fold(state, |state, value| state.apply(action(value)))
}

fn discovered(device: Value) -> Value {
    json!({ "type": "DEVICE_DISCOVERED", "device": device })
}

fn toggle(address: &str) -> Value {
    json!({ "type": "DISCOVERY_TOGGLE_EXPANDED", "deviceAddress": address })
}

fn connect(address: &str) -> Value {
    json!({ "type": "DEVICE_CONNECT", "device": { "address": address } })
}

fn connected(address: &str) -> Value {
    json!({ "type": "DEVICE_CONNECTED", "device": { "address": address } })
}

fn timeout(address: &str) -> Value {
    json!({ "type": "DEVICE_CONNECT_TIMEOUT", "deviceAddress": { "address": address } })
}

fn addresses(state: &DiscoveryState) -> Vec<&str> {
    state.addresses().map(DeviceAddress::as_str).collect()
}

// =============================================================================
// Transition properties
// =============================================================================

#[test]
fn unknown_action_returns_same_snapshot() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "AA" })),
            json!({ "type": "ERROR_OCCURED", "error": "boom" }),
        ],
    );

    let next = state
        .clone()
        .apply(action(&json!({ "type": "SERIAL_PORT_OPENED", "port": "/dev/ttyACM0" })));

    assert!(next.ptr_eq(&state));
}

#[test]
fn clear_list_is_idempotent_and_keeps_errors() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "AA" })),
            discovered(json!({ "address": "BB" })),
            json!({ "type": "ERROR_OCCURED", "error": { "message": "Scan failed", "code": 8 } }),
        ],
    );

    let once = state.apply(action(&json!({ "type": "DISCOVERY_CLEAR_LIST" })));
    let twice = once.clone().apply(action(&json!({ "type": "DISCOVERY_CLEAR_LIST" })));

    assert_eq!(once.device_count(), 0);
    assert_eq!(once, twice);
    assert_eq!(
        twice.errors(),
        [ErrorRecord::new(json!({ "message": "Scan failed", "code": 8 }))]
    );
}

#[test]
fn rediscovery_refines_one_record() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({
                "address": "EE:A2:11:2C:45:01",
                "name": "Thingy",
                "services": ["180F", "180A"],
                "adData": { "k1": "old" },
                "rssi": -70,
            })),
            toggle("EE:A2:11:2C:45:01"),
            discovered(json!({
                "address": "EE:A2:11:2C:45:01",
                "adData": { "k1": "new", "k2": "x" },
                "rssi": -52,
            })),
        ],
    );

    assert_eq!(state.device_count(), 1);
    let device = state.device("EE:A2:11:2C:45:01").unwrap();
    assert_eq!(device.name(), "Thingy");
    assert_eq!(device.services(), ["180F", "180A"]);
    assert!(device.is_expanded());
    assert_eq!(device.rssi(), Rssi::from_dbm(-52));

    // Stored advertisement values win on overlapping keys.
    assert_eq!(
        serde_json::to_value(device.ad_data()).unwrap(),
        json!({ "k1": "old", "k2": "x" })
    );
}

#[test]
fn rediscovery_keeps_first_discovery_order() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "C" })),
            discovered(json!({ "address": "A" })),
            discovered(json!({ "address": "B" })),
            discovered(json!({ "address": "C", "name": "again" })),
        ],
    );

    assert_eq!(addresses(&state), ["C", "A", "B"]);
}

#[test]
fn rediscovery_drops_connecting_flag() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "AA" })),
            connect("AA"),
            discovered(json!({ "address": "AA" })),
        ],
    );

    assert!(!state.device("AA").unwrap().is_connecting());
}

#[test]
fn cancel_connect_clears_every_connecting_flag_and_nothing_else() {
    let before = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "AA", "name": "one" })),
            discovered(json!({ "address": "BB", "name": "two" })),
            discovered(json!({ "address": "CC", "name": "three" })),
            connect("AA"),
            connect("CC"),
            toggle("BB"),
        ],
    );
    assert_eq!(before.connecting_devices().count(), 2);

    let after = before
        .clone()
        .apply(action(&json!({ "type": "DEVICE_CANCEL_CONNECT" })));

    assert_eq!(after.connecting_devices().count(), 0);
    assert_eq!(addresses(&after), addresses(&before));
    for (old, new) in before.devices().zip(after.devices()) {
        assert_eq!(old.name(), new.name());
        assert_eq!(old.is_expanded(), new.is_expanded());
    }
    assert_eq!(before.connecting_devices().count(), 2);
}

#[test]
fn connect_then_timeout_clears_flag() {
    let state = replay(
        DiscoveryState::new(),
        &[discovered(json!({ "address": "AA" })), connect("AA")],
    );
    assert!(state.device("AA").unwrap().is_connecting());

    let state = state.apply(action(&timeout("AA")));
    assert!(!state.device("AA").unwrap().is_connecting());
}

#[test]
fn connected_removes_device_and_later_toggle_is_noop() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "AA" })),
            discovered(json!({ "address": "BB" })),
            connect("AA"),
            connected("AA"),
        ],
    );
    assert_eq!(addresses(&state), ["BB"]);

    let next = state.clone().apply(action(&toggle("AA")));
    assert!(next.ptr_eq(&state));
    assert!(next.device("AA").is_none());
}

#[test]
fn actions_on_absent_devices_change_nothing() {
    let state = replay(DiscoveryState::new(), &[discovered(json!({ "address": "AA" }))]);

    let next = replay(
        state.clone(),
        &[toggle("ZZ"), connect("ZZ"), timeout("ZZ"), connected("ZZ")],
    );

    assert!(next.ptr_eq(&state));
}

#[test]
fn adapter_reset_and_close_return_zero_state() {
    for kind in ["ADAPTER_RESET_PERFORMED", "ADAPTER_CLOSED"] {
        let state = replay(
            DiscoveryState::new(),
            &[
                discovered(json!({ "address": "AA" })),
                json!({ "type": "ERROR_OCCURED", "error": "boom" }),
                json!({ "type": kind }),
            ],
        );
        assert!(state.is_zero(), "{kind} should reset the state");
        assert_eq!(state, DiscoveryState::new());
    }
}

#[test]
fn errors_accumulate_in_order() {
    let state = replay(
        DiscoveryState::new(),
        &[
            json!({ "type": "ERROR_OCCURED", "error": "first" }),
            json!({ "type": "DISCOVERY_SCAN_STARTED" }),
            json!({ "type": "ERROR_OCCURED", "error": { "code": 13 } }),
            json!({ "type": "DISCOVERY_SCAN_STOPPED" }),
        ],
    );

    assert_eq!(
        state.errors(),
        [ErrorRecord::from("first"), ErrorRecord::new(json!({ "code": 13 }))]
    );
    assert_eq!(state.last_error(), Some(&ErrorRecord::new(json!({ "code": 13 }))));
}

#[test]
fn older_snapshots_are_never_mutated() {
    let s0 = DiscoveryState::new();
    let s1 = s0.clone().apply(action(&discovered(json!({ "address": "AA", "name": "a" }))));
    let s2 = s1.clone().apply(action(&toggle("AA")));
    let s3 = s2.clone().apply(action(&connect("AA")));
    let s4 = s3.clone().apply(action(&json!({ "type": "DISCOVERY_CLEAR_LIST" })));

    assert!(s0.is_zero());
    assert!(!s1.device("AA").unwrap().is_expanded());
    assert!(s2.device("AA").unwrap().is_expanded());
    assert!(!s2.device("AA").unwrap().is_connecting());
    assert!(s3.device("AA").unwrap().is_connecting());
    assert_eq!(s4.device_count(), 0);
}

// =============================================================================
// Normalization of driver payloads
// =============================================================================

#[test]
fn driver_payload_is_normalized() {
    let state = DiscoveryState::new().apply(action(&discovered(json!({
        "address": "D3:54:AB:19:00:7C",
        "addressType": "BLE_GAP_ADDR_TYPE_RANDOM_STATIC",
        "services": ["6E400001-B5A3-F393-E0A9-E50E24DCCA9E", "6E400001-B5A3-F393-E0A9-E50E24DCCA9E"],
        "adData": { "BLE_GAP_AD_TYPE_COMPLETE_LOCAL_NAME": "Nordic_UART" },
        "rssi": -63,
        "txPower": 4,
        "advType": "ADV_IND",
        "time": "2024-03-01T12:00:00Z",
    }))));

    let device = state.device("D3:54:AB:19:00:7C").unwrap();
    assert_eq!(device.address_type(), Some(AddressType::RandomStatic));
    assert_eq!(device.name(), "Nordic_UART");
    assert_eq!(device.services(), ["6E400001-B5A3-F393-E0A9-E50E24DCCA9E"]);
    assert_eq!(device.rssi_level(), Some(2));
    assert_eq!(device.tx_power(), Some(4));
    assert_eq!(device.adv_type(), Some(AdvType::AdvInd));
    assert_eq!(device.connectable(), Some(true));
    assert_eq!(
        device.time().map(|t| t.to_rfc3339()),
        Some("2024-03-01T12:00:00+00:00".to_string())
    );
}

#[test]
fn snapshot_serializes_for_rendering() {
    let state = replay(
        DiscoveryState::new(),
        &[
            discovered(json!({ "address": "BB", "name": "second" })),
            discovered(json!({ "address": "AA", "name": "first" })),
            json!({ "type": "ERROR_OCCURED", "error": "boom" }),
        ],
    );

    let value = serde_json::to_value(&state).unwrap();
    let keys: Vec<&String> = value["devices"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["BB", "AA"]);
    assert_eq!(value["devices"]["AA"]["name"], "first");
    assert_eq!(value["errors"], json!(["boom"]));
}

// =============================================================================
// Decoding failures and the store
// =============================================================================

#[test]
fn malformed_actions_are_rejected() {
    assert!(matches!(parse_action("{"), Err(ParseError::Json(_))));
    assert!(matches!(
        parse_action(r#"{"device":{"address":"AA"}}"#),
        Err(ParseError::MissingKind)
    ));
    assert!(matches!(
        parse_action(r#"{"type":"DEVICE_CONNECT"}"#),
        Err(ParseError::InvalidPayload { .. })
    ));
}

#[test]
fn store_session_with_subscribers() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let store = DiscoveryStore::new();
    let snapshots = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));

    let snapshots_clone = snapshots.clone();
    store.subscribe(move |_| {
        snapshots_clone.fetch_add(1, Ordering::SeqCst);
    });
    let errors_clone = errors.clone();
    store.on_error(move |_| {
        errors_clone.fetch_add(1, Ordering::SeqCst);
    });

    let session = [
        json!({ "type": "DISCOVERY_SCAN_STARTED" }),
        discovered(json!({ "address": "AA", "name": "Thingy" })),
        discovered(json!({ "address": "AA" })),
        connect("AA"),
        json!({ "type": "ERROR_OCCURED", "error": "Connect failed" }),
        timeout("AA"),
        json!({ "type": "DISCOVERY_SCAN_STOPPED" }),
    ];
    for value in &session {
        store.dispatch_json(&value.to_string()).unwrap();
    }

    // Scan start and stop leave the state untouched.
    assert_eq!(snapshots.load(Ordering::SeqCst), 5);
    assert_eq!(errors.load(Ordering::SeqCst), 1);

    let state = store.state();
    assert_eq!(state.device("AA").unwrap().name(), "Thingy");
    assert!(!state.device("AA").unwrap().is_connecting());
}
