// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for discovery store subscriptions.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::device::ErrorRecord;
use crate::state::DiscoveryState;

/// Unique identifier for a subscription.
///
/// Returned when subscribing and used to unsubscribe later. IDs are unique
/// within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type StateCallback = Arc<dyn Fn(&DiscoveryState) + Send + Sync>;

type ErrorCallback = Arc<dyn Fn(&ErrorRecord) + Send + Sync>;

/// Registry of store callbacks.
///
/// Dispatch snapshots the registered callbacks and releases the lock before
/// calling them, so a callback may subscribe or unsubscribe.
pub(crate) struct CallbackRegistry {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Callbacks receiving each new snapshot.
    state_callbacks: RwLock<HashMap<SubscriptionId, StateCallback>>,
    /// Callbacks receiving each newly recorded error.
    error_callbacks: RwLock<HashMap<SubscriptionId, ErrorCallback>>,
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            state_callbacks: RwLock::new(HashMap::new()),
            error_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub(crate) fn on_state_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DiscoveryState) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.state_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    pub(crate) fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErrorRecord) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.error_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Returns `true` if a callback was found and removed.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.state_callbacks.write().remove(&id).is_some() {
            return true;
        }
        self.error_callbacks.write().remove(&id).is_some()
    }

    pub(crate) fn clear(&self) {
        self.state_callbacks.write().clear();
        self.error_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(crate) fn dispatch_state(&self, state: &DiscoveryState) {
        let callbacks: Vec<StateCallback> = self.state_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(state);
        }
    }

    pub(crate) fn dispatch_error(&self, error: &ErrorRecord) {
        let callbacks: Vec<ErrorCallback> = self.error_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(error);
        }
    }

    pub(crate) fn callback_count(&self) -> usize {
        self.state_callbacks.read().len() + self.error_callbacks.read().len()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::new(42).to_string(), "Sub(42)");
    }

    #[test]
    fn ids_are_unique() {
        let registry = CallbackRegistry::new();
        let a = registry.on_state_changed(|_| {});
        let b = registry.on_error(|_| {});
        assert_ne!(a, b);
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn state_callback_lifecycle() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_state_changed(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch_state(&DiscoveryState::new());
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));

        registry.dispatch_state(&DiscoveryState::new());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn error_callbacks_only_see_errors() {
        let registry = CallbackRegistry::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let seen_clone = seen.clone();
        registry.on_error(move |error| seen_clone.write().push(error.to_string()));

        registry.dispatch_state(&DiscoveryState::new());
        registry.dispatch_error(&ErrorRecord::from("boom"));

        assert_eq!(*seen.read(), ["boom"]);
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let registry = Arc::new(CallbackRegistry::new());
        let slot = Arc::new(RwLock::new(None::<SubscriptionId>));

        let registry_clone = registry.clone();
        let slot_clone = slot.clone();
        let id = registry.on_state_changed(move |_| {
            if let Some(id) = *slot_clone.read() {
                registry_clone.unsubscribe(id);
            }
        });
        *slot.write() = Some(id);

        registry.dispatch_state(&DiscoveryState::new());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn clear_removes_everything() {
        let registry = CallbackRegistry::new();
        registry.on_state_changed(|_| {});
        registry.on_error(|_| {});
        registry.clear();
        assert_eq!(registry.callback_count(), 0);
    }
}
