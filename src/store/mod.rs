// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thread-safe holder for the current discovery snapshot.
//!
//! [`DiscoveryStore`] owns one [`DiscoveryState`], applies events to it with a
//! [`DiscoveryReducer`] and notifies subscribers. Each store is an ordinary
//! value; create as many as needed.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use bledisco_lib::store::DiscoveryStore;
//!
//! # fn main() -> bledisco_lib::Result<()> {
//! let store = DiscoveryStore::new();
//! let updates = Arc::new(AtomicUsize::new(0));
//! let counter = updates.clone();
//! store.subscribe(move |state| {
//!     counter.store(state.device_count(), Ordering::SeqCst);
//! });
//!
//! store.dispatch_json(r#"{"type":"DEVICE_DISCOVERED","device":{"address":"AA","name":"Thingy"}}"#)?;
//! assert_eq!(updates.load(Ordering::SeqCst), 1);
//! # Ok(())
//! # }
//! ```

mod subscription;

pub use subscription::SubscriptionId;

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{ReentrantMutex, RwLock};

use crate::config::StoreConfig;
use crate::device::{DefaultNormalizer, ErrorRecord, Normalize};
use crate::error::Result;
use crate::event::{DiscoveryEvent, parse_action};
use crate::state::{DiscoveryReducer, DiscoveryState};
use crate::types::DeviceAddress;

use subscription::CallbackRegistry;

/// Owns the current [`DiscoveryState`] and dispatches events to it.
///
/// Dispatches are serialized: a dispatch applies its event and notifies every
/// subscriber before the next dispatch from another thread starts, so
/// subscribers see snapshots in the order the events were applied.
///
/// Callbacks run on the dispatching thread without the snapshot lock held.
/// They may read the store and may dispatch further events from the same
/// thread. Such a nested dispatch completes, notifications included, before
/// the outer one resumes; the outer snapshot is then stale and state
/// subscribers are not shown it.
pub struct DiscoveryStore<N = DefaultNormalizer> {
    /// Transition function applied to each event.
    reducer: DiscoveryReducer<N>,
    /// Current snapshot.
    state: RwLock<DiscoveryState>,
    /// Held from apply through notification; reentrant for nested dispatches.
    dispatch_lock: ReentrantMutex<()>,
    /// Number of applied events, used to drop superseded notifications.
    generation: AtomicU64,
    /// State and error subscribers.
    callbacks: CallbackRegistry,
    /// Notify state subscribers even when a dispatch changed nothing.
    notify_unchanged: bool,
}

impl DiscoveryStore {
    /// Creates a store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates a store whose default normalizer uses `config`.
    #[must_use]
    pub fn with_config(config: &StoreConfig) -> Self {
        let normalizer = DefaultNormalizer::with_config(config.normalizer().clone());
        Self::with_normalizer(normalizer, config)
    }
}

impl Default for DiscoveryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Normalize> DiscoveryStore<N> {
    /// Creates a store with a custom normalizer.
    ///
    /// The normalizer settings in `config` are ignored.
    #[must_use]
    pub fn with_normalizer(normalizer: N, config: &StoreConfig) -> Self {
        Self {
            reducer: DiscoveryReducer::with_normalizer(normalizer),
            state: RwLock::new(DiscoveryState::new()),
            dispatch_lock: ReentrantMutex::new(()),
            generation: AtomicU64::new(0),
            callbacks: CallbackRegistry::new(),
            notify_unchanged: config.notify_unchanged(),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn state(&self) -> DiscoveryState {
        self.state.read().clone()
    }

    /// Applies an event and returns the resulting snapshot.
    ///
    /// Blocks while another thread is dispatching.
    pub fn dispatch(&self, event: DiscoveryEvent) -> DiscoveryState {
        let _serial = self.dispatch_lock.lock();
        tracing::trace!(
            address = event.address().map(DeviceAddress::as_str),
            "Dispatching discovery event"
        );

        let (previous, next) = {
            let mut current = self.state.write();
            let previous = current.clone();
            let next = self.reducer.apply(previous.clone(), event);
            *current = next.clone();
            (previous, next)
        };
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        let changed = !next.ptr_eq(&previous);
        if changed {
            tracing::trace!(
                devices = next.device_count(),
                errors = next.errors().len(),
                "Discovery state changed"
            );
            if next.errors().len() > previous.errors().len()
                && let Some(error) = next.last_error()
            {
                self.callbacks.dispatch_error(error);
            }
        }
        if changed || self.notify_unchanged {
            if self.generation.load(Ordering::Relaxed) == generation {
                self.callbacks.dispatch_state(&next);
            } else {
                tracing::trace!("Snapshot superseded by a nested dispatch, not notified");
            }
        }

        next
    }

    /// Decodes a JSON action and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`](crate::error::ParseError) if the action cannot
    /// be decoded. The state is left untouched in that case.
    pub fn dispatch_json(&self, json: &str) -> Result<DiscoveryState> {
        let event = parse_action(json)?;
        Ok(self.dispatch(event))
    }

    /// Replaces the current snapshot with the zero state.
    ///
    /// Subscribers are notified if the state was not already zero.
    pub fn reset(&self) -> DiscoveryState {
        self.dispatch(DiscoveryEvent::AdapterResetPerformed)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a callback receiving every new snapshot.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&DiscoveryState) + Send + Sync + 'static,
    {
        self.callbacks.on_state_changed(callback)
    }

    /// Registers a callback receiving each newly recorded error.
    pub fn on_error<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ErrorRecord) + Send + Sync + 'static,
    {
        self.callbacks.on_error(callback)
    }

    /// Removes a subscription.
    ///
    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    /// Removes every subscription.
    pub fn unsubscribe_all(&self) {
        self.callbacks.clear();
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks.callback_count()
    }
}

impl<N: std::fmt::Debug> std::fmt::Debug for DiscoveryStore<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryStore")
            .field("reducer", &self.reducer)
            .field("state", &*self.state.read())
            .field("callbacks", &self.callbacks)
            .field("notify_unchanged", &self.notify_unchanged)
            .finish()
    }
}
