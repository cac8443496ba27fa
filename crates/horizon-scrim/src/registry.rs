//! The presentation registry and payload cache.
//!
//! [`PresentationRegistry`] is the shared service object that tracks every
//! live [`OverlayController`] by key and caches opaque per-key payloads for
//! the convenience hosts. The application creates one registry near its
//! root composition and passes the `Arc` to every host it builds; nothing
//! in this crate reaches for hidden global state.
//!
//! The registry also owns teardown. Graceful dismissal starts the surface's
//! removal transition and finishes in its completion; forced dismissal
//! removes the element synchronously. Both paths purge the controller entry
//! and the cache entry together — entries are never left to age out.
//!
//! # Example
//!
//! ```ignore
//! use horizon_scrim::{PresentationKey, PresentationRegistry};
//!
//! let registry = PresentationRegistry::new();
//!
//! registry.dismissed().connect(|key| {
//!     println!("overlay '{}' torn down", key);
//! });
//!
//! // In the presenting view's teardown/disappearance hook:
//! let key = PresentationKey::new("settings-sheet")?;
//! registry.force_dismiss(&key);
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::controller::SharedController;
use crate::key::PresentationKey;
use crate::signal::Signal;
use crate::surface::OverlaySurface;

/// Tracks live overlay controllers and cached presentation payloads.
///
/// One registry serves the whole application. Controllers register on
/// successful insertion and are unregistered by teardown; at most one
/// controller is registered per key at any time. Two concurrent call sites
/// presenting under the same key collide: registration is
/// last-writer-wins and the earlier presentation can no longer be reached
/// by key (a warning is traced; unique keys are a caller obligation).
///
/// # Signals
///
/// - [`presented`](Self::presented): a key's overlay was inserted
/// - [`dismissed`](Self::dismissed): a key's overlay was torn down
///
/// # Related Types
///
/// - [`PresentationHost`](crate::PresentationHost) - Registers controllers here
/// - [`OverlayController`](crate::OverlayController) - The registered entries
pub struct PresentationRegistry<S: OverlaySurface> {
    /// Self-handle so teardown completions can reach the registry later.
    self_ref: Weak<PresentationRegistry<S>>,
    /// Live controllers by key.
    controllers: Mutex<HashMap<PresentationKey, SharedController<S>>>,
    /// Opaque cached payloads by key.
    cache: Mutex<HashMap<PresentationKey, Box<dyn Any + Send>>>,
    /// Signal emitted after a key's overlay is inserted.
    presented: Signal<PresentationKey>,
    /// Signal emitted after a key's overlay is torn down.
    dismissed: Signal<PresentationKey>,
}

impl<S: OverlaySurface + 'static> PresentationRegistry<S> {
    /// Create a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            self_ref: weak.clone(),
            controllers: Mutex::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
            presented: Signal::new(),
            dismissed: Signal::new(),
        })
    }

    // =========================================================================
    // Controller registry
    // =========================================================================

    /// Register a controller under its key.
    ///
    /// Last-writer-wins: a controller already registered under the key is
    /// replaced and a warning is traced.
    pub fn register(&self, key: PresentationKey, controller: SharedController<S>) {
        let mut controllers = self.controllers.lock();
        if let Some(previous) = controllers.insert(key.clone(), Arc::clone(&controller)) {
            if !Arc::ptr_eq(&previous, &controller) {
                tracing::warn!(
                    target: "horizon_scrim::registry",
                    key = %key,
                    "presentation key already in use, replacing controller; \
                     concurrent call sites must use distinct keys"
                );
            }
        } else {
            tracing::trace!(target: "horizon_scrim::registry", key = %key, "controller registered");
        }
    }

    /// Look up the live controller for a key.
    pub fn lookup(&self, key: &PresentationKey) -> Option<SharedController<S>> {
        self.controllers.lock().get(key).map(Arc::clone)
    }

    /// Remove a key's controller entry.
    ///
    /// Returns `true` if an entry existed. Normally called by teardown; the
    /// matching cache entry must be removed alongside it.
    pub fn unregister(&self, key: &PresentationKey) -> bool {
        let removed = self.controllers.lock().remove(key).is_some();
        if removed {
            tracing::trace!(target: "horizon_scrim::registry", key = %key, "controller unregistered");
        }
        removed
    }

    /// Remove a key's controller entry only if it is still `expected`.
    ///
    /// Guards teardown completions against a newer presentation that took
    /// over the key in the meantime.
    fn unregister_if(&self, key: &PresentationKey, expected: &SharedController<S>) -> bool {
        let mut controllers = self.controllers.lock();
        if controllers
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, expected))
        {
            controllers.remove(key);
            true
        } else {
            false
        }
    }

    /// Whether a controller is registered for `key`.
    pub fn contains(&self, key: &PresentationKey) -> bool {
        self.controllers.lock().contains_key(key)
    }

    /// The number of registered controllers.
    pub fn count(&self) -> usize {
        self.controllers.lock().len()
    }

    /// Whether no controllers are registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.lock().is_empty()
    }

    /// The keys of all registered controllers.
    pub fn active_keys(&self) -> Vec<PresentationKey> {
        self.controllers.lock().keys().cloned().collect()
    }

    // =========================================================================
    // Payload cache
    // =========================================================================

    /// Cache a payload for `key`, replacing any previous payload.
    pub fn cache_set<T: Send + 'static>(&self, key: &PresentationKey, payload: T) {
        self.cache.lock().insert(key.clone(), Box::new(payload));
    }

    /// Get a clone of the cached payload for `key`.
    ///
    /// Returns `None` when nothing is cached or the cached payload has a
    /// different type.
    pub fn cache_get<T: Clone + Send + 'static>(&self, key: &PresentationKey) -> Option<T> {
        self.cache
            .lock()
            .get(key)
            .and_then(|payload| payload.downcast_ref::<T>())
            .cloned()
    }

    /// Remove the cached payload for `key`, returning whether one existed.
    pub fn cache_remove(&self, key: &PresentationKey) -> bool {
        self.cache.lock().remove(key).is_some()
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Gracefully dismiss the overlay presented under `key`.
    ///
    /// Starts the surface's removal transition and returns immediately.
    /// When the transition completes, the element is removed, the
    /// controller entry and cache entry are purged, and
    /// [`dismissed`](Self::dismissed) is emitted. Returns `false` (and does
    /// nothing) when the key is unknown or an exit is already in flight.
    ///
    /// There is no timeout: a removal transition that never completes
    /// leaves the overlay registered indefinitely. Use
    /// [`force_dismiss`](Self::force_dismiss) to preempt an in-flight
    /// transition.
    pub fn dismiss(&self, key: &PresentationKey) -> bool {
        let Some(ctrl) = self.lookup(key) else {
            tracing::trace!(target: "horizon_scrim::registry", key = %key, "dismiss on unknown key ignored");
            return false;
        };
        let Some(registry) = self.self_ref.upgrade() else {
            return false;
        };

        let surface = {
            let mut guard = ctrl.lock();
            if !guard.begin_exit() {
                return false;
            }
            guard.surface_handle()
        };

        let completion_key = key.clone();
        let completion_ctrl = Arc::clone(&ctrl);
        surface.lock().remove_animated(
            key,
            Box::new(move || registry.finish_dismiss(&completion_key, &completion_ctrl)),
        );
        true
    }

    /// Forcibly dismiss the overlay presented under `key`, bypassing any
    /// transition.
    ///
    /// Used by application code when the presenting view disappears
    /// (navigation, conditional unmount) and the overlay must not outlive
    /// it. Removes the element synchronously when it is the frontmost
    /// overlay element, purges the controller and cache entries, and emits
    /// [`dismissed`](Self::dismissed). A key that was never presented or is
    /// already dismissed is a no-op, not an error.
    pub fn force_dismiss(&self, key: &PresentationKey) -> bool {
        let Some(ctrl) = self.lookup(key) else {
            tracing::trace!(target: "horizon_scrim::registry", key = %key, "force dismiss on unknown key ignored");
            return false;
        };

        let removed = ctrl.lock().force_remove();
        if removed {
            self.unregister_if(key, &ctrl);
            self.cache_remove(key);
            self.dismissed.emit(key.clone());
        }
        removed
    }

    /// Teardown completion for a graceful dismissal.
    fn finish_dismiss(&self, key: &PresentationKey, ctrl: &SharedController<S>) {
        {
            let mut guard = ctrl.lock();
            if !guard.is_exiting() {
                // Preempted by a force dismiss while the transition ran.
                tracing::trace!(target: "horizon_scrim::registry", key = %key, "stale removal completion ignored");
                return;
            }
            guard.finish_removal();
        }

        if self.unregister_if(key, ctrl) {
            self.cache_remove(key);
        }
        self.dismissed.emit(key.clone());
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Signal emitted after a key's overlay is inserted.
    pub fn presented(&self) -> &Signal<PresentationKey> {
        &self.presented
    }

    /// Signal emitted after a key's overlay is torn down.
    pub fn dismissed(&self) -> &Signal<PresentationKey> {
        &self.dismissed
    }

    /// Notify that a key's overlay was inserted.
    pub(crate) fn notify_presented(&self, key: &PresentationKey) {
        self.presented.emit(key.clone());
    }
}
