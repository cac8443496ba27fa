//! Overlay controllers.
//!
//! An [`OverlayController`] is the sole owner of the overlay element
//! inserted for one presentation key: it inserts content frontmost on the
//! global surface, updates it in place, and tears it down either gracefully
//! (animated, completion-driven) or forcibly (synchronous).
//!
//! Controllers are created lazily by the host bridge on the first
//! presentation for a key and registered with the
//! [`PresentationRegistry`](crate::PresentationRegistry), which drives their
//! teardown. Exactly one controller exists per active key; a presentation
//! restarted under the same key reuses the live controller instead of
//! duplicating it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::key::PresentationKey;
use crate::surface::{HitTestPolicy, OverlaySurface, SharedSurface};

/// A shared handle to one key's controller.
pub type SharedController<S> = Arc<Mutex<OverlayController<S>>>;

/// Owns the inserted overlay element for one presentation key.
///
/// # Lifecycle
///
/// ```text
/// new → present → update* → (graceful exit → removal completion | force remove) → dropped
/// ```
///
/// The `presenting` flag stays set through a graceful exit until the
/// removal transition completes; `is_exiting` distinguishes the two phases.
///
/// # Related Types
///
/// - [`PresentationHost`](crate::PresentationHost) - Creates controllers and
///   feeds them content
/// - [`PresentationRegistry`](crate::PresentationRegistry) - Tracks live
///   controllers and drives teardown
pub struct OverlayController<S: OverlaySurface> {
    /// The key this controller was created for; also the element tag.
    key: PresentationKey,
    /// Handle to the application's overlay layer.
    surface: SharedSurface<S>,
    /// Hit-test behavior applied at insertion.
    hit_test: HitTestPolicy,
    /// Whether the controller currently holds inserted content.
    presenting: bool,
    /// Whether a graceful removal transition is in flight.
    exiting: bool,
}

impl<S: OverlaySurface> OverlayController<S> {
    /// Create a controller for `key` over the shared surface.
    pub fn new(key: PresentationKey, surface: SharedSurface<S>, hit_test: HitTestPolicy) -> Self {
        Self {
            key,
            surface,
            hit_test,
            presenting: false,
            exiting: false,
        }
    }

    /// The key this controller owns.
    pub fn key(&self) -> &PresentationKey {
        &self.key
    }

    /// Whether this controller currently holds inserted content.
    ///
    /// Remains `true` while a graceful removal transition is in flight; the
    /// flag clears when the transition's completion removes the element.
    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    /// Whether a graceful removal transition is in flight.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Insert `content` as the frontmost element of the overlay surface,
    /// tagged with this controller's key.
    ///
    /// Returns `Ok(true)` when the element was inserted, `Ok(false)` when
    /// no surface is available and the presentation was silently skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyPresenting`] if content is already held.
    /// The reconciliation pass checks `is_presenting` first and never
    /// triggers this.
    pub fn present(&mut self, content: S::Content) -> Result<bool> {
        if self.presenting {
            return Err(Error::already_presenting(self.key.as_str()));
        }

        let inserted = self.surface.lock().insert(&self.key, content, self.hit_test);
        if inserted {
            self.presenting = true;
            self.exiting = false;
            tracing::trace!(target: "horizon_scrim::controller", key = %self.key, "overlay presented");
        } else {
            tracing::debug!(
                target: "horizon_scrim::controller",
                key = %self.key,
                "no overlay surface available, presentation skipped"
            );
        }
        Ok(inserted)
    }

    /// Replace the presented content in place.
    ///
    /// Does not re-insert or replay the insertion transition; replacing
    /// with equal content is visually a no-op. Returns `false` when
    /// nothing is presented or the surface no longer carries the element.
    pub fn update(&mut self, content: S::Content) -> bool {
        if !self.presenting {
            return false;
        }
        self.surface.lock().replace(&self.key, content)
    }

    /// Mark the start of a graceful exit.
    ///
    /// Returns `false` if nothing is presented or an exit is already in
    /// flight, making repeated dismissals idempotent. The caller starts
    /// the surface transition; [`finish_removal`](Self::finish_removal)
    /// runs when it completes.
    pub(crate) fn begin_exit(&mut self) -> bool {
        if !self.presenting || self.exiting {
            return false;
        }
        self.exiting = true;
        tracing::trace!(target: "horizon_scrim::controller", key = %self.key, "graceful removal started");
        true
    }

    /// Complete a graceful exit: remove the element and clear state.
    pub(crate) fn finish_removal(&mut self) {
        self.surface.lock().remove_now(&self.key);
        self.presenting = false;
        self.exiting = false;
        tracing::trace!(target: "horizon_scrim::controller", key = %self.key, "overlay removed");
    }

    /// Remove the element immediately, bypassing any transition.
    ///
    /// Only removes when the tagged element is the frontmost overlay
    /// element; content covered by a later presentation is left in place.
    /// Returns `true` when content was held and state was cleared.
    pub(crate) fn force_remove(&mut self) -> bool {
        if !self.presenting {
            return false;
        }

        let mut surface = self.surface.lock();
        if surface.is_frontmost(&self.key) {
            surface.remove_now(&self.key);
        } else {
            tracing::warn!(
                target: "horizon_scrim::controller",
                key = %self.key,
                "force removal skipped, overlay is not frontmost"
            );
            return false;
        }
        drop(surface);

        self.presenting = false;
        self.exiting = false;
        tracing::trace!(target: "horizon_scrim::controller", key = %self.key, "overlay force removed");
        true
    }

    /// Clone the shared surface handle.
    pub(crate) fn surface_handle(&self) -> SharedSurface<S> {
        Arc::clone(&self.surface)
    }
}
