//! The overlay surface seam.
//!
//! The presentation host does not own a view hierarchy. It mutates the
//! application's single global overlay layer — the surface layered over all
//! regular window content — through the [`OverlaySurface`] trait. The host
//! framework (or a test fixture) supplies the implementation.
//!
//! # Implementation contract
//!
//! - Inserted elements are laid out full-bleed over the existing content and
//!   must not dismiss or disturb what they cover. Insertion uses a
//!   cross-fade style transition with a transparent background.
//! - Elements are stacked in insertion order; the last inserted element is
//!   frontmost. The surface performs no z-order negotiation beyond that.
//! - All methods are invoked on the UI thread only, inside the framework's
//!   update cycle. Removal completions must be invoked later on the same
//!   thread's event loop, never re-entrantly from within the
//!   [`remove_animated`](OverlaySurface::remove_animated) call itself.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::key::PresentationKey;

/// How an inserted overlay element participates in hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTestPolicy {
    /// The overlay element receives input over its full bounds.
    #[default]
    Blocking,
    /// Input passes through to the content underneath except where the
    /// element's own interactive content claims it.
    Passthrough,
}

/// Callback invoked when a removal transition finishes.
pub type RemovalCompletion = Box<dyn FnOnce() + Send>;

/// Mutation interface onto the application's global overlay layer.
///
/// Implementations are expected to be thin adapters over the host
/// framework's view hierarchy. Every operation tolerates a missing or
/// torn-down surface (no active window): mutations return `false` and the
/// presentation is silently skipped — the application cannot render
/// anywhere else either, so there is nothing to report.
///
/// # Related Types
///
/// - [`OverlayController`](crate::OverlayController) - Drives a surface on
///   behalf of one presentation key
/// - [`SharedSurface`] - How the surface handle is passed around
pub trait OverlaySurface: Send {
    /// The renderable content type of the host framework.
    type Content;

    /// Insert `content` as the frontmost overlay element, tagged with
    /// `tag`.
    ///
    /// Returns `false` when no surface is available; the element is not
    /// inserted and the caller skips the presentation.
    fn insert(
        &mut self,
        tag: &PresentationKey,
        content: Self::Content,
        hit_test: HitTestPolicy,
    ) -> bool;

    /// Replace the content of the element tagged `tag` in place, without
    /// re-inserting or replaying the insertion transition.
    ///
    /// Replacing with content equal to what is already shown must be
    /// visually a no-op. Returns `false` if no element carries `tag`.
    fn replace(&mut self, tag: &PresentationKey, content: Self::Content) -> bool;

    /// Start the removal transition for the element tagged `tag`.
    ///
    /// Fire-and-forget: this returns immediately and `on_complete` is
    /// invoked on the UI thread once the transition ends. The element
    /// itself is removed by the completion path, not by this call. If no
    /// element carries `tag`, implementations invoke `on_complete` on the
    /// next cycle.
    fn remove_animated(&mut self, tag: &PresentationKey, on_complete: RemovalCompletion);

    /// Remove the element tagged `tag` immediately, bypassing any
    /// transition (including one already in flight).
    ///
    /// Returns `false` if no element carries `tag`.
    fn remove_now(&mut self, tag: &PresentationKey) -> bool;

    /// Whether the element tagged `tag` is currently the frontmost overlay
    /// element.
    fn is_frontmost(&self, tag: &PresentationKey) -> bool;

    /// Whether any element carries `tag`.
    fn contains(&self, tag: &PresentationKey) -> bool;
}

/// A shared handle to the overlay surface.
///
/// The surface is one per application; controllers for different keys all
/// hold clones of the same handle.
pub type SharedSurface<S> = Arc<Mutex<S>>;

/// Wrap a surface into a [`SharedSurface`] handle.
pub fn shared_surface<S: OverlaySurface>(surface: S) -> SharedSurface<S> {
    Arc::new(Mutex::new(surface))
}
