//! The presentation host bridge.
//!
//! [`PresentationHost`] is the public entry point of the crate. It binds a
//! boolean "is presented" [`Property`] and a content factory to one
//! [`OverlayController`](crate::OverlayController), translating flag
//! transitions into controller calls and producing the [`DismissToken`] the
//! presented content consumes.
//!
//! Call [`reconcile`](PresentationHost::reconcile) on every update cycle of
//! the presenting view. Each pass:
//!
//! 1. computes whether the binding was flipped off externally (guarded
//!    against the token's own dismiss action),
//! 2. builds a fresh token,
//! 3. presents lazily when the binding turned on,
//! 4. unconditionally updates presented content so it always holds the
//!    current token.
//!
//! If the presenting view disappears while presenting (navigation, a
//! conditional render turning false), the application must call
//! [`PresentationRegistry::force_dismiss`] from its teardown hook; the host
//! has no teardown hook of its own and cannot do this automatically.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use horizon_scrim::{PresentationHost, PresentationRegistry, Property};
//!
//! let registry = PresentationRegistry::new();
//! let presented = Arc::new(Property::new(false));
//! let host = PresentationHost::new(
//!     "settings-sheet",
//!     Arc::clone(&presented),
//!     Arc::clone(&registry),
//!     surface,
//! )?;
//!
//! // Application code toggles the binding...
//! presented.set(true);
//!
//! // ...and every update cycle reconciles it against the overlay.
//! host.reconcile(|token| build_sheet(token.clone()));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;

use crate::controller::OverlayController;
use crate::error::Result;
use crate::key::PresentationKey;
use crate::property::Property;
use crate::registry::PresentationRegistry;
use crate::surface::{HitTestPolicy, OverlaySurface, SharedSurface};
use crate::token::DismissToken;

assert_impl_all!(DismissToken: Send, Sync);
assert_impl_all!(PresentationKey: Send, Sync);

/// What a reconciliation pass did.
///
/// Returned by [`PresentationHost::reconcile`] so callers (and the
/// convenience hosts) can observe the pass without re-deriving state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// New content was inserted this pass.
    pub presented: bool,
    /// Presented content was updated in place this pass.
    pub updated: bool,
    /// The pass reported an external dismissal through the token.
    pub externally_dismissed: bool,
    /// The binding is off while content is presented, but detection was
    /// suppressed for this one pass because the token's own dismiss action
    /// caused the flip.
    pub suppressed_external_dismiss: bool,
}

/// One-shot suppression of external-dismiss detection.
///
/// Armed by the token's dismiss action; the next reconciliation pass
/// observes it, suppresses detection, and clears it at the end of that
/// pass. An explicit two-phase handoff — nothing is queued on the event
/// loop.
#[derive(Debug, Default)]
struct DismissGuard {
    armed: AtomicBool,
}

impl DismissGuard {
    fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.armed.store(false, Ordering::Release);
    }
}

/// Binds a boolean presented-binding and renderable content to an overlay
/// controller.
///
/// One host serves one presentation call site, identified by its
/// [`PresentationKey`]. The controller is created lazily on the first pass
/// that presents and torn down by dismissal; a fresh presentation under the
/// same key after teardown starts a new cycle.
///
/// # Related Types
///
/// - [`DismissToken`] - Built fresh each pass and handed to the content factory
/// - [`PresentationRegistry`] - Tracks the controller; force-dismiss entry point
/// - [`ItemHost`](crate::ItemHost), [`DataHost`](crate::DataHost),
///   [`ErrorHost`](crate::ErrorHost) - Convenience reductions onto this type
pub struct PresentationHost<S: OverlaySurface> {
    /// Identity of this call site.
    key: PresentationKey,
    /// The external "is presented" binding, shared with application code.
    presented: Arc<Property<bool>>,
    /// The shared controller registry.
    registry: Arc<PresentationRegistry<S>>,
    /// The application's overlay layer.
    surface: SharedSurface<S>,
    /// Hit-test behavior for inserted content.
    hit_test: HitTestPolicy,
    /// Suppresses external-dismiss detection for one pass after an
    /// internal dismiss.
    guard: Arc<DismissGuard>,
    /// Extra wiring run by the token's dismiss action (used by the
    /// convenience hosts to reset their source bindings).
    dismiss_hook: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl<S: OverlaySurface + 'static> PresentationHost<S> {
    /// Create a host for an explicit key.
    ///
    /// The key must be stable across update cycles of this call site and
    /// unique among call sites that can present concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`](crate::Error::EmptyKey) for an empty
    /// identifier.
    pub fn new(
        key: impl AsRef<str>,
        presented: Arc<Property<bool>>,
        registry: Arc<PresentationRegistry<S>>,
        surface: SharedSurface<S>,
    ) -> Result<Self> {
        Ok(Self {
            key: PresentationKey::new(key)?,
            presented,
            registry,
            surface,
            hit_test: HitTestPolicy::default(),
            guard: Arc::new(DismissGuard::default()),
            dismiss_hook: None,
        })
    }

    /// Set the hit-test behavior for inserted content.
    pub fn with_hit_test(mut self, hit_test: HitTestPolicy) -> Self {
        self.hit_test = hit_test;
        self
    }

    /// The key identifying this call site.
    pub fn key(&self) -> &PresentationKey {
        &self.key
    }

    /// The shared presented-binding.
    pub fn binding(&self) -> &Arc<Property<bool>> {
        &self.presented
    }

    /// Whether this host's controller currently holds presented content.
    pub fn is_presenting(&self) -> bool {
        self.registry
            .lookup(&self.key)
            .is_some_and(|ctrl| ctrl.lock().is_presenting())
    }

    pub(crate) fn registry(&self) -> &Arc<PresentationRegistry<S>> {
        &self.registry
    }

    pub(crate) fn set_dismiss_hook(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.dismiss_hook = Some(Arc::new(hook));
    }

    /// Reconcile the binding against the overlay, once per update cycle.
    ///
    /// `content` is the factory for the renderable content; it receives the
    /// pass's [`DismissToken`] explicitly and may be invoked zero, one or
    /// two times (presentation and the unconditional in-place update).
    ///
    /// Within one pass, presentation always happens before the update, so
    /// newly inserted content immediately receives current data.
    pub fn reconcile(&self, mut content: impl FnMut(&DismissToken) -> S::Content) -> ReconcileOutcome {
        let controller = self.registry.lookup(&self.key);
        let (presenting, exiting) = match &controller {
            Some(ctrl) => {
                let guard = ctrl.lock();
                (guard.is_presenting(), guard.is_exiting())
            }
            None => (false, false),
        };
        let is_on = self.presented.get();
        let suppressing = self.guard.is_armed();

        // An external dismissal is a binding flipped off by anything other
        // than the token's dismiss action, while content is shown and no
        // exit is already in flight.
        let externally_dismissed = presenting && !exiting && !is_on && !suppressing;

        let token = self.build_token(controller.is_some(), externally_dismissed);

        let mut outcome = ReconcileOutcome {
            externally_dismissed,
            suppressed_external_dismiss: presenting && !exiting && !is_on && suppressing,
            ..ReconcileOutcome::default()
        };

        if is_on && !presenting {
            let ctrl = controller.unwrap_or_else(|| {
                Arc::new(Mutex::new(OverlayController::new(
                    self.key.clone(),
                    Arc::clone(&self.surface),
                    self.hit_test,
                )))
            });
            let value = content(&token);
            match ctrl.lock().present(value) {
                Ok(inserted) => outcome.presented = inserted,
                Err(err) => {
                    tracing::error!(target: "horizon_scrim::host", key = %self.key, %err, "present failed");
                }
            }
            if outcome.presented {
                self.registry.register(self.key.clone(), ctrl);
                self.registry.notify_presented(&self.key);
            }
        }

        // Unconditional in-place update: content already presented must
        // receive the freshly built token every cycle.
        if let Some(ctrl) = self.registry.lookup(&self.key) {
            if ctrl.lock().is_presenting() {
                let value = content(&token);
                outcome.updated = ctrl.lock().update(value);
            }
        }

        if suppressing {
            self.guard.clear();
        }

        tracing::trace!(
            target: "horizon_scrim::host",
            key = %self.key,
            presented = outcome.presented,
            updated = outcome.updated,
            externally_dismissed = outcome.externally_dismissed,
            "reconciled"
        );
        outcome
    }

    /// Build the pass's token.
    fn build_token(&self, has_controller: bool, externally_dismissed: bool) -> DismissToken {
        let dismiss: Arc<dyn Fn() + Send + Sync> = {
            let guard = Arc::clone(&self.guard);
            let presented = Arc::clone(&self.presented);
            let registry = Arc::clone(&self.registry);
            let key = self.key.clone();
            let hook = self.dismiss_hook.clone();
            Arc::new(move || {
                guard.arm();
                presented.set(false);
                if let Some(hook) = &hook {
                    hook();
                }
                registry.dismiss(&key);
            })
        };

        let external_completion: Arc<dyn Fn() + Send + Sync> = {
            let registry = Arc::clone(&self.registry);
            let key = self.key.clone();
            Arc::new(move || {
                registry.dismiss(&key);
            })
        };

        DismissToken::new(
            has_controller.then(|| self.key.clone()),
            externally_dismissed,
            dismiss,
            external_completion,
        )
    }
}
