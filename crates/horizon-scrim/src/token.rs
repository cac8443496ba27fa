//! The dismiss-mode token.
//!
//! A [`DismissToken`] is the contract between the presentation host and the
//! content it presents. The host builds a fresh token on every
//! reconciliation pass and hands it to the content factory, so presented
//! content always observes current dismissal state.
//!
//! Presented content has exactly two obligations:
//!
//! 1. Call [`dismiss`](DismissToken::dismiss) when its own gesture or logic
//!    decides to close (after finishing its own exit animation).
//! 2. Observe [`is_externally_dismissed`](DismissToken::is_externally_dismissed)
//!    and, when it is `true`, run its exit animation and then call
//!    [`complete_external_dismiss`](DismissToken::complete_external_dismiss).

use std::fmt;
use std::sync::Arc;

use crate::key::PresentationKey;

/// Immutable description of how presented content may complete a dismissal.
///
/// Tokens are rebuilt every update cycle; content must not assume a token
/// outlives the pass that produced it. Cloning is cheap (the actions are
/// shared).
///
/// # Related Types
///
/// - [`PresentationHost`](crate::PresentationHost) - Builds a token per pass
/// - [`OverlayController`](crate::OverlayController) - Executes the removal
///   the token's actions request
#[derive(Clone)]
pub struct DismissToken {
    /// Key of the live controller, if one exists yet.
    key: Option<PresentationKey>,
    /// Whether the external binding flipped to false outside the token's
    /// own dismiss action.
    externally_dismissed: bool,
    /// Flips the binding and starts the graceful removal.
    dismiss: Arc<dyn Fn() + Send + Sync>,
    /// Starts the graceful removal after an externally-triggered exit
    /// animation finished.
    external_completion: Arc<dyn Fn() + Send + Sync>,
}

impl DismissToken {
    pub(crate) fn new(
        key: Option<PresentationKey>,
        externally_dismissed: bool,
        dismiss: Arc<dyn Fn() + Send + Sync>,
        external_completion: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self {
            key,
            externally_dismissed,
            dismiss,
            external_completion,
        }
    }

    /// The presentation key of the live controller, or `None` when nothing
    /// has been presented yet for this host.
    pub fn key(&self) -> Option<&PresentationKey> {
        self.key.as_ref()
    }

    /// Whether the dismissal was triggered externally.
    ///
    /// `true` means the application flipped the presented binding to
    /// `false` (rather than the content calling [`dismiss`](Self::dismiss)).
    /// The content should run its exit animation and then call
    /// [`complete_external_dismiss`](Self::complete_external_dismiss).
    pub fn is_externally_dismissed(&self) -> bool {
        self.externally_dismissed
    }

    /// Dismiss from inside the presented content.
    ///
    /// Flips the presented binding to `false`, marks the dismissal as
    /// internally triggered so the next pass does not also report an
    /// external dismissal, and starts the overlay's graceful removal.
    /// Calling this more than once is harmless.
    pub fn dismiss(&self) {
        (self.dismiss)();
    }

    /// Signal that an externally-triggered exit animation has finished.
    ///
    /// Starts the overlay's graceful removal. Content calls this after
    /// observing [`is_externally_dismissed`](Self::is_externally_dismissed)
    /// and completing its own exit animation.
    pub fn complete_external_dismiss(&self) {
        (self.external_completion)();
    }
}

impl fmt::Debug for DismissToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissToken")
            .field("key", &self.key)
            .field("externally_dismissed", &self.externally_dismissed)
            .finish_non_exhaustive()
    }
}
