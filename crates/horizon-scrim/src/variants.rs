//! Convenience presentation hosts.
//!
//! Thin reductions onto [`PresentationHost`] for the common "present when
//! there is something to show" shapes:
//!
//! - [`ItemHost`]: present while an optional item is `Some`
//! - [`DataHost`]: present while a boolean is `true` **and** optional data
//!   is `Some`
//! - [`ErrorHost`]: present while a boolean is `true` **and** an optional
//!   error is `Some`
//!
//! Each variant synthesizes the boolean binding from the optional's
//! `Some`-ness and caches the last non-`None` value in the
//! [`PresentationRegistry`](crate::PresentationRegistry), so content can
//! keep rendering the outgoing value during its exit animation after the
//! source has already become `None`. The cache entry is purged when the
//! overlay is torn down.

use std::sync::Arc;

use crate::error::Result;
use crate::host::{PresentationHost, ReconcileOutcome};
use crate::key::PresentationKey;
use crate::property::Property;
use crate::registry::PresentationRegistry;
use crate::surface::{HitTestPolicy, OverlaySurface, SharedSurface};
use crate::token::DismissToken;

// ============================================================================
// ItemHost
// ============================================================================

/// Presents while an optional item is `Some`.
///
/// The item property is the binding: application code sets it to `Some` to
/// present and to `None` to dismiss. When the presented content dismisses
/// itself through its token, the item property is reset to `None` so both
/// sides stay in agreement.
pub struct ItemHost<S: OverlaySurface, T> {
    host: PresentationHost<S>,
    /// The application-facing item binding.
    item: Arc<Property<Option<T>>>,
}

impl<S: OverlaySurface + 'static, T: Clone + Send + Sync + 'static> ItemHost<S, T> {
    /// Create an item host for an explicit key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`](crate::Error::EmptyKey) for an empty
    /// identifier.
    pub fn new(
        key: impl AsRef<str>,
        item: Arc<Property<Option<T>>>,
        registry: Arc<PresentationRegistry<S>>,
        surface: SharedSurface<S>,
    ) -> Result<Self> {
        let presented = Arc::new(Property::new(false));
        let mut host = PresentationHost::new(key, presented, registry, surface)?;
        let binding = Arc::clone(&item);
        host.set_dismiss_hook(move || binding.set_silent(None));
        Ok(Self { host, item })
    }

    /// Set the hit-test behavior for inserted content.
    pub fn with_hit_test(mut self, hit_test: HitTestPolicy) -> Self {
        self.host = self.host.with_hit_test(hit_test);
        self
    }

    /// The key identifying this call site.
    pub fn key(&self) -> &PresentationKey {
        self.host.key()
    }

    /// The application-facing item binding.
    pub fn item(&self) -> &Arc<Property<Option<T>>> {
        &self.item
    }

    /// Whether content is currently presented.
    pub fn is_presenting(&self) -> bool {
        self.host.is_presenting()
    }

    /// Reconcile the item binding against the overlay, once per update
    /// cycle.
    ///
    /// The content factory receives the item value — the current one, or
    /// the cached last non-`None` value while an exit animation plays out.
    pub fn reconcile(
        &self,
        mut content: impl FnMut(&T, &DismissToken) -> S::Content,
    ) -> ReconcileOutcome {
        let presented = match self.item.get() {
            Some(value) => {
                self.host.registry().cache_set(self.host.key(), value);
                true
            }
            None => false,
        };
        self.host.binding().set(presented);

        match self.host.registry().cache_get::<T>(self.host.key()) {
            Some(value) => self.host.reconcile(|token| content(&value, token)),
            // Nothing cached means nothing presented and nothing to tear
            // down; the pass is idle.
            None => ReconcileOutcome::default(),
        }
    }
}

// ============================================================================
// DataHost
// ============================================================================

/// Presents while a boolean is `true` and optional data is `Some`.
///
/// The flag property is the dismissal channel: the token's dismiss action
/// resets it to `false`, and application code flips it for external
/// dismissal. The data property only gates presentation and supplies the
/// content value.
pub struct DataHost<S: OverlaySurface, T> {
    host: PresentationHost<S>,
    /// The application-facing presented flag.
    flag: Arc<Property<bool>>,
    /// The application-facing data binding.
    data: Arc<Property<Option<T>>>,
}

impl<S: OverlaySurface + 'static, T: Clone + Send + 'static> DataHost<S, T> {
    /// Create a data host for an explicit key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`](crate::Error::EmptyKey) for an empty
    /// identifier.
    pub fn new(
        key: impl AsRef<str>,
        flag: Arc<Property<bool>>,
        data: Arc<Property<Option<T>>>,
        registry: Arc<PresentationRegistry<S>>,
        surface: SharedSurface<S>,
    ) -> Result<Self> {
        let presented = Arc::new(Property::new(false));
        let mut host = PresentationHost::new(key, presented, registry, surface)?;
        let binding = Arc::clone(&flag);
        host.set_dismiss_hook(move || {
            binding.set(false);
        });
        Ok(Self { host, flag, data })
    }

    /// Set the hit-test behavior for inserted content.
    pub fn with_hit_test(mut self, hit_test: HitTestPolicy) -> Self {
        self.host = self.host.with_hit_test(hit_test);
        self
    }

    /// The key identifying this call site.
    pub fn key(&self) -> &PresentationKey {
        self.host.key()
    }

    /// The application-facing presented flag.
    pub fn flag(&self) -> &Arc<Property<bool>> {
        &self.flag
    }

    /// The application-facing data binding.
    pub fn data(&self) -> &Arc<Property<Option<T>>> {
        &self.data
    }

    /// Whether content is currently presented.
    pub fn is_presenting(&self) -> bool {
        self.host.is_presenting()
    }

    /// Reconcile the flag and data bindings against the overlay, once per
    /// update cycle.
    pub fn reconcile(
        &self,
        mut content: impl FnMut(&T, &DismissToken) -> S::Content,
    ) -> ReconcileOutcome {
        let data = self.data.get();
        if let Some(value) = data.clone() {
            self.host.registry().cache_set(self.host.key(), value);
        }
        self.host.binding().set(self.flag.get() && data.is_some());

        match self.host.registry().cache_get::<T>(self.host.key()) {
            Some(value) => self.host.reconcile(|token| content(&value, token)),
            None => ReconcileOutcome::default(),
        }
    }
}

// ============================================================================
// ErrorHost
// ============================================================================

/// Presents while a boolean is `true` and an optional error is `Some`.
///
/// The error-presentation shape of [`DataHost`], for surfacing failures in
/// a sheet or toast.
pub struct ErrorHost<S: OverlaySurface, E: std::error::Error + Clone + Send + 'static> {
    inner: DataHost<S, E>,
}

impl<S: OverlaySurface + 'static, E: std::error::Error + Clone + Send + 'static> ErrorHost<S, E> {
    /// Create an error host for an explicit key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKey`](crate::Error::EmptyKey) for an empty
    /// identifier.
    pub fn new(
        key: impl AsRef<str>,
        flag: Arc<Property<bool>>,
        error: Arc<Property<Option<E>>>,
        registry: Arc<PresentationRegistry<S>>,
        surface: SharedSurface<S>,
    ) -> Result<Self> {
        Ok(Self {
            inner: DataHost::new(key, flag, error, registry, surface)?,
        })
    }

    /// Set the hit-test behavior for inserted content.
    pub fn with_hit_test(mut self, hit_test: HitTestPolicy) -> Self {
        self.inner = self.inner.with_hit_test(hit_test);
        self
    }

    /// The key identifying this call site.
    pub fn key(&self) -> &PresentationKey {
        self.inner.key()
    }

    /// Whether content is currently presented.
    pub fn is_presenting(&self) -> bool {
        self.inner.is_presenting()
    }

    /// Reconcile the flag and error bindings against the overlay, once per
    /// update cycle.
    pub fn reconcile(
        &self,
        content: impl FnMut(&E, &DismissToken) -> S::Content,
    ) -> ReconcileOutcome {
        self.inner.reconcile(content)
    }
}
