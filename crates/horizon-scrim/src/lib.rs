//! Horizon Scrim - a declarative presentation host for layered overlay
//! surfaces.
//!
//! This crate manages the lifecycle of modally presented content (sheets,
//! toasts, dialogs) over a single application-wide overlay layer. It is the
//! glue between a declarative "is this presented" binding and the
//! imperative insert/update/remove calls the overlay layer actually
//! understands:
//!
//! - **[`PresentationHost`]**: reconciles a boolean [`Property`] binding
//!   against overlay state on every update cycle
//! - **[`OverlayController`]**: owns one key's inserted overlay element
//! - **[`PresentationRegistry`]**: tracks live controllers by key, caches
//!   presentation payloads, and is the force-dismiss entry point
//! - **[`DismissToken`]**: the per-cycle contract handed to presented
//!   content for completing dismissals
//! - **[`ItemHost`] / [`DataHost`] / [`ErrorHost`]**: present-when-`Some`
//!   conveniences
//!
//! The overlay layer itself is supplied by the application through the
//! [`OverlaySurface`] trait; this crate never touches a view hierarchy
//! directly.
//!
//! # Control flow
//!
//! Application code toggles the binding. Each update cycle, the host
//! detects the transition and either inserts new content or updates the
//! existing element in place, handing the content a fresh [`DismissToken`].
//! Content dismisses itself through the token after its own exit animation,
//! or observes an externally flipped binding, animates out, and reports
//! completion. When a presenting view disappears outright, the application
//! force-dismisses through the registry, bypassing animation.
//!
//! Everything runs on the UI thread inside the framework's update cycle;
//! removal transitions are fire-and-forget with completions invoked later
//! on the same thread's event loop.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_scrim::{
//!     shared_surface, HitTestPolicy, OverlaySurface, PresentationHost,
//!     PresentationKey, PresentationRegistry, Property, RemovalCompletion,
//! };
//!
//! // A minimal overlay layer; real applications adapt their framework's
//! // view hierarchy instead.
//! #[derive(Default)]
//! struct Overlay {
//!     children: Vec<(PresentationKey, String)>,
//!     pending: Vec<RemovalCompletion>,
//! }
//!
//! impl OverlaySurface for Overlay {
//!     type Content = String;
//!
//!     fn insert(
//!         &mut self,
//!         tag: &PresentationKey,
//!         content: String,
//!         _hit_test: HitTestPolicy,
//!     ) -> bool {
//!         self.children.push((tag.clone(), content));
//!         true
//!     }
//!
//!     fn replace(&mut self, tag: &PresentationKey, content: String) -> bool {
//!         match self.children.iter_mut().find(|(t, _)| t == tag) {
//!             Some((_, c)) => {
//!                 *c = content;
//!                 true
//!             }
//!             None => false,
//!         }
//!     }
//!
//!     fn remove_animated(&mut self, _tag: &PresentationKey, on_complete: RemovalCompletion) {
//!         // Completions run from the event loop once the transition ends.
//!         self.pending.push(on_complete);
//!     }
//!
//!     fn remove_now(&mut self, tag: &PresentationKey) -> bool {
//!         let before = self.children.len();
//!         self.children.retain(|(t, _)| t != tag);
//!         self.children.len() != before
//!     }
//!
//!     fn is_frontmost(&self, tag: &PresentationKey) -> bool {
//!         self.children.last().is_some_and(|(t, _)| t == tag)
//!     }
//!
//!     fn contains(&self, tag: &PresentationKey) -> bool {
//!         self.children.iter().any(|(t, _)| t == tag)
//!     }
//! }
//!
//! # fn main() -> Result<(), horizon_scrim::Error> {
//! let surface = shared_surface(Overlay::default());
//! let registry = PresentationRegistry::new();
//! let presented = Arc::new(Property::new(false));
//!
//! let host = PresentationHost::new(
//!     "settings-sheet",
//!     Arc::clone(&presented),
//!     Arc::clone(&registry),
//!     Arc::clone(&surface),
//! )?;
//!
//! // The application flips the binding; the next update cycle presents.
//! presented.set(true);
//! let outcome = host.reconcile(|_token| "sheet content".to_string());
//! assert!(outcome.presented);
//! assert!(host.is_presenting());
//!
//! // Flipping it back off reports an external dismissal; the content
//! // completes it after running its exit animation.
//! presented.set(false);
//! let mut token = None;
//! host.reconcile(|t| {
//!     token = Some(t.clone());
//!     "sheet content".to_string()
//! });
//! token.unwrap().complete_external_dismiss();
//!
//! // The event loop runs the finished transition's completion.
//! let pending: Vec<_> = surface.lock().pending.drain(..).collect();
//! for complete in pending {
//!     complete();
//! }
//! assert!(!host.is_presenting());
//! # Ok(())
//! # }
//! ```
//!
//! # Keys
//!
//! Every host is created with an explicit string key that must be stable
//! across update cycles of its call site and unique among call sites that
//! can present concurrently. Two concurrent presentations sharing a key
//! collide (last-writer-wins in the registry); see [`PresentationKey`].
//!
//! # Teardown obligation
//!
//! The host has no hook into the presenting view's lifecycle. If the view
//! disappears while presenting, the application must call
//! [`PresentationRegistry::force_dismiss`] from its teardown hook, or the
//! overlay outlives the view and can no longer be updated.

mod controller;
mod error;
mod host;
mod key;
pub mod logging;
mod property;
mod registry;
mod signal;
mod surface;
#[cfg(test)]
mod test_util;
mod token;
mod variants;

pub use controller::{OverlayController, SharedController};
pub use error::{Error, Result};
pub use host::{PresentationHost, ReconcileOutcome};
pub use key::PresentationKey;
pub use property::Property;
pub use registry::PresentationRegistry;
pub use signal::{ConnectionId, Signal};
pub use surface::{
    shared_surface, HitTestPolicy, OverlaySurface, RemovalCompletion, SharedSurface,
};
pub use token::DismissToken;
pub use variants::{DataHost, ErrorHost, ItemHost};
