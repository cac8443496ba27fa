//! Shared fixtures for unit tests.

use crate::key::PresentationKey;
use crate::surface::{HitTestPolicy, OverlaySurface, RemovalCompletion, SharedSurface};

/// In-memory overlay layer: a stack of tagged string contents with
/// deferrable removal transitions.
///
/// `remove_animated` parks its completion in `pending` so tests can decide
/// when the "animation" ends, the way the real event loop would invoke it
/// later. `visual_mutations` counts actual visual changes (insertions,
/// removals, content replacements with different content) so idempotency
/// can be asserted.
pub(crate) struct TestSurface {
    pub children: Vec<(PresentationKey, String)>,
    pub pending: Vec<RemovalCompletion>,
    pub available: bool,
    pub visual_mutations: usize,
}

impl TestSurface {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            pending: Vec::new(),
            available: true,
            visual_mutations: 0,
        }
    }

    /// The content currently shown for `tag`, if any.
    pub fn content_of(&self, tag: &PresentationKey) -> Option<String> {
        self.children
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, c)| c.clone())
    }

    /// Run all pending removal completions, as the UI event loop would.
    ///
    /// Completions are taken out of the surface before being invoked so
    /// they can re-enter it freely.
    pub fn drain_completions(surface: &SharedSurface<TestSurface>) {
        loop {
            let pending: Vec<RemovalCompletion> =
                surface.lock().pending.drain(..).collect();
            if pending.is_empty() {
                break;
            }
            for completion in pending {
                completion();
            }
        }
    }
}

impl OverlaySurface for TestSurface {
    type Content = String;

    fn insert(
        &mut self,
        tag: &PresentationKey,
        content: String,
        _hit_test: HitTestPolicy,
    ) -> bool {
        if !self.available {
            return false;
        }
        self.children.push((tag.clone(), content));
        self.visual_mutations += 1;
        true
    }

    fn replace(&mut self, tag: &PresentationKey, content: String) -> bool {
        for (t, c) in &mut self.children {
            if t == tag {
                if *c != content {
                    *c = content;
                    self.visual_mutations += 1;
                }
                return true;
            }
        }
        false
    }

    fn remove_animated(&mut self, _tag: &PresentationKey, on_complete: RemovalCompletion) {
        self.pending.push(on_complete);
    }

    fn remove_now(&mut self, tag: &PresentationKey) -> bool {
        let before = self.children.len();
        self.children.retain(|(t, _)| t != tag);
        if self.children.len() != before {
            self.visual_mutations += 1;
            true
        } else {
            false
        }
    }

    fn is_frontmost(&self, tag: &PresentationKey) -> bool {
        self.children.last().is_some_and(|(t, _)| t == tag)
    }

    fn contains(&self, tag: &PresentationKey) -> bool {
        self.children.iter().any(|(t, _)| t == tag)
    }
}
