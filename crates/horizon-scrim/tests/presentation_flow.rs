//! Integration tests for the presentation flow.
//!
//! Drives full present/update/dismiss cycles against an in-memory overlay
//! surface with deferrable removal transitions, the way the host
//! framework's event loop would.

use std::sync::Arc;

use horizon_scrim::{
    shared_surface, DataHost, HitTestPolicy, ItemHost, OverlaySurface, PresentationHost,
    PresentationKey, PresentationRegistry, Property, ReconcileOutcome, RemovalCompletion,
    SharedSurface,
};

/// In-memory overlay layer recording every operation it performs.
#[derive(Default)]
struct RecordingSurface {
    /// Stacked overlay elements, frontmost last.
    children: Vec<(PresentationKey, String)>,
    /// Parked removal completions, invoked by the "event loop" below.
    pending: Vec<RemovalCompletion>,
    /// Operation log: "insert", "replace", "remove".
    ops: Vec<&'static str>,
    /// Count of actual visual changes.
    visual_mutations: usize,
}

impl OverlaySurface for RecordingSurface {
    type Content = String;

    fn insert(&mut self, tag: &PresentationKey, content: String, _hit_test: HitTestPolicy) -> bool {
        self.children.push((tag.clone(), content));
        self.ops.push("insert");
        self.visual_mutations += 1;
        true
    }

    fn replace(&mut self, tag: &PresentationKey, content: String) -> bool {
        self.ops.push("replace");
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
            self.ops.push("remove");
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

/// Run parked removal completions, as the UI event loop would.
fn run_event_loop(surface: &SharedSurface<RecordingSurface>) {
    loop {
        let pending: Vec<RemovalCompletion> = surface.lock().pending.drain(..).collect();
        if pending.is_empty() {
            break;
        }
        for completion in pending {
            completion();
        }
    }
}

fn key(id: &str) -> PresentationKey {
    PresentationKey::new(id).unwrap()
}

struct Fixture {
    surface: SharedSurface<RecordingSurface>,
    registry: Arc<PresentationRegistry<RecordingSurface>>,
    presented: Arc<Property<bool>>,
    host: PresentationHost<RecordingSurface>,
}

fn fixture(id: &str) -> Fixture {
    let surface = shared_surface(RecordingSurface::default());
    let registry = PresentationRegistry::new();
    let presented = Arc::new(Property::new(false));
    let host = PresentationHost::new(
        id,
        Arc::clone(&presented),
        Arc::clone(&registry),
        Arc::clone(&surface),
    )
    .unwrap();
    Fixture {
        surface,
        registry,
        presented,
        host,
    }
}

#[test]
fn scenario_a_external_dismiss_round_trip() {
    let fx = fixture("K");

    // Binding starts false; nothing happens.
    assert_eq!(fx.host.reconcile(|_| "content".into()), ReconcileOutcome::default());
    assert!(!fx.host.is_presenting());

    // true -> overlay gains one child tagged "K".
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());
    assert!(fx.host.is_presenting());
    assert!(fx.surface.lock().contains(&key("K")));
    assert_eq!(fx.surface.lock().children.len(), 1);

    // false, externally (not via the token) -> next pass flags it.
    fx.presented.set(false);
    let mut token = None;
    let outcome = fx.host.reconcile(|t| {
        token = Some(t.clone());
        "content".into()
    });
    assert!(outcome.externally_dismissed);

    // Content finishes its exit animation and completes the dismissal.
    token.unwrap().complete_external_dismiss();
    run_event_loop(&fx.surface);
    assert!(!fx.surface.lock().contains(&key("K")));
    assert!(!fx.host.is_presenting());
    assert!(fx.registry.is_empty());
}

#[test]
fn scenario_b_internal_dismiss_flips_binding_and_suppresses_flag() {
    let fx = fixture("K");
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());

    let mut token = None;
    fx.host.reconcile(|t| {
        token = Some(t.clone());
        "content".into()
    });

    // Content closes itself: the binding flips automatically.
    token.unwrap().dismiss();
    assert!(!fx.presented.get());

    // The guard keeps the same transition from also reading as external.
    let outcome = fx.host.reconcile(|_| "content".into());
    assert!(!outcome.externally_dismissed);

    run_event_loop(&fx.surface);
    assert!(!fx.host.is_presenting());
    assert!(!fx.surface.lock().contains(&key("K")));
}

#[test]
fn scenario_c_force_dismiss_is_synchronous_and_purges() {
    let fx = fixture("K");
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());
    fx.registry.cache_set(&key("K"), "payload".to_string());
    assert!(fx.host.is_presenting());

    assert!(fx.registry.force_dismiss(&key("K")));

    // No animation wait: the element is already gone.
    assert!(!fx.surface.lock().contains(&key("K")));
    assert!(!fx.registry.contains(&key("K")));
    assert_eq!(fx.registry.cache_get::<String>(&key("K")), None);
    assert!(!fx.host.is_presenting());
    assert!(fx.surface.lock().pending.is_empty());
}

#[test]
fn p1_at_most_one_controller_per_key() {
    let fx = fixture("K");

    for _ in 0..3 {
        fx.presented.set(true);
        fx.host.reconcile(|_| "content".into());
        assert_eq!(fx.registry.count(), 1);
        assert_eq!(fx.surface.lock().children.len(), 1);

        fx.presented.set(false);
        let mut token = None;
        fx.host.reconcile(|t| {
            token = Some(t.clone());
            "content".into()
        });
        token.unwrap().complete_external_dismiss();
        run_event_loop(&fx.surface);
        assert_eq!(fx.registry.count(), 0);
    }
}

#[test]
fn p2_present_happens_before_update_in_one_pass() {
    let fx = fixture("K");
    fx.presented.set(true);

    let outcome = fx.host.reconcile(|_| "content".into());
    assert!(outcome.presented);
    assert!(outcome.updated);
    assert_eq!(fx.surface.lock().ops, vec!["insert", "replace"]);
}

#[test]
fn p3_internal_dismiss_never_reads_as_external() {
    let fx = fixture("K");
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());

    let mut token = None;
    fx.host.reconcile(|t| {
        token = Some(t.clone());
        "content".into()
    });
    token.unwrap().dismiss();

    // Every pass up to and including the guard-clearing one reports false.
    let outcome = fx.host.reconcile(|t| {
        assert!(!t.is_externally_dismissed());
        "content".into()
    });
    assert!(!outcome.externally_dismissed);

    let outcome = fx.host.reconcile(|t| {
        assert!(!t.is_externally_dismissed());
        "content".into()
    });
    assert!(!outcome.externally_dismissed);

    run_event_loop(&fx.surface);
    assert_eq!(fx.host.reconcile(|_| "content".into()), ReconcileOutcome::default());
}

#[test]
fn p4_equal_content_updates_are_visually_idempotent() {
    let fx = fixture("K");
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());
    let baseline = fx.surface.lock().visual_mutations;

    fx.host.reconcile(|_| "content".into());
    fx.host.reconcile(|_| "content".into());

    assert_eq!(fx.surface.lock().visual_mutations, baseline);
    assert_eq!(fx.surface.lock().children.len(), 1);
}

#[test]
fn p5_force_dismiss_on_absent_key_is_safe() {
    let fx = fixture("K");
    assert!(!fx.registry.force_dismiss(&key("never-presented")));
    assert!(fx.registry.is_empty());

    // Presenting something else is unaffected.
    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());
    assert!(!fx.registry.force_dismiss(&key("still-absent")));
    assert_eq!(fx.registry.count(), 1);
    assert!(fx.host.is_presenting());
}

#[test]
fn p6_item_cache_survives_nil_transition_until_completion() {
    let surface = shared_surface(RecordingSurface::default());
    let registry = PresentationRegistry::new();
    let item = Arc::new(Property::new(None));
    let host = ItemHost::new(
        "item",
        Arc::clone(&item),
        Arc::clone(&registry),
        Arc::clone(&surface),
    )
    .unwrap();

    item.set(Some("outgoing".to_string()));
    host.reconcile(|v, _| v.clone());
    assert!(host.is_presenting());

    // Source becomes None while the overlay is still up; the cached value
    // keeps rendering through the exit.
    item.set(None);
    let mut token = None;
    host.reconcile(|v, t| {
        assert_eq!(v, "outgoing");
        token = Some(t.clone());
        v.clone()
    });
    assert_eq!(
        surface.lock().children[0].1,
        "outgoing".to_string()
    );

    token.unwrap().complete_external_dismiss();
    run_event_loop(&surface);
    assert!(!host.is_presenting());
    assert_eq!(registry.cache_get::<String>(host.key()), None);
}

#[test]
fn concurrent_keys_stack_in_insertion_order() {
    let surface = shared_surface(RecordingSurface::default());
    let registry = PresentationRegistry::new();

    let sheet_flag = Arc::new(Property::new(true));
    let sheet = PresentationHost::new(
        "sheet",
        Arc::clone(&sheet_flag),
        Arc::clone(&registry),
        Arc::clone(&surface),
    )
    .unwrap();

    let toast_flag = Arc::new(Property::new(true));
    let toast = PresentationHost::new(
        "toast",
        Arc::clone(&toast_flag),
        Arc::clone(&registry),
        Arc::clone(&surface),
    )
    .unwrap()
    .with_hit_test(HitTestPolicy::Passthrough);

    sheet.reconcile(|_| "sheet content".into());
    toast.reconcile(|_| "toast content".into());

    assert_eq!(registry.count(), 2);
    // Last inserted is frontmost.
    assert!(surface.lock().is_frontmost(&key("toast")));

    // Force-dismissing the frontmost overlay leaves the other intact.
    assert!(registry.force_dismiss(&key("toast")));
    assert!(surface.lock().is_frontmost(&key("sheet")));
    assert!(sheet.is_presenting());
    assert!(!toast.is_presenting());
    assert_eq!(registry.count(), 1);
}

#[test]
fn update_flows_fresh_content_each_cycle() {
    let fx = fixture("K");
    fx.presented.set(true);

    let mut message = "first".to_string();
    fx.host.reconcile(|_| message.clone());
    assert_eq!(fx.surface.lock().children[0].1, "first");

    message = "second".to_string();
    fx.host.reconcile(|_| message.clone());
    assert_eq!(fx.surface.lock().children[0].1, "second");
}

#[test]
fn dismissed_signal_fires_once_per_teardown() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let fx = fixture("K");
    let dismissals = Arc::new(AtomicUsize::new(0));
    let observed = Arc::clone(&dismissals);
    fx.registry.dismissed().connect(move |_| {
        observed.fetch_add(1, Ordering::SeqCst);
    });

    fx.presented.set(true);
    fx.host.reconcile(|_| "content".into());

    let mut token = None;
    fx.host.reconcile(|t| {
        token = Some(t.clone());
        "content".into()
    });
    let token = token.unwrap();
    token.dismiss();
    // A second dismiss is idempotent and starts nothing new.
    token.dismiss();

    fx.host.reconcile(|_| "content".into());
    run_event_loop(&fx.surface);
    assert_eq!(dismissals.load(Ordering::SeqCst), 1);
}

#[test]
fn data_host_round_trip_with_flag_and_payload() {
    let surface = shared_surface(RecordingSurface::default());
    let registry = PresentationRegistry::new();
    let flag = Arc::new(Property::new(false));
    let data = Arc::new(Property::new(None));
    let host = DataHost::new(
        "data",
        Arc::clone(&flag),
        Arc::clone(&data),
        Arc::clone(&registry),
        Arc::clone(&surface),
    )
    .unwrap();

    // Flag without data, then data without flag: neither presents.
    flag.set(true);
    assert!(!host.reconcile(|v: &String, _| v.clone()).presented);
    flag.set(false);
    data.set(Some("payload".to_string()));
    assert!(!host.reconcile(|v, _| v.clone()).presented);

    // Both together present.
    flag.set(true);
    assert!(host.reconcile(|v, _| v.clone()).presented);
    assert_eq!(surface.lock().children[0].1, "payload");

    // External flip plays the exit against the cached payload even after
    // the data is cleared.
    flag.set(false);
    data.set(None);
    let mut token = None;
    let outcome = host.reconcile(|v, t| {
        assert_eq!(v, "payload");
        token = Some(t.clone());
        v.clone()
    });
    assert!(outcome.externally_dismissed);
    token.unwrap().complete_external_dismiss();
    run_event_loop(&surface);
    assert!(!host.is_presenting());
    assert!(registry.is_empty());
}
