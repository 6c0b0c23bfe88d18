//! Property-based tests for TabStore operations.
//!
//! For any sequence of opens, closes, switches and history moves the
//! collection stays non-empty, the active id names a present tab and every
//! tab's history cursor points at its display address.

use proptest::prelude::*;
use sovereign_routing::RoutingPolicy;
use sovereign_session::{MemoryPersistence, TabStore};

/// Operations that can be performed on the store. Indices pick a tab from the
/// current list modulo its length.
#[derive(Debug, Clone)]
enum StoreOp {
    Open(Option<String>),
    Close(usize),
    Switch(usize),
    Navigate(usize, String),
    Back(usize),
    Forward(usize),
    ToggleProxy(usize),
    Ready,
}

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("openai.com".to_string()),
        Just("https://youtu.be/dQw4w9WgXcQ".to_string()),
        Just("https://www.google.com".to_string()),
        "[a-z]{1,10}\\.(com|org|net)",
        "[a-z ]{1,16}",
    ]
}

fn arb_store_ops() -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(
        prop_oneof![
            2 => proptest::option::of(arb_input()).prop_map(StoreOp::Open),
            3 => (0..20usize).prop_map(StoreOp::Close),
            1 => (0..20usize).prop_map(StoreOp::Switch),
            3 => ((0..20usize), arb_input()).prop_map(|(i, s)| StoreOp::Navigate(i, s)),
            2 => (0..20usize).prop_map(StoreOp::Back),
            1 => (0..20usize).prop_map(StoreOp::Forward),
            1 => (0..20usize).prop_map(StoreOp::ToggleProxy),
            1 => Just(StoreOp::Ready),
        ],
        1..60,
    )
}

fn pick(store: &TabStore, idx: usize) -> String {
    let tabs = store.list_tabs();
    tabs[idx % tabs.len()].id.clone()
}

fn apply(store: &mut TabStore, op: &StoreOp) {
    match op {
        StoreOp::Open(input) => {
            store.open_tab(input.as_deref());
        }
        StoreOp::Close(idx) => {
            let id = pick(store, *idx);
            store.close_tab(&id).unwrap();
        }
        StoreOp::Switch(idx) => {
            let id = pick(store, *idx);
            store.switch_to(&id);
        }
        StoreOp::Navigate(idx, input) => {
            let id = pick(store, *idx);
            store.navigate(&id, input).unwrap();
        }
        StoreOp::Back(idx) => {
            let id = pick(store, *idx);
            store.back(&id);
        }
        StoreOp::Forward(idx) => {
            let id = pick(store, *idx);
            store.forward(&id);
        }
        StoreOp::ToggleProxy(idx) => {
            let id = pick(store, *idx);
            store.toggle_proxy_override(&id);
        }
        StoreOp::Ready => {
            let ticket = store.active_surface().ticket;
            store.content_ready(&ticket);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn collection_invariants_hold_after_every_op(ops in arb_store_ops()) {
        let mut store = TabStore::restore(MemoryPersistence::new(), RoutingPolicy::new());

        for op in &ops {
            apply(&mut store, op);

            let snapshot = store.snapshot();
            prop_assert!(!snapshot.is_empty(), "Empty after {:?}", op);
            prop_assert!(snapshot.active_tab().is_some(), "Dangling active id after {:?}", op);
            for tab in &snapshot.tabs {
                prop_assert!(tab.history_index < tab.history.len());
                prop_assert!(tab.is_consistent(), "Cursor mismatch in {:?} after {:?}", tab, op);
            }
        }
    }

    #[test]
    fn closing_everything_leaves_one_blank_tab(opens in 0..10usize, input in arb_input()) {
        let mut store = TabStore::restore(MemoryPersistence::new(), RoutingPolicy::new());
        for _ in 0..opens {
            store.open_tab(Some(input.as_str()));
        }

        let ids: Vec<String> = store.list_tabs().iter().map(|t| t.id.clone()).collect();
        for id in &ids {
            store.close_tab(id).unwrap();
        }

        prop_assert_eq!(store.list_tabs().len(), 1);
        prop_assert!(store.active_tab().is_blank());
        prop_assert!(!ids.contains(&store.active_tab().id));
    }

    #[test]
    fn navigate_back_navigate_truncates_forward_history(
        first in arb_input(),
        second in arb_input(),
        third in arb_input(),
    ) {
        let mut store = TabStore::restore(MemoryPersistence::new(), RoutingPolicy::new());
        let id = store.active_tab_id().to_string();

        store.navigate(&id, &first).unwrap();
        store.navigate(&id, &second).unwrap();
        prop_assert!(store.back(&id));
        store.navigate(&id, &third).unwrap();

        let tab = store.get_tab(&id).unwrap();
        prop_assert_eq!(tab.history.len(), 3);
        prop_assert_eq!(tab.history_index, 2);
        prop_assert!(!tab.can_go_forward());
    }
}
