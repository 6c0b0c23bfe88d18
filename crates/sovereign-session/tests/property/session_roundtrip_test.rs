//! Property-based tests for session persistence.
//!
//! Saving a store's snapshot and loading it back reproduces the snapshot with
//! every loading flag cleared, both in memory and across a SQLite reopen.

use proptest::prelude::*;
use sovereign_routing::RoutingPolicy;
use sovereign_session::{
    MemoryPersistence, SessionPersistence, SqlitePersistence, TabStore,
};
use sovereign_storage::Database;
use sovereign_tabs::TabCollection;

fn arb_inputs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("github.com".to_string()),
            Just("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            "[a-z]{1,10}\\.(com|org)",
            "[a-zA-Z ]{1,20}",
        ],
        0..8,
    )
}

fn without_loading(mut collection: TabCollection) -> TabCollection {
    for tab in &mut collection.tabs {
        tab.is_loading = false;
    }
    collection
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn memory_round_trip(inputs in arb_inputs(), back in any::<bool>()) {
        let persistence = MemoryPersistence::new();
        let mut store = TabStore::restore(persistence.clone(), RoutingPolicy::new());
        for input in &inputs {
            store.open_tab(Some(input.as_str()));
        }
        if back {
            store.navigate_active("rust");
            let id = store.active_tab_id().to_string();
            store.back(&id);
        }

        let snapshot = store.snapshot();
        persistence.save(&snapshot).unwrap();
        let loaded = persistence.load().unwrap();

        prop_assert_eq!(loaded, without_loading(snapshot));
    }
}

#[test]
fn sqlite_round_trip_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sovereign.db");

    let expected = {
        let db = Database::open(&path).unwrap();
        let mut store = TabStore::restore(SqlitePersistence::new(db), RoutingPolicy::new());
        store.navigate_active("openai.com");
        let active = store.open_tab(Some("https://youtu.be/dQw4w9WgXcQ"));
        store.open_tab(None);
        store.switch_to(&active);
        without_loading(store.snapshot())
    };

    let db = Database::open(&path).unwrap();
    let persistence = SqlitePersistence::new(db);
    assert_eq!(persistence.load().unwrap(), expected);

    let store = TabStore::restore(persistence, RoutingPolicy::new());
    assert_eq!(store.list_tabs().len(), 3);
    assert_eq!(store.active_tab_id(), expected.active_tab_id);
    assert!(store.list_tabs()[0].is_proxy_active);
    assert_eq!(
        store.active_surface().target_url,
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
}
