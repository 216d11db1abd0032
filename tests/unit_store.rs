// Unit tests for the known-word store.
//
// Both backends are held to the same contract: load on a fresh store is
// empty, save/list_all round-trips, repeated saves are idempotent at the set
// level, and filter_unknown keeps candidate order.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::thread;

use subscout::config::Config;
use subscout::language::Language;
use subscout::store::{KnownWordStore, StoreRegistry, TextStore};

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn check_contract(store: &dyn KnownWordStore) {
    assert!(store.load().unwrap().is_empty());

    let first = set(&["delta", "alpha", "charlie"]);
    store.save(&first).unwrap();
    let listed = store.list_all().unwrap();
    assert!(first.iter().all(|w| listed.contains(w)));
    assert_eq!(listed, vec!["alpha", "charlie", "delta"]);

    // Overlapping save: set-equal to before plus the one new word
    store.save(&set(&["alpha", "bravo"])).unwrap();
    assert_eq!(store.list_all().unwrap(), vec!["alpha", "bravo", "charlie", "delta"]);

    // Same save again changes nothing
    let before = store.list_all().unwrap();
    store.save(&set(&["alpha", "bravo"])).unwrap();
    assert_eq!(store.list_all().unwrap(), before);

    let candidates = strings(&["zulu", "alpha", "echo", "delta", "foxtrot"]);
    let unknown = store.filter_unknown(&candidates).unwrap();
    assert_eq!(unknown, vec!["zulu", "echo", "foxtrot"]);

    let known: HashSet<String> = store.load().unwrap();
    assert!(unknown.iter().all(|w| !known.contains(w)));
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn text_store_contract() {
    let dir = tempfile::tempdir().unwrap();
    let store = TextStore::new(dir.path(), Language::English);
    check_contract(&store);
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_store_contract() {
    use subscout::store::sqlite::SharedConnection;
    use subscout::store::SqliteStore;

    let dir = tempfile::tempdir().unwrap();
    let conn = SharedConnection::open(&dir.path().join("known.db")).unwrap();
    let store = SqliteStore::new(Arc::new(conn), Language::English);
    check_contract(&store);
}

#[test]
fn text_store_tolerates_duplicate_lines() {
    let dir = tempfile::tempdir().unwrap();
    let store = TextStore::new(dir.path(), Language::English);
    std::fs::write(store.path(), "cat\ncat\n\ndog\ncat\n").unwrap();
    assert_eq!(store.list_all().unwrap(), vec!["cat", "dog"]);
}

#[test]
fn registry_stores_are_per_language() {
    let dir = tempfile::tempdir().unwrap();
    let registry = StoreRegistry::new(Config::with_home(dir.path()));

    registry
        .open(Language::Japanese)
        .unwrap()
        .save(&set(&["猫"]))
        .unwrap();

    assert!(registry.open(Language::English).unwrap().load().unwrap().is_empty());
    assert_eq!(
        registry.open(Language::Japanese).unwrap().list_all().unwrap(),
        vec!["猫"]
    );
    assert!(dir.path().join("known-words.jp.txt").exists());
}

#[test]
fn concurrent_saves_do_not_lose_words() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(StoreRegistry::new(Config::with_home(dir.path())));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let store = registry.open(Language::English).unwrap();
                let words: BTreeSet<String> = (0..20).map(|j| format!("w{i}x{j}")).collect();
                store.save(&words).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = registry.open(Language::English).unwrap();
    assert_eq!(store.count().unwrap(), 160);
}

#[test]
fn separate_registries_on_one_home_do_not_lose_words() {
    // Each thread stands in for its own `subscout finalize` process
    let dir = tempfile::tempdir().unwrap();

    for round in 0..5 {
        let handles: Vec<_> = (0..2)
            .map(|i| {
                let home = dir.path().to_path_buf();
                thread::spawn(move || {
                    let registry = StoreRegistry::new(Config::with_home(&home));
                    let store = registry.open(Language::English).unwrap();
                    let words: BTreeSet<String> =
                        (0..20).map(|j| format!("r{round}t{i}x{j}")).collect();
                    store.save(&words).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = TextStore::new(dir.path(), Language::English);
        assert_eq!(store.count().unwrap(), 40 * (round + 1), "round {round}");
    }
}
