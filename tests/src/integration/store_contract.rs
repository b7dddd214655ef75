//! # Store Contract
//!
//! Properties of the critical data store seen through both the raw
//! [`fe_01_critical_store::AddressedStore`] and the transaction-guarded view
//! a game uses:
//!
//! - never-written addresses read as absent and remove as `false`, every
//!   time, in every section and scope;
//! - swapping two scopes twice restores both, including across commits.

#[cfg(test)]
mod tests {
    use crate::fixtures::file_config;
    use fe_01_critical_store::AddressedStore;
    use fe_02_transaction_coordinator::CriticalStore;
    use fe_03_game_cycle::{Foundation, FoundationConfig};
    use proptest::prelude::*;
    use shared_types::{Address, LifecycleScope, Scope, ScopeKey, Section};
    use std::collections::BTreeMap;

    fn section() -> impl Strategy<Value = Section> {
        (0..Section::COUNT).prop_map(|index| Section::ALL[index])
    }

    fn path() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_./ ]{0,23}"
    }

    fn scope_content() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
        prop::collection::btree_map(path(), prop::collection::vec(any::<u8>(), 0..16), 1..6)
    }

    fn fill(store: &mut AddressedStore, key: ScopeKey, content: &BTreeMap<String, Vec<u8>>) {
        for (path, value) in content {
            let address = Address::new(key.section, key.scope, path.as_str()).unwrap();
            store.write(&address, value.clone());
        }
    }

    proptest! {
        #[test]
        fn prop_absent_address_is_idempotently_absent(
            section in section(),
            scope in any::<u32>(),
            path in path(),
        ) {
            let mut store = AddressedStore::new();
            let address = Address::new(section, Scope(scope), path).unwrap();

            prop_assert_eq!(store.read(&address), None);
            prop_assert!(!store.contains(&address));
            prop_assert!(!store.remove(&address));
            prop_assert!(!store.remove(&address));
            prop_assert!(!store.clear_scope(address.scope_key()));
            prop_assert!(store.manifest(address.scope_key()).is_empty());
            prop_assert_eq!(store.usage(address.scope_key()), 0);
            prop_assert!(store.is_empty());
        }

        #[test]
        fn prop_double_swap_restores_both_scopes(
            a_section in section(),
            a_scope in 0u32..4,
            b_section in section(),
            b_scope in 0u32..4,
            a_content in scope_content(),
            b_content in scope_content(),
        ) {
            let a = ScopeKey::new(a_section, Scope(a_scope));
            let b = ScopeKey::new(b_section, Scope(b_scope));
            prop_assume!(a != b);

            let mut store = AddressedStore::new();
            fill(&mut store, a, &a_content);
            fill(&mut store, b, &b_content);
            let original = store.clone();

            store.swap_scopes(a, b);
            prop_assert_eq!(store.manifest(a), original.manifest(b));
            prop_assert_eq!(store.manifest(b), original.manifest(a));
            prop_assert_eq!(store.usage(a), original.usage(b));

            store.swap_scopes(a, b);
            prop_assert_eq!(store, original);
        }
    }

    #[test]
    fn test_guarded_reads_of_unwritten_addresses_are_absent_everywhere() {
        let mut foundation = Foundation::open(FoundationConfig::memory_only()).unwrap();
        foundation.open_transaction().unwrap();
        let mut store = foundation.critical_store().unwrap();

        for section in Section::ALL {
            for lifecycle in LifecycleScope::ALL {
                let address = Address::new(section, lifecycle, "NeverWritten").unwrap();
                assert_eq!(store.read(&address).unwrap(), None, "{address}");
                assert!(!store.contains(&address).unwrap());
                assert!(!store.remove(&address).unwrap());
                assert!(!store.remove(&address).unwrap());
            }
        }
        let unused = ScopeKey::new(Section::ThemeCriticalData, Scope::index(42));
        assert!(store.manifest(unused).unwrap().is_empty());
        assert_eq!(store.usage(unused).unwrap(), 0);
        assert!(!store.clear_scope(unused).unwrap());
    }

    #[test]
    fn test_swap_involution_survives_commits() {
        let dir = tempfile::tempdir().unwrap();
        let a = ScopeKey::new(Section::CriticalData, LifecycleScope::Theme);
        let b = ScopeKey::new(Section::CriticalData, LifecycleScope::Payvar);
        let theme = Address::new(a.section, a.scope, "Paytable").unwrap();
        let payvar = Address::new(b.section, b.scope, "Multiplier").unwrap();

        {
            let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
            foundation
                .transaction(|f| {
                    let mut store = f.critical_store()?;
                    store.write(&theme, b"reels-5x3".to_vec())?;
                    store.write(&payvar, vec![2])?;
                    store.swap_scopes(a, b)?;
                    Ok(())
                })
                .unwrap();
        }

        let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
        foundation.open_transaction().unwrap();
        {
            let mut store = foundation.critical_store().unwrap();
            let moved_theme = Address::new(b.section, b.scope, "Paytable").unwrap();
            assert_eq!(store.read(&moved_theme).unwrap(), Some(b"reels-5x3".to_vec()));
            assert_eq!(store.read(&theme).unwrap(), None);
            store.swap_scopes(a, b).unwrap();
        }
        foundation.close_transaction().unwrap();
        drop(foundation);

        let mut foundation = Foundation::open(file_config(dir.path())).unwrap();
        foundation.open_transaction().unwrap();
        let store = foundation.critical_store().unwrap();
        assert_eq!(store.read(&theme).unwrap(), Some(b"reels-5x3".to_vec()));
        assert_eq!(store.read(&payvar).unwrap(), Some(vec![2]));
        assert_eq!(store.manifest(a).unwrap().len(), 1);
        assert_eq!(store.manifest(b).unwrap().len(), 1);
    }
}
