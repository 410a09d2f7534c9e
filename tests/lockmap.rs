use std::collections::{BTreeSet, HashMap};

use lockcoll::LockMap;

proptest::proptest! {
    #[test]
    fn lockmap_get_consistent(values: BTreeSet<u8>, key: u8) {
        let hash_map = HashMap::<u8, u8>::from_iter(values.iter().cloned().map(|v| (v, v)));
        let lock_map = LockMap::<u8, u8>::from_iter(values.iter().cloned().map(|v| (v, v)));

        assert_eq!(hash_map.get(&key).cloned(), lock_map.get(&key));
        assert_eq!(hash_map.contains_key(&key), lock_map.contains_key(&key));
        assert_eq!(hash_map.len(), lock_map.len());
    }

    #[test]
    fn lockmap_remove_consistent(values in proptest::collection::btree_set(proptest::arbitrary::any::<u8>(), 1..256), indices: Vec<proptest::sample::Index>) {
        let mut hash_map = HashMap::<String, String>::from_iter(values.iter().map(|v| (v.to_string(), v.to_string())));
        let lock_map = LockMap::<String, String>::from_iter(values.iter().map(|v| (v.to_string(), v.to_string())));

        for index in indices {
            let index = index.index(values.len());
            let key = values.iter().nth(index).unwrap().to_string();

            assert_eq!(hash_map.remove(&key), lock_map.remove(key.as_str()));
            assert_eq!(lock_map.get(key.as_str()), None);

            let mut expected: Vec<_> = hash_map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            expected.sort();
            let mut found: Vec<_> = lock_map.iter().collect();
            found.sort();
            assert_eq!(expected, found);
        }

        // The head of the iteration order is the oldest surviving insertion,
        // and insertion here followed the ascending set order.
        let expected_first = values
            .iter()
            .find(|v| hash_map.contains_key(&v.to_string()))
            .map(|v| (v.to_string(), v.to_string()));
        assert_eq!(lock_map.first(), expected_first);
    }

    #[test]
    fn lockmap_iteration_follows_insertion(values in proptest::collection::vec(proptest::arbitrary::any::<u8>(), 0..256)) {
        let lock_map: LockMap<u8, usize> = LockMap::new();
        let mut expected_order: Vec<u8> = Vec::new();

        for (n, v) in values.iter().enumerate() {
            if lock_map.insert(*v, n).is_none() {
                expected_order.push(*v);
            }
        }

        // Re-inserting a key updates in place, it never moves the key.
        assert_eq!(lock_map.keys().collect::<Vec<_>>(), expected_order);
    }

    #[test]
    fn lockmap_sort_matches_stable_model(values in proptest::collection::vec(proptest::arbitrary::any::<u16>(), 0..128)) {
        let lock_map: LockMap<usize, u16> =
            LockMap::with_ordering(|a: &u16, b: &u16, reverse| if reverse { a > b } else { a < b });
        let mut model: Vec<(usize, u16)> = Vec::new();
        for (i, v) in values.iter().enumerate() {
            lock_map.insert(i, *v);
            model.push((i, *v));
        }

        lock_map.sort(false);
        let mut ascending = model.clone();
        ascending.sort_by(|x, y| x.1.cmp(&y.1));
        assert!(lock_map.iter().eq(ascending.iter().cloned()));

        lock_map.sort(true);
        let mut descending = model;
        descending.sort_by(|x, y| y.1.cmp(&x.1));
        assert!(lock_map.iter().eq(descending.iter().cloned()));
    }
}

// Ties must keep their existing relative order across a sort.
#[test]
fn lockmap_sort_stable_on_ties() {
    let map: LockMap<&str, u8> =
        LockMap::with_ordering(|a: &u8, b: &u8, reverse| if reverse { a > b } else { a < b });
    map.extend([("a", 2), ("b", 1), ("c", 2), ("d", 1)]);

    map.sort(false);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "d", "a", "c"]);

    map.sort(true);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c", "b", "d"]);
}

// Writers on disjoint key ranges must each observe exactly the state their
// own operations produced, and the final map must be the union.
#[test]
fn lockmap_concurrent_disjoint_writers() {
    use rand::Rng;

    let map: LockMap<usize, usize> = LockMap::new();
    let mut models: Vec<HashMap<usize, usize>> = Vec::new();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let map = &map;
                scope.spawn(move || {
                    let mut rng = rand::rng();
                    let mut model: HashMap<usize, usize> = HashMap::new();
                    for n in 0..1000 {
                        let k = t * 1000 + rng.random_range(0..1000);
                        match rng.random_range(0..3) {
                            0 => assert_eq!(map.insert(k, n), model.insert(k, n)),
                            1 => assert_eq!(map.remove(&k), model.remove(&k)),
                            _ => assert_eq!(map.get(&k), model.get(&k).cloned()),
                        }
                    }
                    model
                })
            })
            .collect();
        for handle in handles {
            models.push(handle.join().unwrap());
        }
    });

    let mut expected_len = 0;
    for model in &models {
        expected_len += model.len();
        for (k, v) in model {
            assert_eq!(map.get(k), Some(*v));
        }
    }
    assert_eq!(map.len(), expected_len);
}
