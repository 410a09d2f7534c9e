use lockcoll::{LockVec, OutOfBounds};

proptest::proptest! {
    #[test]
    fn lockvec_get_consistent(values: Vec<u8>, index in 0usize..512) {
        let model = values.clone();
        let lock_vec = LockVec::<u8>::from_iter(values);

        assert_eq!(lock_vec.get(index).ok(), model.get(index).cloned());
        if index >= model.len() {
            let err = lock_vec.get(index).unwrap_err();
            assert_eq!(err.index, index);
            assert_eq!(err.len, model.len());
        }
    }

    #[test]
    fn lockvec_ops_consistent(values: Vec<u8>, ops in proptest::collection::vec(proptest::arbitrary::any::<(u8, u8)>(), 0..64)) {
        let mut model = values.clone();
        let lock_vec = LockVec::<u8>::from_iter(values);

        for (op, x) in ops {
            match op % 6 {
                0 => {
                    model.push(x);
                    lock_vec.push(x);
                }
                1 => {
                    let expected = model.iter().position(|e| *e == x).map(|i| model.remove(i));
                    assert_eq!(lock_vec.remove_item(&x), expected);
                }
                2 => {
                    let i = x as usize;
                    let expected = if i < model.len() { Ok(model.remove(i)) } else { Err(()) };
                    assert_eq!(lock_vec.remove(i).map_err(|_| ()), expected);
                }
                3 => {
                    let i = x as usize;
                    let expected = if i < model.len() { Ok(model.swap_remove(i)) } else { Err(()) };
                    assert_eq!(lock_vec.swap_remove(i).map_err(|_| ()), expected);
                }
                4 => {
                    assert_eq!(lock_vec.contains(&x), model.contains(&x));
                }
                _ => {
                    let i = x as usize;
                    assert_eq!(lock_vec.get(i).ok(), model.get(i).cloned());
                }
            }
            assert_eq!(lock_vec.len(), model.len());
        }

        assert_eq!(lock_vec.to_vec(), model);
        assert!(lock_vec.iter().eq(model.iter().cloned().enumerate()));
    }
}

#[test]
fn lockvec_out_of_bounds_reporting() {
    let vec: LockVec<u8> = LockVec::new();
    let err = vec.get(3).unwrap_err();
    assert_eq!(err, OutOfBounds { index: 3, len: 0 });
    assert_eq!(err.to_string(), "index 3 out of range for length 0");
}

// Concurrent removers each own a disjoint slice of the pre filled values, so
// every remove_item must find its target regardless of interleaving.
#[test]
fn lockvec_concurrent_push_and_remove() {
    let vec: LockVec<usize> = (0..1000).collect();

    std::thread::scope(|scope| {
        for t in 0..4 {
            let vec = &vec;
            scope.spawn(move || {
                for i in 0..500 {
                    vec.push(1000 + t * 500 + i);
                }
            });
        }
        for r in 0..2 {
            let vec = &vec;
            scope.spawn(move || {
                for v in (r * 500)..((r + 1) * 500) {
                    assert_eq!(vec.remove_item(&v), Some(v));
                }
            });
        }
    });

    // Pre filled values all removed, pushed values all present.
    let mut all = vec.to_vec();
    all.sort_unstable();
    assert_eq!(all, (1000..3000).collect::<Vec<_>>());
}
