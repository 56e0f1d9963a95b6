use std::ops::Bound;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::prelude::random;
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, SeedableRng};

use crate::error::RbtError;
use crate::rb::{Rbt, Traversal};

#[test]
fn test_id() {
    let index: Rbt<i64, i64> = Rbt::new("test-rbt");
    assert_eq!(index.id(), "test-rbt".to_string());
}

#[test]
fn test_len() {
    let index: Rbt<i64, i64> = Rbt::new("test-rbt");
    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
}

#[test]
fn test_create() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    let mut refns = RefNodes::new(10);

    for key in [2, 1, 3, 6, 5, 4, 8, 0, 9, 7].iter().cloned() {
        assert!(index.create(key, 10).is_none());
        refns.create(key, 10);
    }

    assert_eq!(index.len(), 10);
    assert!(index.validate().is_ok());

    // duplicate key is rejected, the pair comes back to the caller.
    assert_eq!(index.create(7, 20), Some((7, 20)));
    assert_eq!(index.len(), 10);
    assert_eq!(index.get(&7), Some(&10));

    // test get
    for key in 0..10 {
        assert_eq!(index.get(&key).cloned(), refns.get(key));
    }
    // test iter
    let (mut iter, mut iter_ref) = (index.iter(), refns.iter());
    loop {
        match (iter.next(), iter_ref.next()) {
            (Some(item), Some(ref_item)) => {
                assert_eq!(*item.0, ref_item.0);
                assert_eq!(*item.1, ref_item.1);
            }
            (None, None) => break,
            (_, _) => panic!("invalid"),
        }
    }
}

#[test]
fn test_set() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    let mut refns = RefNodes::new(10);

    for key in [2, 1, 3, 6, 5, 4, 8, 0, 9, 7].iter().cloned() {
        assert!(index.set(key, 10).is_none());
        refns.set(key, 10);
    }

    assert_eq!(index.len(), 10);
    assert!(index.validate().is_ok());

    // overwrite returns the old value, len is unchanged.
    assert_eq!(index.set(7, 20), Some(10));
    refns.set(7, 20);
    assert_eq!(index.len(), 10);
    assert_eq!(index.get(&7), Some(&20));

    for key in 0..10 {
        assert_eq!(index.get(&key).cloned(), refns.get(key));
    }
}

#[test]
fn test_delete() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    let mut refns = RefNodes::new(11);

    for key in [2, 1, 3, 6, 5, 4, 8, 0, 9, 7].iter().cloned() {
        assert!(index.set(key, 100 + key).is_none());
        refns.set(key, 100 + key);
    }

    // delete a missing node.
    assert!(index.delete(&10).is_none());
    assert!(refns.delete(10).is_none());

    assert_eq!(index.len(), 10);
    assert!(index.validate().is_ok());

    // delete all entries.
    for key in 0..10 {
        assert_eq!(index.delete(&key), refns.delete(key));
        assert!(index.validate().is_ok());
    }
    assert_eq!(index.len(), 0);
    assert!(index.is_empty());
    assert!(index.iter().next().is_none());
}

#[test]
fn test_empty_boundaries() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");

    assert_eq!(index.delete(&1), None);
    assert_eq!(index.get(&1), None);
    assert_eq!(index.min(), None);
    assert_eq!(index.max(), None);
    assert!(!index.contains(&1));
    assert!(index.iter().next().is_none());
    assert!(index.range((Bound::<i64>::Unbounded, Bound::Unbounded)).next().is_none());
    assert!(index.validate().is_ok());
}

#[test]
fn test_min_max() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    for key in [5, 3, 8, 1, 4, 7, 9, 2, 6].iter().cloned() {
        index.set(key, key * 10);
    }
    assert_eq!(index.min(), Some((&1, &10)));
    assert_eq!(index.max(), Some((&9, &90)));
}

#[test]
fn test_load_from() {
    let iter = (0..100).map(|key| (key, key * 2));
    let index: Rbt<i64, i64> = Rbt::load_from("test-rbt", iter).unwrap();
    assert_eq!(index.len(), 100);
    assert!(index.validate().is_ok());

    let iter = vec![(1, 10), (2, 20), (1, 30)].into_iter();
    let res: Result<Rbt<i64, i64>, RbtError<i64>> = Rbt::load_from("test-rbt", iter);
    assert_eq!(res.err(), Some(RbtError::DuplicateKey(1)));
}

#[test]
fn test_clear() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    for key in 0..100 {
        index.set(key, key);
    }
    index.clear();
    assert_eq!(index.len(), 0);
    assert_eq!(index.min(), None);
    assert!(index.validate().is_ok());

    // the index stays usable after clear.
    assert!(index.set(1, 10).is_none());
    assert_eq!(index.get(&1), Some(&10));
}

#[test]
fn test_ordering() {
    let mut keys: Vec<i64> = (1..=1000).collect();
    let mut rng = SmallRng::seed_from_u64(make_seed());
    keys.shuffle(&mut rng);

    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    for key in keys.into_iter() {
        assert!(index.create(key, key).is_none());
    }
    assert!(index.validate().is_ok());

    let keys: Vec<i64> = index.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, (1..=1000).collect::<Vec<i64>>());
}

#[test]
fn test_traverse() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    for key in [5, 3, 8, 1, 4, 7, 9, 2, 6].iter().cloned() {
        assert!(index.create(key, key * 10).is_none());
    }

    let mut inorder: Vec<i64> = vec![];
    index.traverse(Traversal::InOrder, |key, _| inorder.push(*key));
    assert_eq!(inorder, (1..=9).collect::<Vec<i64>>());

    let mut preorder: Vec<(i64, i64)> = vec![];
    index.traverse(Traversal::PreOrder, |key, value| {
        preorder.push((*key, *value));
    });
    assert_eq!(preorder.len(), index.len());

    let mut postorder: Vec<i64> = vec![];
    index.traverse(Traversal::PostOrder, |key, _| postorder.push(*key));
    assert_eq!(postorder.len(), index.len());
    postorder.sort_unstable();
    assert_eq!(postorder, inorder);

    // pre-order is a valid insertion order, it rebuilds the same index.
    let rebuilt: Rbt<i64, i64> =
        Rbt::load_from("rebuilt", preorder.into_iter()).unwrap();
    let a: Vec<(i64, i64)> = rebuilt.iter().map(|(k, v)| (*k, *v)).collect();
    let b: Vec<(i64, i64)> = index.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(a, b);

    // deleting a node with two children must not disturb the order of
    // the remaining entries, nor the subtree under its successor.
    assert_eq!(index.delete(&5), Some(50));
    assert!(index.validate().is_ok());
    let mut inorder: Vec<i64> = vec![];
    index.traverse(Traversal::InOrder, |key, _| inorder.push(*key));
    assert_eq!(inorder, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    assert_eq!(index.get(&6), Some(&60));
}

#[test]
fn test_with_cmp() {
    use compare::{natural, Compare};

    let cmp = natural().rev();
    let mut index: Rbt<i64, i64, _> = Rbt::with_cmp("test-rbt-rev", cmp);
    for key in [2, 1, 3, 6, 5, 4, 8, 0, 9, 7].iter().cloned() {
        assert!(index.create(key, key).is_none());
    }
    assert!(index.validate().is_ok());

    let keys: Vec<i64> = index.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, (0..10).rev().collect::<Vec<i64>>());

    // min and max are in comparator order, not natural order.
    assert_eq!(index.min(), Some((&9, &9)));
    assert_eq!(index.max(), Some((&0, &0)));
}

#[test]
fn test_random() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    let mut rng = SmallRng::seed_from_u64(make_seed());

    assert_eq!(index.random(&mut rng), None);

    assert!(index.create(0, 0).is_none());
    assert_eq!(index.random(&mut rng), Some((&0, &0)));

    for key in 1..10_000 {
        assert!(index.set(key, key * 10).is_none());
    }
    for _i in 0..100_000 {
        let (key, value) = index.random(&mut rng).unwrap();
        assert!(*key >= 0 && *key < 10_000);
        assert_eq!(*value, *key * 10);
    }
}

#[test]
fn test_crud() {
    let size = 500;
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    let mut refns = RefNodes::new(size);

    for _ in 0..20_000 {
        let key: i64 = (random::<i64>() % (size as i64)).abs();
        let value: i64 = random();
        match (random::<i64>() % 4).abs() {
            0 => {
                let ok1 = index.get(&key).is_none();
                let ok2 = index.create(key, value).is_none();
                refns.create(key, value);
                assert_eq!(ok1, ok2);
            }
            1 => {
                let val = index.set(key, value);
                let refval = refns.set(key, value);
                assert_eq!(val, refval);
            }
            2 => {
                let val = index.delete(&key);
                let refval = refns.delete(key);
                assert_eq!(val, refval);
            }
            3 => {
                let val = index.get(&key).cloned();
                let refval = refns.get(key);
                assert_eq!(val, refval);
            }
            op => panic!("unreachable {}", op),
        };

        assert!(index.validate().is_ok());
    }

    // test iter
    let (mut iter, mut iter_ref) = (index.iter(), refns.iter());
    loop {
        match (iter.next(), iter_ref.next()) {
            (Some(item), Some(ref_item)) => {
                assert_eq!(*item.0, ref_item.0);
                assert_eq!(*item.1, ref_item.1);
            }
            (None, None) => break,
            (_, _) => panic!("invalid"),
        }
    }

    // ranges and reverses
    for _ in 0..2_000 {
        let (low, high) = random_low_high(size);

        let mut iter = index.range((low, high));
        let mut iter_ref = refns.range(low, high);
        loop {
            match (iter.next(), iter_ref.next()) {
                (Some(item), Some(ref_item)) => {
                    assert_eq!(*item.0, ref_item.0);
                    assert_eq!(*item.1, ref_item.1);
                }
                (None, None) => break,
                (Some(item), None) => panic!("invalid item: {:?}", item),
                (None, Some(ref_item)) => panic!("invalid none: {:?}", ref_item),
            }
        }

        let mut iter = index.range((low, high)).rev();
        let mut iter_ref = refns.reverse(low, high);
        loop {
            match (iter.next(), iter_ref.next()) {
                (Some(item), Some(ref_item)) => {
                    assert_eq!(*item.0, ref_item.0);
                    assert_eq!(*item.1, ref_item.1);
                }
                (None, None) => break,
                (_, _) => panic!("invalid"),
            }
        }
    }
}

#[test]
fn test_churn() {
    let mut keys: Vec<i64> = (0..100).collect();
    let mut rng = SmallRng::seed_from_u64(make_seed());
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");

    for _round in 0..1_000 {
        keys.shuffle(&mut rng);
        for key in keys.iter().cloned() {
            assert!(index.create(key, key).is_none());
        }
        let stats = index.validate().expect("balanced after inserts");
        assert_eq!(stats.entries(), 100);
        assert!(stats.blacks().is_some());

        keys.shuffle(&mut rng);
        for key in keys.iter() {
            assert_eq!(index.delete(key), Some(*key));
        }
        assert!(index.validate().is_ok());
        assert_eq!(index.len(), 0);
    }
    assert!(index.is_empty());
}

#[test]
fn test_stats() {
    let mut index: Rbt<i64, i64> = Rbt::new("test-rbt");
    for key in 0..1_000 {
        index.set(key, key);
    }

    let stats = index.stats();
    assert_eq!(stats.entries(), 1_000);
    assert!(stats.blacks().is_none());

    let stats = index.validate().unwrap();
    assert_eq!(stats.entries(), 1_000);
    assert!(stats.blacks().unwrap() > 0);
    let depths = stats.depths().unwrap();
    assert!(depths.samples() == 1_001);
    assert!(depths.max() <= 2 * 10 + 1); // 2*log2(n)+1 height bound
}

fn make_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

include!("./ref_test.rs");
