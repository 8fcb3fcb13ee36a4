//! Uniqueness and key-independence under concurrency

use partmint::{IdentifierAllocator, InMemoryCounterStore};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use crate::{init_tracing, key};

#[test]
fn n_concurrent_allocations_yield_n_distinct_codes() {
    init_tracing();
    let allocator = Arc::new(IdentifierAllocator::new(Arc::new(
        InMemoryCounterStore::new(),
    )));
    let k = key(42, 2024);
    let threads = 8;
    let per_thread = 50;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let allocator = Arc::clone(&allocator);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| allocator.generate_for(&k).unwrap())
                    .collect::<Vec<String>>()
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        for code in handle.join().unwrap() {
            assert!(codes.insert(code.clone()), "duplicate code {}", code);
        }
    }
    assert_eq!(codes.len(), threads * per_thread);
}

#[test]
fn allocator_instances_sharing_a_store_never_collide() {
    // Three instances over one counter table, as three server processes
    // against one database. Each instance has its own in-process lock table;
    // only the store's atomic increment protects them from each other.
    init_tracing();
    let store = Arc::new(InMemoryCounterStore::new());
    let k = key(42, 2024);
    let instances = 3;
    let threads_per_instance = 4;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(instances * threads_per_instance));

    let mut handles = Vec::new();
    for _ in 0..instances {
        let allocator = Arc::new(IdentifierAllocator::new(Arc::clone(&store)));
        for _ in 0..threads_per_instance {
            let allocator = Arc::clone(&allocator);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| allocator.generate_for(&k).unwrap())
                    .collect::<Vec<String>>()
            }));
        }
    }

    let mut codes = HashSet::new();
    for handle in handles {
        for code in handle.join().unwrap() {
            assert!(codes.insert(code.clone()), "duplicate code {}", code);
        }
    }
    assert_eq!(codes.len(), instances * threads_per_instance * per_thread);
}

#[test]
fn sequential_allocations_increase_and_other_keys_are_unaffected() {
    let allocator = Arc::new(IdentifierAllocator::new(Arc::new(
        InMemoryCounterStore::new(),
    )));
    let first = key(42, 2024);
    let second = key(43, 2024);

    // A concurrent stream on the second key runs throughout
    let background = {
        let allocator = Arc::clone(&allocator);
        thread::spawn(move || {
            (0..30)
                .map(|_| allocator.generate_for(&second).unwrap())
                .collect::<Vec<String>>()
        })
    };

    let codes: Vec<String> = (0..3)
        .map(|_| allocator.generate_for(&first).unwrap())
        .collect();
    assert_eq!(codes, vec!["0001", "0002", "0003"]);

    // The second key minted its own uninterrupted sequence: values 1..=30
    let other = background.join().unwrap();
    let expected: Vec<String> = (1..=30)
        .map(|v| partmint::base36::encode_padded(v, 4))
        .collect();
    assert_eq!(other, expected);
}

#[test]
fn same_location_different_years_are_separate_sequences() {
    let allocator = IdentifierAllocator::new(Arc::new(InMemoryCounterStore::new()));
    let this_year = key(42, 2024);
    let next_year = key(42, 2025);

    assert_eq!(allocator.generate_for(&this_year).unwrap(), "0001");
    assert_eq!(allocator.generate_for(&this_year).unwrap(), "0002");
    assert_eq!(allocator.generate_for(&next_year).unwrap(), "0001");
}
