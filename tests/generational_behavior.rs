// ==============================================
// GENERATIONAL CACHE BEHAVIOUR TESTS (integration)
// ==============================================
//
// Exercises the public surface through the prelude, the way a downstream
// crate would use it.

use gencache::prelude::*;

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn capacity_table() {
        let cases = [(1, 2), (2, 2), (3, 4), (7, 8), (100, 100), (101, 102)];
        for (requested, expected) in cases {
            let cache = GenerationalCache::<String, i32>::try_new(requested).unwrap();
            assert_eq!(cache.capacity(), expected, "requested {}", requested);
        }
    }

    #[test]
    fn zero_capacity_reports_invalid_capacity() {
        match GenerationalCache::<String, i32>::try_new(0) {
            Err(ConfigError::InvalidCapacity { requested }) => assert_eq!(requested, 0),
            other => panic!("expected InvalidCapacity, got {:?}", other),
        }
    }
}

// ==============================================
// Generation Lifecycle
// ==============================================

mod lifecycle {
    use super::*;

    fn generation_of(cache: &GenerationalCache<String, i32>, key: i32) -> Option<Generation> {
        cache.peek(key.to_string().as_str()).map(|p| p.generation)
    }

    #[test]
    fn fill_then_promote_one_stale_key() {
        let cache = GenerationalCache::new(100);
        for i in 0..100 {
            assert!(!cache.add(i.to_string(), i), "unexpected eviction at {}", i);
        }

        for i in 0..100 {
            let expected = if i < 50 {
                Generation::Stale
            } else {
                Generation::Fresh
            };
            assert_eq!(generation_of(&cache, i), Some(expected), "key {}", i);
        }

        for i in 50..100 {
            let hit = cache.get(i.to_string().as_str()).unwrap();
            assert_eq!(hit.value, i);
            assert!(!hit.evicted, "fresh read of {} evicted", i);
        }

        let hit = cache.get("25").unwrap();
        assert_eq!(hit.value, 25);
        assert!(hit.evicted);

        for i in 0..100 {
            let expected = match i {
                25 => Some(Generation::Fresh),
                50.. => Some(Generation::Stale),
                _ => None,
            };
            assert_eq!(generation_of(&cache, i), expected, "key {}", i);
        }
        assert_eq!(cache.len(), 51);
    }

    #[test]
    fn untouched_entry_survives_one_rotation_but_not_two() {
        let cache = GenerationalCache::new(4);
        cache.add("victim".to_string(), 0);
        cache.add("a".to_string(), 1);

        cache.add("b".to_string(), 2); // rotation 1: victim demoted
        assert!(cache.peek("victim").unwrap().is_stale());

        cache.add("c".to_string(), 3);
        cache.add("d".to_string(), 4); // rotation 2: victim discarded
        assert!(cache.peek("victim").is_none());
    }

    #[test]
    fn touched_stale_entry_outlives_rotation() {
        let cache = GenerationalCache::new(4);
        cache.add("keeper".to_string(), 0);
        cache.add("a".to_string(), 1);
        cache.add("b".to_string(), 2); // keeper demoted

        assert!(cache.get("keeper").is_some()); // promoted
        cache.add("c".to_string(), 3); // rotation: keeper demoted again, kept
        assert!(cache.peek("keeper").unwrap().is_stale());
        assert!(cache.peek("a").is_none());
    }

    #[test]
    fn purge_forgets_everything() {
        let cache = GenerationalCache::new(10);
        for i in 0..10 {
            cache.add(i.to_string(), i);
        }
        cache.purge();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 10);
        for i in 0..10 {
            assert_eq!(generation_of(&cache, i), None);
        }
    }
}

// ==============================================
// Generic Usage
// ==============================================

mod generic_usage {
    use super::*;

    fn memoize<C>(cache: &C, n: u64) -> (u64, bool)
    where
        C: GenerationalCacheTrait<u64, u64> + ConcurrentCache,
    {
        let populated = cache.get_or_create(n, || (1..=n).product());
        (populated.value, populated.created)
    }

    #[test]
    fn memoizes_through_trait_bound() {
        let cache = GenerationalCache::new(8);
        assert_eq!(memoize(&cache, 5), (120, true));
        assert_eq!(memoize(&cache, 5), (120, false));
        assert!(GenerationalCacheTrait::contains(&cache, &5));
    }

    #[test]
    fn repeated_add_is_idempotent_for_len() {
        let cache: GenerationalCache<u64, u64> = GenerationalCache::new(4);
        for _ in 0..3 {
            GenerationalCacheTrait::add(&cache, 1, 1);
            GenerationalCacheTrait::add(&cache, 2, 2);
            assert_eq!(GenerationalCacheTrait::len(&cache), 2);
        }
    }
}
