//! Example demonstrating the generational cache.
//!
//! Entries live in a "fresh" generation until it fills up; then the whole
//! generation is demoted to "stale" and the previous stale generation is
//! dropped. Reading a stale entry promotes it back to fresh.
//!
//! Run with: cargo run --example basic_generational

use gencache::policy::generational::GenerationalCache;

fn main() {
    println!("=== Generational Cache Example ===\n");

    // Capacity 6: three entries per generation.
    let cache = GenerationalCache::new(6);
    println!("Created cache: capacity={}\n", cache.capacity());

    for i in 1..=3 {
        cache.add(i, format!("value-{}", i));
    }
    println!("Inserted keys 1-3 (fresh generation is now full)");
    println!("  fresh={}, stale={}", cache.fresh_len(), cache.stale_len());

    let evicted = cache.add(4, "value-4".to_string());
    println!("\nInserted key 4 -> rotation, evicted={}", evicted);
    println!("  fresh={}, stale={}", cache.fresh_len(), cache.stale_len());

    // Promote key 1 before the next rotation drops the stale generation.
    if let Some(hit) = cache.get(&1) {
        println!("\nRead key 1 from stale: {} (evicted={})", hit.value, hit.evicted);
    }

    cache.add(5, "value-5".to_string());
    let evicted = cache.add(6, "value-6".to_string());
    println!("Inserted keys 5, 6 -> rotation, evicted={}", evicted);

    for key in 1..=6 {
        match cache.peek(&key) {
            Some(peeked) => println!("  key {}: {:?}", key, peeked.generation),
            None => println!("  key {}: evicted", key),
        }
    }

    println!("\n=== Get-or-create ===\n");
    let first = cache.get_or_create(42, || "computed".to_string());
    let second = cache.get_or_create(42, || unreachable!("already cached"));
    println!("first:  created={}", first.created);
    println!("second: created={} value={}", second.created, second.value);
}

// Expected output:
// === Generational Cache Example ===
//
// Created cache: capacity=6
//
// Inserted keys 1-3 (fresh generation is now full)
//   fresh=3, stale=0
//
// Inserted key 4 -> rotation, evicted=false
//   fresh=1, stale=3
//
// Read key 1 from stale: value-1 (evicted=false)
// Inserted keys 5, 6 -> rotation, evicted=true
//   key 1: Stale
//   key 2: evicted
//   key 3: evicted
//   key 4: Stale
//   key 5: Stale
//   key 6: Fresh
//
// === Get-or-create ===
//
// first:  created=true
// second: created=false value=computed
