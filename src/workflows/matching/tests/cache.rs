use super::common::*;
use crate::workflows::matching::cache::CacheKey;

#[test]
fn repeated_calls_reuse_the_cached_ranking() {
    let service = service();
    let preferences = preferences();
    let candidates = vec![listing("a"), listing("b")];

    let first = service.ranked_matches(&preferences, &candidates);
    assert_eq!(service.cache().len(), 1);

    let second = service.ranked_matches(&preferences, &candidates);
    assert_eq!(service.cache().len(), 1);
    assert_eq!(first.as_ref(), second.as_ref());
}

#[test]
fn cache_hits_match_fresh_recomputation() {
    let service = service();
    let preferences = preferences();
    let candidates = vec![listing("a"), listing("b"), listing("c")];

    let cached = service.ranked_matches(&preferences, &candidates);
    let fresh = service.engine().ranked_matches(&preferences, &candidates);

    assert_eq!(cached.as_ref(), fresh.as_slice());
}

#[test]
fn preference_mutation_invalidates_the_key() {
    let preferences = preferences();
    let candidates = vec![listing("a")];

    let original = CacheKey::new(&preferences, &candidates);

    let mut updated = preferences.clone();
    updated.max_rent_budget = Some(3100.0);

    assert_ne!(original, CacheKey::new(&updated, &candidates));
}

#[test]
fn listing_mutation_invalidates_the_key() {
    let preferences = preferences();
    let candidates = vec![listing("a"), listing("b")];

    let original = CacheKey::new(&preferences, &candidates);

    let mut updated = candidates.clone();
    updated[1].rent_price += 25.0;

    assert_ne!(original, CacheKey::new(&preferences, &updated));
}

#[test]
fn distinct_profiles_occupy_distinct_entries() {
    let service = service();
    let candidates = vec![listing("a")];

    let first_profile = preferences();
    let mut second_profile = preferences();
    second_profile.min_bathrooms = 2.0;

    service.ranked_matches(&first_profile, &candidates);
    service.ranked_matches(&second_profile, &candidates);

    assert_eq!(service.cache().len(), 2);
}

#[test]
fn clear_empties_the_store() {
    let service = service();
    let preferences = preferences();
    let candidates = vec![listing("a")];

    service.ranked_matches(&preferences, &candidates);
    assert!(!service.cache().is_empty());

    service.cache().clear();
    assert!(service.cache().is_empty());
}
