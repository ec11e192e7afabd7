use super::common::*;

#[test]
fn orders_by_score_descending() {
    let engine = engine();
    let preferences = preferences();

    let best = listing("best");
    let mut worse = listing("worse");
    worse.rent_price = 3150.0;

    let results = engine.ranked_matches(&preferences, &[worse, best]);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].listing_id.0, "best");
    assert_eq!(results[1].listing_id.0, "worse");
    assert!(results[0].score_percent > results[1].score_percent);
}

#[test]
fn ties_break_by_listing_id_ascending() {
    let engine = engine();
    let preferences = preferences();

    let results = engine.ranked_matches(
        &preferences,
        &[listing("charlie"), listing("alpha"), listing("bravo")],
    );

    let ids: Vec<_> = results
        .iter()
        .map(|result| result.listing_id.0.as_str())
        .collect();
    assert_eq!(ids, ["alpha", "bravo", "charlie"]);
}

#[test]
fn duplicate_listing_ids_collapse_to_one_entry() {
    let engine = engine();
    let preferences = preferences();

    let results = engine.ranked_matches(
        &preferences,
        &[listing("repeat"), listing("repeat"), listing("other")],
    );

    assert_eq!(results.len(), 2);
    assert!(results.iter().any(|result| result.listing_id.0 == "repeat"));
    assert!(results.iter().any(|result| result.listing_id.0 == "other"));
}

#[test]
fn top_limits_the_returned_sequence() {
    let service = service();
    let preferences = preferences();

    let candidates: Vec<_> = (0..8)
        .map(|index| listing(&format!("unit-{index}")))
        .collect();

    let top = service.top(&preferences, &candidates, 3);

    assert_eq!(top.len(), 3);
}
