// Slug translation properties over the full built-in table.
use cssdict::{
    CATEGORY_TABLE, DEFAULT_LABEL, DEFAULT_SLUG, all_slugs, is_valid_slug, label_to_slug,
    slug_to_label,
};
use std::collections::BTreeSet;

#[test]
fn every_label_round_trips() {
    for &(label, _) in CATEGORY_TABLE {
        assert_eq!(slug_to_label(label_to_slug(label)), label);
    }
}

#[test]
fn every_slug_round_trips_and_is_url_safe() {
    for slug in all_slugs() {
        assert!(is_valid_slug(slug), "{slug} is not URL-safe");
        assert_eq!(label_to_slug(slug_to_label(slug)), slug);
    }
}

#[test]
fn unknown_values_degrade_to_defaults() {
    for input in ["", " ", "Layout & Positioning", "레이아웃", "grid "] {
        assert_eq!(label_to_slug(input), DEFAULT_SLUG, "label {input:?}");
        assert_eq!(slug_to_label(input), DEFAULT_LABEL, "slug {input:?}");
    }
}

#[test]
fn slugs_are_distinct_and_complete() {
    let slugs = all_slugs();
    let distinct: BTreeSet<_> = CATEGORY_TABLE.iter().collect();
    assert_eq!(slugs.len(), distinct.len());
    assert_eq!(slugs.iter().collect::<BTreeSet<_>>().len(), slugs.len());
    let declared: Vec<_> = CATEGORY_TABLE.iter().map(|&(_, slug)| slug).collect();
    assert_eq!(slugs, declared);
}
