//! Pattern/Version ordering and the versioning strategies.

use canopy::{
    route,
    version::{Automatic, Manual, Versioning},
};

use crate::helpers::{doc, two_digit_pattern};

#[test]
fn ordering_and_advance() {
    let pattern = two_digit_pattern();
    let before = pattern.parse("1.9").unwrap();
    let after = before.next().unwrap();

    assert_eq!(after.to_string(), "2.0");
    assert!(before < after);
}

#[test]
fn advance_enumerates_every_version() {
    let pattern = two_digit_pattern();
    let mut cursor = pattern.first();
    let mut seen = vec![cursor.as_id()];
    for _ in 0..12 {
        cursor = cursor.next().unwrap();
        seen.push(cursor.as_id());
    }
    assert_eq!(seen[..4], ["0.0", "0.1", "0.2", "0.3"]);
    assert_eq!(seen[10..], ["1.0", "1.1", "1.2"]);
}

#[test]
fn overflow_is_surfaced_not_clamped() {
    let pattern = two_digit_pattern();
    let err = pattern.parse("9.9").unwrap().next().unwrap_err();
    assert!(err.is_malformed_schema());
}

#[test]
fn manual_strategy_is_content_independent() {
    let pattern = two_digit_pattern();
    let strategy = Manual::new(
        Some(pattern.parse("1.0").unwrap()),
        pattern.parse("2.0").unwrap(),
    )
    .unwrap();

    let document = doc("version: 5.5\n");
    assert_eq!(
        strategy.document_version(&document).unwrap().unwrap().as_id(),
        "1.0"
    );
    assert_eq!(strategy.defaults_version(&document).unwrap().as_id(), "2.0");
    assert_eq!(strategy.first_version().as_id(), "0.0");
}

#[test]
fn automatic_strategy_reads_on_demand() {
    let strategy = Automatic::new(two_digit_pattern(), route!["config", "version"]);

    let mut document = doc("config:\n  version: '1.2'\n");
    assert_eq!(
        strategy.document_version(&document).unwrap().unwrap().as_id(),
        "1.2"
    );

    // Dynamic: a later read sees the updated marker
    document.set(&route!["config", "version"], "1.3").unwrap();
    assert_eq!(
        strategy.document_version(&document).unwrap().unwrap().as_id(),
        "1.3"
    );
}

#[test]
fn automatic_strategy_fails_fast_on_malformed_markers() {
    let strategy = Automatic::new(two_digit_pattern(), route!["version"]);

    let document = doc("version: 'not-a-version'\n");
    let err = strategy.document_version(&document).unwrap_err();
    assert!(err.is_malformed_schema());

    let defaults = doc("other: 1\n");
    let err = strategy.defaults_version(&defaults).unwrap_err();
    assert!(err.is_malformed_schema());
}
