//! Defaults overlay reads and aggregate unions.

use canopy::{Document, DocumentSettings, Key, KeyMode, Value, route};

use crate::helpers::{doc, doc_with_defaults};

#[test]
fn absent_routes_fall_back_to_defaults() {
    let live = doc_with_defaults("a: 1\n", "a: 99\nb:\n  c: fallback\n");

    // Live value wins where present
    assert_eq!(live.get_as::<i64>(&route!["a"]), Some(1));
    // Absent in live, present in defaults
    assert_eq!(live.get_as::<&str>(&route!["b", "c"]), Some("fallback"));
    assert!(live.contains(&route!["b", "c"]));
}

#[test]
fn set_shadows_defaults() {
    let mut live = doc_with_defaults("", "p: default\n");
    assert_eq!(live.get_as::<&str>(&route!["p"]), Some("default"));

    live.set(&route!["p"], "mine").unwrap();
    assert_eq!(live.get_as::<&str>(&route!["p"]), Some("mine"));
}

#[test]
fn uncoercible_live_values_fall_back() {
    let live = doc_with_defaults("port: not-a-number\n", "port: 8080\n");

    // The live string exists but cannot coerce to an integer
    assert_eq!(live.get_as::<i64>(&route!["port"]), Some(8080));
    assert_eq!(live.get_as::<&str>(&route!["port"]), Some("not-a-number"));
}

#[test]
fn overlay_recurses_through_the_chain() {
    let mut middle = doc("b: from-middle\n");
    middle.set_defaults(doc("c: from-bottom\n")).unwrap();
    let mut live = doc("a: from-live\n");
    live.set_defaults(middle).unwrap();

    assert_eq!(live.get_as::<&str>(&route!["a"]), Some("from-live"));
    assert_eq!(live.get_as::<&str>(&route!["b"]), Some("from-middle"));
    assert_eq!(live.get_as::<&str>(&route!["c"]), Some("from-bottom"));
}

#[test]
fn disabling_use_defaults_turns_the_overlay_off() {
    let settings = DocumentSettings::default().with_use_defaults(false);
    let mut live = Document::with_settings(settings);
    live.set_defaults(doc("hidden: 1\n")).unwrap();

    assert_eq!(live.get(&route!["hidden"]), None);
    assert!(!live.contains(&route!["hidden"]));
}

#[test]
fn aggregate_reads_union_both_sides() {
    let live = doc_with_defaults("a: 1\nshared: live\n", "shared: default\nz: 9\n");

    let keys = live.keys();
    assert_eq!(
        keys,
        vec![Key::from("a"), Key::from("shared"), Key::from("z")]
    );

    let routes = live.routes(true);
    assert!(routes.contains(&route!["a"]));
    assert!(routes.contains(&route!["z"]));
    // The shared key appears once, not twice
    assert_eq!(routes.iter().filter(|r| **r == route!["shared"]).count(), 1);

    let values = live.route_mapped_values(true);
    assert_eq!(values.get(&route!["shared"]), Some(&&Value::from("live")));
    assert_eq!(values.get(&route!["z"]), Some(&&Value::Int(9)));
}

#[test]
fn deep_aggregate_reads_include_nested_defaults() {
    let live = doc_with_defaults("top: 1\n", "nested:\n  deep:\n    leaf: 42\n");

    let values = live.route_mapped_values(true);
    assert_eq!(
        values.get(&route!["nested", "deep", "leaf"]),
        Some(&&Value::Int(42))
    );

    let shallow = live.routes(false);
    assert_eq!(shallow, vec![route!["top"], route!["nested"]]);
}

#[test]
fn sections_fall_back_too() {
    let live = doc_with_defaults("", "group:\n  x: 1\n");
    let section = live.get_section(&route!["group"]).unwrap();
    assert_eq!(section.get(&route!["x"]), Some(&Value::Int(1)));
}

#[test]
fn defaults_counterpart_is_resolved_structurally() {
    let live = doc_with_defaults("group:\n  x: live\n", "group:\n  x: default\n  y: 2\n");

    let counterpart = live.defaults_section(&route!["group"]).unwrap();
    assert_eq!(counterpart.get(&route!["y"]), Some(&Value::Int(2)));
    assert_eq!(counterpart.route(), &route!["group"]);
}

#[test]
fn key_mode_mismatch_is_rejected_at_attachment() {
    let mut live = Document::new();
    let defaults =
        Document::with_settings(DocumentSettings::default().with_key_mode(KeyMode::Object));
    let err = live.set_defaults(defaults).unwrap_err();
    assert!(err.is_invalid_argument());
}
