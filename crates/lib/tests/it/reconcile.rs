//! End-to-end reconciliation scenarios.

use canopy::{
    Key, Value,
    document::{CommentLine, CommentPosition},
    reconcile::{Relocation, Relocations},
    route,
    version::{Automatic, Manual},
};

use crate::helpers::{doc, doc_with_defaults, single_segment_pattern};

#[test]
fn full_upgrade_scenario() {
    // Live document at version 1 with a user value and a user comment
    let mut live = doc_with_defaults(
        "version: '1'\na:\n  old: x\n",
        "version: '2'\na:\n  new: default-x\nb:\n  fresh: 42\n",
    );
    live.root_mut()
        .resolve_mut(&route!["a", "old"])
        .unwrap()
        .comments_mut()
        .group_mut(CommentPosition::BeforeKey)
        .push(CommentLine::line("keep me"));

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let relocations = Relocations::new().with(
        "2",
        vec![Relocation::Move {
            from: route!["a", "old"],
            to: route!["a", "new"],
        }],
    );

    live.reconcile(&versioning, &relocations).unwrap();

    // The user value moved, comment intact
    assert_eq!(live.get_as::<&str>(&route!["a", "new"]), Some("x"));
    let block = live.root().resolve(&route!["a", "new"]).unwrap();
    assert_eq!(
        block.comments().get(CommentPosition::BeforeKey).unwrap()[0].text(),
        "keep me"
    );

    // The old key is gone, the new default is backfilled
    assert!(!live.root().contains(&route!["a", "old"]));
    assert_eq!(live.get_as::<i64>(&route!["b", "fresh"]), Some(42));

    // The version marker now reads the defaults version
    assert_eq!(live.get_as::<&str>(&route!["version"]), Some("2"));
}

#[test]
fn unversioned_live_walks_from_the_first_version() {
    let mut live = doc_with_defaults(
        "old: v\n",
        "version: '3'\nfinal: default\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let relocations = Relocations::new()
        .with(
            "2",
            vec![Relocation::Move {
                from: route!["old"],
                to: route!["mid"],
            }],
        )
        .with(
            "3",
            vec![Relocation::Move {
                from: route!["mid"],
                to: route!["final"],
            }],
        );

    live.reconcile(&versioning, &relocations).unwrap();

    assert_eq!(live.get_as::<&str>(&route!["final"]), Some("v"));
    assert_eq!(live.get_as::<&str>(&route!["version"]), Some("3"));
}

#[test]
fn relocations_within_one_version_run_in_declared_order() {
    let mut live = doc_with_defaults(
        "version: '1'\na: first\nb: second\n",
        "version: '2'\na: 0\nb: 0\n",
    );

    // Swap a and b through a temporary slot vacated mid-step
    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let relocations = Relocations::new().with(
        "2",
        vec![
            Relocation::Move {
                from: route!["a"],
                to: route!["tmp"],
            },
            Relocation::Move {
                from: route!["b"],
                to: route!["a"],
            },
            Relocation::Move {
                from: route!["tmp"],
                to: route!["b"],
            },
        ],
    );

    live.reconcile(&versioning, &relocations).unwrap();

    assert_eq!(live.get_as::<&str>(&route!["a"]), Some("second"));
    assert_eq!(live.get_as::<&str>(&route!["b"]), Some("first"));
    assert!(!live.root().contains(&route!["tmp"]));
}

#[test]
fn absent_relocation_sources_are_noops() {
    let mut live = doc_with_defaults("version: '1'\n", "version: '2'\nx: 1\n");

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let relocations = Relocations::new().with(
        "2",
        vec![Relocation::Move {
            from: route!["never", "existed"],
            to: route!["anywhere"],
        }],
    );

    live.reconcile(&versioning, &relocations).unwrap();
    assert_eq!(live.get_as::<i64>(&route!["x"]), Some(1));
}

#[test]
fn equal_versions_skip_relocations_but_still_merge() {
    let mut live = doc_with_defaults(
        "version: '2'\nkeep: mine\n",
        "version: '2'\nkeep: theirs\nnew: 5\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    // A relocation registered at the current version must not fire
    let relocations = Relocations::new().with(
        "2",
        vec![Relocation::Remove {
            route: route!["keep"],
        }],
    );

    live.reconcile(&versioning, &relocations).unwrap();

    assert_eq!(live.get_as::<&str>(&route!["keep"]), Some("mine"));
    assert_eq!(live.get_as::<i64>(&route!["new"]), Some(5));
}

#[test]
fn merge_drops_keys_absent_from_the_schema() {
    let mut live = doc_with_defaults(
        "version: '1'\nobsolete: gone\nkeep: mine\n",
        "version: '1'\nkeep: theirs\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    live.reconcile(&versioning, &Relocations::new()).unwrap();

    assert!(!live.root().contains(&route!["obsolete"]));
    assert_eq!(live.get_as::<&str>(&route!["keep"]), Some("mine"));
}

#[test]
fn merge_orders_keys_like_the_schema() {
    let mut live = doc_with_defaults(
        "version: '1'\nz: 1\na: 2\n",
        "version: '1'\na: 0\nm: 3\nz: 0\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    live.reconcile(&versioning, &Relocations::new()).unwrap();

    let keys: Vec<Key> = live.root().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            Key::from("version"),
            Key::from("a"),
            Key::from("m"),
            Key::from("z")
        ]
    );
    assert_eq!(live.get_as::<i64>(&route!["a"]), Some(2));
    assert_eq!(live.get_as::<i64>(&route!["m"]), Some(3));
    assert_eq!(live.get_as::<i64>(&route!["z"]), Some(1));
}

#[test]
fn merge_resolves_shape_conflicts_towards_the_schema() {
    let mut live = doc_with_defaults(
        "version: '1'\ngroup: scalar\nflat:\n  nested: 1\n",
        "version: '1'\ngroup:\n  x: 1\nflat: plain\n",
    );
    live.root_mut()
        .resolve_mut(&route!["group"])
        .unwrap()
        .comments_mut()
        .group_mut(CommentPosition::BeforeKey)
        .push(CommentLine::line("mine"));

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    live.reconcile(&versioning, &Relocations::new()).unwrap();

    // Terminal under a schema section becomes the schema section
    assert_eq!(live.get_as::<i64>(&route!["group", "x"]), Some(1));
    // Section under a schema terminal becomes the schema terminal
    assert_eq!(live.get_as::<&str>(&route!["flat"]), Some("plain"));
    // The live block's comments survived the replacement
    let block = live.root().resolve(&route!["group"]).unwrap();
    assert_eq!(
        block.comments().get(CommentPosition::BeforeKey).unwrap()[0].text(),
        "mine"
    );
}

#[test]
fn downgrade_applies_no_relocations_but_merges() {
    let mut live = doc_with_defaults(
        "version: '3'\nvalue: mine\n",
        "version: '2'\nvalue: theirs\nadded: 1\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let relocations = Relocations::new().with(
        "3",
        vec![Relocation::Remove {
            route: route!["value"],
        }],
    );

    live.reconcile(&versioning, &relocations).unwrap();

    assert_eq!(live.get_as::<&str>(&route!["value"]), Some("mine"));
    assert_eq!(live.get_as::<i64>(&route!["added"]), Some(1));
    assert_eq!(live.get_as::<&str>(&route!["version"]), Some("2"));
}

#[test]
fn manual_strategy_does_not_stamp_a_marker() {
    let pattern = single_segment_pattern();
    let mut live = doc_with_defaults("mine: 1\n", "theirs: 2\n");

    let versioning = Manual::new(
        Some(pattern.parse("1").unwrap()),
        pattern.parse("2").unwrap(),
    )
    .unwrap();

    live.reconcile(&versioning, &Relocations::new()).unwrap();

    assert_eq!(live.get_as::<i64>(&route!["theirs"]), Some(2));
    // No version marker appears anywhere in the live tree
    assert!(!live.root().contains(&route!["version"]));
}

#[test]
fn reconcile_without_defaults_is_an_error() {
    let mut live = doc("a: 1\n");
    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let err = live.reconcile(&versioning, &Relocations::new()).unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn missing_defaults_marker_is_a_hard_error() {
    let mut live = doc_with_defaults("a: 1\n", "no-version-here: true\n");
    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    let err = live.reconcile(&versioning, &Relocations::new()).unwrap_err();
    assert!(err.is_malformed_schema());
}

#[test]
fn overlay_becomes_redundant_after_reconciliation() {
    let mut live = doc_with_defaults(
        "version: '1'\n",
        "version: '2'\ndeep:\n  value: 7\n",
    );

    let versioning = Automatic::new(single_segment_pattern(), route!["version"]);
    live.reconcile(&versioning, &Relocations::new()).unwrap();

    // Every schema route now resolves in the live tree itself
    assert_eq!(live.root().get(&route!["deep", "value"]), Some(&Value::Int(7)));
    for route in live.defaults().unwrap().root().routes(true) {
        assert!(live.root().contains(&route), "route {route} not shadowed");
    }
}
