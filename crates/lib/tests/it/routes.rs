//! Route parsing, composition, and round-trips.

use canopy::{Document, DocumentSettings, Key, Route, route};

#[test]
fn round_trip_through_string_form() {
    let routes = [
        route!["a"],
        route!["a", "b", "c"],
        route!["config", "server", "port"],
    ];
    for original in routes {
        let text = original.join('.');
        assert_eq!(Route::parse(&text, '.'), original, "route {text}");
    }
}

#[test]
fn separator_bearing_keys_need_component_form() {
    // "a.b" as a single key is not representable in string form with '.'
    let component_form = route!["a.b", "c"];
    let reparsed = Route::parse(&component_form.join('.'), '.');
    assert_ne!(reparsed, component_form);
    assert_eq!(reparsed, route!["a", "b", "c"]);

    // With a different separator the same key round-trips fine
    let text = component_form.join('/');
    assert_eq!(Route::parse(&text, '/'), component_form);
}

#[test]
fn document_parses_routes_with_its_separator() {
    let settings = DocumentSettings::default().with_route_separator('/');
    let mut document = Document::with_settings(settings);
    document.set(&route!["a", "b"], 1).unwrap();

    let parsed = document.parse_route("a/b");
    assert_eq!(document.get_as::<i64>(&parsed), Some(1));

    // '.' is an ordinary key character for this document
    let dotted = document.parse_route("a.b");
    assert_eq!(dotted.len(), 1);
    assert_eq!(dotted.name(), Some(&Key::from("a.b")));
}

#[test]
fn composition() {
    let base = route!["user"];
    let leaf = base.child("profile").child("name");
    assert_eq!(leaf.join('.'), "user.profile.name");
    assert_eq!(leaf.parent().unwrap(), route!["user", "profile"]);
    assert_eq!(leaf.name(), Some(&Key::from("name")));
    assert_eq!(leaf.len(), 3);
}

#[test]
fn typed_components_survive_in_object_mode() {
    let settings = DocumentSettings::default().with_key_mode(canopy::KeyMode::Object);
    let mut document = Document::with_settings(settings);
    document.set(&route!["servers", 3], "third").unwrap();

    assert_eq!(document.get_as::<&str>(&route!["servers", 3]), Some("third"));
    // The string form addresses a different key in object mode
    assert_eq!(document.get(&route!["servers", "3"]), None);
}

#[test]
fn string_mode_coerces_typed_components() {
    let mut document = Document::new();
    document.set(&route!["servers", 3], "third").unwrap();

    // Typed and string forms collapse onto the same key
    assert_eq!(document.get_as::<&str>(&route!["servers", "3"]), Some("third"));
}
