//! Tests for path helpers and location construction
//!
//! Exercises the public `path` module and `create_location` the way a host
//! building its own hrefs would.

use memory_history::path::*;
use memory_history::{create_location, Location, LocationDescriptor};

#[test]
fn test_leading_slash_added_once() {
    assert_eq!(add_leading_slash("dashboard"), "/dashboard");
    assert_eq!(add_leading_slash("/dashboard"), "/dashboard");
    assert_eq!(add_leading_slash(""), "/");
}

#[test]
fn test_strip_single_slashes() {
    assert_eq!(strip_leading_slash("/users/profile"), "users/profile");
    assert_eq!(strip_leading_slash("users"), "users");
    assert_eq!(strip_trailing_slash("/users/profile/"), "/users/profile");
    assert_eq!(strip_trailing_slash("/users//"), "/users/");
}

#[test]
fn test_basename_case_insensitive() {
    assert_eq!(strip_basename("/App/users", "/app"), "/users");
    assert_eq!(strip_basename("/APP?x=1", "/app"), "?x=1");
}

#[test]
fn test_parse_then_create_reproduces_path() {
    for path in ["/", "/a", "/a/b?q=1", "/a#frag", "/a/b?q=1#frag", "/users/:id"] {
        let parts = parse_path(path);
        assert_eq!(create_path(&parts.pathname, &parts.search, &parts.hash), path);
    }
}

#[test]
fn test_location_path_round_trip() {
    let location: Location = create_location("/a/b?q=1#frag".into(), None, None, None);
    assert_eq!(location.path(), "/a/b?q=1#frag");
}

#[test]
fn test_descriptor_with_parameters() {
    let descriptor: LocationDescriptor = "/users/:id?edit".into();
    assert_eq!(descriptor.pathname, "/users/:id");
    assert_eq!(descriptor.search, "?edit");
}

#[test]
fn test_relative_navigation_chain() {
    let start: Location = create_location("/docs/guide/intro".into(), None, None, None);
    let sibling = create_location("setup".into(), None, None, Some(&start));
    let parent = create_location("..".into(), None, None, Some(&sibling));
    let deep = create_location("api/v2/".into(), None, None, Some(&parent));

    assert_eq!(sibling.pathname(), "/docs/guide/setup");
    assert_eq!(parent.pathname(), "/docs/");
    assert_eq!(deep.pathname(), "/docs/api/v2/");
}
