//! Locations and how they are built.
//!
//! A [`Location`] is an immutable navigation target: a path split into
//! pathname, search and hash, an optional piece of caller state, and a key.
//! Callers describe where they want to go with a [`LocationDescriptor`],
//! either parsed from a path string or assembled field by field, and
//! [`create_location`] turns it into a `Location`, resolving relative
//! pathnames against the location being navigated away from.
//!
//! # Example
//!
//! ```
//! use memory_history::{create_location, LocationDescriptor};
//!
//! let users = create_location(LocationDescriptor::<()>::from("/users/"), None, Some("k1".into()), None);
//! let profile = create_location("7?tab=posts".into(), None, Some("k2".into()), Some(&users));
//!
//! assert_eq!(profile.pathname(), "/users/7");
//! assert_eq!(profile.path(), "/users/7?tab=posts");
//! assert_eq!(profile.key(), Some("k2"));
//! ```

use crate::path::{add_leading_slash, create_path, parse_path, resolve_pathname, with_prefix};

// ============================================================================
// Location
// ============================================================================

/// An entry in the history.
///
/// Fields are private: once created a location never changes. Navigation
/// replaces locations, it does not edit them.
#[derive(Debug, Clone, PartialEq)]
pub struct Location<S = ()> {
    pathname: String,
    search: String,
    hash: String,
    state: Option<S>,
    key: Option<String>,
}

impl<S> Location<S> {
    /// Pathname, always starting with `/`.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Query string including `?`, or empty.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Fragment including `#`, or empty.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The full path: pathname, search and hash. State is never part of it.
    pub fn path(&self) -> String {
        create_path(&self.pathname, &self.search, &self.hash)
    }

    /// State carried alongside this location, if any.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    /// Key distinguishing this entry from others with the same path.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl<S: PartialEq> Location<S> {
    /// Compare path and state, ignoring keys.
    ///
    /// Two navigations to the same place produce locations with different
    /// keys; this is the comparison that treats them as the same target.
    pub fn is_same_location(&self, other: &Self) -> bool {
        self.pathname == other.pathname
            && self.search == other.search
            && self.hash == other.hash
            && self.state == other.state
    }
}

// ============================================================================
// LocationDescriptor
// ============================================================================

/// A location-like value describing a navigation target.
///
/// Converting a string (`"/a?b#c".into()`) parses it. Building one with
/// [`LocationDescriptor::new`] and the setters lets a caller attach state or
/// a key directly.
///
/// A descriptor with an empty pathname targets the pathname of the location
/// being navigated away from; a pathname without a leading `/` is resolved
/// relative to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDescriptor<S = ()> {
    /// Target pathname, possibly relative or empty.
    pub pathname: String,
    /// Query string, with or without the leading `?`.
    pub search: String,
    /// Fragment, with or without the leading `#`.
    pub hash: String,
    /// State carried by the descriptor itself.
    pub state: Option<S>,
    /// Explicit key. Honored for initial entries.
    pub key: Option<String>,
}

impl<S> LocationDescriptor<S> {
    /// Descriptor targeting `pathname`, with no search, hash, state or key.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
            state: None,
            key: None,
        }
    }

    /// Set the query string.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the fragment.
    #[must_use]
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Attach state.
    #[must_use]
    pub fn state(mut self, state: S) -> Self {
        self.state = Some(state);
        self
    }

    /// Attach an explicit key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Whether the descriptor already carries state of its own.
    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }
}

impl<S> Default for LocationDescriptor<S> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<S> From<&str> for LocationDescriptor<S> {
    fn from(path: &str) -> Self {
        let parts = parse_path(path);
        Self {
            pathname: parts.pathname,
            search: parts.search,
            hash: parts.hash,
            state: None,
            key: None,
        }
    }
}

impl<S> From<String> for LocationDescriptor<S> {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}

impl<S> From<&String> for LocationDescriptor<S> {
    fn from(path: &String) -> Self {
        Self::from(path.as_str())
    }
}

impl<S> From<Location<S>> for LocationDescriptor<S> {
    fn from(location: Location<S>) -> Self {
        Self {
            pathname: location.pathname,
            search: location.search,
            hash: location.hash,
            state: location.state,
            key: location.key,
        }
    }
}

// ============================================================================
// create_location
// ============================================================================

/// Build a [`Location`] from a descriptor.
///
/// - State: the descriptor's own state wins; `state` is used only when the
///   descriptor has none.
/// - Key: `key` wins; the descriptor's key is used only when `key` is `None`.
/// - Pathname: with a `previous` location, an empty pathname becomes the
///   previous pathname and a relative one is resolved against it. Without
///   one, the pathname is made absolute: empty becomes `/`, `foo` becomes
///   `/foo`.
pub fn create_location<S>(
    descriptor: LocationDescriptor<S>,
    state: Option<S>,
    key: Option<String>,
    previous: Option<&Location<S>>,
) -> Location<S> {
    let LocationDescriptor {
        pathname,
        search,
        hash,
        state: own_state,
        key: own_key,
    } = descriptor;

    let pathname = match previous {
        Some(previous) if pathname.is_empty() => previous.pathname.clone(),
        Some(previous) if !pathname.starts_with('/') => {
            resolve_pathname(&pathname, &previous.pathname).into_owned()
        }
        Some(_) => pathname,
        None => add_leading_slash(&pathname).into_owned(),
    };

    Location {
        pathname,
        search: with_prefix(&search, '?').into_owned(),
        hash: with_prefix(&hash, '#').into_owned(),
        state: own_state.or(state),
        key: key.or(own_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Location<u32> {
        create_location("/".into(), None, Some("root".into()), None)
    }

    #[test]
    fn test_string_descriptor_parses_path() {
        let location: Location<u32> = create_location("/a?b=1#c".into(), Some(3), None, None);
        assert_eq!(location.pathname(), "/a");
        assert_eq!(location.search(), "?b=1");
        assert_eq!(location.hash(), "#c");
        assert_eq!(location.state(), Some(&3));
        assert_eq!(location.key(), None);
    }

    #[test]
    fn test_descriptor_state_wins() {
        let descriptor = LocationDescriptor::new("/a").state(1);
        let location = create_location(descriptor, Some(2), None, None);
        assert_eq!(location.state(), Some(&1));
    }

    #[test]
    fn test_explicit_key_overrides_descriptor_key() {
        let descriptor = LocationDescriptor::<u32>::new("/a").key("mine");
        let location = create_location(descriptor.clone(), None, Some("fresh".into()), None);
        assert_eq!(location.key(), Some("fresh"));

        let location = create_location(descriptor, None, None, None);
        assert_eq!(location.key(), Some("mine"));
    }

    #[test]
    fn test_empty_pathname_keeps_previous() {
        let previous = create_location("/users/7".into(), None, None, None);
        let location: Location<u32> = create_location("?tab=posts".into(), None, None, Some(&previous));
        assert_eq!(location.path(), "/users/7?tab=posts");
    }

    #[test]
    fn test_empty_pathname_without_previous_is_root() {
        let location: Location<u32> = create_location(LocationDescriptor::default(), None, None, None);
        assert_eq!(location.pathname(), "/");
    }

    #[test]
    fn test_relative_pathname_without_previous_is_made_absolute() {
        let location: Location<u32> = create_location("foo?x=1".into(), None, None, None);
        assert_eq!(location.pathname(), "/foo");
        assert_eq!(location.path(), "/foo?x=1");
    }

    #[test]
    fn test_relative_pathname_resolves_against_previous() {
        let previous = create_location("/users/".into(), None, None, None);
        let location: Location<u32> = create_location("7".into(), None, None, Some(&previous));
        assert_eq!(location.pathname(), "/users/7");
    }

    #[test]
    fn test_descriptor_prefixes_search_and_hash() {
        let descriptor = LocationDescriptor::<u32>::new("/a").search("q=1").hash("top");
        let location = create_location(descriptor, None, None, Some(&root()));
        assert_eq!(location.path(), "/a?q=1#top");
    }

    #[test]
    fn test_is_same_location_ignores_key() {
        let a: Location<u32> = create_location("/a".into(), Some(1), Some("x".into()), None);
        let b: Location<u32> = create_location("/a".into(), Some(1), Some("y".into()), None);
        assert!(a.is_same_location(&b));
        assert_ne!(a, b);

        let c: Location<u32> = create_location("/a".into(), Some(2), Some("x".into()), None);
        assert!(!a.is_same_location(&c));
    }

    #[test]
    fn test_location_round_trips_into_descriptor() {
        let location: Location<u32> = create_location("/a?b#c".into(), Some(5), Some("k".into()), None);
        let rebuilt = create_location(location.clone().into(), None, None, None);
        assert_eq!(rebuilt, location);
    }
}
