//! Path string helpers.
//!
//! Every function here is pure. Where the input is already in the requested
//! shape the result borrows it (`Cow::Borrowed`) instead of allocating.
//!
//! A full path has three parts: `pathname`, `search` (starting with `?`) and
//! `hash` (starting with `#`). [`parse_path`] splits them and [`create_path`]
//! joins them back.
//!
//! # Examples
//!
//! ```
//! use memory_history::path::{create_path, parse_path, strip_basename};
//!
//! let parts = parse_path("/users/7?tab=posts#top");
//! assert_eq!(parts.pathname, "/users/7");
//! assert_eq!(parts.search, "?tab=posts");
//! assert_eq!(parts.hash, "#top");
//! assert_eq!(create_path(&parts.pathname, &parts.search, &parts.hash), "/users/7?tab=posts#top");
//!
//! assert_eq!(strip_basename("/app/users", "/app"), "/users");
//! ```

use std::borrow::Cow;

/// Add a `/` at the start unless one is already there.
pub fn add_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Remove a single leading `/`.
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Remove a single trailing `/`.
///
/// ```
/// use memory_history::path::strip_trailing_slash;
///
/// assert_eq!(strip_trailing_slash("/app/"), "/app");
/// assert_eq!(strip_trailing_slash("/"), "");
/// ```
pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Normalize a configured basename: leading slash, no trailing slash.
///
/// `"/"` and `""` both normalize to the empty basename.
pub fn normalize_basename(basename: &str) -> String {
    strip_trailing_slash(&add_leading_slash(basename)).to_string()
}

/// Check whether `path` starts with `prefix` as a whole path segment.
///
/// The comparison ignores ASCII case. The prefix must be followed by `/`,
/// `?`, `#` or the end of the path, so `/application` does not start with
/// the basename `/app`.
pub fn has_basename(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    let Some(head) = path.get(..prefix.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(prefix) {
        return false;
    }
    matches!(path[prefix.len()..].chars().next(), None | Some('/' | '?' | '#'))
}

/// Strip `prefix` from `path` when [`has_basename`] says it is present.
pub fn strip_basename<'a>(path: &'a str, prefix: &str) -> &'a str {
    if has_basename(path, prefix) {
        &path[prefix.len()..]
    } else {
        path
    }
}

/// A path split into its components.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParts {
    /// Everything before `?` and `#`. Empty when the input starts with either.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

/// Split a path into pathname, search and hash.
///
/// A bare `?` or `#` is treated as absent. An empty input yields the
/// pathname `/`.
pub fn parse_path(path: &str) -> PathParts {
    let path = if path.is_empty() { "/" } else { path };

    let (rest, hash) = match path.find('#') {
        Some(at) => path.split_at(at),
        None => (path, ""),
    };
    let (pathname, search) = match rest.find('?') {
        Some(at) => rest.split_at(at),
        None => (rest, ""),
    };

    PathParts {
        pathname: pathname.to_string(),
        search: if search == "?" { String::new() } else { search.to_string() },
        hash: if hash == "#" { String::new() } else { hash.to_string() },
    }
}

/// Join pathname, search and hash into a single path.
///
/// Missing `?` / `#` prefixes are added; a bare `?` or `#` is dropped.
pub fn create_path(pathname: &str, search: &str, hash: &str) -> String {
    let mut path = String::with_capacity(pathname.len() + search.len() + hash.len() + 2);
    path.push_str(pathname);
    path.push_str(&with_prefix(search, '?'));
    path.push_str(&with_prefix(hash, '#'));
    path
}

/// Ensure a non-empty search or hash starts with `prefix`.
///
/// Returns the empty string for `""` and for a lone prefix character.
pub fn with_prefix(part: &str, prefix: char) -> Cow<'_, str> {
    if part.is_empty() || (part.len() == 1 && part.starts_with(prefix)) {
        Cow::Borrowed("")
    } else if part.starts_with(prefix) {
        Cow::Borrowed(part)
    } else {
        Cow::Owned(format!("{prefix}{part}"))
    }
}

/// Resolve a relative pathname against the pathname it is relative to.
///
/// Absolute targets are returned unchanged. Otherwise the last segment of
/// `from` is dropped (unless `from` ends with `/`), `to` is appended, and
/// `.` / `..` segments are collapsed. `..` never climbs above the root. A
/// trailing `/` is kept when `to` ends with one, or with `.` or `..`.
///
/// ```
/// use memory_history::path::resolve_pathname;
///
/// assert_eq!(resolve_pathname("c", "/a/b"), "/a/c");
/// assert_eq!(resolve_pathname("../c", "/a/b/"), "/a/c");
/// assert_eq!(resolve_pathname("..", "/a/b/c"), "/a/");
/// assert_eq!(resolve_pathname("/x", "/a/b"), "/x");
/// ```
pub fn resolve_pathname<'a>(to: &'a str, from: &str) -> Cow<'a, str> {
    if to.starts_with('/') {
        return Cow::Borrowed(to);
    }
    if to.is_empty() {
        return Cow::Owned(add_leading_slash(from).into_owned());
    }

    let base = match from.rfind('/') {
        Some(at) => &from[..=at],
        None => "/",
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in strip_leading_slash(base).split('/').chain(to.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let last = to.rsplit('/').next().unwrap_or_default();
    let trailing = matches!(last, "" | "." | "..");

    let mut resolved = String::from("/");
    resolved.push_str(&segments.join("/"));
    if trailing && !segments.is_empty() {
        resolved.push('/');
    }
    Cow::Owned(resolved)
}
