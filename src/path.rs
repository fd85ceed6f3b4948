/// Returns the canonical form of a request path or route pattern.
///
/// The following rules are applied:
///  1. An empty path becomes "/".
///  2. A missing leading slash is added.
///  3. Runs of slashes collapse into a single slash.
///  4. A trailing slash is removed, unless the whole path is "/".
///
/// Route patterns and request paths both go through this function, so
/// `/users/:id` and `/users//123/` split into segments the same way.
pub fn normalize(path: &str) -> String {
    let mut buf = String::with_capacity(path.len() + 1);
    buf.push('/');

    for c in path.chars() {
        // empty path element, the slash was already written
        if c == '/' && buf.ends_with('/') {
            continue;
        }
        buf.push(c);
    }

    if buf.len() > 1 && buf.ends_with('/') {
        buf.pop();
    }

    buf
}

/// Iterates over the `/`-delimited segments of a normalized path.
///
/// The root path has no segments.
pub(crate) fn segments(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split('/').filter(|s| !s.is_empty())
}

/// Splits a raw path at the first `?` into the path and an optional query.
pub(crate) fn split_query(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    }
}
