//! Logical path arithmetic and site url construction.
//!
//! Logical paths always use `/` separators and never start with one; they are
//! relative to the site generator's source directory.

/// Check whether an href points outside the book.
pub(crate) fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Directory part of a logical path (`""` at the top level).
pub(crate) fn logical_dir(logical: &str) -> &str {
    logical.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Split `href` at its first `#` or `?` into the path and the rest.
pub(crate) fn split_suffix(href: &str) -> (&str, &str) {
    href.find(['#', '?'])
        .map_or((href, ""), |at| href.split_at(at))
}

/// Join `href` onto the logical directory `base_dir` and normalize it.
///
/// Query strings and fragments are dropped, `.` segments vanish and `..`
/// removes the previous segment. An href starting with `/` is taken from the
/// top of the source tree. Returns `None` when the href climbs above the top
/// or names nothing.
pub(crate) fn join_logical(base_dir: &str, href: &str) -> Option<String> {
    let (href, _) = split_suffix(href);

    let mut segments: Vec<&str> = if href.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

/// Site url of a logical path: `/<dir>/<name without extension>.html`.
///
/// Only the last extension goes, so `v1.2-notes.html` keeps its dots.
pub(crate) fn site_url(logical: &str) -> String {
    let (dir, name) = logical.rsplit_once('/').unwrap_or(("", logical));
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    if dir.is_empty() {
        format!("/{stem}.html")
    } else {
        format!("/{dir}/{stem}.html")
    }
}
