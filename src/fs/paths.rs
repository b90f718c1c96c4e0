//! POSIX-style string path helpers shared by panes, gateways, and transfers.
//!
//! Both backends address entries with absolute `/`-separated strings. The
//! helpers here never touch the filesystem.

pub const ROOT: &str = "/";

/// Normalize to an absolute path with single separators and no trailing
/// separator (except for the root itself). `.` segments vanish and `..`
/// segments pop, never above the root.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Append `name` to `base`, inserting a separator only when missing.
pub fn join(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Parent directory; the root's parent is the root.
pub fn parent(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => ROOT.to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}

/// Last path segment, or an empty string for the root.
pub fn leaf(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Path of a sibling named `new_leaf` next to `path`.
///
/// Under the root this yields `/new_leaf`, never `//new_leaf`.
pub fn sibling(path: &str, new_leaf: &str) -> String {
    join(&parent(path), new_leaf)
}
