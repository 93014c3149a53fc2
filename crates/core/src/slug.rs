//! URL slug derivation for contributions.
//!
//! Slugs are ASCII-only: alphanumeric runs from the title are lowercased and
//! joined with single hyphens. A title with no ASCII alphanumerics (e.g. a
//! fully non-Latin title) produces an empty slug, and the caller falls back
//! to `contribution-{id}`. Collisions are resolved with `-1`, `-2`, …
//! suffixes; uniqueness is checked against every row, soft-deleted included.

use std::collections::HashSet;

use crate::types::DbId;

/// Derive an ASCII slug from a title. May return an empty string.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// The slug used when a title produces an empty candidate.
pub fn fallback_slug(id: DbId) -> String {
    format!("contribution-{id}")
}

/// Resolve `candidate` against the set of already-taken slugs by appending
/// `-1`, `-2`, … until the result is free.
pub fn uniquify(candidate: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }
    let mut suffix = 1u32;
    loop {
        let attempt = format!("{candidate}-{suffix}");
        if !taken.contains(&attempt) {
            return attempt;
        }
        suffix += 1;
    }
}
