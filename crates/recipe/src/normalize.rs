/// Canonical form used before any ingredient comparison: lowercase, with
/// hyphens and commas folded to spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '-' | ',' => ' ',
            c => c,
        })
        .collect()
}

/// Literal containment that never matches on a blank needle.
pub(crate) fn contains(haystack: &str, needle: &str) -> bool {
    !needle.trim().is_empty() && haystack.contains(needle)
}

/// Containment in either direction.
pub(crate) fn overlaps(a: &str, b: &str) -> bool {
    contains(a, b) || contains(b, a)
}
