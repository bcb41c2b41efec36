/// Characters that are not allowed in a path segment on common filesystems.
const RESERVED: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Maps free text to a filesystem-safe path segment.
///
/// Reserved characters are removed, the result is trimmed, and every remaining
/// whitespace character becomes `_`. Empty input yields an empty segment; callers
/// substitute fallback labels before sanitizing.
pub fn sanitize(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !RESERVED.contains(c)).collect();
    stripped
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
