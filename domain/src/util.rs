//! Shared utility functions.

/// Split `s` into consecutive slices of at most `size` characters.
///
/// Slices never split a UTF-8 character. An empty string yields no slices;
/// a `size` of zero is treated as one.
pub fn chunk_chars(s: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in s.char_indices() {
        if count == size {
            chunks.push(&s[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < s.len() {
        chunks.push(&s[start..]);
    }
    chunks
}
