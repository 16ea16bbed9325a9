use std::num::NonZeroUsize;

/// Splits `text` into consecutive chunks of `size` characters; the final
/// chunk holds the remainder. Boundaries always fall on `char` boundaries.
pub fn chunk_text(text: &str, size: NonZeroUsize) -> Vec<&str> {
    let size = size.get();
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;

    while start < text.len() {
        let end = text[start..]
            .char_indices()
            .nth(size)
            .map(|(offset, _)| start + offset)
            .unwrap_or(text.len());
        chunks.push(&text[start..end]);
        start = end;
    }

    chunks
}
