//! Embedded-player URL construction.

/// Append the autoplay query parameter appropriate to the video host.
///
/// YouTube embeds also get `rel=0` so the player does not surface unrelated
/// suggestions. Unrecognized hosts pass through unchanged, and an empty
/// input stays empty. Deterministic for a given input.
pub fn embed_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.contains("youtube") {
        format!("{url}?autoplay=1&rel=0")
    } else if url.contains("vimeo") {
        format!("{url}?autoplay=1")
    } else {
        url.to_string()
    }
}
