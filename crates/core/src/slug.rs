//! URL slugs for articles.
//!
//! Articles are addressed by slug (`/blog/:slug`). A slug is derived from the title when the
//! editor leaves it blank. Uniqueness is not handled here; the content store rejects duplicates
//! on insert and update.

/// Derives a URL-safe slug from `title`.
///
/// The title is lowercased, every character outside `[a-z0-9]`, whitespace and `-` is dropped,
/// runs of whitespace become a single hyphen, runs of hyphens collapse into one, and leading or
/// trailing hyphens are trimmed.
///
/// Non-ASCII letters are dropped rather than transliterated, so a title without any ASCII
/// alphanumerics yields an empty slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if is_separator(c) {
            pending_hyphen = true;
        }
    }

    slug
}

/// Hyphens and white space in the regex `\s` sense.
///
/// Differs from `char::is_whitespace` in two places: U+FEFF (byte order mark, common in pasted
/// titles) is a separator, U+0085 (next line) is not and gets dropped like punctuation.
fn is_separator(c: char) -> bool {
    match c {
        '-' | '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// True when `input` is already in slug form.
pub fn is_slug(input: &str) -> bool {
    !input.is_empty() && slugify(input) == input
}
