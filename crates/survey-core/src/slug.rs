//! Slug derivation for survey URLs

/// Maximum length of a derived slug, in characters
pub const MAX_SLUG_LEN: usize = 200;

/// Slug used when a title reduces to nothing URL-safe
pub const FALLBACK_SLUG: &str = "survey";

/// Derive a URL-safe slug from a survey title
///
/// Lower-cases the title, drops everything that is not alphanumeric,
/// whitespace, underscore, or hyphen, collapses separator runs to single
/// hyphens, trims leading/trailing hyphens, and bounds the length. The
/// result is deterministic for identical input; uniqueness is handled by
/// the caller (suffix loop against the surveys table).
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut gap = false;

    for c in title.trim().chars() {
        if c.is_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if c.is_whitespace() || c == '_' || c == '-' {
            gap = true;
        }
        // other punctuation is stripped without breaking the word
    }

    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }

    if slug.chars().count() > MAX_SLUG_LEN {
        slug.chars().take(MAX_SLUG_LEN).collect()
    } else {
        slug
    }
}
