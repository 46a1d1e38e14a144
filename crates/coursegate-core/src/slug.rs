//! URL-safe slug derivation.
//!
//! A slug is a non-empty run of lowercase ASCII letters and digits separated
//! by single hyphens, with no leading or trailing hyphen. Titles that reduce
//! to nothing (all punctuation, non-ASCII scripts) get a random identifier.
//!
//! Uniqueness against stored courses is not decided here; see the slug
//! allocator in `coursegate-db`.

use rand::Rng;

/// Length of the random suffix appended when a base slug collides.
pub const SUFFIX_LEN: usize = 6;

/// Length of the identifier used when a title yields an empty slug.
pub const FALLBACK_LEN: usize = 8;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Derives the base slug for `title`.
///
/// ```ignore
/// assert_eq!(slugify("Intro to UX"), "intro-to-ux");
/// assert_eq!(slugify("  Data 101!!  "), "data-101");
/// ```
pub fn slugify(title: &str) -> String {
    let slug = normalize(title);
    if slug.is_empty() {
        random_token(FALLBACK_LEN)
    } else {
        slug
    }
}

/// Appends a fresh random suffix to `base`.
pub fn with_random_suffix(base: &str) -> String {
    format!("{}-{}", base, random_token(SUFFIX_LEN))
}

/// Random identifier drawn from lowercase letters and digits.
pub fn random_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Return `true` when `value` is already in slug form.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

fn normalize(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.trim().to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
