//! Free-text location similarity
//!
//! Location names arrive with abbreviations, partial names and typos, so no
//! single heuristic is trusted on its own. [`composite`] runs five of them and
//! keeps the most charitable score.
//!
//! All lengths and positions are counted in `char`s.

use strsim::normalized_levenshtein;

/// Trim surrounding whitespace and lower-case
#[inline]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Similarity between two location strings (0-1)
///
/// Inputs are normalised first. Equal strings score `1.0`; otherwise an
/// empty side scores `0.0`; otherwise the best of the five heuristics wins.
pub fn composite(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    [
        exact_score(&a, &b),
        substring_score(&a, &b),
        word_overlap_score(&a, &b),
        edit_similarity(&a, &b),
        prefix_overlap_score(&a, &b),
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// `1.0` on equality, `0.0` otherwise
#[inline]
pub fn exact_score(a: &str, b: &str) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

/// Containment score, capped at 0.9 since containment is never exact
pub fn substring_score(a: &str, b: &str) -> f64 {
    if !(a.contains(b) || b.contains(a)) {
        return 0.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longer = len_a.max(len_b);
    if longer == 0 {
        return 0.0;
    }

    len_a.min(len_b) as f64 / longer as f64 * 0.9
}

/// Dice-style overlap of whitespace-separated words
///
/// A word of `a` counts once if it equals, contains or is contained in any
/// word of `b`.
pub fn word_overlap_score(a: &str, b: &str) -> f64 {
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let matched = words_a
        .iter()
        .filter(|wa| {
            words_b
                .iter()
                .any(|wb| wa == &wb || wa.contains(wb) || wb.contains(*wa))
        })
        .count();

    (matched * 2) as f64 / (words_a.len() + words_b.len()) as f64
}

/// `1 - levenshtein / max_len`, `1.0` for two empty strings
#[inline]
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Share of aligned positions holding the same character
///
/// Only positions present in both strings are compared; the count is divided
/// by the longer length.
pub fn prefix_overlap_score(a: &str, b: &str) -> f64 {
    let common = a
        .chars()
        .zip(b.chars())
        .filter(|(ca, cb)| ca == cb)
        .count();

    if common == 0 {
        return 0.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    common as f64 / max_len as f64
}

/// Classic Levenshtein distance with unit costs, counted in `char`s
#[inline]
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
