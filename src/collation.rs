//! Locale-aware string comparison used to break ties between equal-cost hints.
//!
//! Rust has no portable binding to the OS collation tables the reference
//! implementation leans on (`wcscoll` under `pl_PL.UTF-8`). This module
//! approximates locale collation with the standard two-level scheme: compare
//! a diacritic-stripped *primary* key first, and only fall back to the full
//! string (which still carries the diacritics) to break primary ties. This
//! reproduces the textbook example from spec.md §8 scenario 4: `"féin"` and
//! `"felin"` are primary-equal to `"fein"`/`"felin"` respectively, and
//! `"fein" < "felin"` lexicographically (`i` < `l`), so `"féin"` sorts first.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;

/// Unicode combining diacritical marks block, enough to strip the accents
/// this engine cares about (acute, grave, ogonek, etc) after NFD decomposition.
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// The diacritic-insensitive primary sort key for a string.
fn primary_key(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Compares two strings the way a Polish-locale collation would for the
/// purposes of hint tie-breaking: primary (diacritic-insensitive) order
/// first, full string as the secondary tie-breaker.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (pa, pb) = (primary_key(a), primary_key(b));
    match pa.cmp(&pb) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diacritic_primary_key_strips_accents() {
        assert_eq!(primary_key("féin"), "fein");
        assert_eq!(primary_key("łódka"), "łodka");
    }

    #[test]
    fn fein_sorts_before_felin() {
        assert_eq!(compare("féin", "felin"), Ordering::Less);
    }

    #[test]
    fn full_spec_scenario_order() {
        let mut words = vec!["felin", "fen", "fin", "féin", "mein", "tein"];
        words.sort_by(|a, b| compare(a, b));
        assert_eq!(words, vec!["féin", "felin", "fen", "fin", "mein", "tein"]);
    }

    #[test]
    fn equal_primary_falls_back_to_full_string() {
        assert_eq!(compare("a", "a"), Ordering::Equal);
        assert_ne!(compare("e", "é"), Ordering::Equal);
    }
}
