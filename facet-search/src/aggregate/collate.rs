//! Case-insensitive, accent-aware title comparison.
//!
//! Titles compare first on a folded key (lowercase, diacritics removed) so
//! that `"École"` sorts with the other `e` titles, then on the lowercase
//! form so accented and unaccented spellings still order consistently.
//! Titles differing only in case compare equal.
//!
//! Letters that Unicode does not decompose (`ø`, `æ`, `ß`, ...) are folded
//! explicitly to their base letters, so `"Øresund"` sorts among the `o`
//! titles and `"Æble"` as `"aeble"`.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed sort key for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleKey {
    folded: String,
    lowered: String,
}

impl TitleKey {
    pub fn new(title: &str) -> Self {
        let lowered = title.to_lowercase();
        let mut folded = String::with_capacity(lowered.len());
        for c in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
            match fold_letter(c) {
                Some(base) => folded.push_str(base),
                None => folded.push(c),
            }
        }
        Self { folded, lowered }
    }
}

/// Base-letter spelling of lowercase letters without a canonical
/// decomposition.
fn fold_letter(c: char) -> Option<&'static str> {
    let base = match c {
        'ø' => "o",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'þ' => "th",
        'ħ' => "h",
        'ı' => "i",
        _ => return None,
    };
    Some(base)
}

impl PartialOrd for TitleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TitleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded
            .cmp(&other.folded)
            .then_with(|| self.lowered.cmp(&other.lowered))
    }
}

/// Compare two titles the way the title sort orders them.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TitleKey::new(a).cmp(&TitleKey::new(b))
}
