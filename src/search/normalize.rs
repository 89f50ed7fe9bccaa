use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds text for comparison: NFD decomposition, combining marks stripped,
/// all whitespace removed, lower-cased.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
