use unicode_normalization::UnicodeNormalization;

/// Canonical lowercase form used for every name comparison. NFD splits
/// accented letters into base letter plus combining marks, which the ASCII
/// filter then drops, so "Mbappé" and "Mbappe" compare equal.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_lowercase()
}
