/// Drop non-breaking spaces, then trim surrounding whitespace.
pub fn clean_field(raw: &str) -> String {
    raw.replace('\u{a0}', "").trim().to_string()
}

/// Column label → lookup key: lowercase, spaces become underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Typographic primes (′ ″) → ASCII `'` and `"`.
pub fn normalize_primes(raw: &str) -> String {
    raw.replace('\u{2032}', "'").replace('\u{2033}', "\"")
}
