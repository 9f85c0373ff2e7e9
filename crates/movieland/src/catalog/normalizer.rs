use crate::discovery::Genre;
use std::collections::HashMap;
use std::sync::OnceLock;

static GENRE_KEYS: OnceLock<HashMap<String, Genre>> = OnceLock::new();

/// Resolves a dataset genre string, ignoring case, padding, and word separators.
pub fn genre_for(value: &str) -> Option<Genre> {
    genre_keys().get(&normalize_key(value)).copied()
}

fn genre_keys() -> &'static HashMap<String, Genre> {
    GENRE_KEYS.get_or_init(|| {
        Genre::ALL
            .into_iter()
            .map(|genre| (normalize_key(genre.name()), genre))
            .collect()
    })
}

fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-' && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_key(value)
}
