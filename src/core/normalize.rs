/// Normalized form of a free-text term: whitespace-trimmed and lowercased.
///
/// All profile values and criteria members are compared in this form, so
/// `" Japanese "` and `"japanese"` are the same term.
#[inline]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a comma-separated admin list into normalized terms.
///
/// This is the explicit parse step for the free-form list fields on the
/// gift form (`genders`, `nationalities`, `jobs`): split on commas, trim,
/// lowercase, drop empties. It runs at the request boundary; the matcher
/// only ever sees the normalized result.
///
/// # Examples
/// `"Engineer, Teacher , ,student"` -> `["engineer", "teacher", "student"]`
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_term)
        .filter(|term| !term.is_empty())
        .collect()
}
