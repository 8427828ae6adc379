//! Duplicate-name detection

/// Existing names that contain, or are contained in, the candidate.
///
/// Comparison is on lower-cased, trimmed names and includes exact matches.
/// A blank candidate has no duplicates.
pub fn find_potential_duplicates<S: AsRef<str>>(candidate: &str, existing: &[S]) -> Vec<String> {
    let candidate = candidate.trim().to_lowercase();
    if candidate.is_empty() {
        return Vec::new();
    }
    existing
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| {
            let name = name.trim().to_lowercase();
            !name.is_empty() && (name.contains(&candidate) || candidate.contains(&name))
        })
        .map(String::from)
        .collect()
}
