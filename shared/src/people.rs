//! People display rules
//!
//! "xx" and "ww" are the household. They are listed first, and omitted
//! entirely when they are the only two attendees.

use std::cmp::Ordering;

use crate::models::Person;

/// Names of the default household members
pub const DEFAULT_HOUSEHOLD: [&str; 2] = ["xx", "ww"];

fn household_rank(name: &str) -> u8 {
    match name.to_lowercase().as_str() {
        "xx" => 0,
        "ww" => 1,
        _ => 2,
    }
}

/// Render a set of attendee names for display and for merge keys.
pub fn people_display<S: AsRef<str>>(names: &[S]) -> String {
    let lower: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    if lower.len() == 2 && lower.iter().any(|n| n == "xx") && lower.iter().any(|n| n == "ww") {
        return String::new();
    }

    let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    sorted.sort_by(|a, b| compare_people(a, b));
    sorted.join(", ")
}

fn compare_people(a: &str, b: &str) -> Ordering {
    household_rank(a)
        .cmp(&household_rank(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Resolve default attendee names against the loaded people list.
///
/// Names that match nobody are skipped.
pub fn resolve_default_people<S: AsRef<str>>(people: &[Person], defaults: &[S]) -> Vec<i32> {
    defaults
        .iter()
        .filter_map(|name| {
            people
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name.as_ref()))
                .map(|p| p.id)
        })
        .fold(Vec::new(), |mut ids, id| {
            if !ids.contains(&id) {
                ids.push(id);
            }
            ids
        })
}

/// Drop repeated ids, keeping the first occurrence
pub fn unique_ids(ids: &[i32]) -> Vec<i32> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_pair_is_hidden() {
        assert_eq!(people_display(&["xx", "ww"]), "");
        assert_eq!(people_display(&["WW", "Xx"]), "");
    }

    #[test]
    fn test_ordering() {
        assert_eq!(people_display(&["xx"]), "xx");
        assert_eq!(people_display(&["ww", "alice"]), "ww, alice");
        assert_eq!(people_display(&["bob", "alice"]), "alice, bob");
        assert_eq!(people_display(&["carol", "ww", "Bob", "xx"]), "xx, ww, Bob, carol");
        assert_eq!(people_display::<&str>(&[]), "");
    }

    #[test]
    fn test_resolve_default_people_skips_unknown() {
        let people = vec![
            Person { id: 1, name: "XX".into(), notes: None },
            Person { id: 2, name: "alice".into(), notes: None },
        ];
        assert_eq!(resolve_default_people(&people, &DEFAULT_HOUSEHOLD), vec![1]);
        assert!(resolve_default_people(&[], &DEFAULT_HOUSEHOLD).is_empty());
    }

    #[test]
    fn test_unique_ids() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
