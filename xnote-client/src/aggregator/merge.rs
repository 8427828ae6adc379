//! Meal merging
//!
//! Entries of one meal time that render identically apart from the food
//! name collapse into one cell, then the longest text takes slot 0.

use shared::models::MealEntry;
use shared::people_display;

/// Grouping key: everything displayed except the food name
#[derive(Debug, PartialEq, Eq)]
struct MergeKey {
    meal_type: String,
    people: String,
    notes: String,
}

impl MergeKey {
    fn of(entry: &MealEntry) -> Self {
        Self {
            meal_type: entry.meal_type.clone().unwrap_or_default(),
            people: people_display(&entry.people),
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }
}

/// `people name (notes)`, with empty parts left out
pub fn display_text(entry: &MealEntry) -> String {
    let mut text = String::new();
    let people = people_display(&entry.people);
    if !people.is_empty() {
        text.push_str(&people);
        text.push(' ');
    }
    text.push_str(&entry.name);
    if let Some(notes) = entry.notes_text() {
        text.push_str(" (");
        text.push_str(notes);
        text.push(')');
    }
    text
}

/// Merge one meal time's entries and order them by display length.
///
/// Groups keep the position of their first member. Applying the merge to
/// its own output changes nothing.
pub fn merge_meals(entries: &[MealEntry]) -> Vec<MealEntry> {
    let mut groups: Vec<(MergeKey, Vec<&MealEntry>)> = Vec::new();
    for entry in entries {
        let key = MergeKey::of(entry);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(entry),
            None => groups.push((key, vec![entry])),
        }
    }

    let mut merged: Vec<MealEntry> = groups
        .into_iter()
        .map(|(_, members)| merge_group(&members))
        .collect();

    // stable: equal lengths keep group order
    merged.sort_by_cached_key(|entry| std::cmp::Reverse(display_text(entry).chars().count()));
    merged
}

fn merge_group(members: &[&MealEntry]) -> MealEntry {
    let first = members[0];
    if members.len() == 1 {
        return first.clone();
    }

    let name = members
        .iter()
        .map(|m| m.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let ids = members.iter().flat_map(|m| m.ids.iter().copied()).collect();

    MealEntry {
        ids,
        name,
        people: first.people.clone(),
        notes: first.notes.clone(),
        meal_type: first.meal_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i32, name: &str, people: &[&str], notes: Option<&str>, meal_type: &str) -> MealEntry {
        MealEntry {
            ids: vec![id],
            name: name.to_string(),
            people: people.iter().map(|p| p.to_string()).collect(),
            notes: notes.map(String::from),
            meal_type: Some(meal_type.to_string()),
        }
    }

    #[test]
    fn test_merge_same_attributes() {
        let merged = merge_meals(&[
            entry(1, "Eggs", &[], None, "cooked"),
            entry(2, "Toast", &[], None, "cooked"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Eggs, Toast");
        assert_eq!(merged[0].ids, vec![1, 2]);
        assert_eq!(merged[0].meal_type.as_deref(), Some("cooked"));
    }

    #[test]
    fn test_different_meal_type_never_merges() {
        let merged = merge_meals(&[
            entry(1, "Eggs", &[], None, "cooked"),
            entry(2, "Toast", &[], None, "leftover"),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_null_and_empty_notes_share_a_group() {
        let merged = merge_meals(&[
            entry(1, "Eggs", &[], None, "cooked"),
            entry(2, "Toast", &[], Some(""), "cooked"),
        ]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_people_order_does_not_split_groups() {
        let merged = merge_meals(&[
            entry(1, "Eggs", &["bob", "alice"], None, "cooked"),
            entry(2, "Toast", &["alice", "bob"], None, "cooked"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(display_text(&merged[0]), "alice, bob Eggs, Toast");
    }

    #[test]
    fn test_empty_names_skipped_when_joining() {
        let merged = merge_meals(&[
            entry(1, "", &[], None, "cooked"),
            entry(2, "Toast", &[], None, "cooked"),
        ]);
        assert_eq!(merged[0].name, "Toast");
        assert_eq!(merged[0].ids, vec![1, 2]);
    }

    #[test]
    fn test_sorted_by_display_length() {
        let merged = merge_meals(&[
            entry(1, "Soup", &[], None, "cooked"),
            entry(2, "Pho", &["alice"], Some("extra spicy broth"), "dine-in"),
            entry(3, "Ramen bowl", &[], None, "takeout"),
        ]);
        let names: Vec<_> = merged.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Pho", "Ramen bowl", "Soup"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_meals(&[
            entry(1, "Eggs", &[], None, "cooked"),
            entry(2, "Rice", &["alice"], None, "cooked"),
            entry(3, "Toast", &[], None, "cooked"),
            entry(4, "Pizza", &[], Some("cold"), "leftover"),
        ]);
        assert_eq!(merge_meals(&once), once);
    }

    #[test]
    fn test_display_text() {
        let e = entry(1, "Curry", &["xx", "ww"], Some("  "), "cooked");
        assert_eq!(display_text(&e), "Curry");
        let e = entry(1, "Curry", &["ww", "carol"], Some("mild"), "cooked");
        assert_eq!(display_text(&e), "ww, carol Curry (mild)");
    }
}
