//! By-name retrieval from the Deck's four top-level collections, plus
//! index-of-variant lookup within a category. No indexing is built; input
//! sizes are small and a linear scan suffices (spec.md §4.7).

use crate::model::{Category, Deck, Group, PairGroup};

pub fn find_category<'a>(deck: &'a Deck, name: &str) -> Option<&'a Category> {
    deck.categories.iter().find(|c| c.name == name)
}

pub fn find_category_index(deck: &Deck, name: &str) -> Option<usize> {
    deck.categories.iter().position(|c| c.name == name)
}

pub fn find_group<'a>(deck: &'a Deck, name: &str) -> Option<&'a Group> {
    deck.groups.iter().find(|g| g.name == name)
}

pub fn find_group_index(deck: &Deck, name: &str) -> Option<usize> {
    deck.groups.iter().position(|g| g.name == name)
}

pub fn find_pair_group<'a>(deck: &'a Deck, name: &str) -> Option<&'a PairGroup> {
    deck.pair_groups.iter().find(|p| p.name == name)
}

pub fn find_pair_group_index(deck: &Deck, name: &str) -> Option<usize> {
    deck.pair_groups.iter().position(|p| p.name == name)
}

/// Index of `variant_name` within `category`'s column list, if any.
pub fn variant_index(category: &Category, variant_name: &str) -> Option<usize> {
    category.variant_names.iter().position(|v| v == variant_name)
}

/// Whether `key` occurs as a selectable value under `category`'s
/// `key_variant_index` column.
pub fn key_in_column(category: &Category, key_variant_index: usize, key: &str) -> bool {
    category
        .selectables
        .iter()
        .any(|s| s.variants.get(key_variant_index).map(String::as_str) == Some(key))
}
