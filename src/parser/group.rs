//! Group handler — spec.md §4.3. Every line is a complete declaration; no
//! in-flight state is needed (Groups has no in-flight entity per §4.1).

use crate::diagnostics::Sink;
use crate::lookup;
use crate::model::{Deck, Group};

pub fn handle_line(fields: &[String], deck: &mut Deck, sink: &mut Sink) {
    if fields.len() != 4 {
        sink.issue("Wrong separators, check semicolon use");
        return;
    }

    let group_name = fields[0].clone();
    let subgroup_name = fields[1].clone();
    let key_variant = fields[2].clone();
    let keys = parse_keys(&fields[3]);

    check_group_integrity(&subgroup_name, &key_variant, &keys, deck, sink);

    if let Some(idx) = lookup::find_group_index(deck, &group_name) {
        extend_existing(idx, &subgroup_name, &key_variant, &keys, deck, sink);
    } else {
        deck.groups.push(Group {
            name: group_name,
            subgroup_name,
            key_variant_name: key_variant,
            keys,
        });
    }
}

/// Strip the leading/trailing single character of the key-list field and
/// split on `,` (no trimming, no escapes — spec.md §6).
pub fn parse_keys(field: &str) -> Vec<String> {
    if field.len() < 2 {
        return Vec::new();
    }
    let inner = &field[1..field.len() - 1];
    inner.split(',').map(|s| s.to_string()).collect()
}

fn extend_existing(
    idx: usize,
    subgroup_name: &str,
    key_variant: &str,
    keys: &[String],
    deck: &mut Deck,
    sink: &mut Sink,
) {
    let group_name = deck.groups[idx].name.clone();
    if deck.groups[idx].subgroup_name != subgroup_name {
        sink.issue(format!(
            "Expanding group with subgroup {} does not match prior subgroup {}",
            subgroup_name, deck.groups[idx].subgroup_name
        ));
        return;
    }
    if deck.groups[idx].key_variant_name != key_variant {
        sink.issue(format!(
            "Expanding group with key variant {} does not match prior key variant {}",
            key_variant, deck.groups[idx].key_variant_name
        ));
        return;
    }

    let mut extended = false;
    for key in keys {
        if !deck.groups[idx].keys.contains(key) {
            sink.info(format!("Extended group {} with key {}", group_name, key));
            deck.groups[idx].keys.push(key.clone());
            extended = true;
        }
    }
    if !extended {
        sink.info(format!("Duplicate group {} had no new keys", group_name));
    }
}

/// Shared by Group declarations and Chapter vocab rows (spec.md §4.3/§4.5):
/// resolve `subgroup_name`/`key_variant`, then confirm every key occurs
/// under that column. Missing keys do not prevent the Group from being
/// recorded.
pub fn check_group_integrity(
    subgroup_name: &str,
    key_variant: &str,
    keys: &[String],
    deck: &Deck,
    sink: &mut Sink,
) {
    let Some(category) = lookup::find_category(deck, subgroup_name) else {
        sink.issue(format!(
            "No selectable subgroup '{}' found for group",
            subgroup_name
        ));
        return;
    };

    let Some(key_variant_index) = lookup::variant_index(category, key_variant) else {
        sink.issue(format!(
            "No selectable variant '{}' found in selectable subgroup '{}'",
            key_variant, subgroup_name
        ));
        return;
    };

    for key in keys {
        if !lookup::key_in_column(category, key_variant_index, key) {
            sink.issue(format!(
                "No selectable '{}' under column '{}' found in selectable subgroup '{}'",
                key, key_variant, subgroup_name
            ));
        }
    }
}
