//! Placeholder mini-parser and validator — spec.md §4.6. Scans a template
//! side string for `[group(:variant)?]` and `<pairgroup:alias(:variant)?>`
//! occurrences and validates each against the already-parsed Deck.
//!
//! A hand-written scanner, per spec.md §9's explicit design note: bracketed
//! spans are treated as opaque and only parsed after extraction.

use crate::diagnostics::Sink;
use crate::lookup;
use crate::model::{ColumnType, Deck};

/// Scan `text` for all non-nested `[...]` spans, returning their interiors
/// in order of appearance.
fn scan_bracketed(text: &str, open: char, close: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch != open {
            continue;
        }
        let mut end = None;
        for (idx, c) in chars.by_ref() {
            if c == close {
                end = Some(idx);
                break;
            }
        }
        if let Some(end) = end {
            out.push(text[start + open.len_utf8()..end].to_string());
        }
    }
    out
}

/// Validate every placeholder in `text` against `deck`, given the side's
/// governing default variant (leading `~` already stripped by the caller).
/// Returns `true` when every placeholder passed integrity, mirroring
/// spec.md's "a side is appended only when all placeholder checks pass".
pub fn check_side_integrity(text: &str, default_variant: &str, deck: &Deck, sink: &mut Sink) -> bool {
    let mut integrity_good = true;

    for raw in scan_bracketed(text, '[', ']') {
        if !check_group_placeholder(&raw, default_variant, deck, sink) {
            integrity_good = false;
        }
    }

    let pg_raw = scan_bracketed(text, '<', '>');
    if !pg_raw.is_empty() && deck.pair_groups.is_empty() {
        sink.issue("Contains pair group, but no pair groups in deck");
        return false;
    }

    let mut first_pg_name: Option<String> = None;
    for raw in pg_raw {
        if !check_pair_group_placeholder(&raw, default_variant, deck, sink, &mut first_pg_name) {
            integrity_good = false;
        }
    }

    integrity_good
}

fn check_group_placeholder(raw: &str, default_variant: &str, deck: &Deck, sink: &mut Sink) -> bool {
    let mut parts = raw.splitn(2, ':');
    let group_name = parts.next().unwrap_or("");
    let variant = parts.next().unwrap_or(default_variant);

    let Some(group) = lookup::find_group(deck, group_name) else {
        sink.issue(format!("No group '{}' found for side", group_name));
        return false;
    };

    let Some(category) = lookup::find_category(deck, &group.subgroup_name) else {
        return false;
    };

    if lookup::variant_index(category, variant).is_none() {
        sink.issue(format!(
            "No variant '{}' in subgroup '{}', used in group '{}'",
            variant, category.name, group_name
        ));
        return false;
    }

    true
}

fn check_pair_group_placeholder(
    raw: &str,
    default_variant: &str,
    deck: &Deck,
    sink: &mut Sink,
    first_pg_name: &mut Option<String>,
) -> bool {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() < 2 {
        sink.issue(format!(
            "Not enough type information in Pair Group replaceable '{}'",
            raw
        ));
        return false;
    }

    let mut ok = true;
    let pg_name = parts[0];
    match first_pg_name {
        None => *first_pg_name = Some(pg_name.to_string()),
        Some(seen) if seen != pg_name => {
            sink.issue(format!(
                "Pair group name '{}' does not match others in the side",
                pg_name
            ));
            ok = false;
        }
        Some(_) => {}
    }

    let Some(pair_group) = lookup::find_pair_group(deck, pg_name) else {
        sink.issue(format!("Could not find pair group '{}'", pg_name));
        return false;
    };

    let pg_alias = parts[1];
    let Some(alias_index) = pair_group.column_names.iter().position(|n| n == pg_alias) else {
        sink.issue(format!("Could not find alias '{}'", pg_alias));
        return false;
    };
    let pg_variant = parts.get(2).copied();

    let is_group_column = matches!(&pair_group.column_types[alias_index], ColumnType::Group);

    let category = match &pair_group.column_types[alias_index] {
        ColumnType::Selectable { category, .. } => lookup::find_category(deck, category),
        ColumnType::Group => {
            let Some(first_pair) = pair_group.pairs.first() else {
                return ok;
            };
            let Some(representative_name) = first_pair.get(alias_index) else {
                return ok;
            };
            lookup::find_group(deck, representative_name)
                .and_then(|g| lookup::find_category(deck, &g.subgroup_name))
        }
    };

    let Some(category) = category else {
        return ok;
    };

    match pg_variant {
        Some(variant) => {
            if lookup::variant_index(category, variant).is_none() {
                if is_group_column {
                    sink.issue(format!(
                        "No variant for group's subgroup '{}' named '{}'",
                        category.name, variant
                    ));
                } else {
                    sink.issue(format!(
                        "No variant in '{}' named '{}'",
                        category.name, variant
                    ));
                }
                ok = false;
            }
        }
        None => {
            if lookup::variant_index(category, default_variant).is_none() {
                if is_group_column {
                    sink.issue(format!(
                        "Autoassigned variant for group's subgroup '{}' does not match '{}'",
                        category.name, default_variant
                    ));
                } else {
                    sink.issue(format!(
                        "Autoassigned variant for '{}' does not match '{}'",
                        category.name, default_variant
                    ));
                }
                ok = false;
            }
        }
    }

    ok
}
