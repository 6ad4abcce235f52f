//! Pair-Group handler — spec.md §4.4.

use crate::diagnostics::Sink;
use crate::lookup;
use crate::model::{ColumnType, Deck, PairGroup};

#[derive(Default)]
pub struct PairGroupHandler {
    current: Option<PairGroup>,
    pending_name: Option<String>,
    awaiting_columns: bool,
    num_columns: usize,
}

impl PairGroupHandler {
    pub fn handle_line(&mut self, fields: &[String], deck: &mut Deck, sink: &mut Sink) {
        if let Some(name) = fields[0].strip_prefix("## ") {
            self.start(name.to_string(), deck, sink);
            return;
        }

        if self.awaiting_columns {
            self.handle_typing(fields, deck, sink);
            return;
        }

        self.handle_pair_row(fields, deck, sink);
    }

    fn start(&mut self, name: String, deck: &mut Deck, sink: &mut Sink) {
        self.finalize(deck);
        self.pending_name = Some(name);
        self.awaiting_columns = true;
    }

    fn handle_typing(&mut self, fields: &[String], deck: &Deck, sink: &mut Sink) {
        let mut fields = fields.to_vec();
        if let Some(stripped) = fields[0].strip_prefix('>') {
            fields[0] = stripped.to_string();
        } else {
            sink.issue("Subheader info line not indented, needs '>'");
        }
        self.num_columns = fields.len();

        let mut names = Vec::with_capacity(fields.len());
        let mut types = Vec::with_capacity(fields.len());
        let mut valid = true;

        for entry in &fields {
            let mut parts = entry.splitn(2, '=');
            let name = parts.next().unwrap_or("").to_string();
            let type_str = parts.next().unwrap_or("");
            names.push(name.clone());

            match classify_type(type_str, &name, deck, sink) {
                Some(column_type) => types.push(column_type),
                None => {
                    valid = false;
                    // keep a placeholder so column_types stays aligned with
                    // column_names even when typing failed.
                    types.push(ColumnType::Group);
                }
            }
        }

        let pending_name = self.pending_name.take().unwrap_or_default();
        if lookup::find_pair_group(deck, &pending_name).is_some() {
            sink.issue(format!(
                "Extending pairgroup {} is not supported",
                pending_name
            ));
            valid = false;
        }

        self.current = Some(PairGroup::new(pending_name, names, types, valid));
        self.awaiting_columns = false;
    }

    /// Validate and (if valid) append a pair row.
    pub fn handle_pair_row(&mut self, fields: &[String], deck: &Deck, sink: &mut Sink) {
        let column_count_matches = fields.len() == self.num_columns;
        if !column_count_matches {
            sink.issue(format!(
                "Number of pair columns [{}] does not match header [{}]",
                fields.len(),
                self.num_columns
            ));
        }

        let Some(current) = self.current.as_mut() else {
            return;
        };

        if !current.valid {
            sink.issue("Pair not parsed as pair group is invalid");
            return;
        }

        let limit = fields.len().min(current.column_types.len());
        for count in 0..limit {
            let member = &fields[count];
            match current.column_types[count].clone() {
                ColumnType::Group => {
                    let Some(group) = lookup::find_group(deck, member) else {
                        sink.issue(format!(
                            "No matching group for pair member '{}' at index {}",
                            member, count
                        ));
                        return;
                    };
                    match &current.subgroup_checking[count] {
                        None => {
                            current.subgroup_checking[count] = Some(group.subgroup_name.clone());
                        }
                        Some(expected) if expected != &group.subgroup_name => {
                            sink.issue(format!(
                                "Group's subgroup '{}' must match subgroups in other groups of this column ({})",
                                group.subgroup_name, expected
                            ));
                        }
                        Some(_) => {}
                    }
                }
                ColumnType::Selectable { category, variant } => {
                    let Some(found_category) = lookup::find_category(deck, &category) else {
                        sink.issue(format!("Could not find subgroup name '{}'", category));
                        return;
                    };
                    let Some(variant_index) = lookup::variant_index(found_category, &variant)
                    else {
                        sink.issue(format!("Did not find variant '{}'", variant));
                        return;
                    };
                    if !lookup::key_in_column(found_category, variant_index, member) {
                        sink.issue(format!(
                            "Could not find selectable '{}' in subgroup '{}', column {}",
                            member, category, variant_index
                        ));
                        return;
                    }
                }
            }
        }

        // A row whose field count doesn't match the column count has
        // already logged its issue above; never let it into `pairs`, where
        // it would violate the "every pair row has length equal to
        // len(column_names)" invariant for an otherwise-valid PairGroup.
        if column_count_matches {
            current.pairs.push(fields.to_vec());
        }
    }

    pub fn finalize(&mut self, deck: &mut Deck) {
        if let Some(pair_group) = self.current.take() {
            deck.pair_groups.push(pair_group);
        }
        self.awaiting_columns = false;
        self.num_columns = 0;
        self.pending_name = None;
    }
}

/// Parse a `type` token (`group` or `selectable:<category>:<variant>`) into
/// a [`ColumnType`], logging the issues spec.md §4.4 names. Returns `None`
/// when the column's typing is unrecoverable.
fn classify_type(
    type_str: &str,
    column_name: &str,
    deck: &Deck,
    sink: &mut Sink,
) -> Option<ColumnType> {
    let parts: Vec<&str> = type_str.split(':').collect();
    let head = parts.first().copied().unwrap_or("");

    if head == "group" {
        return Some(ColumnType::Group);
    }
    if head != "selectable" {
        sink.issue("Pair members must be either groups or selectables");
        return None;
    }

    if parts.len() < 3 {
        sink.issue(format!(
            "Insufficient type information for column '{}'",
            column_name
        ));
        return None;
    }
    let category_name = parts[1];
    let variant_name = parts[2];

    let Some(category) = lookup::find_category(deck, category_name) else {
        sink.issue(format!(
            "Subgroup '{}' for column '{}' not found",
            category_name, column_name
        ));
        return None;
    };

    if lookup::variant_index(category, variant_name).is_none() {
        sink.issue(format!(
            "Variant name '{}' not found in '{}' for column '{}'",
            variant_name, category_name, column_name
        ));
        return None;
    }

    Some(ColumnType::Selectable {
        category: category_name.to_string(),
        variant: variant_name.to_string(),
    })
}
