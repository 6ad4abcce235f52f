//! Chapter (Templates) handler — spec.md §4.5 and §4.8.

use crate::diagnostics::Sink;
use crate::model::{Chapter, Deck, Template};
use crate::parser::group::{check_group_integrity, parse_keys};
use crate::parser::placeholder;

#[derive(Default)]
pub struct ChapterHandler {
    current: Option<Chapter>,
    pending_name: Option<String>,
    awaiting_columns: bool,
    num_columns: usize,
    num_sides: usize,
    /// Sides accepted so far for the card between `{` and `}`. Only moved
    /// into `chapter.templates` by the `}` handler — a card left open at
    /// EOF, a new subheader, or another `{` is dropped rather than carried
    /// into the Deck half-filled with no diagnostic to explain it.
    pending_sides: Option<Vec<String>>,
}

impl ChapterHandler {
    pub fn handle_line(&mut self, fields: &[String], deck: &mut Deck, sink: &mut Sink) {
        if let Some(name) = fields[0].strip_prefix("## ") {
            self.start(name.to_string(), deck, sink);
            return;
        }

        if self.awaiting_columns {
            self.handle_column_variants(fields, sink);
            return;
        }

        if fields[0].starts_with(">vocab") {
            self.handle_vocab(fields, deck, sink);
            return;
        }

        if fields[0].starts_with('{') {
            self.num_sides = 0;
            self.pending_sides = Some(Vec::new());
            return;
        }

        if fields[0].starts_with('}') {
            self.close_template(sink);
            return;
        }

        self.handle_side(fields, deck, sink);
    }

    fn start(&mut self, name: String, deck: &mut Deck, sink: &mut Sink) {
        self.finalize(deck);
        let _ = sink;
        self.pending_name = Some(name);
        self.awaiting_columns = true;
        self.pending_sides = None;
    }

    fn handle_column_variants(&mut self, fields: &[String], sink: &mut Sink) {
        let mut fields = fields.to_vec();
        if let Some(stripped) = fields[0].strip_prefix('>') {
            fields[0] = stripped.to_string();
        } else {
            sink.issue("Subheader info line not indented, needs '>'");
        }
        self.num_columns = fields.len();

        let marked: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, label)| label.starts_with('^'))
            .map(|(idx, _)| idx)
            .collect();
        if marked.len() > 1 {
            sink.issue(
                "More than one column is marked forced-first ('^'); only the last is honored",
            );
        }

        let forced_idx = marked.last().copied().unwrap_or(0);
        if let Some(label) = fields.get_mut(forced_idx) {
            if let Some(stripped) = label.strip_prefix('^') {
                *label = stripped.to_string();
            }
        }
        if forced_idx > 0 {
            let label = fields.remove(forced_idx);
            fields.insert(0, label);
        }

        let name = self.pending_name.take().unwrap_or_default();
        self.current = Some(Chapter::new(name, fields, forced_idx));
        self.awaiting_columns = false;
    }

    fn handle_vocab(&mut self, fields: &[String], deck: &Deck, sink: &mut Sink) {
        if fields.len() != 4 {
            if fields[0].len() > ">vocab".len() {
                sink.issue("vocab sections must be separated by semicolons (;)");
            } else {
                sink.issue("Wrong separators, check semicolon use");
            }
            return;
        }

        let subgroup_name = fields[1].clone();
        let key_variant = fields[2].clone();
        let keys = parse_keys(&fields[3]);

        check_group_integrity(&subgroup_name, &key_variant, &keys, deck, sink);

        if let Some(chapter) = self.current.as_mut() {
            chapter.vocab.push(crate::model::Group {
                name: "vocab".to_string(),
                subgroup_name,
                key_variant_name: key_variant,
                keys,
            });
        }
    }

    fn close_template(&mut self, sink: &mut Sink) {
        let Some(sides) = self.pending_sides.take() else {
            return;
        };
        if self.num_sides != self.num_columns {
            sink.issue(format!(
                "Number of card sides [{}] does not match header [{}]",
                self.num_sides, self.num_columns
            ));
        }
        if let Some(chapter) = self.current.as_mut() {
            chapter.templates.push(Template { sides });
        }
    }

    fn handle_side(&mut self, fields: &[String], deck: &Deck, sink: &mut Sink) {
        let side_text = fields.concat();

        let Some(chapter) = self.current.as_ref() else {
            return;
        };
        let forced_first_side = chapter.forced_first_side;
        let is_forced_first = self.num_sides == forced_first_side;
        let true_label_index = if is_forced_first {
            0
        } else if self.num_sides < forced_first_side {
            self.num_sides + 1
        } else {
            self.num_sides
        };

        let Some(raw_default) = chapter.column_variants.get(true_label_index) else {
            self.num_sides += 1;
            return;
        };
        let default_variant = raw_default.strip_prefix('~').unwrap_or(raw_default).to_string();

        let ok = placeholder::check_side_integrity(&side_text, &default_variant, deck, sink);

        if ok {
            let Some(sides) = self.pending_sides.as_mut() else {
                self.num_sides += 1;
                return;
            };
            if is_forced_first {
                sides.insert(0, side_text);
            } else {
                sides.push(side_text);
            }
        }

        self.num_sides += 1;
    }

    pub fn finalize(&mut self, deck: &mut Deck) {
        if let Some(chapter) = self.current.take() {
            deck.chapters.push(chapter);
        }
        self.awaiting_columns = false;
        self.num_columns = 0;
        self.num_sides = 0;
        self.pending_name = None;
        self.pending_sides = None;
    }
}
