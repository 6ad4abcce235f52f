//! Category ("Selectables") handler — spec.md §4.2.

use crate::diagnostics::Sink;
use crate::model::{Category, Deck, Selectable};

#[derive(Default)]
pub struct CategoryHandler {
    current: Option<Category>,
    pending_name: Option<String>,
    /// Index into `deck.categories` of the category being extended, if any.
    extending_index: Option<usize>,
    awaiting_columns: bool,
    num_columns: usize,
}

impl CategoryHandler {
    pub fn handle_line(&mut self, fields: &[String], deck: &mut Deck, sink: &mut Sink) {
        if let Some(name) = fields[0].strip_prefix("## ") {
            self.start_or_extend(name.to_string(), deck, sink);
            return;
        }

        if self.awaiting_columns {
            self.handle_variant_names(fields, deck, sink);
            return;
        }

        self.handle_row(fields, deck, sink);
    }

    fn start_or_extend(&mut self, name: String, deck: &mut Deck, sink: &mut Sink) {
        self.finalize(deck);

        for (i, category) in deck.categories.iter().enumerate() {
            if category.name == name {
                sink.info("duplicated category");
                self.extending_index = Some(i);
                break;
            }
        }
        self.pending_name = Some(name);
        self.awaiting_columns = true;
    }

    fn handle_variant_names(&mut self, fields: &[String], deck: &mut Deck, sink: &mut Sink) {
        let mut fields = fields.to_vec();
        if let Some(stripped) = fields[0].strip_prefix('>') {
            fields[0] = stripped.to_string();
        } else {
            sink.issue("Subheader info line not indented, needs '>'");
        }

        self.num_columns = fields.len();

        if let Some(idx) = self.extending_index {
            let category = &deck.categories[idx];
            if category.variant_names != fields {
                sink.issue(format!(
                    "Category extension variant names '{}' do not match prior variant names '{}'",
                    fields.join(","),
                    category.variant_names.join(",")
                ));
            }
        } else {
            let name = self.pending_name.take().unwrap_or_default();
            self.current = Some(Category::new(name, fields));
        }

        self.awaiting_columns = false;
    }

    fn handle_row(&mut self, fields: &[String], deck: &mut Deck, sink: &mut Sink) {
        if fields.len() != self.num_columns {
            sink.issue(format!(
                "Number of selectable columns [{}] does not match header [{}]",
                fields.len(),
                self.num_columns
            ));
            return;
        }

        let selectable = Selectable {
            variants: fields.to_vec(),
        };

        if let Some(idx) = self.extending_index {
            let category = &mut deck.categories[idx];
            if category.selectables.contains(&selectable) {
                sink.info(format!(
                    "Found duplicate selectable '{}' while extending category, skipping",
                    fields[0]
                ));
                return;
            }
            sink.info(format!(
                "Extending category {} with selectable {}",
                category.name,
                fields.join(",")
            ));
            category.selectables.push(selectable);
        } else if let Some(current) = self.current.as_mut() {
            current.selectables.push(selectable);
        }
    }

    /// Flush the in-flight category into the Deck. Extension targets need
    /// no flush since they were mutated in place.
    pub fn finalize(&mut self, deck: &mut Deck) {
        if let Some(category) = self.current.take() {
            deck.categories.push(category);
        }
        self.extending_index = None;
        self.awaiting_columns = false;
        self.num_columns = 0;
        self.pending_name = None;
    }
}
