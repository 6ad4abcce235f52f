//! Section dispatcher / state machine — spec.md §4.1. The top-level line
//! handler that recognizes headers, subheaders, comments, and blank lines;
//! selects the active section handler; performs finalization when the
//! section changes.

pub mod category;
pub mod chapter;
pub mod group;
pub mod pairgroup;
pub mod placeholder;

use crate::diagnostics::Sink;
use crate::model::{Deck, Diagnostic};
use category::CategoryHandler;
use chapter::ChapterHandler;
use pairgroup::PairGroupHandler;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Categories,
    Groups,
    PairGroups,
    Templates,
}

/// Owns the accumulated [`Deck`], the diagnostic log, and every handler's
/// in-flight state. A single mutable instance drives one or more files in
/// sequence (spec.md §5: prior files replay before the primary file,
/// preserving the Deck and diagnostics but resetting transient state at
/// each file boundary).
#[derive(Default)]
pub struct Driver {
    deck: Deck,
    diagnostics: Vec<Diagnostic>,
    line_index: usize,
    section: Option<Section>,
    has_pair_groups: bool,
    /// When set, a fault-boundary trip appends the underlying panic
    /// payload to its issue message (SPEC_FULL.md §4.10's `--debug`).
    debug: bool,

    category: CategoryHandler,
    pair_group: PairGroupHandler,
    chapter: ChapterHandler,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_issues(&self) -> bool {
        crate::diagnostics::has_issues(&self.diagnostics)
    }

    /// Resets the line counter for a new file while preserving the
    /// accumulated Deck and diagnostics (spec.md §5).
    pub fn begin_file(&mut self) {
        self.line_index = 0;
    }

    /// Feed one tokenized line (an ordered, non-empty sequence of fields).
    pub fn feed_line(&mut self, fields: Vec<String>) {
        self.line_index += 1;

        if fields.is_empty() || (fields.len() == 1 && fields[0].is_empty()) {
            return;
        }
        if fields[0].starts_with("//") || fields[0].starts_with("<!--") {
            return;
        }

        if let Some(header) = fields[0].strip_prefix("# ") {
            self.change_section(header);
            return;
        }

        let Some(section) = self.section else {
            return;
        };

        let deck = &mut self.deck;
        let diagnostics = &mut self.diagnostics;
        let line_index = self.line_index;
        let category = &mut self.category;
        let pair_group = &mut self.pair_group;
        let chapter = &mut self.chapter;

        let result = panic::catch_unwind(AssertUnwindSafe(move || {
            let mut sink = Sink::new(line_index, diagnostics);
            match section {
                Section::Categories => category.handle_line(&fields, deck, &mut sink),
                Section::Groups => group::handle_line(&fields, deck, &mut sink),
                Section::PairGroups => pair_group.handle_line(&fields, deck, &mut sink),
                Section::Templates => chapter.handle_line(&fields, deck, &mut sink),
            }
        }));

        if let Err(payload) = result {
            let mut sink = Sink::new(self.line_index, &mut self.diagnostics);
            if self.debug {
                sink.issue(format!(
                    "Unidentifiable error - may be caused by prior errors ({})",
                    fault_message(&payload)
                ));
            } else {
                sink.issue("Unidentifiable error - may be caused by prior errors");
            }
        }
    }

    fn change_section(&mut self, header: &str) {
        let next = match header {
            "Selectables" => Some(Section::Categories),
            "Groups" => Some(Section::Groups),
            "Pair Groups" | "PairGroups" => Some(Section::PairGroups),
            "Templates" | "Cards" => Some(Section::Templates),
            other => {
                let mut sink = Sink::new(self.line_index, &mut self.diagnostics);
                sink.issue(format!("Bad header '{}'", other));
                None
            }
        };

        // Finalization is keyed to the section actually being left, not the
        // one being entered (spec.md §4.1) — a direct `Selectables` ->
        // `Cards` jump must still flush the in-flight Category. A header
        // that re-enters the same section (e.g. a second `# Selectables`)
        // is not a departure and leaves the in-flight entity untouched.
        if next != self.section {
            match self.section {
                Some(Section::Categories) => self.category.finalize(&mut self.deck),
                Some(Section::PairGroups) if self.has_pair_groups => {
                    self.pair_group.finalize(&mut self.deck)
                }
                _ => {}
            }
        }

        if next == Some(Section::PairGroups) {
            self.has_pair_groups = true;
        }
        self.section = next;
    }

    /// Finalize whatever entity is in flight — a Chapter is always flushed
    /// only here (spec.md §4.1); a Category or Pair Group only reaches this
    /// point in flight if the file ends without a later section header to
    /// trigger their usual finalize-on-section-change (spec.md §8 scenario
    /// 1: a file consisting solely of `# Selectables` must still finalize
    /// its last Category into the Deck). Clears transient per-file state
    /// while preserving the accumulated Deck and diagnostics (spec.md §5/§9).
    pub fn end_of_file(&mut self) {
        self.category.finalize(&mut self.deck);
        self.pair_group.finalize(&mut self.deck);
        self.chapter.finalize(&mut self.deck);
        self.section = None;
        self.line_index = 0;
    }
}

fn fault_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
