//! Output rendering — spec.md §6. The Deck's four top-level collections
//! serialize directly (see [`crate::model::Deck`]); this module covers the
//! diagnostic text format and JSON document assembly.

use crate::model::{Deck, Diagnostic, Severity};
use anyhow::{Context, Result};

/// Serialize the Deck as the §6 JSON document: exactly the four top-level
/// collections, no extra keys.
pub fn render_deck_json(deck: &Deck) -> Result<String> {
    serde_json::to_string_pretty(deck).context("serializing deck to JSON")
}

/// Render the diagnostic list as the original's `ISSUES:` text block: one
/// `(line_number, "message")` pair per line. When `list_infos` is set,
/// info-severity diagnostics are included as well; otherwise only issues
/// are printed. The `ISSUES:` header itself only appears when there is at
/// least one issue-severity diagnostic to report — a clean file prints
/// nothing, matching the original's `print_issues` guarding the header on
/// `len(self.issues) > 0`.
pub fn render_diagnostics_text(diagnostics: &[Diagnostic], list_infos: bool) -> String {
    if !diagnostics.iter().any(|d| d.severity == Severity::Issue) {
        return String::new();
    }

    let mut out = String::from("ISSUES:\n");
    for diagnostic in diagnostics {
        if diagnostic.severity != Severity::Issue && !list_infos {
            continue;
        }
        out.push_str(&format!(
            "({}, \"{}\")\n",
            diagnostic.line, diagnostic.message
        ));
    }
    out
}

/// Render just the diagnostic list as JSON, for `validate --json`.
pub fn render_diagnostics_json(diagnostics: &[Diagnostic]) -> Result<String> {
    serde_json::to_string_pretty(diagnostics).context("serializing diagnostics to JSON")
}
