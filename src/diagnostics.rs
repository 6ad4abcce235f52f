use crate::model::{Diagnostic, Severity};

/// Append-only diagnostic log, stamped with the line number active when the
/// driver hands out the sink. Two severities: `issue` (validation failure)
/// and `info` (non-fatal extension/redundancy note).
pub struct Sink<'a> {
    line: usize,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Sink<'a> {
    pub fn new(line: usize, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self { line, diagnostics }
    }

    pub fn issue(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            line: self.line,
            severity: Severity::Issue,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            line: self.line,
            severity: Severity::Info,
            message: message.into(),
        });
    }
}

pub fn has_issues(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Issue)
}
