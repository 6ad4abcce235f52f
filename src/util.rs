use anyhow::{Context, Result};
use std::path::Path;

/// Tokenize a file's contents into an ordered sequence of lines, each an
/// ordered sequence of `;`-delimited fields. This is the CSV-like tokenizer
/// spec.md keeps out of the core — the core only ever sees `Vec<String>`
/// rows.
///
/// Splits on physical lines itself rather than handing the whole text to one
/// `csv::Reader`: the `csv` crate's reader silently skips blank physical
/// lines instead of yielding an empty record for them, which would leave
/// `Driver::line_index` permanently behind the true line number for every
/// line following a blank one. Each physical line is tokenized on its own,
/// so a blank line still yields an (empty) entry for `feed_line` to count.
pub fn tokenize_lines(text: &str) -> Result<Vec<Vec<String>>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        lines.push(tokenize_one_line(line)?);
    }
    // `split('\n')` on text ending with a newline yields a trailing empty
    // element that is not a real blank physical line; drop it.
    if text.ends_with('\n') {
        lines.pop();
    }
    Ok(lines)
}

fn tokenize_one_line(line: &str) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(record) => {
            let record = record.context("malformed CSV-like record")?;
            Ok(record.iter().map(|field| field.to_string()).collect())
        }
        None => Ok(Vec::new()),
    }
}

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub fn write_string(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
