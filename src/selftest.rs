//! Selftest runner — supplement grounded in the teacher's `selftest.rs`:
//! walk a directory or glob of deck files, parse each independently, and
//! summarize issues/infos/runtime failures across the set.

use crate::model::{Diagnostic, Severity};
use crate::parser::Driver;
use crate::util;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    pub issues: usize,
    pub infos: usize,
    pub runtime_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelftestSummary {
    pub fixtures: String,
    pub total_files: usize,
    pub total_issues: usize,
    pub total_infos: usize,
    pub runtime_failures: usize,
    pub worst_files: Vec<FileResult>,
}

pub fn run_selftest(fixtures: &str, glob_pattern: &str) -> Result<SelftestSummary> {
    let files = collect_files(fixtures, glob_pattern)?;
    let results: Vec<FileResult> = files.iter().map(|path| process_file(path)).collect();
    Ok(summarize(fixtures, results))
}

fn collect_files(fixtures: &str, glob_pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(fixtures);

    if path.is_dir() {
        let pattern = path.join(glob_pattern);
        let pattern_str = pattern
            .to_str()
            .ok_or_else(|| anyhow!("invalid glob pattern"))?;
        let mut files = Vec::new();
        for entry in glob::glob(pattern_str)? {
            files.push(entry?);
        }
        files.sort();
        return Ok(files);
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in glob::glob(fixtures)? {
        files.push(entry?);
    }
    if files.is_empty() {
        return Err(anyhow!("fixtures path not found: {}", fixtures));
    }
    files.sort();
    Ok(files)
}

fn process_file(path: &Path) -> FileResult {
    match util::read_to_string(path).and_then(|content| util::tokenize_lines(&content)) {
        Ok(lines) => {
            let mut driver = Driver::new();
            driver.begin_file();
            for fields in lines {
                driver.feed_line(fields);
            }
            driver.end_of_file();

            let issues = count_issues(driver.diagnostics());
            let infos = driver.diagnostics().len() - issues;
            FileResult {
                file: path.display().to_string(),
                issues,
                infos,
                runtime_error: None,
            }
        }
        Err(err) => FileResult {
            file: path.display().to_string(),
            issues: 0,
            infos: 0,
            runtime_error: Some(err.to_string()),
        },
    }
}

fn count_issues(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.severity == Severity::Issue).count()
}

fn summarize(fixtures: &str, results: Vec<FileResult>) -> SelftestSummary {
    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.issues).sum();
    let total_infos: usize = results.iter().map(|r| r.infos).sum();
    let runtime_failures = results.iter().filter(|r| r.runtime_error.is_some()).count();

    let mut worst = results;
    worst.sort_by_key(|r| std::cmp::Reverse(r.issues));
    worst.truncate(5);

    SelftestSummary {
        fixtures: fixtures.to_string(),
        total_files,
        total_issues,
        total_infos,
        runtime_failures,
        worst_files: worst,
    }
}

pub fn summarize_text(summary: &SelftestSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fixtures: {}\n", summary.fixtures));
    out.push_str(&format!("Total files: {}\n", summary.total_files));
    out.push_str(&format!("Total issues: {}\n", summary.total_issues));
    out.push_str(&format!("Total infos: {}\n", summary.total_infos));
    out.push_str(&format!("Runtime failures: {}\n", summary.runtime_failures));
    out.push_str("Worst files:\n");
    for result in &summary.worst_files {
        if result.issues > 0 || result.runtime_error.is_some() {
            let reason = result
                .runtime_error
                .clone()
                .unwrap_or_else(|| format!("{} issues, {} infos", result.issues, result.infos));
            out.push_str(&format!("- {}: {}\n", result.file, reason));
        }
    }
    out
}
