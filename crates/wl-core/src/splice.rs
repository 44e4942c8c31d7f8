//! Marker-guided edits of existing source files.
//!
//! Neither operation detects a previous application of the same snippet:
//! splicing the same content twice inserts it twice. Import insertion is
//! the exception, it refuses duplicates.

use crate::error::Result;
use crate::io::{read_lines, write_lines};
use std::cmp::Ordering;
use std::path::Path;

// ---------------------------------------------------------------------------
// Marker insertion
// ---------------------------------------------------------------------------

/// Split snippet content on any line break. Trailing empty lines are
/// dropped, leading ones kept.
fn snippet_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return vec![""];
    }
    let mut lines: Vec<&str> = content
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(line.len(), |(i, _)| i);
    &line[..end]
}

/// Insert `content` before (or after, with `insert_after`) every line that
/// contains `marker`, indenting each inserted line like the marker line.
/// Returns how many marker lines were found.
pub fn insert_at_marker(
    file: &Path,
    marker: &str,
    content: &str,
    insert_after: bool,
) -> Result<usize> {
    let lines = read_lines(file)?;
    let (result, hits) = splice_lines(&lines, marker, content, insert_after);
    write_lines(file, &result)?;
    if hits == 0 {
        tracing::warn!(file = %file.display(), marker, "marker not found");
    } else {
        tracing::info!(file = %file.display(), marker, "snippet inserted");
    }
    Ok(hits)
}

fn splice_lines(
    lines: &[String],
    marker: &str,
    content: &str,
    insert_after: bool,
) -> (Vec<String>, usize) {
    let insert = snippet_lines(content);
    let mut result = Vec::with_capacity(lines.len() + insert.len());
    let mut hits = 0;

    for line in lines {
        if !line.contains(marker) {
            result.push(line.clone());
            continue;
        }
        hits += 1;
        let indent = leading_whitespace(line);
        let indented: Vec<String> = insert.iter().map(|l| format!("{indent}{l}")).collect();
        if insert_after {
            result.push(line.clone());
            result.extend(indented);
        } else {
            result.extend(indented);
            result.push(line.clone());
        }
    }
    (result, hits)
}

// ---------------------------------------------------------------------------
// Import insertion
// ---------------------------------------------------------------------------

/// `java.` < `javax.` < `org.` < `com.` < everything else.
pub fn import_group(package: &str) -> u8 {
    if package.starts_with("java.") {
        0
    } else if package.starts_with("javax.") {
        1
    } else if package.starts_with("org.") {
        2
    } else if package.starts_with("com.") {
        3
    } else {
        4
    }
}

/// `"java.util.List"` or `"import java.util.List"` → `"import java.util.List;"`
pub fn normalize_import(import: &str) -> String {
    let mut normalized = import.trim().to_string();
    if !normalized.starts_with("import ") {
        normalized.insert_str(0, "import ");
    }
    if !normalized.ends_with(';') {
        normalized.push(';');
    }
    normalized
}

fn import_package(statement: &str) -> String {
    statement
        .trim()
        .replace("import ", "")
        .replace(';', "")
        .trim()
        .to_string()
}

fn compare_imports(a: &str, b: &str) -> Ordering {
    (import_group(a), a).cmp(&(import_group(b), b))
}

/// Outcome of [`insert_import_statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    AlreadyPresent,
}

/// Add an import to a Java file, keeping the import block in group order
/// and never duplicating a line.
pub fn insert_import_statement(file: &Path, import: &str) -> Result<ImportOutcome> {
    let normalized = normalize_import(import);
    let lines = read_lines(file)?;

    match plan_import(&lines, &normalized) {
        None => {
            tracing::warn!(file = %file.display(), import = %normalized, "import already present, skipped");
            Ok(ImportOutcome::AlreadyPresent)
        }
        Some(result) => {
            write_lines(file, &result)?;
            tracing::info!(file = %file.display(), import = %normalized, "import inserted");
            Ok(ImportOutcome::Inserted)
        }
    }
}

/// The new file lines, or `None` when the import already exists.
fn plan_import(lines: &[String], normalized: &str) -> Option<Vec<String>> {
    let mut package_line = None;
    let mut first_import = None;
    let mut last_import = None;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("package ") {
            package_line = Some(i);
        }
        if trimmed.starts_with("import ") {
            first_import.get_or_insert(i);
            last_import = Some(i);
            if trimmed == normalized {
                return None;
            }
        }
    }

    let mut result = lines.to_vec();
    match (first_import, last_import) {
        (Some(first), Some(last)) => {
            let new_package = import_package(normalized);
            let position = (first..=last)
                .find(|&i| {
                    let trimmed = lines[i].trim();
                    trimmed.starts_with("import ")
                        && compare_imports(&import_package(trimmed), &new_package)
                            == Ordering::Greater
                })
                .unwrap_or(last + 1);
            result.insert(position, normalized.to_string());
        }
        _ => match package_line {
            Some(p) => {
                result.insert(p + 1, String::new());
                result.insert(p + 2, normalized.to_string());
            }
            None => result.insert(0, normalized.to_string()),
        },
    }
    Some(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
