//! Markdown title index: scan a root directory for `.md` files, derive a
//! display title per file, and merge the result into the persisted
//! `_index.yaml` record list.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;


pub const INDEX_FILENAME: &str = "_index.yaml";

/// One record of the persisted index. `file` is the unique key; field order
/// is the serialized key order (title before file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    pub file: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOptions {
    /// Drop entries whose file is no longer present in the scanned directory.
    pub prune: bool,
}

#[derive(Debug, Default)]
pub struct IndexOutcome {
    pub entries: Vec<IndexEntry>,
    pub written: bool,
    pub warnings: Vec<String>,
}

/// File names (not paths) of regular `.md` files directly under `root`,
/// sorted lexicographically. Non-recursive; an empty directory is not an
/// error.
pub fn scan_markdown_files(root: &Path) -> Result<Vec<String>, String> {
    let entries =
        fs::read_dir(root).map_err(|e| format!("failed to read {}: {e}", root.display()))?;
    let mut files = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(".md") {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}

/// Title of a markdown file: the text of the first single-`#` heading line,
/// trimmed. Falls back to a title derived from the file name when no heading
/// exists or the file cannot be read; read failures land in `warnings` and
/// never abort the run.
pub fn extract_title(path: &Path, warnings: &mut Vec<String>) -> String {
    match fs::read_to_string(path) {
        Ok(text) => {
            for line in text.lines() {
                if let Some(title) = heading_text(line) {
                    return title.to_string();
                }
            }
        }
        Err(e) => warnings.push(format!("failed to read {}: {e}", path.display())),
    }
    fallback_title(path)
}

/// Matches exactly one leading `#` followed by whitespace. `##` and deeper
/// headings do not count as document titles.
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some(rest.trim())
}

fn fallback_title(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// One entry per scanned file name, in input order (sorting happens in the
/// merge).
pub fn build_entries(
    root: &Path,
    filenames: &[String],
    warnings: &mut Vec<String>,
) -> Vec<IndexEntry> {
    filenames
        .iter()
        .map(|name| IndexEntry {
            title: extract_title(&root.join(name), warnings),
            file: name.clone(),
        })
        .collect()
}

/// Loads the persisted index. Absence, unreadable content, or anything that
/// is not a list of `{title, file}` records degrades to an empty index with a
/// warning; a bad index file never fails the run.
pub fn read_existing_index(path: &Path, warnings: &mut Vec<String>) -> Vec<IndexEntry> {
    if !path.exists() {
        return Vec::new();
    }
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warnings.push(format!("failed to read {}: {e}", path.display()));
            return Vec::new();
        }
    };
    if text.trim().is_empty() {
        return Vec::new();
    }
    match serde_yaml::from_str::<Vec<IndexEntry>>(&text) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(format!("failed to parse {}: {e}", path.display()));
            Vec::new()
        }
    }
}

/// Merge keyed by `file`: fresh titles overwrite existing ones, unknown files
/// are inserted, and the map extraction yields ascending `file` order.
pub fn merge_entries(existing: Vec<IndexEntry>, fresh: Vec<IndexEntry>) -> Vec<IndexEntry> {
    let mut merged = existing
        .into_iter()
        .map(|entry| (entry.file.clone(), entry))
        .collect::<BTreeMap<String, IndexEntry>>();
    for entry in fresh {
        match merged.get_mut(&entry.file) {
            Some(current) => current.title = entry.title,
            None => {
                merged.insert(entry.file.clone(), entry);
            }
        }
    }
    merged.into_values().collect()
}

/// Retains only entries whose file survived the current scan.
pub fn prune_entries(entries: Vec<IndexEntry>, live: &BTreeSet<String>) -> Vec<IndexEntry> {
    entries
        .into_iter()
        .filter(|entry| live.contains(&entry.file))
        .collect()
}

/// Full overwrite of the index file. No atomic rename; the previous content
/// is untouched until this single write.
pub fn write_index(path: &Path, entries: &[IndexEntry]) -> Result<(), String> {
    let text =
        serde_yaml::to_string(entries).map_err(|e| format!("failed to serialize index: {e}"))?;
    fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

/// End-to-end index build for one root directory. A directory with no
/// markdown files is reported via `written: false` and nothing is rewritten.
pub fn run_index(root: &Path, options: IndexOptions) -> Result<IndexOutcome, String> {
    let mut warnings = Vec::new();
    let files = scan_markdown_files(root)?;
    if files.is_empty() {
        return Ok(IndexOutcome {
            entries: Vec::new(),
            written: false,
            warnings,
        });
    }
    let index_path = root.join(INDEX_FILENAME);
    let existing = read_existing_index(&index_path, &mut warnings);
    let fresh = build_entries(root, &files, &mut warnings);
    let mut merged = merge_entries(existing, fresh);
    if options.prune {
        let live = files.into_iter().collect::<BTreeSet<_>>();
        merged = prune_entries(merged, &live);
    }
    write_index(&index_path, &merged)?;
    Ok(IndexOutcome {
        entries: merged,
        written: true,
        warnings,
    })
}
