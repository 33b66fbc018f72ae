//! Node eligibility rules.
//!
//! Decides which files and folders survive into the book. Folder rules need
//! only the name and the raw child count, so the walker applies them during
//! descent. File rules need the note's content (self-exclusion marker, tag
//! lines), so they run after the walk; [`Eligibility`] evaluates every file
//! in scope exactly once and answers lookups for both the body and the TOCs.
//!
//! ## Matching Semantics
//!
//! - Filename and folder-name rules are exact matches after symmetric
//!   trimming.
//! - Extension rules are substring matches against the extension including
//!   its leading dot.
//! - Tag rules are case-insensitive and match per line, either as a
//!   hash-prefixed token (`#tagname`) anywhere in the line or in a
//!   `tag:`/`tags:` metadata line.
//! - Blank patterns are discarded first; an all-blank list is "no rule".

use crate::config::RuleSet;
use crate::vault::{Vault, VaultError};
use crate::walk::{NodeRecord, RecordKind};
use std::collections::HashMap;

/// Literal marker that excludes a note from every run. Generated books embed
/// it so they are never re-ingested as source content; users can also place
/// it by hand.
pub const BOOK_IGNORE_MARKER: &str = "<!--book-ignore-->";

/// True if this content belongs to a generated book (or was hand-marked).
pub fn is_book(content: &str) -> bool {
    content.contains(BOOK_IGNORE_MARKER)
}

/// Trimmed, non-blank patterns. Blank entries never exclude anything.
fn cleaned(patterns: &[String]) -> impl Iterator<Item = &str> {
    patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty())
}

/// True if `line` carries any of the given tags.
///
/// Standard form: the lower-cased line contains `#tagname`. Metadata form:
/// the line with whitespace removed starts with `tag:` or `tags:` and the
/// lower-cased line contains the tag text.
pub fn line_includes_tag(line: &str, tags: &[String]) -> bool {
    let lowered = line.to_lowercase();
    let standard = cleaned(tags).any(|t| lowered.contains(&format!("#{}", t.to_lowercase())));

    let squeezed: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let metadata = (squeezed.starts_with("tag:") || squeezed.starts_with("tags:"))
        && cleaned(tags).any(|t| lowered.contains(&t.to_lowercase()));

    standard || metadata
}

/// File eligibility: a file is dropped if its content carries the
/// self-exclusion marker, any line matches a tag rule, its extension
/// contains an extension pattern, or its filename equals a file pattern.
pub fn is_file_eligible(name: &str, extension: &str, content: &str, rules: &RuleSet) -> bool {
    if is_book(content) {
        return false;
    }
    if !rules.tags_to_ignore.is_empty()
        && content
            .lines()
            .any(|l| line_includes_tag(l, &rules.tags_to_ignore))
    {
        return false;
    }
    if cleaned(&rules.extensions_to_ignore).any(|ext| extension.contains(ext)) {
        return false;
    }
    if cleaned(&rules.files_to_ignore).any(|f| name.trim() == f) {
        return false;
    }
    true
}

/// Folder eligibility: dropped on exact name match, or when it has zero
/// direct children at all (unless `include_empty_folders`). The emptiness
/// check uses the raw, pre-filter child count: a folder that becomes empty
/// only after filtering still counts as non-empty.
pub fn is_folder_eligible(name: &str, raw_child_count: usize, rules: &RuleSet) -> bool {
    if cleaned(&rules.folders_to_ignore).any(|f| name.trim() == f) {
        return false;
    }
    if !rules.include_empty_folders && raw_child_count == 0 {
        return false;
    }
    true
}

/// Per-run file eligibility index.
///
/// Reads each file's content once through the vault and caches the verdict;
/// the body loop and every TOC consult the same index, so a note is never
/// read twice in one run.
pub struct Eligibility {
    files: HashMap<String, bool>,
}

impl Eligibility {
    /// Evaluate every file record in `records`. A content-read failure fails
    /// the whole run; a file is never silently treated as eligible or
    /// ineligible.
    pub fn evaluate(
        vault: &dyn Vault,
        records: &[NodeRecord],
        rules: &RuleSet,
    ) -> Result<Self, VaultError> {
        let mut files = HashMap::new();
        for record in records {
            if let RecordKind::File { extension, .. } = &record.kind {
                let content = vault.read(&record.path)?;
                let eligible = is_file_eligible(&record.name, extension, &content, rules);
                files.insert(record.path.clone(), eligible);
            }
        }
        Ok(Self { files })
    }

    /// Verdict for any record: files from the index, folders re-evaluated
    /// from name and raw child count.
    pub fn record(&self, record: &NodeRecord, rules: &RuleSet) -> bool {
        match &record.kind {
            RecordKind::File { .. } => self.files.get(&record.path).copied().unwrap_or(false),
            RecordKind::Folder { raw_child_count } => {
                is_folder_eligible(&record.name, *raw_child_count, rules)
            }
        }
    }
}
