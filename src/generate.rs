//! Book generation pipeline.
//!
//! Orchestrates the run: resolve the starting point, walk the vault, filter,
//! build TOCs, assemble, write. Each stage hands an owned value to the next;
//! nothing is shared across runs, and the whole output is recomputed from
//! scratch every time.
//!
//! ```text
//! resolve_start  path → (start, depth_offset)
//! walk           vault tree → flat NodeRecord list
//! filter         content reads → Eligibility index
//! toc/assemble   surviving nodes → book text
//! write          text → vault file (create or confirm-overwrite)
//! ```
//!
//! [`plan_book`] runs everything up to (not including) the write and is what
//! `check` uses as a dry run; [`generate_book`] is plan + write.

use crate::assemble::{self, BookNode};
use crate::config::RuleSet;
use crate::filter::{self, Eligibility};
use crate::toc;
use crate::types::BookDocument;
use crate::vault::{Host, Vault, VaultError};
use crate::walk::{self, NodeRecord, WalkMode};
use crate::write::{self, WriteOutcome};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// The vault root itself did not resolve; there is nothing to compile.
    #[error("empty vault: the root folder could not be resolved")]
    EmptyVault,
    /// The user-specified starting folder does not exist.
    #[error("could not find folder: {0}")]
    FolderNotFound(String),
    #[error(transparent)]
    Vault(#[from] VaultError),
}

/// Resolve a user-supplied starting path into the normalized slash-rooted
/// form plus the heading depth offset for that subtree.
///
/// The offset is the number of path separators above the chosen root, so a
/// book started at `/A/B` puts `B` at heading level 1.
pub fn resolve_start(raw: &str) -> (String, usize) {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return ("/".to_string(), 0);
    }
    let mut start = trimmed.trim_end_matches('/').to_string();
    if !start.starts_with('/') {
        start.insert(0, '/');
    }
    let offset = start.matches('/').count() - 1;
    (start, offset)
}

/// True when `path` is `start` itself or sits below it. Matches on path
/// boundaries: `/Notes2` is not within `/Notes`.
fn is_within(path: &str, start: &str) -> bool {
    start == "/"
        || path == start
        || path
            .strip_prefix(start)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Everything a run decides before touching the output file.
#[derive(Debug, Serialize)]
pub struct BookPlan {
    pub file_name: String,
    pub start: String,
    pub depth_offset: usize,
    /// Nodes that were walked in scope but excluded by the rules.
    pub excluded: usize,
    /// Surviving nodes in final book order.
    pub nodes: Vec<NodeRecord>,
    #[serde(skip)]
    pub content: String,
}

impl BookPlan {
    pub fn document(&self) -> BookDocument {
        BookDocument {
            file_name: self.file_name.clone(),
            content: self.content.clone(),
        }
    }
}

/// Outcome of a full generation run.
#[derive(Debug)]
pub struct BuildReport {
    pub plan: BookPlan,
    pub outcome: WriteOutcome,
}

/// Run the pipeline up to the assembled text, without writing anything.
pub fn plan_book(
    vault: &dyn Vault,
    rules: &RuleSet,
    start: &str,
) -> Result<BookPlan, GenerateError> {
    let (start, depth_offset) = resolve_start(start);

    let root = vault.resolve("/").ok_or(GenerateError::EmptyVault)?;
    if !root.is_folder() {
        return Err(GenerateError::EmptyVault);
    }
    if start != "/" && !vault.resolve(&start).is_some_and(|n| n.is_folder()) {
        return Err(GenerateError::FolderNotFound(start));
    }

    let records = walk::walk(&root, rules, WalkMode::Full);
    let scoped: Vec<NodeRecord> = records
        .into_iter()
        .filter(|r| is_within(&r.path, &start))
        .collect();

    let eligibility = Eligibility::evaluate(vault, &scoped, rules)?;

    let mut surviving: Vec<NodeRecord> = Vec::new();
    let mut book_nodes: Vec<BookNode<'_>> = Vec::new();
    for record in &scoped {
        if !eligibility.record(record, rules) {
            continue;
        }
        let toc_block = if rules.generate_tocs && record.is_folder() {
            toc::render_toc(&toc::build_toc(
                &record.path,
                record.depth,
                &scoped,
                rules,
                &eligibility,
            ))
        } else {
            String::new()
        };
        book_nodes.push(BookNode {
            record,
            toc: toc_block,
        });
        surviving.push(record.clone());
    }

    let start_at_root = start == "/";
    let content = assemble::assemble(
        &book_nodes,
        rules,
        vault.name(),
        start_at_root,
        depth_offset,
    );

    Ok(BookPlan {
        file_name: write::book_file_name(vault.name(), &start),
        excluded: scoped.len() - surviving.len(),
        start,
        depth_offset,
        nodes: surviving,
        content,
    })
}

/// Full run: plan, then create or confirm-overwrite the book file.
pub fn generate_book(
    vault: &dyn Vault,
    host: &dyn Host,
    rules: &RuleSet,
    start: &str,
) -> Result<BuildReport, GenerateError> {
    let plan = plan_book(vault, rules, start)?;
    let outcome = write::write_book(vault, host, &plan.document());
    Ok(BuildReport { plan, outcome })
}

/// Structural walk for subtree selection: every folder in the vault, in book
/// order, with no file reads at all.
pub fn list_folders(vault: &dyn Vault, rules: &RuleSet) -> Result<Vec<NodeRecord>, GenerateError> {
    let root = vault.resolve("/").ok_or(GenerateError::EmptyVault)?;
    Ok(walk::walk(&root, rules, WalkMode::FoldersOnly))
}

/// Delete every generated book in the vault, meaning any file whose content
/// the self-exclusion marker. Returns the deleted paths. No rule set
/// applies; the sweep sees all files.
pub fn remove_all_books(vault: &dyn Vault) -> Result<Vec<String>, GenerateError> {
    let mut deleted = Vec::new();
    for file in vault.files()? {
        let content = vault.read(&file.path)?;
        if filter::is_book(&content) {
            vault.delete(&file.path)?;
            deleted.push(file.path);
        }
    }
    Ok(deleted)
}
