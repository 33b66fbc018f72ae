//! # bookbind
//!
//! Compile a vault of Markdown notes (a directory tree of files and
//! folders) into one flattened, linearly-ordered book document, with
//! per-folder tables of contents and user-configurable inclusion rules.
//! The result is a single merged, print/export-friendly artifact whose
//! heading depth mirrors tree depth.
//!
//! # Architecture: One-Way Pipeline
//!
//! A generation run flows strictly one way, each stage handing an owned
//! value to the next:
//!
//! ```text
//! 1. Walk      vault tree   →  flat NodeRecord list   (ordered, depth-annotated)
//! 2. Filter    note content →  Eligibility index      (one read per note)
//! 3. TOC       flat list    →  per-folder entries     (direct eligible children)
//! 4. Assemble  survivors    →  book text              (pure, no I/O)
//! 5. Write     book text    →  vault file             (create or confirm-overwrite)
//! ```
//!
//! No stage holds state beyond the current run; the walk takes an explicit
//! accumulator and is safely re-entrant, and every run recomputes the whole
//! output from scratch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`vault`] | `Vault`/`Host` collaborator traits, `FsVault` over `std::fs`, terminal prompts |
//! | [`types`] | `Node` tree (tagged `File`/`Folder` variant) and the `BookDocument` artifact |
//! | [`config`] | `RuleSet` loading from `book.toml`, enums, stock config |
//! | [`walk`] | Pre-order traversal with two-tier sibling ordering and folder pruning |
//! | [`filter`] | Eligibility rules: self-exclusion marker, tags, extensions, filenames |
//! | [`toc`] | Per-folder table of contents from the flat walk output |
//! | [`assemble`] | Heading-clamped document assembly with spacers and embeds |
//! | [`write`] | Target naming and the create/confirm-overwrite boundary |
//! | [`generate`] | Run orchestration: plan, build, folder listing, book removal |
//! | [`output`] | CLI display: pure `format_*` functions with `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is the Data Source
//!
//! No database, no index files: the vault directory tree is walked fresh on
//! every run, and sibling order comes from names or creation times, so the
//! same tree with the same rules always yields a byte-identical book.
//!
//! ## Two-Phase Eligibility
//!
//! Folder rules run during the walk (an ineligible folder's subtree is never
//! visited), but file rules run afterwards against content. The split is
//! deliberate: a folder's emptiness check must see the raw child count,
//! independent of how many of those children content rules later drop.
//!
//! ## Self-Excluding Output
//!
//! Every generated book embeds a literal `<!--book-ignore-->` marker and is
//! therefore invisible to subsequent runs: regeneration is idempotent, and
//! users can hand-place the same marker to exclude any note.
//!
//! ## Narrow Host Boundary
//!
//! The pipeline talks to the outside world through two traits: `Vault`
//! (resolve/read/write) and `Host` (confirm/notify). The CLI is one
//! implementation; tests substitute in-memory ones, so the whole pipeline
//! runs without touching disk or terminal.

pub mod assemble;
pub mod config;
pub mod filter;
pub mod generate;
pub mod output;
pub mod toc;
pub mod types;
pub mod vault;
pub mod walk;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
