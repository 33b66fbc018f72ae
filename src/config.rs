//! Rule set configuration.
//!
//! Handles loading and validating `book.toml` from the vault root. The rule
//! set controls which notes and folders make it into the book and how
//! siblings are ordered; it is resolved once per run and immutable after
//! that.
//!
//! ## Config File Location
//!
//! Place `book.toml` in the vault root. A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! folders_to_ignore = []       # Exact folder names to exclude entirely
//! files_to_ignore = []         # Exact filenames to exclude
//! extensions_to_ignore = []    # Extension fragments to exclude (".png")
//! tags_to_ignore = []          # Notes carrying any of these tags are excluded
//!
//! include_empty_folders = false
//! generate_tocs = true
//!
//! sorting_strategy = "alphabetical"   # or "creation-time"
//! sibling_order = "files-first"       # or "folders-first"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// How files are ordered among file siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortingStrategy {
    /// Ascending by display name.
    Alphabetical,
    /// Ascending by creation timestamp.
    CreationTime,
}

/// Which kind wins when a file and a folder are compared as siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiblingOrder {
    FilesFirst,
    FoldersFirst,
}

/// Inclusion/exclusion rules and ordering knobs, loaded from `book.toml`.
///
/// Pattern lists match after symmetric trimming; blank entries are inert, so
/// an all-blank list behaves as "no rule". All fields have defaults and user
/// config files need only specify overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSet {
    /// Folders excluded by exact name; their entire subtree is dropped.
    pub folders_to_ignore: Vec<String>,
    /// Files excluded by exact filename (including extension).
    pub files_to_ignore: Vec<String>,
    /// Files excluded when their extension contains any of these fragments.
    pub extensions_to_ignore: Vec<String>,
    /// Files excluded when any content line carries one of these tags.
    pub tags_to_ignore: Vec<String>,
    /// Keep folders with no direct children at all.
    pub include_empty_folders: bool,
    /// Emit a table of contents under every folder heading.
    pub generate_tocs: bool,
    pub sorting_strategy: SortingStrategy,
    pub sibling_order: SiblingOrder,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            folders_to_ignore: Vec::new(),
            files_to_ignore: Vec::new(),
            extensions_to_ignore: Vec::new(),
            tags_to_ignore: Vec::new(),
            include_empty_folders: false,
            generate_tocs: true,
            sorting_strategy: SortingStrategy::Alphabetical,
            sibling_order: SiblingOrder::FilesFirst,
        }
    }
}

/// Load `book.toml` from the vault root, falling back to defaults when the
/// file doesn't exist.
pub fn load_rules(vault_root: &Path) -> Result<RuleSet, ConfigError> {
    let config_path = vault_root.join("book.toml");
    if !config_path.exists() {
        return Ok(RuleSet::default());
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Stock `book.toml` with every option documented, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# bookbind Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as book.toml in the vault root. Unknown keys will cause
# an error.

# ---------------------------------------------------------------------------
# Exclusion rules
# ---------------------------------------------------------------------------
# Folders excluded by exact name. The entire subtree is dropped.
folders_to_ignore = []

# Files excluded by exact filename, extension included ("draft.md").
files_to_ignore = []

# Files excluded when the extension contains the fragment (".png", ".canvas").
extensions_to_ignore = []

# Notes excluded when any line carries the tag, either as #tagname or in a
# "tags:" metadata line. Case-insensitive.
tags_to_ignore = []

# Keep folder headings even when the folder has no children at all.
include_empty_folders = false

# ---------------------------------------------------------------------------
# Book layout
# ---------------------------------------------------------------------------
# Emit a table of contents under every folder heading.
generate_tocs = true

# How files are ordered among file siblings: "alphabetical" or "creation-time".
sorting_strategy = "alphabetical"

# Whether files sort before folders or the other way around:
# "files-first" or "folders-first".
sibling_order = "files-first"
"##
}
