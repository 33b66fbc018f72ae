//! Shared types for the book pipeline.
//!
//! The source tree is modeled as an explicit tagged variant ([`Node`]) rather
//! than one struct with optional file/folder fields: a node is exactly one
//! kind, and each kind carries only the fields that exist for it.

use serde::Serialize;
use std::time::SystemTime;

/// One file or folder in the source vault.
#[derive(Debug, Clone)]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    /// Normalized slash-separated path from the vault root (`/` for the root
    /// itself, `/A/note.md` for everything below it). Unique per run.
    pub fn path(&self) -> &str {
        match self {
            Node::File(f) => &f.path,
            Node::Folder(d) => &d.path,
        }
    }

    /// Raw filesystem name, with extension for files, bare for folders.
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) => &d.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }
}

/// A note file in the vault.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub path: String,
    /// Filename including extension (`note.md`).
    pub name: String,
    /// Filename without extension, used in headings and TOC entries.
    pub basename: String,
    /// Extension including the leading dot (`.md`), empty if none.
    pub extension: String,
    pub created: SystemTime,
    pub modified: SystemTime,
}

/// A folder in the vault, owning its children exclusively. The tree is a
/// hierarchy by construction; no node is its own ancestor.
#[derive(Debug, Clone)]
pub struct FolderNode {
    pub path: String,
    /// Bare folder name; empty for the vault root.
    pub name: String,
    pub children: Vec<Node>,
}

/// The assembled output artifact: a single text blob plus its target path.
///
/// Constructed fresh each run, never mutated after assembly, handed to the
/// writer exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct BookDocument {
    pub file_name: String,
    pub content: String,
}
