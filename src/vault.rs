//! Vault access and host interaction boundaries.
//!
//! The pipeline never touches the filesystem or the terminal directly; it
//! goes through two narrow traits:
//!
//! - [`Vault`]: resolve a path to a node tree, read note content, and
//!   create/overwrite/delete files.
//! - [`Host`]: ask the user a confirm/cancel question and surface a one-line
//!   notification.
//!
//! [`FsVault`] implements [`Vault`] over `std::fs`; [`ConsoleHost`] implements
//! [`Host`] over stdin/stdout. Tests substitute in-memory implementations.
//!
//! ## Path Convention
//!
//! Vault paths are slash-separated and rooted at `/`: the vault root is `/`,
//! a note in folder `A` is `/A/note.md`. Dot-prefixed entries (`.obsidian`,
//! `.git`, …) and the `book.toml` rule file are invisible to resolution and
//! to the flat file sweep. Configuration is not content.

use crate::types::{FileNode, FolderNode, Node};
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

/// Rule file living in the vault root; never treated as note content.
const CONFIG_FILE: &str = "book.toml";

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("failed to read {0}: {1}")]
    Read(String, #[source] io::Error),
    #[error("failed to create {0}: {1}")]
    Create(String, #[source] io::Error),
    #[error("failed to write {0}: {1}")]
    Write(String, #[source] io::Error),
    #[error("failed to delete {0}: {1}")]
    Delete(String, #[source] io::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Read/write/enumerate access to one note collection.
pub trait Vault {
    /// Collection name, used as the book title and output filename stem.
    fn name(&self) -> &str;

    /// Resolve a vault path to its node tree, or `None` if nothing is there.
    /// Folders come back with their full subtree; children are unordered.
    fn resolve(&self, path: &str) -> Option<Node>;

    /// Read a file's full textual content.
    fn read(&self, path: &str) -> Result<String, VaultError>;

    fn exists(&self, path: &str) -> Result<bool, VaultError>;

    /// Create a new file. Fails if the path is already taken.
    fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;

    /// Replace an existing file's content.
    fn overwrite(&self, path: &str, content: &str) -> Result<(), VaultError>;

    fn delete(&self, path: &str) -> Result<(), VaultError>;

    /// Every file in the vault as a flat list, no ordering guarantees.
    /// Used by the book sweep in `clean`, which must see all files
    /// regardless of any rule set.
    fn files(&self) -> Result<Vec<FileNode>, VaultError>;
}

/// User-facing decision point and notification sink.
pub trait Host {
    /// Ask a confirm/cancel question. `true` means confirmed.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Surface a one-line outcome message.
    fn notify(&self, message: &str);
}

// ============================================================================
// Filesystem vault
// ============================================================================

/// [`Vault`] implementation over a directory on disk.
pub struct FsVault {
    root: PathBuf,
    name: String,
}

impl FsVault {
    /// Open `root` as a vault. The collection name is the directory's own
    /// name (`/home/me/Notes` → `Notes`).
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        let root = root.canonicalize()?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { root, name })
    }

    /// Map a vault path to an absolute filesystem path.
    fn abs(&self, vault_path: &str) -> PathBuf {
        self.root.join(vault_path.trim_start_matches('/'))
    }

    fn resolve_at(&self, abs: &Path, vault_path: &str) -> Option<Node> {
        let meta = fs::metadata(abs).ok()?;
        if meta.is_dir() {
            let name = if vault_path == "/" {
                String::new()
            } else {
                abs.file_name()?.to_string_lossy().to_string()
            };
            let mut children = Vec::new();
            for entry in fs::read_dir(abs).ok()?.filter_map(|e| e.ok()) {
                let entry_name = entry.file_name().to_string_lossy().to_string();
                if entry_name.starts_with('.') || entry_name == CONFIG_FILE {
                    continue;
                }
                let child_path = join_vault_path(vault_path, &entry_name);
                if let Some(child) = self.resolve_at(&entry.path(), &child_path) {
                    children.push(child);
                }
            }
            Some(Node::Folder(FolderNode {
                path: vault_path.to_string(),
                name,
                children,
            }))
        } else {
            Some(Node::File(file_node(abs, vault_path, &meta)))
        }
    }
}

impl Vault for FsVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, path: &str) -> Option<Node> {
        let normalized = if path.is_empty() { "/" } else { path };
        self.resolve_at(&self.abs(normalized), normalized)
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        fs::read_to_string(self.abs(path)).map_err(|e| VaultError::Read(path.to_string(), e))
    }

    fn exists(&self, path: &str) -> Result<bool, VaultError> {
        Ok(self.abs(path).try_exists()?)
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.abs(path);
        let mut file = fs::File::create_new(&abs)
            .map_err(|e| VaultError::Create(path.to_string(), e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| VaultError::Create(path.to_string(), e))
    }

    fn overwrite(&self, path: &str, content: &str) -> Result<(), VaultError> {
        fs::write(self.abs(path), content).map_err(|e| VaultError::Write(path.to_string(), e))
    }

    fn delete(&self, path: &str) -> Result<(), VaultError> {
        fs::remove_file(self.abs(path)).map_err(|e| VaultError::Delete(path.to_string(), e))
    }

    fn files(&self) -> Result<Vec<FileNode>, VaultError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| !is_hidden(e) && e.file_name().to_str() != Some(CONFIG_FILE));
        for entry in walker {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .expect("walkdir entry is under root");
            let vault_path = format!("/{}", rel.to_string_lossy().replace('\\', "/"));
            let meta = entry.metadata().map_err(io::Error::other)?;
            files.push(file_node(entry.path(), &vault_path, &meta));
        }
        Ok(files)
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
}

fn join_vault_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

fn file_node(abs: &Path, vault_path: &str, meta: &fs::Metadata) -> FileNode {
    let name = abs
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let basename = abs
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.clone());
    let extension = abs
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    FileNode {
        path: vault_path.to_string(),
        name,
        basename,
        extension,
        // Some platforms cannot report a birth time; fall back to the epoch
        // so the creation-time sort stays total.
        created: meta.created().unwrap_or(SystemTime::UNIX_EPOCH),
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
    }
}

// ============================================================================
// Terminal host
// ============================================================================

/// [`Host`] implementation over stdin/stdout.
pub struct ConsoleHost {
    /// Answer every confirmation with yes without prompting (`--yes`).
    pub assume_yes: bool,
}

impl Host for ConsoleHost {
    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{title}: {message} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}
