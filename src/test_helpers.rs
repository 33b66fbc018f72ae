//! Shared test utilities for the bookbind test suite.
//!
//! Provides an in-memory [`Vault`] with scriptable failures, a scripted
//! [`Host`] capturing prompts and notifications, and bare node constructors
//! for walker tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let vault = MemVault::new("Vault")
//!     .file("/A/n1.md", "note content")
//!     .folder("/Empty");
//! let host = MemHost::yes();
//!
//! let report = generate_book(&vault, &host, &RuleSet::default(), "/").unwrap();
//! ```

use crate::types::{FileNode, FolderNode, Node};
use crate::vault::{Host, Vault, VaultError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::time::{Duration, SystemTime};

/// Epoch + `secs`, for deterministic creation-time ordering.
pub fn t(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

fn split_name(name: &str) -> (String, String) {
    match name.rfind('.') {
        Some(i) if i > 0 => (name[..i].to_string(), name[i..].to_string()),
        _ => (name.to_string(), String::new()),
    }
}

fn make_file(path: &str, created: SystemTime) -> FileNode {
    let name = last_segment(path).to_string();
    let (basename, extension) = split_name(&name);
    FileNode {
        path: path.to_string(),
        name,
        basename,
        extension,
        created,
        modified: created,
    }
}

// =========================================================================
// Bare node constructors for tests that exercise the walker directly
// =========================================================================

/// A file node with the given creation second; modified mirrors created.
pub fn file_at(path: &str, created_secs: u64) -> Node {
    Node::File(make_file(path, t(created_secs)))
}

/// A folder node; the name is the last path segment (empty for `/`).
pub fn folder_at(path: &str, children: Vec<Node>) -> Node {
    let name = if path == "/" {
        String::new()
    } else {
        last_segment(path).to_string()
    };
    Node::Folder(FolderNode {
        path: path.to_string(),
        name,
        children,
    })
}

// =========================================================================
// In-memory vault
// =========================================================================

#[derive(Clone)]
struct MemFile {
    content: String,
    created: SystemTime,
    failing: bool,
}

/// In-memory [`Vault`]. Parent folders are implied by file paths; empty
/// folders must be added explicitly.
pub struct MemVault {
    name: String,
    files: RefCell<BTreeMap<String, MemFile>>,
    folders: BTreeSet<String>,
    reads: RefCell<BTreeMap<String, usize>>,
}

impl MemVault {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: RefCell::new(BTreeMap::new()),
            folders: BTreeSet::new(),
            reads: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn file(self, path: &str, content: &str) -> Self {
        self.file_created(path, content, 0)
    }

    pub fn file_created(self, path: &str, content: &str, created_secs: u64) -> Self {
        self.files.borrow_mut().insert(
            path.to_string(),
            MemFile {
                content: content.to_string(),
                created: t(created_secs),
                failing: false,
            },
        );
        self
    }

    /// A file whose content read always fails with an I/O error.
    pub fn failing_file(self, path: &str) -> Self {
        self.files.borrow_mut().insert(
            path.to_string(),
            MemFile {
                content: String::new(),
                created: t(0),
                failing: true,
            },
        );
        self
    }

    pub fn folder(mut self, path: &str) -> Self {
        self.folders.insert(path.to_string());
        self
    }

    /// How many times `path` was read through the vault.
    pub fn reads_of(&self, path: &str) -> usize {
        self.reads.borrow().get(path).copied().unwrap_or(0)
    }

    /// Current content of a file, for post-write assertions.
    pub fn content_of(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).map(|f| f.content.clone())
    }

    /// `resolve("/")` for tests that only need the tree.
    pub fn resolve_root(&self) -> Node {
        self.resolve("/").expect("mem vault root always resolves")
    }

    /// All folder paths, explicit and implied, including the root.
    fn all_folders(&self) -> BTreeSet<String> {
        let mut folders: BTreeSet<String> = BTreeSet::new();
        folders.insert("/".to_string());
        let paths: Vec<String> = self
            .folders
            .iter()
            .cloned()
            .chain(self.files.borrow().keys().cloned())
            .collect();
        for path in paths {
            if self.folders.contains(&path) {
                folders.insert(path.clone());
            }
            let mut current = path.as_str();
            while let Some(parent) = crate::walk::parent_path(current) {
                folders.insert(parent.to_string());
                current = parent;
            }
        }
        folders
    }

    fn build_folder(&self, path: &str, folders: &BTreeSet<String>) -> FolderNode {
        let mut children = Vec::new();
        for sub in folders {
            if crate::walk::parent_path(sub) == Some(path) {
                children.push(Node::Folder(self.build_folder(sub, folders)));
            }
        }
        for (file_path, file) in self.files.borrow().iter() {
            if crate::walk::parent_path(file_path) == Some(path) {
                children.push(Node::File(make_file(file_path, file.created)));
            }
        }
        let name = if path == "/" {
            String::new()
        } else {
            last_segment(path).to_string()
        };
        FolderNode {
            path: path.to_string(),
            name,
            children,
        }
    }
}

impl Vault for MemVault {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, path: &str) -> Option<Node> {
        if let Some(file) = self.files.borrow().get(path) {
            return Some(Node::File(make_file(path, file.created)));
        }
        let folders = self.all_folders();
        if !folders.contains(path) {
            return None;
        }
        Some(Node::Folder(self.build_folder(path, &folders)))
    }

    fn read(&self, path: &str) -> Result<String, VaultError> {
        *self.reads.borrow_mut().entry(path.to_string()).or_insert(0) += 1;
        match self.files.borrow().get(path) {
            Some(file) if file.failing => Err(VaultError::Read(
                path.to_string(),
                io::Error::other("injected read failure"),
            )),
            Some(file) => Ok(file.content.clone()),
            None => Err(VaultError::Read(
                path.to_string(),
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }

    fn exists(&self, path: &str) -> Result<bool, VaultError> {
        Ok(self.files.borrow().contains_key(path) || self.all_folders().contains(path))
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut files = self.files.borrow_mut();
        if files.contains_key(path) {
            return Err(VaultError::Create(
                path.to_string(),
                io::Error::from(io::ErrorKind::AlreadyExists),
            ));
        }
        files.insert(
            path.to_string(),
            MemFile {
                content: content.to_string(),
                created: t(0),
                failing: false,
            },
        );
        Ok(())
    }

    fn overwrite(&self, path: &str, content: &str) -> Result<(), VaultError> {
        match self.files.borrow_mut().get_mut(path) {
            Some(file) => {
                file.content = content.to_string();
                Ok(())
            }
            None => Err(VaultError::Write(
                path.to_string(),
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }

    fn delete(&self, path: &str) -> Result<(), VaultError> {
        match self.files.borrow_mut().remove(path) {
            Some(_) => Ok(()),
            None => Err(VaultError::Delete(
                path.to_string(),
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }

    fn files(&self) -> Result<Vec<FileNode>, VaultError> {
        Ok(self
            .files
            .borrow()
            .iter()
            .map(|(path, file)| make_file(path, file.created))
            .collect())
    }
}

// =========================================================================
// Scripted host
// =========================================================================

/// [`Host`] that answers every confirmation the same way and records what
/// it was asked and told.
pub struct MemHost {
    answer: bool,
    pub confirms: RefCell<Vec<String>>,
    pub notices: RefCell<Vec<String>>,
}

impl MemHost {
    pub fn yes() -> Self {
        Self::answering(true)
    }

    pub fn no() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: RefCell::new(Vec::new()),
            notices: RefCell::new(Vec::new()),
        }
    }
}

impl Host for MemHost {
    fn confirm(&self, title: &str, message: &str) -> bool {
        self.confirms.borrow_mut().push(format!("{title}: {message}"));
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}
