//! Vault traversal and flat record generation.
//!
//! First stage of the book pipeline. Walks a resolved node tree in pre-order,
//! producing a flat, depth-annotated [`NodeRecord`] list that the downstream
//! stages (filtering, TOC building, assembly) consume.
//!
//! ## Ordering
//!
//! Siblings are sorted before recursion with a two-tier comparator:
//!
//! 1. Mixed kinds are decided by [`SiblingOrder`] alone; a file and a folder
//!    never compare by name.
//! 2. Folder pairs compare by name, ascending. File pairs compare per
//!    [`SortingStrategy`]: display name or creation time, ascending.
//!
//! The sort is stable, so re-walking an unchanged tree with an unchanged rule
//! set yields byte-identical sibling ordering.
//!
//! ## Filtering During Descent
//!
//! Folder eligibility is evaluated *before* recursing into a folder: an
//! ineligible folder's entire subtree never enters the record list. File
//! eligibility is NOT checked here: it needs file content, and the emptiness
//! check on folders must see the raw child count independent of any
//! content-based exclusion, so all files are recorded and filtered
//! downstream.
//!
//! The walk takes an explicit accumulator and returns it; there is no shared
//! scratch state, and a walk is safely re-entrant.

use crate::config::RuleSet;
use crate::filter;
use crate::types::Node;
use serde::Serialize;
use std::cmp::Ordering;
use std::time::SystemTime;

/// What the walk emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Files and folders, the full book walk.
    Full,
    /// Folders only, skipping files entirely. Used for subtree selection,
    /// where no file content should ever be read.
    FoldersOnly,
}

/// Kind-specific fields of a flattened node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    File {
        /// Extension including the leading dot, empty if none.
        extension: String,
        created: SystemTime,
        modified: SystemTime,
    },
    Folder {
        /// Direct child count before any filtering. The emptiness rule
        /// works on this, not on what survives downstream.
        raw_child_count: usize,
    },
}

/// One entry in the flat pre-order walk output.
///
/// A folder's record always appears immediately before any of its surviving
/// descendants, and depth increases by exactly 1 from parent to direct child.
#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord {
    #[serde(flatten)]
    pub kind: RecordKind,
    /// Normalized slash-rooted vault path, unique per run.
    pub path: String,
    /// Raw name, with extension for files, bare for folders.
    pub name: String,
    /// Name without extension, used in headings and TOC entries.
    pub display_name: String,
    /// Root is 0; the root's direct children are 1.
    pub depth: usize,
}

impl NodeRecord {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, RecordKind::Folder { .. })
    }
}

/// Parent of a slash-rooted vault path: `/A/n1.md` → `/A`, `/A` → `/`.
/// The root has no parent.
pub fn parent_path(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(i) => Some(&path[..i]),
        None => None,
    }
}

/// Walk `root` in pre-order, returning the flat record list.
pub fn walk(root: &Node, rules: &RuleSet, mode: WalkMode) -> Vec<NodeRecord> {
    let mut records = Vec::new();
    visit(root, rules, mode, 0, &mut records);
    records
}

fn visit(node: &Node, rules: &RuleSet, mode: WalkMode, depth: usize, records: &mut Vec<NodeRecord>) {
    match node {
        Node::File(file) => {
            if mode == WalkMode::Full {
                records.push(NodeRecord {
                    kind: RecordKind::File {
                        extension: file.extension.clone(),
                        created: file.created,
                        modified: file.modified,
                    },
                    path: file.path.clone(),
                    name: file.name.clone(),
                    display_name: file.basename.clone(),
                    depth,
                });
            }
        }
        Node::Folder(folder) => {
            records.push(NodeRecord {
                kind: RecordKind::Folder {
                    raw_child_count: folder.children.len(),
                },
                path: folder.path.clone(),
                name: folder.name.clone(),
                display_name: folder.name.clone(),
                depth,
            });

            let mut children: Vec<&Node> = folder.children.iter().collect();
            children.sort_by(|a, b| sibling_cmp(a, b, rules));

            for child in children {
                if let Node::Folder(sub) = child
                    && !filter::is_folder_eligible(&sub.name, sub.children.len(), rules)
                {
                    continue;
                }
                visit(child, rules, mode, depth + 1, records);
            }
        }
    }
}

/// Two-tier sibling comparator: kind order first, then name or creation time.
fn sibling_cmp(a: &Node, b: &Node, rules: &RuleSet) -> Ordering {
    use crate::config::{SiblingOrder, SortingStrategy};

    match (a, b) {
        (Node::Folder(_), Node::File(_)) => match rules.sibling_order {
            SiblingOrder::FilesFirst => Ordering::Greater,
            SiblingOrder::FoldersFirst => Ordering::Less,
        },
        (Node::File(_), Node::Folder(_)) => match rules.sibling_order {
            SiblingOrder::FilesFirst => Ordering::Less,
            SiblingOrder::FoldersFirst => Ordering::Greater,
        },
        (Node::Folder(x), Node::Folder(y)) => x.name.cmp(&y.name),
        (Node::File(x), Node::File(y)) => match rules.sorting_strategy {
            SortingStrategy::Alphabetical => x.basename.cmp(&y.basename),
            SortingStrategy::CreationTime => x.created.cmp(&y.created),
        },
    }
}
