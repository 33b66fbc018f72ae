//! Book document assembly.
//!
//! Final text-producing stage. Consumes the filtered, ordered,
//! depth-annotated node list (each node paired with its pre-rendered TOC
//! block) and emits the complete book as one immutable string. Performs no
//! I/O.
//!
//! ## Layout
//!
//! The document opens with a preamble carrying the self-exclusion marker, so
//! a generated book that is ever re-scanned excludes itself. For a
//! whole-vault run the first node becomes a level-1 title heading named
//! after the collection. Every other node renders as a heading whose depth
//! mirrors its tree depth (offset-adjusted for subtree runs, clamped into
//! Markdown's 1–6 range): folders get a spacer, their heading, their TOC and
//! a rule; files get their heading, an embed reference and a rule.

use crate::config::RuleSet;
use crate::filter::BOOK_IGNORE_MARKER;
use crate::walk::{NodeRecord, RecordKind};

/// Forces a page break when the book is exported/printed.
pub const FULL_PAGE_SPACER: &str = r#"<div style="page-break-after: always;"></div>"#;

/// Fixed-height visual gap between sections on the same page.
pub const FIXED_HEIGHT_SPACER: &str = r#"<div style="height: 200px;"></div>"#;

const DONT_DELETE_COMMENT: &str = "<!--dont-delete-these-comments-->";

/// A surviving node plus its rendered TOC block ("" when it has none).
#[derive(Debug)]
pub struct BookNode<'a> {
    pub record: &'a NodeRecord,
    pub toc: String,
}

/// Effective heading depth for a node: raw depth minus the subtree offset,
/// clamped into Markdown's heading range.
pub fn clamp_depth(depth: usize, offset: usize) -> usize {
    depth.saturating_sub(offset).clamp(1, 6)
}

/// Assemble the full book text. `start_at_root` marks a whole-vault run,
/// where the first node renders as the book title; `depth_offset` shifts
/// headings so a subtree book starts at level 1.
pub fn assemble(
    nodes: &[BookNode<'_>],
    rules: &RuleSet,
    title: &str,
    start_at_root: bool,
    depth_offset: usize,
) -> String {
    let mut content = String::from("\n");
    content.push_str(&format!("\n{BOOK_IGNORE_MARKER}\n{DONT_DELETE_COMMENT}\n\n"));

    for (i, node) in nodes.iter().enumerate() {
        let toc = if rules.generate_tocs { node.toc.as_str() } else { "" };

        if i == 0 && start_at_root {
            content.push_str(&format!("# {title}\n\n{toc}\n\n---\n\n{FULL_PAGE_SPACER}\n\n"));
            continue;
        }

        let heading = "#".repeat(clamp_depth(node.record.depth, depth_offset));
        match &node.record.kind {
            RecordKind::Folder { .. } => {
                // Top-level folders open on a fresh page; nested ones get a rule.
                let lead = if node.record.depth == 1 {
                    FULL_PAGE_SPACER
                } else {
                    "---"
                };
                content.push_str(&format!(
                    "{lead}\n\n{heading} {}\n\n{toc}\n\n---\n\n",
                    node.record.display_name
                ));
            }
            RecordKind::File { .. } => {
                content.push_str(&format!(
                    "\n\n{heading} {}\n\n![[{}]]\n\n---\n\n",
                    node.record.display_name, node.record.name
                ));
            }
        }
    }

    content
}
