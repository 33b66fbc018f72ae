//! Per-folder table of contents.
//!
//! A node's TOC lists its direct eligible children, in walk order, as
//! glyph-prefixed reference anchors (`📂 [[#Folder]]`, `📄 [[#note]]`). The
//! anchors point at the headings the assembler will emit for those names.
//!
//! Child selection is strict: a candidate must sit exactly one level deeper
//! AND its parent path must equal the node's path. Matching on path
//! containment would also catch `/Notes2/x` as a child of `/Notes`.

use crate::config::RuleSet;
use crate::filter::Eligibility;
use crate::walk::{NodeRecord, parent_path};

pub const FOLDER_GLYPH: &str = "📂";
pub const FILE_GLYPH: &str = "📄";

/// One TOC line: a kind glyph plus the display name it anchors to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub glyph: &'static str,
    pub display_name: String,
}

impl TocEntry {
    /// The literal output line, newline included.
    pub fn render(&self) -> String {
        format!("{} [[#{}]]\n", self.glyph, self.display_name)
    }
}

/// Collect the direct eligible children of the node at `path`/`depth` from
/// the flat walk output. Empty when nothing passes.
pub fn build_toc(
    path: &str,
    depth: usize,
    records: &[NodeRecord],
    rules: &RuleSet,
    eligibility: &Eligibility,
) -> Vec<TocEntry> {
    records
        .iter()
        .filter(|r| r.depth == depth + 1 && parent_path(&r.path) == Some(path))
        .filter(|r| eligibility.record(r, rules))
        .map(|r| TocEntry {
            glyph: if r.is_folder() { FOLDER_GLYPH } else { FILE_GLYPH },
            display_name: r.display_name.clone(),
        })
        .collect()
}

/// Render entries into the TOC block text ("" for no entries).
pub fn render_toc(entries: &[TocEntry]) -> String {
    entries.iter().map(TocEntry::render).collect()
}
