//! CLI output formatting.
//!
//! Information-first display of pipeline results: the primary line for every
//! entry is its display name at its tree position, with filesystem detail
//! kept out of the way. Each command has a `format_*` function returning
//! `Vec<String>` for testability and a `print_*` wrapper that writes to
//! stdout. Format functions are pure: no I/O, no side effects.
//!
//! ```text
//! Book Vault_book.md
//! root
//! A/
//!     n1
//! 1 folder, 2 notes, 1 excluded
//! ```

use crate::generate::BookPlan;
use crate::walk::NodeRecord;

/// Indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Singular/plural helper for count lines.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format a plan as an indented content tree plus a summary line.
pub fn format_plan_output(plan: &BookPlan) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Book {}", plan.file_name));

    // Depth of the shallowest printed row: the root's children for a
    // whole-vault run, the chosen folder itself for a subtree run.
    let base = if plan.start == "/" {
        1
    } else {
        plan.depth_offset + 1
    };

    let mut folders = 0;
    let mut notes = 0;
    for node in &plan.nodes {
        if node.path == "/" {
            continue;
        }
        if node.is_folder() {
            folders += 1;
            lines.push(format!(
                "{}{}/",
                indent(node.depth.saturating_sub(base)),
                node.display_name
            ));
        } else {
            notes += 1;
            lines.push(format!(
                "{}{}",
                indent(node.depth.saturating_sub(base)),
                node.display_name
            ));
        }
    }

    lines.push(format!(
        "{}, {}, {} excluded",
        count(folders, "folder", "folders"),
        count(notes, "note", "notes"),
        plan.excluded
    ));
    lines
}

/// Format the structural folder listing, one vault path per line.
pub fn format_folder_list(records: &[NodeRecord]) -> Vec<String> {
    records.iter().map(|r| r.path.clone()).collect()
}

/// Format the clean sweep result.
pub fn format_clean_output(deleted: &[String]) -> Vec<String> {
    if deleted.is_empty() {
        return vec!["No books found".to_string()];
    }
    let mut lines: Vec<String> = deleted.iter().map(|p| format!("Deleted {p}")).collect();
    lines.push(format!("Removed {}", count(deleted.len(), "book", "books")));
    lines
}

pub fn print_plan_output(plan: &BookPlan) {
    for line in format_plan_output(plan) {
        println!("{line}");
    }
}

pub fn print_folder_list(records: &[NodeRecord]) {
    for line in format_folder_list(records) {
        println!("{line}");
    }
}

pub fn print_clean_output(deleted: &[String]) {
    for line in format_clean_output(deleted) {
        println!("{line}");
    }
}
