//! Book writing boundary.
//!
//! Thin final stage: derives the deterministic output filename, decides
//! between create and confirm-then-overwrite, and delegates the byte write
//! to the vault. Every I/O failure here is caught and surfaced as a single
//! host notification; a failed write ends the run, it never panics or
//! propagates.

use crate::types::BookDocument;
use crate::vault::{Host, Vault};

/// How a write attempt ended. `Created`/`Overwritten` carry the vault path
/// of the book so the caller can point the user at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(String),
    Overwritten(String),
    /// The user declined to overwrite an existing book.
    Cancelled,
    /// An I/O failure was notified to the host; nothing (more) was written.
    Failed,
}

/// Deterministic book filename: `{collection}{suffix}_book.md`, where the
/// suffix is empty for whole-vault runs and a sanitized form of the starting
/// path otherwise (`/Daily Notes` → `-Daily-Notes`).
pub fn book_file_name(collection: &str, start: &str) -> String {
    let suffix = if start == "/" {
        String::new()
    } else {
        sanitize_start_path(start)
    };
    format!("{collection}{suffix}_book.md")
}

/// Replace every whitespace run, `/`, and `\` with a single dash.
fn sanitize_start_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_whitespace = false;
    for c in path.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match c {
            '/' | '\\' => out.push('-'),
            _ => out.push(c),
        }
    }
    out
}

/// Write the assembled book into the vault root.
///
/// An existing file at the target path triggers a confirm/cancel decision;
/// on cancel nothing is written. All I/O errors become one notification.
pub fn write_book(vault: &dyn Vault, host: &dyn Host, book: &BookDocument) -> WriteOutcome {
    let path = format!("/{}", book.file_name);

    let exists = match vault.exists(&path) {
        Ok(exists) => exists,
        Err(e) => {
            host.notify(&e.to_string());
            return WriteOutcome::Failed;
        }
    };

    if exists {
        let confirmed = host.confirm(
            "Overwrite",
            &format!(
                "A file named {} already exists. Do you want to overwrite it?",
                book.file_name
            ),
        );
        if !confirmed {
            return WriteOutcome::Cancelled;
        }
        match vault.overwrite(&path, &book.content) {
            Ok(()) => WriteOutcome::Overwritten(path),
            Err(e) => {
                host.notify(&e.to_string());
                WriteOutcome::Failed
            }
        }
    } else {
        match vault.create(&path, &book.content) {
            Ok(()) => WriteOutcome::Created(path),
            Err(e) => {
                host.notify(&e.to_string());
                WriteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MemHost, MemVault};

    fn book(name: &str) -> BookDocument {
        BookDocument {
            file_name: name.to_string(),
            content: "book body".to_string(),
        }
    }

    #[test]
    fn whole_vault_file_name_has_no_suffix() {
        assert_eq!(book_file_name("Vault", "/"), "Vault_book.md");
    }

    #[test]
    fn subtree_file_name_sanitizes_the_path() {
        assert_eq!(book_file_name("Vault", "/A"), "Vault-A_book.md");
        assert_eq!(book_file_name("Vault", "/A/B"), "Vault-A-B_book.md");
        assert_eq!(
            book_file_name("Vault", "/Daily Notes"),
            "Vault-Daily-Notes_book.md"
        );
        // a whitespace run collapses to one dash
        assert_eq!(
            book_file_name("Vault", "/a  b"),
            "Vault-a-b_book.md"
        );
    }

    #[test]
    fn creates_when_target_is_free() {
        let vault = MemVault::new("Vault");
        let host = MemHost::no();

        let outcome = write_book(&vault, &host, &book("Vault_book.md"));

        assert_eq!(outcome, WriteOutcome::Created("/Vault_book.md".to_string()));
        assert_eq!(vault.content_of("/Vault_book.md").as_deref(), Some("book body"));
        assert!(host.confirms.borrow().is_empty());
    }

    #[test]
    fn overwrites_after_confirmation() {
        let vault = MemVault::new("Vault").file("/Vault_book.md", "stale");
        let host = MemHost::yes();

        let outcome = write_book(&vault, &host, &book("Vault_book.md"));

        assert_eq!(
            outcome,
            WriteOutcome::Overwritten("/Vault_book.md".to_string())
        );
        assert_eq!(vault.content_of("/Vault_book.md").as_deref(), Some("book body"));
        let confirms = host.confirms.borrow();
        assert_eq!(confirms.len(), 1);
        assert!(confirms[0].contains("Vault_book.md already exists"));
    }

    #[test]
    fn cancel_leaves_existing_book_untouched() {
        let vault = MemVault::new("Vault").file("/Vault_book.md", "stale");
        let host = MemHost::no();

        let outcome = write_book(&vault, &host, &book("Vault_book.md"));

        assert_eq!(outcome, WriteOutcome::Cancelled);
        assert_eq!(vault.content_of("/Vault_book.md").as_deref(), Some("stale"));
    }

    #[test]
    fn write_failure_becomes_a_notification() {
        struct BrokenVault(MemVault);
        impl crate::vault::Vault for BrokenVault {
            fn name(&self) -> &str {
                self.0.name()
            }
            fn resolve(&self, path: &str) -> Option<crate::types::Node> {
                self.0.resolve(path)
            }
            fn read(&self, path: &str) -> Result<String, crate::vault::VaultError> {
                self.0.read(path)
            }
            fn exists(&self, path: &str) -> Result<bool, crate::vault::VaultError> {
                self.0.exists(path)
            }
            fn create(&self, path: &str, _: &str) -> Result<(), crate::vault::VaultError> {
                Err(crate::vault::VaultError::Create(
                    path.to_string(),
                    std::io::Error::other("disk full"),
                ))
            }
            fn overwrite(&self, path: &str, content: &str) -> Result<(), crate::vault::VaultError> {
                self.0.overwrite(path, content)
            }
            fn delete(&self, path: &str) -> Result<(), crate::vault::VaultError> {
                self.0.delete(path)
            }
            fn files(&self) -> Result<Vec<crate::types::FileNode>, crate::vault::VaultError> {
                self.0.files()
            }
        }

        let vault = BrokenVault(MemVault::new("Vault"));
        let host = MemHost::yes();

        let outcome = write_book(&vault, &host, &book("Vault_book.md"));

        assert_eq!(outcome, WriteOutcome::Failed);
        let notices = host.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("disk full"));
    }
}
