use bookbind::vault::{ConsoleHost, FsVault, Host};
use bookbind::write::WriteOutcome;
use bookbind::{config, filter, generate, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookbind")]
#[command(about = "Compile a vault of Markdown notes into a single book document")]
#[command(long_about = "\
Compile a vault of Markdown notes into a single book document

Your filesystem is the data source. Folders become chapters, notes become
sections, and heading depth mirrors tree depth. Each folder gets a table of
contents of its direct children, and the finished book lands in the vault
root as {vault}_book.md.

Vault structure:

  vault/
  ├── book.toml                    # Rule set (optional; see gen-config)
  ├── root.md                      # Top-level note
  ├── Projects/                    # Folder → chapter with its own TOC
  │   ├── alpha.md
  │   └── Archive/                 # Excludable by name via folders_to_ignore
  │       └── old.md
  └── Journal/
      └── 2026-01-03.md

Exclusion:
  Notes:    exact filename, extension fragment, #tag or tags: line, or a
            literal <!--book-ignore--> marker in the content
  Folders:  exact name, or empty (unless include_empty_folders)

Generated books carry the <!--book-ignore--> marker themselves, so they are
never re-ingested by the next run.

Run 'bookbind gen-config' to print a documented book.toml.")]
#[command(version)]
struct Cli {
    /// Vault directory
    #[arg(long, default_value = ".", global = true)]
    vault: PathBuf,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the vault (or one folder of it) into a book
    Build {
        /// Start from this folder instead of the vault root
        #[arg(long, default_value = "/")]
        folder: String,
    },
    /// Walk and filter without writing, showing what the book would contain
    Check {
        /// Start from this folder instead of the vault root
        #[arg(long, default_value = "/")]
        folder: String,

        /// Emit the plan as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// List every folder in the vault, in book order
    List,
    /// Delete every generated book in the vault
    Clean,
    /// Print a stock book.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let host = ConsoleHost {
        assume_yes: cli.yes,
    };

    match cli.command {
        Command::Build { folder } => {
            let vault = FsVault::open(&cli.vault)?;
            let rules = config::load_rules(&cli.vault)?;
            println!("==> Compiling {}", cli.vault.display());
            let report = generate::generate_book(&vault, &host, &rules, &folder)?;
            output::print_plan_output(&report.plan);
            match report.outcome {
                WriteOutcome::Created(path) => println!("==> Created {path}"),
                WriteOutcome::Overwritten(path) => println!("==> Overwrote {path}"),
                WriteOutcome::Cancelled => println!("==> Cancelled, nothing written"),
                WriteOutcome::Failed => {}
            }
        }
        Command::Check { folder, json } => {
            let vault = FsVault::open(&cli.vault)?;
            let rules = config::load_rules(&cli.vault)?;
            let plan = generate::plan_book(&vault, &rules, &folder)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan_output(&plan);
            }
        }
        Command::List => {
            let vault = FsVault::open(&cli.vault)?;
            let rules = config::load_rules(&cli.vault)?;
            let folders = generate::list_folders(&vault, &rules)?;
            output::print_folder_list(&folders);
        }
        Command::Clean => {
            let vault = FsVault::open(&cli.vault)?;
            let confirmed = host.confirm(
                "Remove all books?",
                &format!(
                    "Every file containing the marker {} will be deleted. Proceed?",
                    filter::BOOK_IGNORE_MARKER
                ),
            );
            if !confirmed {
                println!("==> Cancelled, nothing deleted");
                return Ok(());
            }
            let deleted = generate::remove_all_books(&vault)?;
            output::print_clean_output(&deleted);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
