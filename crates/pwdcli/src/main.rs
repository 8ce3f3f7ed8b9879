//! pwdcli - Local credential store
//!
//! Commands:
//! - list [--json]: List every entry with its index (default)
//! - add --website --username --email --pwd: Append an entry
//! - delete <INDEX>: Delete the entry at an index
//! - search <KEYWORD>: Case-insensitive search across all fields
//! - path: Show the store file location

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pwdcli::{QueryEngine, Record, RecordStore};
use pwdcli_core::logging;

#[derive(Parser)]
#[command(name = "pwdcli")]
#[command(about = "Local credential store - website, username, email and password entries")]
#[command(version)]
#[command(after_help = r#"STORAGE:
    Entries live in ~/.passwords.json as a JSON array.
    Passwords are stored in CLEAR TEXT and the file is readable by other
    local users (mode 0644).

INDICES:
    Entries are addressed by their position, starting at 0.
    Deleting an entry shifts every later entry down by one, so re-run
    'pwdcli list' before deleting again."#)]
struct Cli {
    /// Log store activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all entries with their index
    List {
        /// Output the stored entries as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Add a new entry (all fields required)
    Add {
        /// Website or service name
        #[arg(long)]
        website: String,
        /// Login username
        #[arg(long)]
        username: String,
        /// Email linked to the account
        #[arg(long)]
        email: String,
        /// Password
        #[arg(long = "pwd")]
        password: String,
    },

    /// Delete the entry at INDEX (see 'list')
    Delete {
        /// Zero-based entry index
        #[arg(value_parser = clap::value_parser!(i64).range(0..))]
        index: i64,
    },

    /// Search entries by keyword (case-insensitive, all fields)
    Search {
        /// Text to look for
        keyword: String,
    },

    /// Print the path of the store file
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = RecordStore::open_default()?;
    store
        .ensure_initialized()
        .with_context(|| format!("Failed to create password file: {}", store.path().display()))?;
    let engine = QueryEngine::new(store);

    match cli.command {
        Some(Commands::List { json }) => cmd_list(&engine, json),
        Some(Commands::Add {
            website,
            username,
            email,
            password,
        }) => cmd_add(&engine, Record::new(website, username, email, password)),
        Some(Commands::Delete { index }) => cmd_delete(&engine, index),
        Some(Commands::Search { keyword }) => cmd_search(&engine, &keyword),
        Some(Commands::Path) => cmd_path(&engine),
        None => cmd_list(&engine, false),
    }
}

/// List all entries
fn cmd_list(engine: &QueryEngine, json: bool) -> Result<()> {
    if json {
        let records = engine.records()?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let lines = engine.list_all()?;
    if lines.is_empty() {
        println!("No entries stored. Add one with: pwdcli add --website ... --username ... --email ... --pwd ...");
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// Add an entry
fn cmd_add(engine: &QueryEngine, record: Record) -> Result<()> {
    validate_new_record(&record)?;

    engine.append(record).context("Failed to add entry")?;
    println!("Entry added successfully.");

    Ok(())
}

/// Delete an entry by index
fn cmd_delete(engine: &QueryEngine, index: i64) -> Result<()> {
    if engine.delete_at(index)? {
        println!("Entry [{}] deleted.", index);
    }
    Ok(())
}

/// Search entries
fn cmd_search(engine: &QueryEngine, keyword: &str) -> Result<()> {
    let matches = engine.search(keyword)?;

    if matches.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for m in matches {
        println!("{}", m.line());
    }

    Ok(())
}

/// Show the store location
fn cmd_path(engine: &QueryEngine) -> Result<()> {
    println!("{}", engine.store().path().display());
    Ok(())
}

/// Reject entries with blank fields before anything is written
fn validate_new_record(record: &Record) -> Result<()> {
    let missing: Vec<&str> = [
        ("--website", &record.website),
        ("--username", &record.username),
        ("--email", &record.email),
        ("--pwd", &record.password),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(flag, _)| flag)
    .collect();

    if !missing.is_empty() {
        bail!("Missing fields for add: {}", missing.join(" "));
    }

    Ok(())
}
