//! `lectern` — store and query lecture announcements.
//!
//! # Usage
//!
//! ```text
//! lectern ingest announcement.txt
//! lectern ingest --edited < announcement.txt
//! lectern list --subject CS101
//! lectern attach '#CS101 Lecture.1' --kind photo --file-id AgACAgIAAxk
//! lectern --json show '#CS101 Lecture.1'
//! ```

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lectern_core::attachment::{Attachment, AttachmentType};
use lectern_store_sqlite::SqliteStore;
use serde::Serialize;
use settings::{Settings, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::commands::Ingested;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lectern", author, version, about = "Store and query lecture announcements")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lectern.toml")]
  config: PathBuf,

  /// SQLite database file; overrides `database_path` from the config.
  #[arg(long)]
  database: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Parse an announcement (file or stdin) and store it.
  Ingest {
    /// Announcement file; `-` or omitted reads stdin.
    file:   Option<PathBuf>,
    /// Treat the text as an edit: replace the content of an existing lecture.
    #[arg(long)]
    edited: bool,
  },
  /// Show one lecture with its attachments.
  Show { unique_id: String },
  /// List lectures in date order.
  List {
    /// Only lectures of this subject code.
    #[arg(long)]
    subject: Option<String>,
  },
  /// List known subjects.
  Subjects,
  /// Replace a lecture's content with text from a file or stdin.
  SetContent {
    unique_id: String,
    file:      Option<PathBuf>,
  },
  /// Append an attachment to a lecture.
  Attach {
    unique_id: String,
    #[arg(long, value_parser = AttachmentType::parse_literal)]
    kind:      AttachmentType,
    #[arg(long)]
    file_id:   String,
    #[arg(long)]
    ocr_text:  Option<String>,
  },
  /// Delete a lecture and its attachments.
  Delete { unique_id: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so `--json` output stays machine-readable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)?;
  let database = expand_tilde(cli.database.as_ref().unwrap_or(&settings.database_path));

  let store = SqliteStore::open(&database)
    .await
    .with_context(|| format!("failed to open store at {database:?}"))?;
  tracing::debug!(?database, "opened store");

  let json = cli.json;
  match cli.command {
    Command::Ingest { file, edited } => {
      let text = commands::read_input(file.as_deref())?;
      let outcome = commands::ingest(&store, &text, edited).await?;
      if json {
        print_json(&outcome)?;
      } else {
        match outcome {
          Ingested::Added(lecture) => println!("added {}", lecture.unique_id()),
          Ingested::Updated(lecture) => println!("updated {}", lecture.unique_id()),
        }
      }
    }
    Command::Show { unique_id } => {
      let lecture = commands::show(&store, &unique_id).await?;
      if json {
        print_json(&lecture)?;
      } else {
        print!("{}", commands::render_lecture(&lecture));
      }
    }
    Command::List { subject } => {
      let lectures = commands::list(&store, subject.as_deref()).await?;
      if json {
        print_json(&lectures)?;
      } else {
        for lecture in &lectures {
          println!("{}", commands::render_summary(lecture));
        }
      }
    }
    Command::Subjects => {
      let subjects = commands::subjects(&store).await?;
      if json {
        print_json(&subjects)?;
      } else {
        for subject in &subjects {
          println!("{:<12}  {}", subject.subject_id, subject.name);
        }
      }
    }
    Command::SetContent { unique_id, file } => {
      let content = commands::read_input(file.as_deref())?;
      let lecture = commands::set_content(&store, &unique_id, content.trim_end()).await?;
      if json {
        print_json(&lecture)?;
      } else {
        println!("updated {}", lecture.unique_id());
      }
    }
    Command::Attach { unique_id, kind, file_id, ocr_text } => {
      let attachment = Attachment { attachment_type: kind, file_id, ocr_text };
      let lecture = commands::attach(&store, &unique_id, attachment).await?;
      if json {
        print_json(&lecture)?;
      } else {
        println!("{} now has {} attachment(s)", lecture.unique_id(), lecture.attachments.len());
      }
    }
    Command::Delete { unique_id } => {
      commands::delete(&store, &unique_id).await?;
      if !json {
        println!("deleted {unique_id}");
      }
    }
  }

  Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}
