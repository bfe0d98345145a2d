//! Subcommand implementations. Each returns data; `main` decides how to
//! print it.

use std::{io::Read as _, path::Path};

use anyhow::{Context as _, bail};
use lectern_core::{
  attachment::Attachment,
  lecture::Lecture,
  store::LectureStore,
  subject::Subject,
};
use lectern_store_sqlite::SqliteStore;
use serde::Serialize;

// ─── Input ───────────────────────────────────────────────────────────────────

/// Read announcement text from `path`, or from stdin when `path` is `None`
/// or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
  match path {
    Some(p) if p != Path::new("-") => {
      std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
    }
    _ => {
      let mut text = String::new();
      std::io::stdin()
        .read_to_string(&mut text)
        .context("reading stdin")?;
      Ok(text)
    }
  }
}

// ─── Ingest ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", content = "lecture", rename_all = "snake_case")]
pub enum Ingested {
  Added(Lecture),
  /// An edited announcement replaced the content of an existing lecture.
  Updated(Lecture),
}

/// Parse `text` and store the lecture.
///
/// With `edited`, an announcement whose id already exists replaces that
/// lecture's content instead of failing. Only the content changes; header
/// edits that alter the id produce a new lecture.
pub async fn ingest(store: &SqliteStore, text: &str, edited: bool) -> anyhow::Result<Ingested> {
  let lecture = lectern_parse::parse(text)
    .with_context(|| format!("rejected announcement:\n{text}"))?;
  let unique_id = lecture.unique_id();
  let content = lecture.content.clone();

  match store.add(lecture).await {
    Ok(added) => {
      tracing::info!(%unique_id, "stored lecture");
      Ok(Ingested::Added(added))
    }
    Err(e) if edited && e.is_duplicate() => {
      let updated = store
        .update_content(&unique_id, &content)
        .await?
        .with_context(|| format!("lecture {unique_id:?} disappeared during update"))?;
      tracing::info!(%unique_id, "updated lecture from edited announcement");
      Ok(Ingested::Updated(updated))
    }
    Err(e) => Err(e).with_context(|| format!("storing {unique_id:?}")),
  }
}

// ─── Queries and edits ───────────────────────────────────────────────────────

pub async fn show(store: &SqliteStore, unique_id: &str) -> anyhow::Result<Lecture> {
  store
    .get(unique_id)
    .await?
    .with_context(|| format!("no lecture with id {unique_id:?}"))
}

pub async fn list(store: &SqliteStore, subject: Option<&str>) -> anyhow::Result<Vec<Lecture>> {
  Ok(match subject {
    Some(subject_id) => store.list_by_subject(subject_id).await?,
    None => store.list_all().await?,
  })
}

pub async fn subjects(store: &SqliteStore) -> anyhow::Result<Vec<Subject>> {
  Ok(store.list_subjects().await?)
}

pub async fn set_content(
  store: &SqliteStore,
  unique_id: &str,
  content: &str,
) -> anyhow::Result<Lecture> {
  store
    .update_content(unique_id, content)
    .await?
    .with_context(|| format!("no lecture with id {unique_id:?}"))
}

pub async fn attach(
  store: &SqliteStore,
  unique_id: &str,
  attachment: Attachment,
) -> anyhow::Result<Lecture> {
  store
    .add_attachments(unique_id, vec![attachment])
    .await?
    .with_context(|| format!("no lecture with id {unique_id:?}"))
}

pub async fn delete(store: &SqliteStore, unique_id: &str) -> anyhow::Result<()> {
  if !store.delete(unique_id).await? {
    bail!("no lecture with id {unique_id:?}");
  }
  Ok(())
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Multi-line, human-readable view of one lecture.
pub fn render_lecture(lecture: &Lecture) -> String {
  let mut out = format!(
    "{}  {}\n  date:      {}\n  periods:   {} ({})\n  classroom: {}\n",
    lecture.unique_id(),
    lecture.subject.name,
    lecture.date,
    lecture.absolute_lecture_id,
    lecture.relative_lecture_id,
    lecture.classroom,
  );
  for attachment in &lecture.attachments {
    out.push_str(&format!("  {}: {}", attachment.attachment_type, attachment.file_id));
    if let Some(text) = &attachment.ocr_text {
      out.push_str(&format!(" [{} chars of text]", text.chars().count()));
    }
    out.push('\n');
  }
  if !lecture.content.is_empty() {
    out.push('\n');
    out.push_str(&lecture.content);
    out.push('\n');
  }
  out
}

/// One line per lecture.
pub fn render_summary(lecture: &Lecture) -> String {
  format!(
    "{}  {:<24}  {}  (room {})",
    lecture.date,
    lecture.unique_id(),
    lecture.subject.name,
    lecture.classroom
  )
}

// ─── Tests ───────────────────────────────────────────────────────────────────
