//! [`SqliteStore`] — the SQLite implementation of [`LectureStore`].

use std::{collections::HashMap, path::Path, time::Duration};

use lectern_core::{
  attachment::Attachment,
  lecture::Lecture,
  store::LectureStore,
  subject::Subject,
};
use rusqlite::{ErrorCode, OptionalExtension as _, TransactionBehavior, ffi};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  encode::{AttachmentRow, LectureRow, RawAttachment, RawLecture, RawSubject},
  schema::SCHEMA,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// Which lectures a read selects.
enum Filter {
  All,
  Subject(String),
  Lecture(String),
}

impl Filter {
  fn where_clause(&self) -> &'static str {
    match self {
      Self::All => "",
      Self::Subject(_) => "WHERE l.subject_id = ?1",
      Self::Lecture(_) => "WHERE l.unique_id = ?1",
    }
  }

  fn param(&self) -> Option<&str> {
    match self {
      Self::All => None,
      Self::Subject(id) | Self::Lecture(id) => Some(id),
    }
  }
}

/// Load lectures with their subject and attachments. Ordered by date, then
/// by insertion order.
fn load_lectures(conn: &rusqlite::Connection, filter: &Filter) -> rusqlite::Result<Vec<RawLecture>> {
  let where_clause = filter.where_clause();

  let mut stmt = conn.prepare(&format!(
    "SELECT
       l.unique_id, l.date, l.lecture_type, l.class_id,
       l.absolute_lecture_id, l.relative_lecture_id, l.classroom, l.content,
       s.subject_id, s.name
     FROM lectures l
     JOIN subjects s ON s.subject_id = l.subject_id
     {where_clause}
     ORDER BY l.date, l.rowid"
  ))?;
  let mut lectures = stmt
    .query_map(rusqlite::params_from_iter(filter.param()), |row| {
      Ok(RawLecture {
        unique_id:           row.get(0)?,
        date:                row.get(1)?,
        lecture_type:        row.get(2)?,
        class_id:            row.get(3)?,
        absolute_lecture_id: row.get(4)?,
        relative_lecture_id: row.get(5)?,
        classroom:           row.get(6)?,
        content:             row.get(7)?,
        subject:             RawSubject { subject_id: row.get(8)?, name: row.get(9)? },
        attachments:         Vec::new(),
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  if lectures.is_empty() {
    return Ok(lectures);
  }

  let mut stmt = conn.prepare(&format!(
    "SELECT a.lecture_id, a.attachment_type, a.file_id, a.ocr_text
     FROM attachments a
     JOIN lectures l ON l.unique_id = a.lecture_id
     {where_clause}
     ORDER BY a.id"
  ))?;
  let attachments = stmt
    .query_map(rusqlite::params_from_iter(filter.param()), |row| {
      Ok(RawAttachment {
        lecture_id:      row.get(0)?,
        attachment_type: row.get(1)?,
        file_id:         row.get(2)?,
        ocr_text:        row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut by_lecture: HashMap<String, Vec<RawAttachment>> = HashMap::new();
  for attachment in attachments {
    by_lecture.entry(attachment.lecture_id.clone()).or_default().push(attachment);
  }
  for lecture in &mut lectures {
    if let Some(attachments) = by_lecture.remove(&lecture.unique_id) {
      lecture.attachments = attachments;
    }
  }

  Ok(lectures)
}

fn insert_attachments(
  conn: &rusqlite::Connection,
  lecture_id: &str,
  rows: &[AttachmentRow],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO attachments (attachment_type, file_id, ocr_text, lecture_id)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for row in rows {
    stmt.execute(rusqlite::params![row.attachment_type, row.file_id, row.ocr_text, lecture_id])?;
  }
  Ok(())
}

/// True if `err` is a PRIMARY KEY / UNIQUE violation.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == ErrorCode::ConstraintViolation
        && matches!(
          e.extended_code,
          ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
        )
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lecture store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation runs in its own transaction on the connection thread; writes
/// take the write lock up front (`BEGIN IMMEDIATE`).
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read lectures in a single (deferred) transaction so the lecture and
  /// attachment queries see the same snapshot.
  async fn read_lectures(&self, filter: Filter) -> Result<Vec<Lecture>> {
    let raws = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raws = load_lectures(&tx, &filter)?;
        tx.commit()?;
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawLecture::into_lecture).collect()
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── LectureStore impl ───────────────────────────────────────────────────────

impl LectureStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add(&self, lecture: Lecture) -> Result<Lecture> {
    let row = LectureRow::new(&lecture);
    let attachments: Vec<AttachmentRow> = lecture.attachments.iter().map(AttachmentRow::new).collect();
    let unique_id = row.unique_id.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Find-or-create: an existing subject keeps its name.
        tx.execute(
          "INSERT INTO subjects (subject_id, name) VALUES (?1, ?2)
           ON CONFLICT (subject_id) DO NOTHING",
          rusqlite::params![row.subject_id, row.subject_name],
        )?;

        let inserted = tx.execute(
          "INSERT INTO lectures (
             unique_id, date, lecture_type, class_id,
             absolute_lecture_id, relative_lecture_id, classroom, content, subject_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            row.unique_id,
            row.date,
            row.lecture_type,
            row.class_id,
            row.absolute_lecture_id,
            row.relative_lecture_id,
            row.classroom,
            row.content,
            row.subject_id,
          ],
        );
        match inserted {
          Ok(_) => {}
          // Dropping `tx` rolls back the subject insert as well.
          Err(e) if is_unique_violation(&e) => return Ok(false),
          Err(e) => return Err(e.into()),
        }

        insert_attachments(&tx, &row.unique_id, &attachments)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      warn!(%unique_id, "rejected duplicate lecture");
      return Err(Error::DuplicateLecture(unique_id));
    }

    debug!(%unique_id, attachments = lecture.attachments.len(), "added lecture");
    Ok(lecture)
  }

  async fn update_content(&self, unique_id: &str, content: &str) -> Result<Option<Lecture>> {
    let id = unique_id.to_owned();
    let content = content.to_owned();

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
          "UPDATE lectures SET content = ?1 WHERE unique_id = ?2",
          rusqlite::params![content, id],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let mut raws = load_lectures(&tx, &Filter::Lecture(id))?;
        tx.commit()?;
        Ok(raws.pop())
      })
      .await?;

    debug!(unique_id, found = raw.is_some(), "updated lecture content");
    raw.map(RawLecture::into_lecture).transpose()
  }

  async fn add_attachments(
    &self,
    unique_id: &str,
    attachments: Vec<Attachment>,
  ) -> Result<Option<Lecture>> {
    let id = unique_id.to_owned();
    let count = attachments.len();
    let rows: Vec<AttachmentRow> = attachments.iter().map(AttachmentRow::new).collect();

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let exists = tx
          .query_row(
            "SELECT 1 FROM lectures WHERE unique_id = ?1",
            rusqlite::params![id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }

        insert_attachments(&tx, &id, &rows)?;
        let mut raws = load_lectures(&tx, &Filter::Lecture(id))?;
        tx.commit()?;
        Ok(raws.pop())
      })
      .await?;

    debug!(unique_id, count, found = raw.is_some(), "appended attachments");
    raw.map(RawLecture::into_lecture).transpose()
  }

  async fn delete(&self, unique_id: &str) -> Result<bool> {
    let id = unique_id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM attachments WHERE lecture_id = ?1", rusqlite::params![id])?;
        let removed = tx.execute("DELETE FROM lectures WHERE unique_id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(removed > 0)
      })
      .await?;

    debug!(unique_id, removed, "deleted lecture");
    Ok(removed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get(&self, unique_id: &str) -> Result<Option<Lecture>> {
    let mut lectures = self.read_lectures(Filter::Lecture(unique_id.to_owned())).await?;
    Ok(lectures.pop())
  }

  async fn list_by_subject(&self, subject_id: &str) -> Result<Vec<Lecture>> {
    self.read_lectures(Filter::Subject(subject_id.to_owned())).await
  }

  async fn list_all(&self) -> Result<Vec<Lecture>> { self.read_lectures(Filter::All).await }

  async fn get_subject(&self, subject_id: &str) -> Result<Option<Subject>> {
    let id = subject_id.to_owned();

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT subject_id, name FROM subjects WHERE subject_id = ?1",
            rusqlite::params![id],
            |row| Ok(RawSubject { subject_id: row.get(0)?, name: row.get(1)? }),
          )
          .optional()?)
      })
      .await?;

    Ok(raw.map(RawSubject::into_subject))
  }

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT subject_id, name FROM subjects ORDER BY subject_id")?;
        let rows = stmt
          .query_map([], |row| Ok(RawSubject { subject_id: row.get(0)?, name: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawSubject::into_subject).collect())
  }
}
