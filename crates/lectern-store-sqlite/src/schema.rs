//! SQL schema for the lectern SQLite store.
//!
//! Executed once at connection startup; tracked with `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lectures (
    unique_id           TEXT PRIMARY KEY,   -- '#<subject_id> <lecture_type>.<class_id>'
    date                TEXT NOT NULL,      -- YYYY-MM-DD
    lecture_type        TEXT NOT NULL
                        CHECK (lecture_type IN ('Lecture', 'Practice', 'Seminar', 'Lab')),
    class_id            INTEGER,
    absolute_lecture_id INTEGER NOT NULL,
    relative_lecture_id INTEGER,
    classroom           TEXT,
    content             TEXT,
    subject_id          TEXT NOT NULL REFERENCES subjects(subject_id)
);

-- Owned by a lecture; removed with it.
CREATE TABLE IF NOT EXISTS attachments (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    attachment_type TEXT NOT NULL
                    CHECK (attachment_type IN ('Photo', 'Document', 'Video', 'Audio')),
    file_id         TEXT NOT NULL,
    ocr_text        TEXT,
    lecture_id      TEXT NOT NULL REFERENCES lectures(unique_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS lectures_date_idx       ON lectures(date);
CREATE INDEX IF NOT EXISTS lectures_class_idx      ON lectures(class_id);
CREATE INDEX IF NOT EXISTS lectures_subject_idx    ON lectures(subject_id);
CREATE INDEX IF NOT EXISTS attachments_lecture_idx ON attachments(lecture_id);

PRAGMA user_version = 1;
";
