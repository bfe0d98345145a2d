//! Attachments — files posted alongside a lecture announcement.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The kind of file an attachment points at.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AttachmentType {
  Photo,
  Document,
  Video,
  Audio,
}

impl AttachmentType {
  /// The literal used in storage and on the command line.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a literal such as `Photo` (case-insensitive).
  pub fn parse_literal(s: &str) -> Result<Self> {
    s.parse()
      .map_err(|_| Error::UnknownAttachmentType(s.to_owned()))
  }
}

/// A file attached to a lecture. Owned by exactly one lecture; removed with
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
  pub attachment_type: AttachmentType,
  /// Opaque identifier assigned by the delivery channel.
  pub file_id:         String,
  /// Text recognised in the file, when OCR has been run.
  pub ocr_text:        Option<String>,
}

impl Attachment {
  pub fn new(attachment_type: AttachmentType, file_id: impl Into<String>) -> Self {
    Self { attachment_type, file_id: file_id.into(), ocr_text: None }
  }

  pub fn with_ocr_text(mut self, text: impl Into<String>) -> Self {
    self.ocr_text = Some(text.into());
    self
  }
}
