//! Announcement parser for lectern.
//!
//! Converts the text of a lecture announcement into a
//! [`lectern_core::lecture::Lecture`]. Pure synchronous; no I/O and no global
//! state, so every function here is safe to call from any thread.
//!
//! # Quick start
//!
//! ```no_run
//! let text = "<b>Algorithms</b>\n#CS101 Lecture.1\nMon, 02 September 2024\n\
//!             3 (2) пара 214\n\nIntro to complexity";
//! let lecture = lectern_parse::parse(text).unwrap();
//! println!("{} on {}", lecture.unique_id(), lecture.date);
//! ```

pub mod date;
pub mod error;
pub mod ids;
mod lecture;

pub use date::{ENGLISH, RUSSIAN, VOCABULARIES, Vocabulary, format_date, parse_date, parse_date_in};
pub use error::{Error, Result};
pub use ids::parse_ids;
pub use lecture::{HeaderField, SCHEDULE_SEPARATOR, parse};
