//! Hanbox: a lesson-preparation helper for Chinese teachers.
//!
//! Renders template lesson text, condenses pasted passages to a target
//! length and drafts six comprehension questions. Everything is plain string
//! templating; the only durable state is the chosen persona.

pub mod config;
pub mod error;
pub mod export;
pub mod formatter;
pub mod model;
pub mod preference;
pub mod session;

pub use config::clamp_length_input;
pub use error::{HanboxError, Result};
pub use export::{
    build_export, combine_outputs, download_text, export_filename, BrowserDownloader,
    DirectoryDownloader, ExportFile, TextDownloader,
};
pub use formatter::{generate_lesson, generate_questions, rewrite_lesson};
pub use model::{
    CefrLevel, GeneratedOutputs, LessonRequest, MaterialType, QuestionRequest, RewriteRequest,
    Script,
};
pub use preference::{FileStore, LocalStorageStore, MemoryStore, Preference, PreferenceStore};
pub use session::{LessonEdit, RewriteEdit, Session, SessionAction};
