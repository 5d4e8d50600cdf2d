//! Request records and labels for the three generators.
//!
//! Every record is a plain value: no identity, nothing persisted. The session
//! replaces them by reassignment.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::config::{
    DEFAULT_GRAMMAR_POINT, DEFAULT_LENGTH, DEFAULT_NATIVE_LANGUAGE, DEFAULT_PERSONA,
    DEFAULT_TOPIC, SAMPLE_DIALOGUE, SAMPLE_REWRITE_SOURCE,
};

/// CEFR proficiency tag. Only ever shown as a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum CefrLevel {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum Script {
    #[default]
    #[strum(to_string = "繁體中文")]
    Traditional,
    #[strum(to_string = "簡體中文")]
    Simplified,
}

/// Selects which lesson template branch is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum MaterialType {
    #[strum(to_string = "文章")]
    Article,
    #[strum(to_string = "對話")]
    Dialogue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRequest {
    pub level: CefrLevel,
    pub script: Script,
    pub native_language: String,
    /// Display figure only; the generated text is not held to it.
    pub target_length: u32,
    pub material_type: MaterialType,
    pub topic: String,
    /// Empty means no grammar focus.
    pub grammar_point: String,
    pub persona: String,
}

impl Default for LessonRequest {
    fn default() -> Self {
        Self {
            level: CefrLevel::A1,
            script: Script::Traditional,
            native_language: DEFAULT_NATIVE_LANGUAGE.to_string(),
            target_length: DEFAULT_LENGTH,
            material_type: MaterialType::Dialogue,
            topic: DEFAULT_TOPIC.to_string(),
            grammar_point: DEFAULT_GRAMMAR_POINT.to_string(),
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteRequest {
    pub source_text: String,
    pub level: CefrLevel,
    pub material_type: MaterialType,
    pub target_length: u32,
    pub persona: String,
}

impl Default for RewriteRequest {
    fn default() -> Self {
        Self {
            source_text: SAMPLE_REWRITE_SOURCE.to_string(),
            level: CefrLevel::A1,
            material_type: MaterialType::Article,
            target_length: DEFAULT_LENGTH,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRequest {
    pub passage: String,
}

impl Default for QuestionRequest {
    fn default() -> Self {
        Self {
            passage: SAMPLE_DIALOGUE.to_string(),
        }
    }
}

/// Latest result of each generator. Slots are independent and are not
/// cleared when the inputs change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedOutputs {
    pub lesson_text: String,
    pub rewrite_text: String,
    pub questions_text: String,
}
