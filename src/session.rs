//! Session state: form values, latest outputs and the named actions that
//! change them.

use std::rc::Rc;

use chrono::NaiveDate;
use yew::Reducible;

use crate::config::{
    DEFAULT_GRAMMAR_POINT, DEFAULT_PERSONA, DEFAULT_TOPIC, SAMPLE_DIALOGUE,
    SAMPLE_REWRITE_SOURCE,
};
use crate::error::Result;
use crate::export::{build_export, ExportFile, TextDownloader};
use crate::formatter::{generate_lesson, generate_questions, rewrite_lesson};
use crate::model::{
    CefrLevel, GeneratedOutputs, LessonRequest, MaterialType, QuestionRequest, RewriteRequest,
    Script,
};
use crate::preference::{Preference, PreferenceStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonEdit {
    Level(CefrLevel),
    Script(Script),
    NativeLanguage(String),
    TargetLength(u32),
    MaterialType(MaterialType),
    Topic(String),
    GrammarPoint(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteEdit {
    Level(CefrLevel),
    MaterialType(MaterialType),
    TargetLength(u32),
    SourceText(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    SetPersona(String),
    EditLesson(LessonEdit),
    EditRewrite(RewriteEdit),
    SetPassage(String),
    GenerateLesson,
    LoadLessonSample,
    Rewrite,
    LoadRewriteSample,
    GenerateQuestions,
}

#[derive(Clone)]
pub struct Session {
    store: Rc<dyn PreferenceStore>,
    persona: String,
    lesson: LessonRequest,
    rewrite: RewriteRequest,
    questions: QuestionRequest,
    outputs: GeneratedOutputs,
}

impl Session {
    /// Starts a session, reading the stored persona once.
    pub fn new(store: Rc<dyn PreferenceStore>) -> Self {
        let persona = match store.load() {
            Some(Preference { persona }) if !persona.is_empty() => {
                tracing::debug!("Restored persona: {}", persona);
                persona
            }
            _ => DEFAULT_PERSONA.to_string(),
        };

        Self {
            store,
            persona,
            lesson: LessonRequest::default(),
            rewrite: RewriteRequest::default(),
            questions: QuestionRequest::default(),
            outputs: GeneratedOutputs::default(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn lesson(&self) -> &LessonRequest {
        &self.lesson
    }

    pub fn rewrite(&self) -> &RewriteRequest {
        &self.rewrite
    }

    pub fn questions(&self) -> &QuestionRequest {
        &self.questions
    }

    pub fn outputs(&self) -> &GeneratedOutputs {
        &self.outputs
    }

    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::SetPersona(persona) => self.set_persona(persona),
            SessionAction::EditLesson(edit) => self.edit_lesson(edit),
            SessionAction::EditRewrite(edit) => self.edit_rewrite(edit),
            SessionAction::SetPassage(passage) => self.questions.passage = passage,
            SessionAction::GenerateLesson => self.generate_lesson(),
            SessionAction::LoadLessonSample => self.load_lesson_sample(),
            SessionAction::Rewrite => self.rewrite_source(),
            SessionAction::LoadRewriteSample => {
                self.rewrite.source_text = SAMPLE_REWRITE_SOURCE.to_string();
            }
            SessionAction::GenerateQuestions => self.generate_questions(),
        }
    }

    /// Changes the persona and writes it through to the store. A failed write
    /// only costs persistence, so it is logged and the session carries on.
    pub fn set_persona(&mut self, persona: String) {
        if let Err(err) = self.store.save(&Preference::new(persona.as_str())) {
            tracing::warn!("Failed to save persona preference: {}", err);
        }
        tracing::info!("Persona set to {}", persona);
        self.persona = persona;
    }

    pub fn edit_lesson(&mut self, edit: LessonEdit) {
        let lesson = &mut self.lesson;
        match edit {
            LessonEdit::Level(level) => lesson.level = level,
            LessonEdit::Script(script) => lesson.script = script,
            LessonEdit::NativeLanguage(language) => lesson.native_language = language,
            LessonEdit::TargetLength(length) => lesson.target_length = length,
            LessonEdit::MaterialType(material_type) => lesson.material_type = material_type,
            LessonEdit::Topic(topic) => lesson.topic = topic,
            LessonEdit::GrammarPoint(grammar) => lesson.grammar_point = grammar,
        }
    }

    pub fn edit_rewrite(&mut self, edit: RewriteEdit) {
        let rewrite = &mut self.rewrite;
        match edit {
            RewriteEdit::Level(level) => rewrite.level = level,
            RewriteEdit::MaterialType(material_type) => rewrite.material_type = material_type,
            RewriteEdit::TargetLength(length) => rewrite.target_length = length,
            RewriteEdit::SourceText(text) => rewrite.source_text = text,
        }
    }

    pub fn generate_lesson(&mut self) {
        self.lesson.persona.clone_from(&self.persona);
        self.outputs.lesson_text = generate_lesson(&self.lesson);
    }

    /// Resets the lesson form to the typhoon sample and shows a ready-made
    /// dialogue in the lesson slot.
    pub fn load_lesson_sample(&mut self) {
        self.lesson.topic = DEFAULT_TOPIC.to_string();
        self.lesson.material_type = MaterialType::Dialogue;
        self.lesson.grammar_point = DEFAULT_GRAMMAR_POINT.to_string();
        self.outputs.lesson_text = SAMPLE_DIALOGUE.to_string();
    }

    pub fn rewrite_source(&mut self) {
        self.rewrite.persona.clone_from(&self.persona);
        self.outputs.rewrite_text = rewrite_lesson(&self.rewrite);
    }

    pub fn generate_questions(&mut self) {
        self.outputs.questions_text = generate_questions(&self.questions);
    }

    pub fn export_file(&self, today: NaiveDate) -> Option<ExportFile> {
        build_export(&self.outputs, today)
    }

    /// Hands the combined results to `downloader`. Returns `Ok(None)` without
    /// touching the downloader when every slot is empty.
    pub fn export(
        &self,
        today: NaiveDate,
        downloader: &dyn TextDownloader,
    ) -> Result<Option<ExportFile>> {
        let Some(file) = self.export_file(today) else {
            tracing::debug!("Nothing to export");
            return Ok(None);
        };
        downloader.download(&file)?;
        Ok(Some(file))
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
            && self.persona == other.persona
            && self.lesson == other.lesson
            && self.rewrite == other.rewrite
            && self.questions == other.questions
            && self.outputs == other.outputs
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}
