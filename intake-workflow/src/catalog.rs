use shared_types::{Question, QuestionKind};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while building a custom question catalog
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Question catalog must contain at least one question")]
    Empty,

    #[error("Question at index {index} has empty {field}")]
    BlankField { index: usize, field: &'static str },

    #[error("Duplicate question key: {0}")]
    DuplicateKey(String),

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[cfg(feature = "catalog-file")]
    #[error("Failed to parse question catalog: {0}")]
    Parse(String),
}

/// Fixed, ordered list of questions
///
/// Order defines traversal order and is never changed after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting empty lists, blank fields and duplicate keys or ids
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut keys = HashSet::new();
        let mut ids = HashSet::new();
        for (index, question) in questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                return Err(CatalogError::BlankField { index, field: "id" });
            }
            if question.key.trim().is_empty() {
                return Err(CatalogError::BlankField { index, field: "key" });
            }
            if question.label.trim().is_empty() {
                return Err(CatalogError::BlankField {
                    index,
                    field: "label",
                });
            }
            if !keys.insert(question.key.as_str()) {
                return Err(CatalogError::DuplicateKey(question.key.clone()));
            }
            if !ids.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
        }

        Ok(Self { questions })
    }

    /// Load a catalog from TOML with a top-level `[[questions]]` array
    #[cfg(feature = "catalog-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        #[derive(serde::Deserialize)]
        struct CatalogFile {
            questions: Vec<Question>,
        }

        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.questions)
    }

    pub fn all_questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.key == key)
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self {
            questions: project_requirement_questions(),
        }
    }
}

/// The built-in project requirements questionnaire
pub fn project_requirement_questions() -> Vec<Question> {
    use QuestionKind::{MultiLine, SingleLine};

    vec![
        Question::new(
            "q1",
            "project_name",
            "What is the name of your project?",
            SingleLine,
        ),
        Question::new(
            "q2",
            "goal",
            "What is the main goal of your website?",
            MultiLine,
        ),
        Question::new(
            "q3",
            "features",
            "What kind of functionality should the site include?",
            MultiLine,
        )
        .with_prompt("(e.g., contact form, product catalog, blog - comma-separated)")
        .list(),
        Question::new(
            "q4",
            "target_audience",
            "Who is your target audience?",
            MultiLine,
        ),
        Question::new(
            "q5",
            "branding_materials",
            "Do you already have any branding materials (logo, colors, fonts, etc.)?",
            SingleLine,
        )
        .with_prompt("(List items or type \"None\" - comma-separated)")
        .list(),
        Question::new(
            "q6",
            "design_references",
            "Are there any websites you admire stylistically or functionally?",
            MultiLine,
        )
        .with_prompt("(List URLs - comma-separated)")
        .list(),
        Question::new(
            "q7",
            "content_types",
            "What kind of content will you provide?",
            MultiLine,
        )
        .with_prompt("(e.g., text, images, videos - comma-separated)")
        .list(),
        Question::new(
            "q8",
            "timeline",
            "What is your desired launch date or timeline?",
            SingleLine,
        ),
        Question::new(
            "q9",
            "budget",
            "Do you have a fixed budget or estimated range?",
            SingleLine,
        ),
    ]
}
