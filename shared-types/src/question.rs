// Questionnaire definitions shared between the workflow engine, the client and the cli

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single prompt in the fixed questionnaire sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
pub struct Question {
    /// Stable identifier used for display anchors (e.g. "q1")
    pub id: String,
    /// Key under which the answer is stored in the answer set
    pub key: String,
    /// The question text shown to the user
    pub label: String,
    /// Optional help text, e.g. "(e.g., contact form, blog - comma-separated)"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub prompt: Option<String>,
    /// Input widget expected for this question
    #[serde(default)]
    pub kind: QuestionKind,
    /// Whether the answer is split on commas into a list
    #[serde(default)]
    pub is_list: bool,
}

/// Type of input expected for a question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One line of text
    #[default]
    SingleLine,
    /// Free-form text spanning several lines
    MultiLine,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        label: impl Into<String>,
        kind: QuestionKind,
    ) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            label: label.into(),
            prompt: None,
            kind,
            is_list: false,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Mark this question as producing a comma-separated list answer
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Placeholder text shown in an empty input
    pub fn placeholder(&self) -> String {
        format!("Your answer for {}", self.label.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_builder() {
        let question = Question::new("q3", "features", "Which features?", QuestionKind::MultiLine)
            .with_prompt("(comma-separated)")
            .list();

        assert_eq!(question.key, "features");
        assert_eq!(question.prompt.as_deref(), Some("(comma-separated)"));
        assert!(question.is_list);
    }

    #[test]
    fn test_placeholder_lowercases_label() {
        let question = Question::new(
            "q1",
            "project_name",
            "What is the name of your project?",
            QuestionKind::SingleLine,
        );
        assert_eq!(
            question.placeholder(),
            "Your answer for what is the name of your project?"
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let question: Question =
            serde_json::from_str(r#"{"id":"q9","key":"budget","label":"Budget?"}"#).unwrap();
        assert_eq!(question.kind, QuestionKind::SingleLine);
        assert!(!question.is_list);
        assert!(question.prompt.is_none());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&QuestionKind::MultiLine).unwrap();
        assert_eq!(json, "\"multi_line\"");
    }
}
