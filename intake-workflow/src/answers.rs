use shared_types::{AnswerSet, AnswerValue, Question};

/// Turn raw draft text into the answer shape the question expects
///
/// List questions split on `,`, trim every segment and drop blanks. Scalar
/// questions are trimmed.
pub fn process_answer(draft: &str, question: &Question) -> AnswerValue {
    if question.is_list {
        AnswerValue::List(
            draft
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )
    } else {
        AnswerValue::Scalar(draft.trim().to_string())
    }
}

/// Committed answers plus the raw draft of the question on screen
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: AnswerSet,
    draft: String,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft verbatim
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Process the draft for `question` and store it, overwriting any prior value
    pub fn commit(&mut self, question: &Question) {
        let value = process_answer(&self.draft, question);
        self.answers.insert(question.key.clone(), value);
    }

    /// Load the stored answer for `question` into the draft, or clear it
    pub fn rehydrate(&mut self, question: &Question) {
        self.draft = self.answers.draft_for(&question.key);
    }

    /// Stored answers with the current draft committed for `question`,
    /// leaving the store untouched
    pub fn snapshot_with_draft(&self, question: &Question) -> AnswerSet {
        let mut snapshot = self.answers.clone();
        snapshot.insert(question.key.clone(), process_answer(&self.draft, question));
        snapshot
    }

    pub fn clear(&mut self) {
        self.answers = AnswerSet::new();
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::QuestionKind;

    fn list_question() -> Question {
        Question::new("q3", "features", "Features?", QuestionKind::MultiLine).list()
    }

    fn scalar_question() -> Question {
        Question::new("q1", "project_name", "Name?", QuestionKind::SingleLine)
    }

    #[test]
    fn test_process_list_answer() {
        assert_eq!(
            process_answer("a, b ,, c", &list_question()),
            AnswerValue::from(vec!["a", "b", "c"])
        );
    }

    #[test]
    fn test_process_scalar_answer() {
        assert_eq!(
            process_answer("  hello  ", &scalar_question()),
            AnswerValue::from("hello")
        );
    }

    #[test]
    fn test_scalar_keeps_commas() {
        assert_eq!(
            process_answer(" $5,000 - $10,000 ", &scalar_question()),
            AnswerValue::from("$5,000 - $10,000")
        );
    }

    #[test]
    fn test_blank_list_is_empty_not_missing() {
        let mut store = AnswerStore::new();
        store.set_draft(" , ,  ");
        store.commit(&list_question());

        assert_eq!(
            store.answers().get("features"),
            Some(&AnswerValue::List(Vec::new()))
        );
    }

    #[test]
    fn test_set_draft_is_verbatim() {
        let mut store = AnswerStore::new();
        store.set_draft("  spaced  ");
        assert_eq!(store.draft(), "  spaced  ");
    }

    #[test]
    fn test_rehydrate_round_trip() {
        let question = list_question();
        let mut store = AnswerStore::new();
        store.set_draft("blog,shop ,  gallery");
        store.commit(&question);

        store.set_draft("something else");
        store.rehydrate(&question);
        assert_eq!(store.draft(), "blog, shop, gallery");
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let question = scalar_question();
        let mut store = AnswerStore::new();
        store.set_draft("Draft name");

        let snapshot = store.snapshot_with_draft(&question);
        assert_eq!(snapshot.draft_for("project_name"), "Draft name");
        assert!(store.answers().is_empty());
    }
}
