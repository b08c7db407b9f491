use crate::answers::{process_answer, AnswerStore};
use crate::catalog::QuestionCatalog;
use shared_types::{AnswerSet, AnswerValue, Question};
use tracing::debug;

/// Linear walk through a question catalog
///
/// Owns the answer store for one questionnaire session. Every index change
/// commits the draft of the question being left and rehydrates the draft of
/// the question arrived at.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    catalog: QuestionCatalog,
    current_index: usize,
    store: AnswerStore,
}

impl NavigationEngine {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self {
            catalog,
            current_index: 0,
            store: AnswerStore::new(),
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        // current_index is kept within 0..len and the catalog is never empty
        &self.catalog.all_questions()[self.current_index]
    }

    pub fn draft(&self) -> &str {
        self.store.draft()
    }

    /// Committed answers, excluding the uncommitted draft
    pub fn answers(&self) -> &AnswerSet {
        self.store.answers()
    }

    pub fn on_draft_change(&mut self, text: impl Into<String>) {
        self.store.set_draft(text);
    }

    /// Store the processed draft under the current question's key
    pub fn commit_draft(&mut self) {
        let question = &self.catalog.all_questions()[self.current_index];
        self.store.commit(question);
        debug!(key = %question.key, "Committed draft");
    }

    /// Commit and advance. On the last question only the commit happens;
    /// the caller routes that case to submission.
    pub fn next(&mut self) {
        self.commit_draft();
        if self.current_index + 1 < self.catalog.len() {
            self.move_to(self.current_index + 1);
        }
    }

    /// Commit and step back. No-op on the first question.
    pub fn prev(&mut self) {
        if self.current_index == 0 {
            return;
        }
        self.commit_draft();
        self.move_to(self.current_index - 1);
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.catalog.len()
    }

    pub fn is_first_question(&self) -> bool {
        self.current_index == 0
    }

    /// Fraction of the questionnaire reached, in (0, 1]
    pub fn progress_fraction(&self) -> f64 {
        (self.current_index + 1) as f64 / self.catalog.len() as f64
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_fraction() * 100.0
    }

    /// One-based position and total, for "Question 3 of 9"
    pub fn position(&self) -> (usize, usize) {
        (self.current_index + 1, self.catalog.len())
    }

    /// Stored answers merged with the processed draft of the current question.
    /// Navigation state is left untouched.
    pub fn final_answers(&self) -> AnswerSet {
        self.store.snapshot_with_draft(self.current_question())
    }

    /// What the current draft would commit to
    pub fn preview_draft(&self) -> AnswerValue {
        process_answer(self.store.draft(), self.current_question())
    }

    /// Back to the first question with no answers
    pub fn reset(&mut self) {
        self.store.clear();
        self.current_index = 0;
    }

    fn move_to(&mut self, index: usize) {
        debug!(from = self.current_index, to = index, "Navigating");
        self.current_index = index;
        let question = &self.catalog.all_questions()[index];
        self.store.rehydrate(question);
    }
}
