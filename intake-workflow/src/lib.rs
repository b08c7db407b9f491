//! # Intake Workflow
//!
//! Questionnaire state for collecting project requirements.
//! A fixed catalog of questions is walked front to back; every move commits
//! the draft of the question being left and restores the stored answer of
//! the question arrived at.
//!
//! ```rust
//! use intake_workflow::{NavigationEngine, QuestionCatalog};
//!
//! let mut engine = NavigationEngine::new(QuestionCatalog::default());
//! engine.on_draft_change("My Bakery Site");
//! engine.next();
//! assert_eq!(engine.answers().draft_for("project_name"), "My Bakery Site");
//! ```

pub mod answers;
pub mod catalog;
pub mod navigation;

pub use answers::{process_answer, AnswerStore};
pub use catalog::{project_requirement_questions, CatalogError, QuestionCatalog};
pub use navigation::NavigationEngine;
pub use shared_types::{AnswerSet, AnswerValue, Question, QuestionKind};
