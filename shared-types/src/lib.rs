// Shared models for the intake workflow, client and cli

pub mod answers;
pub mod identity;
pub mod question;
pub mod submission;
pub mod typescript_gen;

pub use typescript_gen::generate_typescript_definitions;

pub use answers::{AnswerSet, AnswerValue};
pub use identity::{UserIdentity, UserProfile};
pub use question::{Question, QuestionKind};
pub use submission::{NewProject, ProjectId, SubmissionRecord, SubmissionStatus, WebhookPayload};
