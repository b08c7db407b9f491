//! Command implementations for the intake CLI

pub mod config;
pub mod questions;
pub mod run;
pub mod submit;
pub mod webhook;

pub use config::handle_config_command;
pub use questions::list_questions;
pub use run::run_questionnaire;
pub use submit::submit_answers;
pub use webhook::handle_webhook_command;
