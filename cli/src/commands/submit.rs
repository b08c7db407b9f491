//! Non-interactive submission of a prepared answers file

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::terminal;
use intake_client::{resolve_user, SubmitOutcome, SubmitRequest, WebhookUrlSetting};
use intake_workflow::{process_answer, QuestionCatalog};
use shared_types::AnswerSet;
use std::path::Path;
use tracing::info;

/// Read an AnswerSet from JSON and reshape each answer to its question's kind
pub fn load_answers(path: &Path, catalog: &QuestionCatalog) -> Result<AnswerSet, CliError> {
    let content = std::fs::read_to_string(path)?;
    let raw: AnswerSet = serde_json::from_str(&content).map_err(|e| {
        CliError::Validation(format!("{} is not a valid answers file: {}", path.display(), e))
    })?;
    normalize_answers(raw, catalog)
}

fn normalize_answers(raw: AnswerSet, catalog: &QuestionCatalog) -> Result<AnswerSet, CliError> {
    let unknown: Vec<&str> = raw
        .iter()
        .map(|(key, _)| key.as_str())
        .filter(|key| catalog.position_of(key).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(CliError::Validation(format!(
            "Unknown question keys: {}",
            unknown.join(", ")
        )));
    }

    Ok(catalog
        .all_questions()
        .iter()
        .filter_map(|question| {
            raw.get(&question.key).map(|value| {
                (
                    question.key.clone(),
                    process_answer(&value.to_draft(), question),
                )
            })
        })
        .collect())
}

/// `intake submit --answers <path> [--webhook <url>]`
pub async fn submit_answers(
    ctx: &AppContext,
    answers_path: &Path,
    webhook: Option<&str>,
    format: &Option<OutputFormat>,
) -> Result<(), CliError> {
    let catalog = ctx.catalog()?;
    let answers = load_answers(answers_path, &catalog)?;
    info!(answers = answers.len(), path = %answers_path.display(), "Loaded answers file");

    let settings = ctx.settings_store();
    let webhook_url = match webhook {
        Some(url) => Some(url.to_string()),
        None => WebhookUrlSetting::load(&settings)?
            .as_option()
            .map(str::to_string),
    };

    let user = resolve_user(ctx.identity_provider()?.as_ref()).await?;
    let coordinator = ctx.coordinator()?;

    let outcome = coordinator
        .submit(SubmitRequest {
            identity: Some(user.identity.clone()),
            profile: user.profile.clone(),
            answers,
            webhook_url,
        })
        .await?;

    if let SubmitOutcome::StoreFailed { message } = &outcome {
        return Err(CliError::Store(message.clone()));
    }

    match format {
        Some(OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&outcome.summary())?)
        }
        _ => print!("{}", terminal::render_results(&outcome)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AnswerValue;

    #[test]
    fn test_normalize_reshapes_to_question_kind() {
        let raw: AnswerSet = serde_json::from_str(
            r#"{"project_name": "  Bakery ", "features": "blog, shop ,", "budget": ["$5,000"]}"#,
        )
        .unwrap();

        let answers = normalize_answers(raw, &QuestionCatalog::default()).unwrap();
        assert_eq!(answers.get("project_name"), Some(&AnswerValue::from("Bakery")));
        assert_eq!(
            answers.get("features"),
            Some(&AnswerValue::from(vec!["blog", "shop"]))
        );
        assert_eq!(answers.get("budget"), Some(&AnswerValue::from("$5,000")));
        assert_eq!(answers.len(), 3);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let raw: AnswerSet = serde_json::from_str(r#"{"colour": "blue"}"#).unwrap();
        let err = normalize_answers(raw, &QuestionCatalog::default()).unwrap_err();
        assert!(matches!(err, CliError::Validation(msg) if msg.contains("colour")));
    }

    #[test]
    fn test_load_answers_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_answers(&path, &QuestionCatalog::default()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
