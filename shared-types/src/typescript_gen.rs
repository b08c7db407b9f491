use ts_rs::TS;

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

/// Names of every exported type, in dependency order
pub const EXPORTED_TYPES: &[&str] = &[
    "QuestionKind",
    "Question",
    "AnswerValue",
    "AnswerSet",
    "SubmissionStatus",
    "NewProject",
    "WebhookPayload",
    "UserIdentity",
    "UserProfile",
];

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;

    let result = match name {
        "Question" => Question::export_to_string()?,
        "QuestionKind" => QuestionKind::export_to_string()?,

        "AnswerValue" => AnswerValue::export_to_string()?,
        "AnswerSet" => AnswerSet::export_to_string()?,

        "SubmissionStatus" => SubmissionStatus::export_to_string()?,
        "NewProject" => NewProject::export_to_string()?,
        "WebhookPayload" => WebhookPayload::export_to_string()?,

        "UserIdentity" => UserIdentity::export_to_string()?,
        "UserProfile" => UserProfile::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_single_type() {
        let result = generate_typescript_definitions(&["Question"]).unwrap();
        assert!(result.contains("Question"));
        assert!(result.contains("is_list: boolean"));
    }

    #[test]
    fn test_prompt_is_an_optional_field() {
        let result = generate_typescript_definitions(&["Question"]).unwrap();
        assert!(result.contains("prompt?: string"));
        assert!(!result.contains("prompt: string | null"));
    }

    #[test]
    fn test_generate_all_types() {
        let result = generate_typescript_definitions(EXPORTED_TYPES).unwrap();
        assert!(result.contains("WebhookPayload"));
        assert!(result.contains("UserProfile"));
    }

    #[test]
    fn test_unknown_type_error() {
        let result = generate_typescript_definitions(&["NonExistentType"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown type"));
    }

    #[test]
    fn test_empty_type_names() {
        let result = generate_typescript_definitions(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cleaned_output() {
        let result = generate_typescript_definitions(&["WebhookPayload"]).unwrap();
        assert!(!result.contains("import type"));
        assert!(!result.contains("This file was generated"));
    }
}
