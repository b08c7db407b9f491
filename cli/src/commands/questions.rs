use crate::cli::OutputFormat;
use crate::error::CliError;
use intake_workflow::QuestionCatalog;
use shared_types::QuestionKind;

pub fn render_catalog(catalog: &QuestionCatalog) -> String {
    let mut out = String::new();
    for (index, question) in catalog.all_questions().iter().enumerate() {
        let shape = match (question.kind, question.is_list) {
            (_, true) => "list",
            (QuestionKind::MultiLine, false) => "multi-line",
            (QuestionKind::SingleLine, false) => "single-line",
        };
        out.push_str(&format!(
            "{:>2}. {} [{}, {}]\n",
            index + 1,
            question.label,
            question.key,
            shape
        ));
        if let Some(prompt) = &question.prompt {
            out.push_str(&format!("    {}\n", prompt));
        }
    }
    out
}

/// `intake questions`
pub fn list_questions(
    catalog: &QuestionCatalog,
    format: &Option<OutputFormat>,
) -> Result<(), CliError> {
    match format {
        Some(OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(catalog.all_questions())?)
        }
        _ => print!("{}", render_catalog(catalog)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_catalog() {
        let text = render_catalog(&QuestionCatalog::default());
        assert!(text.starts_with(" 1. What is the name of your project? [project_name, single-line]"));
        assert!(text.contains("[features, list]"));
        assert!(text.contains("[goal, multi-line]"));
        assert!(text.contains(" 9. "));
    }
}
