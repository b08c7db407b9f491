//! Line-oriented rendering and input for the interactive questionnaire

use intake_client::{SubmitOutcome, WebhookHint, WebhookOutcome};
use intake_workflow::NavigationEngine;
use shared_types::{AnswerSet, QuestionKind};
use std::io::{self, BufRead, Write};

const PROGRESS_WIDTH: usize = 30;

/// Terminator for multi-line answers
pub const END_OF_ANSWER: &str = ".";

/// What the user typed at a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Answer(String),
    Next,
    Prev,
    Clear,
    Quit,
}

impl Input {
    fn command(line: &str) -> Option<Input> {
        match line.trim() {
            ":next" | "" => Some(Input::Next),
            ":prev" => Some(Input::Prev),
            ":clear" => Some(Input::Clear),
            ":quit" | ":q" => Some(Input::Quit),
            _ => None,
        }
    }
}

pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

pub fn render_question(engine: &NavigationEngine) -> String {
    let question = engine.current_question();
    let (position, total) = engine.position();

    let mut out = String::new();
    out.push_str(&format!("\nQuestion {} of {}\n", position, total));
    out.push_str(&progress_bar(engine.progress_percent()));
    out.push('\n');
    out.push_str(&format!("\n{}\n", question.label));
    if let Some(prompt) = &question.prompt {
        out.push_str(&format!("{}\n", prompt));
    }

    if engine.draft().is_empty() {
        out.push_str(&format!("({})\n", question.placeholder()));
    } else {
        out.push_str(&format!("Current answer: {}\n", engine.draft()));
    }

    let submit_hint = if engine.is_last_question() {
        "empty line submits"
    } else {
        "empty line keeps the answer"
    };
    match question.kind {
        QuestionKind::SingleLine => {
            out.push_str(&format!("[:prev :next :clear :quit | {}]\n", submit_hint))
        }
        QuestionKind::MultiLine => out.push_str(&format!(
            "[end with a lone '{}' | :prev :next :clear :quit | {}]\n",
            END_OF_ANSWER, submit_hint
        )),
    }
    out
}

pub fn render_webhook_setting(value: &str, hint: WebhookHint) -> String {
    let mut out = String::from("\nn8n Webhook URL (optional)\n");
    if value.is_empty() {
        out.push_str("Current: (none)\n");
    } else {
        out.push_str(&format!("Current: {}\n", value));
    }
    if let Some(message) = hint.message() {
        out.push_str(&format!("{}\n", message));
    }
    out
}

/// "Project Submission Details" view shown after a stored submission
pub fn render_results(outcome: &SubmitOutcome) -> String {
    let SubmitOutcome::Stored {
        store_id,
        answers,
        webhook,
    } = outcome
    else {
        return String::new();
    };

    let mut out = String::from("\n✅ Project Submission Details\n\n");
    out.push_str(&format!("Project ID: {}\n", store_id));
    match webhook {
        WebhookOutcome::Skipped => out.push_str("Webhook: not configured\n"),
        WebhookOutcome::Delivered(delivery) => {
            out.push_str(&format!("Webhook: delivered (HTTP {})\n", delivery.status))
        }
        WebhookOutcome::Failed(err) => out.push_str(&format!(
            "⚠️  Webhook: failed{}: {}\n",
            err.status
                .map(|s| format!(" (HTTP {})", s))
                .unwrap_or_default(),
            err.error_text
        )),
    }
    out.push_str("\nSubmitted requirements:\n");
    out.push_str(&pretty_answers(answers));
    out.push('\n');
    out
}

pub fn pretty_answers(answers: &AnswerSet) -> String {
    serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string())
}

/// Reads answers and commands from a line source
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// One line without its newline; `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Read input for a question. Commands are only recognised on the first line.
    pub fn read_answer(&mut self, kind: QuestionKind) -> io::Result<Input> {
        self.print("> ")?;
        let Some(first) = self.read_line()? else {
            return Ok(Input::Quit);
        };
        if let Some(command) = Input::command(&first) {
            return Ok(command);
        }

        match kind {
            QuestionKind::SingleLine => Ok(Input::Answer(first)),
            QuestionKind::MultiLine => {
                if first.trim() == END_OF_ANSWER {
                    return Ok(Input::Answer(String::new()));
                }
                let mut lines = vec![first];
                while let Some(line) = self.read_line()? {
                    if line.trim() == END_OF_ANSWER {
                        break;
                    }
                    lines.push(line);
                }
                Ok(Input::Answer(lines.join("\n")))
            }
        }
    }

    /// Yes/no question; anything but y/yes is no
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.print(&format!("{} [y/N] ", question))?;
        Ok(self
            .read_line()?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
