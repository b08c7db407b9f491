use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::AppContext;
use crate::{commands, error::CliError};
use commands::*;

#[derive(Debug, Parser)]
#[command(name = "intake")]
#[command(about = "Project requirements questionnaire with datastore and webhook submission")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer the questionnaire interactively and submit it
    Run,

    /// Manage the persisted n8n webhook URL
    Webhook {
        #[command(subcommand)]
        action: WebhookCommands,
    },

    /// List the questionnaire
    Questions {
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Submit a prepared answers file without prompting
    Submit {
        /// JSON object mapping question keys to answers
        #[arg(short, long)]
        answers: PathBuf,

        /// Webhook URL for this submission (defaults to the saved one)
        #[arg(short, long)]
        webhook: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommands {
    /// Show the saved URL
    Show,

    /// Save a URL
    Set {
        /// http, https or https+<transport> URL
        url: String,
    },

    /// Remove the saved URL
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init,

    /// Print the configuration file path
    Path,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        match &self.command {
            Some(Commands::Run) => self.handle_run().await,
            Some(Commands::Webhook { action }) => self.handle_webhook(action),
            Some(Commands::Questions { format }) => self.handle_questions(format),
            Some(Commands::Submit {
                answers,
                webhook,
                format,
            }) => self.handle_submit(answers, webhook, format).await,
            Some(Commands::Config { action }) => self.handle_config(action),
            Some(Commands::Version) => self.handle_version(),
            None => {
                println!("intake - project requirements questionnaire");
                println!("Run 'intake run' to start, or 'intake --help' for usage information.");
                Ok(())
            }
        }
    }

    fn context(&self) -> Result<AppContext, CliError> {
        AppContext::load(self.config.as_deref())
    }

    async fn handle_run(&self) -> Result<(), CliError> {
        run_questionnaire(&self.context()?).await
    }

    fn handle_webhook(&self, action: &WebhookCommands) -> Result<(), CliError> {
        let store = self.context()?.settings_store();
        handle_webhook_command(action, &store)
    }

    fn handle_questions(&self, format: &Option<OutputFormat>) -> Result<(), CliError> {
        list_questions(&self.context()?.catalog()?, format)
    }

    async fn handle_submit(
        &self,
        answers: &PathBuf,
        webhook: &Option<String>,
        format: &Option<OutputFormat>,
    ) -> Result<(), CliError> {
        submit_answers(&self.context()?, answers, webhook.as_deref(), format).await
    }

    fn handle_config(&self, action: &ConfigCommands) -> Result<(), CliError> {
        handle_config_command(action, self.config.as_deref())
    }

    fn handle_version(&self) -> Result<(), CliError> {
        println!("intake CLI version: {}", env!("CARGO_PKG_VERSION"));
        println!("Author: {}", env!("CARGO_PKG_AUTHORS"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "intake",
            "--verbose",
            "submit",
            "--answers",
            "answers.json",
            "--webhook",
            "https://n8n.test/webhook/1",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Submit {
                answers,
                webhook,
                format,
            }) => {
                assert_eq!(answers, PathBuf::from("answers.json"));
                assert_eq!(webhook.as_deref(), Some("https://n8n.test/webhook/1"));
                assert!(matches!(format, Some(OutputFormat::Json)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_webhook_set() {
        let cli = Cli::try_parse_from(["intake", "webhook", "set", "http://x.test"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Webhook {
                action: WebhookCommands::Set { .. }
            })
        ));
    }
}
