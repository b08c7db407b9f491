//! Interactive questionnaire command

use crate::app::AppContext;
use crate::error::CliError;
use crate::terminal::{self, Input, Prompter};
use intake_client::{
    resolve_user, IdentityError, KeyValueStore, SignedInUser, SubmissionCoordinator, SubmitError,
    SubmitOutcome, SubmitRequest, WebhookUrlSetting,
};
use intake_workflow::{NavigationEngine, QuestionCatalog};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// How an interactive session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Submitted,
}

/// One questionnaire on a terminal, from first question to results view
pub struct InteractiveSession<'a, R, W> {
    engine: NavigationEngine,
    coordinator: SubmissionCoordinator,
    user: Option<SignedInUser>,
    webhook: WebhookUrlSetting<'a>,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(
        catalog: QuestionCatalog,
        coordinator: SubmissionCoordinator,
        user: Option<SignedInUser>,
        settings: &'a dyn KeyValueStore,
        prompter: Prompter<R, W>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            engine: NavigationEngine::new(catalog),
            coordinator,
            user,
            webhook: WebhookUrlSetting::load(settings)?,
            prompter,
        })
    }

    pub async fn run(&mut self) -> Result<SessionEnd, CliError> {
        let mut submitted = false;

        loop {
            let question = self.engine.current_question();
            let kind = question.kind;
            self.prompter.print(&terminal::render_question(&self.engine))?;

            match self.prompter.read_answer(kind)? {
                Input::Quit => break,
                Input::Prev => self.engine.prev(),
                Input::Clear => self.engine.on_draft_change(""),
                Input::Answer(text) => {
                    self.engine.on_draft_change(text);
                    if !self.engine.is_last_question() {
                        self.engine.next();
                    }
                }
                Input::Next => {
                    if !self.engine.is_last_question() {
                        self.engine.next();
                        continue;
                    }

                    self.edit_webhook_url()?;
                    if !self.prompter.confirm("Submit your project requirements?")? {
                        continue;
                    }

                    if let Some(outcome) = self.submit().await? {
                        submitted = true;
                        self.prompter.print(&terminal::render_results(&outcome))?;
                        if !self.prompter.confirm("Start New Project?")? {
                            break;
                        }
                        self.engine.reset();
                        self.coordinator.reset();
                    }
                }
            }
        }

        Ok(if submitted {
            SessionEnd::Submitted
        } else {
            SessionEnd::Quit
        })
    }

    /// Show the persisted URL; a new value is written through immediately
    fn edit_webhook_url(&mut self) -> Result<(), CliError> {
        self.prompter.print(&terminal::render_webhook_setting(
            self.webhook.value(),
            self.webhook.hint(),
        ))?;
        self.prompter
            .print("New URL (enter to keep, '-' to clear): ")?;

        match self.prompter.read_line()?.as_deref().map(str::trim) {
            None | Some("") => {}
            Some("-") => self.webhook.clear()?,
            Some(url) => {
                self.webhook.update(url)?;
                if let Some(message) = self.webhook.hint().message() {
                    self.prompter.print(&format!("{}\n", message))?;
                }
            }
        }
        Ok(())
    }

    /// Submit the current answers. `None` keeps the user on the form.
    async fn submit(&mut self) -> Result<Option<SubmitOutcome>, CliError> {
        let request = SubmitRequest {
            identity: self.user.as_ref().map(|u| u.identity.clone()),
            profile: self.user.as_ref().and_then(|u| u.profile.clone()),
            answers: self.engine.final_answers(),
            webhook_url: self.webhook.as_option().map(str::to_string),
        };

        self.prompter.print("Submitting...\n")?;
        match self.coordinator.submit(request).await {
            Ok(outcome) if outcome.proceeds_to_results() => Ok(Some(outcome)),
            Ok(outcome) => {
                let message = outcome.message().unwrap_or("Unknown error");
                self.prompter
                    .print(&format!("❌ Failed to save your answers: {}\n", message))?;
                Ok(None)
            }
            Err(SubmitError::InProgress) => {
                self.prompter.print("A submission is already running\n")?;
                Ok(None)
            }
            Err(e) => {
                self.prompter.print(&format!("❌ {}\n", e))?;
                Ok(None)
            }
        }
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}

/// `intake run`
pub async fn run_questionnaire(ctx: &AppContext) -> Result<(), CliError> {
    let catalog = ctx.catalog()?;
    let coordinator = ctx.coordinator()?;
    let settings = ctx.settings_store();

    let provider = ctx.identity_provider()?;
    let user = match resolve_user(provider.as_ref()).await {
        Ok(user) => {
            debug!(user_id = %user.identity.id, "Signed in");
            Some(user)
        }
        Err(e @ IdentityError::NotAuthenticated { .. }) => {
            warn!(error = %e, "No signed-in user; submission will be refused");
            println!("⚠️  You are not signed in. Configure [identity] to submit.");
            None
        }
        Err(e) => return Err(e.into()),
    };

    println!("Project Requirements Questionnaire");
    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let mut session = InteractiveSession::new(catalog, coordinator, user, &settings, prompter)?;

    match session.run().await? {
        SessionEnd::Submitted => debug!("Questionnaire finished after submission"),
        SessionEnd::Quit => debug!("Questionnaire closed without submitting"),
    }
    Ok(())
}
