//! Application view: intro, quiz and result.
//!
//! [`App`] wraps one [`QuizSession`] and records what the user should see.
//! A failed submission keeps the quiz view with a single error line; a
//! successful one switches to the result view.

use std::time::Duration;

use tracing::{debug, error};

use crate::error::Result;
use crate::persona::{PersonaGenerator, ResultView};
use crate::quiz::{Advance, AnswerStore, Catalog, QuizSession};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Intro,
    Quiz,
    Result,
}

/// Result screen contents plus the answers they were computed from
#[derive(Debug, Clone)]
pub struct Completed {
    pub view: ResultView,
    pub answers: AnswerStore,
}

pub struct App {
    view: View,
    session: QuizSession,
    submit_timeout: Duration,
    last_error: Option<String>,
    result: Option<Completed>,
}

impl App {
    pub fn new(submit_timeout: Duration) -> Self {
        Self {
            view: View::Intro,
            session: QuizSession::new(Catalog::investor()).with_submit_timeout(submit_timeout),
            submit_timeout,
            last_error: None,
            result: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Session for answer edits; only meaningful on the quiz view
    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// Message from the last failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn result(&self) -> Option<&Completed> {
        self.result.as_ref()
    }

    /// Leave the intro screen
    pub fn start(&mut self) {
        if self.view == View::Intro {
            self.view = View::Quiz;
            debug!(session_id = %self.session.id(), "Quiz view opened");
        }
    }

    /// Advance the quiz, submitting on the last step.
    ///
    /// Submission failures are absorbed into [`last_error`](Self::last_error);
    /// only errors unrelated to the service are returned.
    pub async fn next(&mut self, generator: &dyn PersonaGenerator) -> Result<()> {
        if self.view != View::Quiz {
            return Ok(());
        }
        self.last_error = None;

        match self.session.advance(generator).await {
            Ok(Advance::Completed(submission)) => {
                self.result = Some(Completed {
                    view: ResultView::compose(submission.result, &submission.answers),
                    answers: submission.answers,
                });
                self.view = View::Result;
                Ok(())
            }
            Ok(Advance::Moved { .. }) | Ok(Advance::Ignored) => Ok(()),
            Err(e) if e.is_submission_failure() => {
                error!(session_id = %self.session.id(), error = %e.format_for_log(), "Persona generation failed");
                self.last_error = Some(e.user_message());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn back(&mut self) -> bool {
        if self.view != View::Quiz {
            return false;
        }
        self.last_error = None;
        self.session.back()
    }

    /// Drop the result and answers and return to the intro
    pub fn reset(&mut self) {
        self.session =
            QuizSession::new(Catalog::investor()).with_submit_timeout(self.submit_timeout);
        self.last_error = None;
        self.result = None;
        self.view = View::Intro;
    }
}
