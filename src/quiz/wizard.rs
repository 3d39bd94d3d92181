//! Quiz wizard state machine
//!
//! A [`QuizSession`] owns the answer store and the active step. Edits are
//! validated by the store; navigation never touches answers. Advancing from
//! the last step starts a submission, and while it is in flight navigation
//! is ignored.

use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::persona::{PersonaGenerator, PersonaRequest, PersonaResult};

use super::answers::AnswerStore;
use super::catalog::{Catalog, Step};

/// Default bound on one persona generation call
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of [`QuizSession::next`]
#[derive(Debug)]
pub enum Transition {
    /// Moved forward to the given step
    Advanced { to: usize },
    /// Last step completed; the snapshot must be submitted and then passed
    /// back through [`QuizSession::finish_submission`]
    Submit(PendingSubmission),
    /// A submission is in flight
    Ignored,
}

/// Answers frozen at the moment of submission
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub answers: AnswerStore,
    pub request: PersonaRequest,
}

/// A successful submission together with the answers that produced it
#[derive(Debug, Clone)]
pub struct Submission {
    pub answers: AnswerStore,
    pub result: PersonaResult,
}

/// Outcome of [`QuizSession::advance`]
#[derive(Debug)]
pub enum Advance {
    Moved { to: usize },
    Completed(Submission),
    Ignored,
}

/// State of one quiz run
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    catalog: Catalog,
    current_step: usize,
    answers: AnswerStore,
    submission_in_flight: bool,
    submit_timeout: Duration,
}

impl QuizSession {
    pub fn new(catalog: Catalog) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, steps = catalog.step_count(), "Quiz session started");
        Self {
            id,
            answers: AnswerStore::defaults(&catalog),
            catalog,
            current_step: 0,
            submission_in_flight: false,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Bound each submission by `timeout`
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step(&self) -> &'static Step {
        // current_step is kept below step_count by next/back
        &self.catalog.steps()[self.current_step]
    }

    pub fn step_count(&self) -> usize {
        self.catalog.step_count()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.catalog.step_count()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn is_submitting(&self) -> bool {
        self.submission_in_flight
    }

    // ─────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────

    pub fn select_single(&mut self, id: &str, value: &str) -> Result<()> {
        self.answers.select_single(id, value)
    }

    /// Returns whether the option is selected after the toggle
    pub fn toggle_multi(&mut self, id: &str, value: &str) -> Result<bool> {
        self.answers.toggle_multi(id, value)
    }

    pub fn set_slider(&mut self, id: &str, value: i64) -> Result<()> {
        self.answers.set_slider(id, value)
    }

    pub fn set_text(&mut self, id: &str, value: &str) -> Result<()> {
        self.answers.set_text(id, value)
    }

    /// Replace all answers at once, e.g. from a saved answers file
    pub fn load_answers(&mut self, answers: AnswerStore) {
        self.answers = answers;
    }

    // ─────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────

    /// Move forward, or start the submission on the last step
    pub fn next(&mut self) -> Transition {
        if self.submission_in_flight {
            debug!(session_id = %self.id, "Ignoring next while submission in flight");
            return Transition::Ignored;
        }

        if !self.is_last_step() {
            self.current_step += 1;
            debug!(session_id = %self.id, step = self.current_step, "Advanced");
            return Transition::Advanced {
                to: self.current_step,
            };
        }

        self.submission_in_flight = true;
        info!(session_id = %self.id, "Submitting answers");
        Transition::Submit(PendingSubmission {
            request: PersonaRequest::from_answers(&self.answers),
            answers: self.answers.clone(),
        })
    }

    /// Move back one step. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        if self.submission_in_flight || self.current_step == 0 {
            return false;
        }
        self.current_step -= 1;
        debug!(session_id = %self.id, step = self.current_step, "Went back");
        true
    }

    /// Restore default answers and return to the first step
    pub fn reset(&mut self) {
        self.answers = AnswerStore::defaults(&self.catalog);
        self.current_step = 0;
        self.submission_in_flight = false;
        debug!(session_id = %self.id, "Quiz reset");
    }

    /// Close the in-flight submission with its outcome.
    ///
    /// On failure the step and answers are left exactly as they were.
    pub fn finish_submission(&mut self, outcome: Result<PersonaResult>) -> Result<PersonaResult> {
        if !self.submission_in_flight {
            return Err(Error::Internal("no submission in flight".to_string()));
        }
        self.submission_in_flight = false;

        match &outcome {
            Ok(_) => info!(session_id = %self.id, "Submission succeeded"),
            Err(e) => warn!(session_id = %self.id, error = %e.format_for_log(), "Submission failed"),
        }
        outcome
    }

    /// Run [`next`](Self::next) and, when it starts a submission, call the
    /// generator once under the session's timeout.
    pub async fn advance(&mut self, generator: &dyn PersonaGenerator) -> Result<Advance> {
        let pending = match self.next() {
            Transition::Advanced { to } => return Ok(Advance::Moved { to }),
            Transition::Ignored => return Ok(Advance::Ignored),
            Transition::Submit(pending) => pending,
        };

        let span = info_span!(
            "quiz_session",
            session_id = %self.id,
            generator = generator.name()
        );
        let call = tokio::time::timeout(self.submit_timeout, generator.generate(&pending.request));
        let outcome = match call.instrument(span.clone()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::SubmissionTimeout {
                url: generator.endpoint().to_string(),
                timeout_ms: self.submit_timeout.as_millis() as u64,
            }),
        };

        let result = span.in_scope(|| self.finish_submission(outcome))?;
        Ok(Advance::Completed(Submission {
            answers: pending.answers,
            result,
        }))
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Catalog::investor())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
