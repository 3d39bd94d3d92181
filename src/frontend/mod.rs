//! Interactive front end
//!
//! [`QuizSurface`] is the rendering contract: one prompt per question kind,
//! step progress, navigation, and the result screen. [`run_interactive`]
//! drives an [`App`] through any surface; [`terminal::TerminalSurface`] is
//! the dialoguer implementation used by `persona-quiz run`.

pub mod terminal;

use tracing::debug;

use crate::app::{App, Completed, View};
use crate::error::Result;
use crate::persona::{PersonaGenerator, ResultView};
use crate::quiz::{Question, QuizSession, Step};

/// What the user chose after answering a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Back,
    Quit,
}

/// Rendering and input surface for the quiz
pub trait QuizSurface {
    /// Show the intro; returns whether to start the quiz
    fn intro(&mut self) -> Result<bool>;

    /// Progress header for the current step
    fn progress(&mut self, index: usize, total: usize, step: &Step) -> Result<()>;

    /// Pick one option; `None` leaves the answer unset
    fn select_one(&mut self, question: &Question, current: Option<&str>) -> Result<Option<String>>;

    /// Full desired selection of a multi-toggle group
    fn toggle_group(&mut self, question: &Question, current: &[String]) -> Result<Vec<String>>;

    /// Slider with readout
    fn slider(&mut self, question: &Question, min: i64, max: i64, current: i64) -> Result<i64>;

    fn text(&mut self, question: &Question, current: &str) -> Result<String>;

    fn navigate(&mut self, index: usize, total: usize) -> Result<Navigation>;

    /// Called just before the answers are sent
    fn submitting(&mut self) -> Result<()> {
        Ok(())
    }

    /// Show a submission or input error
    fn error(&mut self, message: &str) -> Result<()>;

    /// Show the persona and profile matrix; returns whether to start over
    fn result(&mut self, view: &ResultView) -> Result<bool>;
}

/// Run the quiz until the user quits or declines to start over.
///
/// Returns the last completed result, if any.
pub async fn run_interactive(
    app: &mut App,
    surface: &mut dyn QuizSurface,
    generator: &dyn PersonaGenerator,
) -> Result<Option<Completed>> {
    let mut last_completed = None;

    loop {
        match app.view() {
            View::Intro => {
                if !surface.intro()? {
                    return Ok(last_completed);
                }
                app.start();
            }
            View::Quiz => {
                let session = app.session_mut();
                let (index, total) = (session.current_step(), session.step_count());
                let step = session.step();
                surface.progress(index, total, step)?;

                for question in step.questions {
                    ask_question(session, surface, question)?;
                }

                match surface.navigate(index, total)? {
                    Navigation::Next => {
                        if index + 1 == total {
                            surface.submitting()?;
                        }
                        app.next(generator).await?;
                        if let Some(message) = app.last_error() {
                            surface.error(message)?;
                        }
                    }
                    Navigation::Back => {
                        app.back();
                    }
                    Navigation::Quit => {
                        debug!("Quiz abandoned");
                        return Ok(last_completed);
                    }
                }
            }
            View::Result => {
                let Some(completed) = app.result().cloned() else {
                    app.reset();
                    continue;
                };
                let again = surface.result(&completed.view)?;
                last_completed = Some(completed);
                if !again {
                    return Ok(last_completed);
                }
                app.reset();
            }
        }
    }
}

/// Prompt for one question until the edit is accepted
fn ask_question(
    session: &mut QuizSession,
    surface: &mut dyn QuizSurface,
    question: &Question,
) -> Result<()> {
    let id = question.id();

    loop {
        let applied = match question {
            Question::SingleSelect { .. } => {
                match surface.select_one(question, session.answers().single(id))? {
                    Some(choice) => session.select_single(id, &choice),
                    None => Ok(()),
                }
            }
            Question::MultiSelect { options, .. } => {
                let current = session.answers().multi(id).to_vec();
                let wanted = surface.toggle_group(question, &current)?;
                options
                    .iter()
                    .filter(|opt| {
                        current.iter().any(|c| c == *opt) != wanted.iter().any(|w| w == *opt)
                    })
                    .try_for_each(|opt| session.toggle_multi(id, opt).map(|_| ()))
            }
            Question::Slider { min, max, .. } => {
                let current = session.answers().slider(id).unwrap_or(*min);
                let value = surface.slider(question, *min, *max, current)?;
                session.set_slider(id, value)
            }
            Question::FreeText { .. } => {
                let current = session.answers().text(id).unwrap_or_default().to_string();
                let value = surface.text(question, &current)?;
                session.set_text(id, &value)
            }
        };

        match applied {
            Ok(()) => return Ok(()),
            Err(e) if e.is_invalid_input() => surface.error(&e.user_message())?,
            Err(e) => return Err(e),
        }
    }
}
