//! Terminal surface built on dialoguer.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{Error, Result};
use crate::persona::ResultView;
use crate::quiz::{Question, Step};

use super::{Navigation, QuizSurface};

const UNSET: &str = "(skip for now)";

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}

/// Interactive terminal prompts
pub struct TerminalSurface {
    theme: ColorfulTheme,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSurface for TerminalSurface {
    fn intro(&mut self) -> Result<bool> {
        println!();
        println!("{}", bold("Discover Your Investor Persona"));
        println!("Answer four short steps about your goals, style, market focus and deal");
        println!("preferences. Your answers are analysed to produce a persona with");
        println!("strengths, considerations and suggested opportunities.");
        println!();

        Confirm::with_theme(&self.theme)
            .with_prompt("Start the quiz?")
            .default(true)
            .interact()
            .map_err(prompt_error)
    }

    fn progress(&mut self, index: usize, total: usize, step: &Step) -> Result<()> {
        let filled = index + 1;
        let bar = format!("{}{}", "#".repeat(filled), ".".repeat(total.saturating_sub(filled)));
        println!();
        println!("[{}] Step {} of {}: {}", bar, filled, total, bold(step.title));
        println!("{}", step.description);
        Ok(())
    }

    fn select_one(&mut self, question: &Question, current: Option<&str>) -> Result<Option<String>> {
        let options = question.options();
        let mut items: Vec<&str> = options.to_vec();
        items.push(UNSET);

        let default = current
            .and_then(|c| options.iter().position(|o| *o == c))
            .unwrap_or(items.len() - 1);

        if let Question::SingleSelect { help: Some(help), .. } = question {
            println!("  {}", help);
        }

        let choice = Select::with_theme(&self.theme)
            .with_prompt(question.label())
            .items(&items)
            .default(default)
            .interact()
            .map_err(prompt_error)?;
        Ok(options.get(choice).map(|s| s.to_string()))
    }

    fn toggle_group(&mut self, question: &Question, current: &[String]) -> Result<Vec<String>> {
        let options = question.options();
        let checked: Vec<bool> = options
            .iter()
            .map(|o| current.iter().any(|c| c == o))
            .collect();

        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} (space to toggle)", question.label()))
            .items(options)
            .defaults(&checked)
            .interact()
            .map_err(prompt_error)?;

        Ok(chosen
            .into_iter()
            .filter_map(|i| options.get(i).map(|o| o.to_string()))
            .collect())
    }

    fn slider(&mut self, question: &Question, min: i64, max: i64, current: i64) -> Result<i64> {
        if let Question::Slider { help, .. } = question {
            println!("  {}", help);
        }

        Input::<i64>::with_theme(&self.theme)
            .with_prompt(format!("{} [{}-{}]", question.label(), min, max))
            .default(current)
            .validate_with(move |value: &i64| -> std::result::Result<(), String> {
                if (min..=max).contains(value) {
                    Ok(())
                } else {
                    Err(format!("Value must be between {} and {}", min, max))
                }
            })
            .interact_text()
            .map_err(prompt_error)
    }

    fn text(&mut self, question: &Question, current: &str) -> Result<String> {
        if let Question::FreeText { placeholder, .. } = question {
            println!("  {}", placeholder);
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(question.label())
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn navigate(&mut self, index: usize, total: usize) -> Result<Navigation> {
        let mut choices = Vec::with_capacity(3);
        choices.push(if index + 1 >= total {
            (Navigation::Next, "Generate persona")
        } else {
            (Navigation::Next, "Next")
        });
        if index > 0 {
            choices.push((Navigation::Back, "Back"));
        }
        choices.push((Navigation::Quit, "Quit"));

        let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
        let choice = Select::with_theme(&self.theme)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        choices
            .get(choice)
            .map(|(nav, _)| *nav)
            .ok_or_else(|| Error::Prompt(format!("unexpected selection {}", choice)))
    }

    fn submitting(&mut self) -> Result<()> {
        println!("Analysing your answers...");
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        eprintln!("\x1b[31m{}\x1b[0m", message);
        Ok(())
    }

    fn result(&mut self, view: &ResultView) -> Result<bool> {
        println!();
        print!("{}", view.render_text());
        println!();

        Confirm::with_theme(&self.theme)
            .with_prompt("Start a new quiz?")
            .default(false)
            .interact()
            .map_err(prompt_error)
    }
}

fn bold(text: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", text)
}
