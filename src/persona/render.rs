//! Result view composition and text rendering.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::quiz::{AnswerStore, RadarPoint, ScoreProfile};

use super::types::PersonaResult;

/// A recommended opportunity with its display number, starting at 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedItem {
    pub number: usize,
    pub text: String,
}

/// Everything the result screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub persona: PersonaResult,
    pub score_profile: ScoreProfile,
    pub radar: Vec<RadarPoint>,
    pub opportunities: Vec<NumberedItem>,
}

impl ResultView {
    /// Combine a persona with the score profile of the answers that produced it
    pub fn compose(persona: PersonaResult, answers: &AnswerStore) -> Self {
        let score_profile = ScoreProfile::project(answers);
        let opportunities = persona
            .recommended_opportunities
            .iter()
            .enumerate()
            .map(|(i, text)| NumberedItem {
                number: i + 1,
                text: text.clone(),
            })
            .collect();

        Self {
            radar: score_profile.radar_points(),
            score_profile,
            opportunities,
            persona,
        }
    }

    /// Plain-text rendering for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let p = &self.persona;

        let _ = writeln!(out, "Your Investor Persona");
        let _ = writeln!(out, "=====================");
        if !p.persona_tags.is_empty() {
            let tags: Vec<String> = p.persona_tags.iter().map(|t| format!("[{}]", t)).collect();
            let _ = writeln!(out, "{}", tags.join(" "));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Executive Summary");
        let _ = writeln!(out, "  {}", p.persona_summary);
        let _ = writeln!(out);

        let _ = writeln!(out, "Investment Style");
        let _ = writeln!(out, "  \"{}\"", p.investment_style);
        let _ = writeln!(out);

        let _ = writeln!(out, "Profile Matrix");
        out.push_str(&render_radar(&self.radar));
        let _ = writeln!(out);

        write_list(&mut out, "Key Strengths", &p.strengths);
        write_list(&mut out, "Considerations", &p.considerations);

        let _ = writeln!(out, "Suggested Opportunities");
        for item in &self.opportunities {
            let _ = writeln!(out, "  #{} {}", item.number, item.text);
        }

        if let Some(ts) = &p.generated_at {
            let _ = writeln!(out);
            let _ = writeln!(out, "Generated at {}", ts);
        }

        out
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{}", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
    let _ = writeln!(out);
}

/// Horizontal bar per axis, e.g. `Risk        ###.. 3/5`
pub fn render_radar(points: &[RadarPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let filled = point.value.clamp(0, point.max) as usize;
        let empty = (point.max as usize).saturating_sub(filled);
        let _ = writeln!(
            out,
            "  {:<11} {}{} {}/{}",
            point.label,
            "#".repeat(filled),
            ".".repeat(empty),
            point.value,
            point.max
        );
    }
    out
}

// ─────────────────────────────────────────────────────────────────
// Saved Profile
// ─────────────────────────────────────────────────────────────────

/// JSON document written by the save action
#[derive(Debug, Clone, Serialize)]
pub struct SavedProfile {
    pub persona: PersonaResult,
    pub score_profile: ScoreProfile,
    pub answers: Value,
    pub saved_at: DateTime<Utc>,
}

impl SavedProfile {
    pub fn new(view: &ResultView, answers: &AnswerStore) -> Self {
        Self {
            persona: view.persona.clone(),
            score_profile: view.score_profile,
            answers: answers.to_json(),
            saved_at: Utc::now(),
        }
    }

    /// Write pretty JSON to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| Error::IoWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        info!(path = %path.display(), "Profile saved");
        Ok(())
    }
}
