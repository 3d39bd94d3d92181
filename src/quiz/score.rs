//! Score projection
//!
//! Maps an answer store onto five fixed axes, each in `1..=5`, for the radar
//! summary shown next to the persona. Lookups are exact matches on option
//! text; anything unlisted falls through to the axis floor.

use std::fmt;

use serde::Serialize;

use super::answers::AnswerStore;
use super::catalog::*;

/// Lowest value on any axis
pub const AXIS_MIN: i64 = 1;
/// Highest value on any axis
pub const AXIS_MAX: i64 = 5;

/// Profile axes in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    Risk,
    Time,
    Active,
    Capital,
    Experience,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Risk,
        Axis::Time,
        Axis::Active,
        Axis::Capital,
        Axis::Experience,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Risk => "Risk",
            Axis::Time => "Time",
            Axis::Active => "Active",
            Axis::Capital => "Capital",
            Axis::Experience => "Experience",
        }
    }

    fn score(&self, answers: &AnswerStore) -> i64 {
        let raw = match self {
            Axis::Risk => answers.slider(RISK_TOLERANCE).unwrap_or(SLIDER_DEFAULT),
            Axis::Time => match answers.single(TIME_HORIZON) {
                Some(HORIZON_OVER_7) => 5,
                Some(HORIZON_4_TO_7) => 4,
                _ => 2,
            },
            Axis::Active => match answers.single(INVOLVEMENT_LEVEL) {
                Some(INVOLVEMENT_OPERATOR) => 5,
                Some(INVOLVEMENT_CO_PILOT) => 3,
                _ => 1,
            },
            Axis::Capital => match answers.single(TICKET_SIZE) {
                Some(TICKET_ABOVE_2CR) => 5,
                Some(TICKET_50L_TO_2CR) => 4,
                Some(TICKET_15_TO_50L) => 3,
                _ => 2,
            },
            Axis::Experience => match answers.single(EXPERIENCE_LEVEL) {
                Some(EXPERIENCE_SEASONED) => 5,
                Some(EXPERIENCE_INVESTED) => 4,
                Some(EXPERIENCE_RAN_BUSINESS) => 3,
                _ => 1,
            },
        };
        raw.clamp(AXIS_MIN, AXIS_MAX)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One axis value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisScore {
    pub axis: Axis,
    pub value: i64,
}

/// Radar plot input: `(label, value, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub label: &'static str,
    pub value: i64,
    pub max: i64,
}

/// Five-axis summary of an answer store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreProfile {
    scores: [AxisScore; 5],
}

impl ScoreProfile {
    /// Project answers onto the profile axes
    pub fn project(answers: &AnswerStore) -> Self {
        let scores = Axis::ALL.map(|axis| AxisScore {
            axis,
            value: axis.score(answers),
        });
        Self { scores }
    }

    pub fn scores(&self) -> &[AxisScore; 5] {
        &self.scores
    }

    pub fn value(&self, axis: Axis) -> i64 {
        self.scores
            .iter()
            .find(|s| s.axis == axis)
            .map(|s| s.value)
            .unwrap_or(AXIS_MIN)
    }

    /// Values in axis order, handy for assertions and compact output
    pub fn values(&self) -> [i64; 5] {
        self.scores.map(|s| s.value)
    }

    pub fn radar_points(&self) -> Vec<RadarPoint> {
        self.scores
            .iter()
            .map(|s| RadarPoint {
                label: s.axis.label(),
                value: s.value,
                max: AXIS_MAX,
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
