//! Static question catalog.
//!
//! Option text is matched exactly by the score projector, so the constants
//! below are shared between the catalog and the scoring tables.

use std::fmt;

// ─────────────────────────────────────────────────────────────────
// Question Ids
// ─────────────────────────────────────────────────────────────────

pub const GOAL_PRIMARY: &str = "goal_primary";
pub const TIME_HORIZON: &str = "time_horizon";
pub const TICKET_SIZE: &str = "ticket_size";
pub const RISK_TOLERANCE: &str = "risk_tolerance";
pub const REACTION_STYLE: &str = "reaction_style";
pub const DECISION_STYLE: &str = "decision_style";
pub const INVOLVEMENT_LEVEL: &str = "involvement_level";
pub const TIME_PER_WEEK: &str = "time_per_week";
pub const PARTNER_PREFERENCE: &str = "partner_preference";
pub const CUSTOMER_SEGMENT: &str = "customer_segment";
pub const BRAND_PREFERENCE: &str = "brand_preference";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const PRIORITY_FOCUS: &str = "priority_focus";
pub const SECTORS: &str = "sectors";
pub const GEO_SCOPE: &str = "geo_scope";
pub const DEAL_STRUCTURES: &str = "deal_structures";
pub const NON_NEGOTIABLES: &str = "non_negotiables";
pub const KEY_LESSON: &str = "key_lesson";

// ─────────────────────────────────────────────────────────────────
// Scored Option Text
// ─────────────────────────────────────────────────────────────────

pub const HORIZON_UNDER_2: &str = "Less than 2 years";
pub const HORIZON_2_TO_4: &str = "2-4 years";
pub const HORIZON_4_TO_7: &str = "4-7 years";
pub const HORIZON_OVER_7: &str = "More than 7 years";

pub const TICKET_UP_TO_5L: &str = "Up to ₹5 lakh";
pub const TICKET_5_TO_15L: &str = "₹5-15 lakh";
pub const TICKET_15_TO_50L: &str = "₹15-50 lakh";
pub const TICKET_50L_TO_2CR: &str = "₹50 lakh-₹2 crore";
pub const TICKET_ABOVE_2CR: &str = "Above ₹2 crore";

pub const INVOLVEMENT_CAPITAL_PARTNER: &str =
    "Capital partner - I write the cheque, someone else runs the show";
pub const INVOLVEMENT_CO_PILOT: &str =
    "Co pilot - I support and guide, a manager or founder runs it";
pub const INVOLVEMENT_OPERATOR: &str = "Operator - I want to be in the driver seat daily";

pub const EXPERIENCE_NEW: &str = "I am completely new";
pub const EXPERIENCE_RAN_BUSINESS: &str = "I have run a small or mid size business";
pub const EXPERIENCE_INVESTED: &str = "I have invested in or backed businesses before";
pub const EXPERIENCE_SEASONED: &str = "I am a seasoned founder, investor or operator";

/// Initial value of every slider in the catalog
pub const SLIDER_DEFAULT: i64 = 3;

// ─────────────────────────────────────────────────────────────────
// Question
// ─────────────────────────────────────────────────────────────────

/// The input kind of a question, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    SingleSelect,
    MultiSelect,
    Slider,
    FreeText,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::SingleSelect => "single-select",
            QuestionKind::MultiSelect => "multi-select",
            QuestionKind::Slider => "slider",
            QuestionKind::FreeText => "free-text",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    SingleSelect {
        id: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        help: Option<&'static str>,
    },
    MultiSelect {
        id: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    },
    Slider {
        id: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        help: &'static str,
    },
    FreeText {
        id: &'static str,
        label: &'static str,
        placeholder: &'static str,
    },
}

impl Question {
    pub fn id(&self) -> &'static str {
        match self {
            Question::SingleSelect { id, .. }
            | Question::MultiSelect { id, .. }
            | Question::Slider { id, .. }
            | Question::FreeText { id, .. } => id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Question::SingleSelect { label, .. }
            | Question::MultiSelect { label, .. }
            | Question::Slider { label, .. }
            | Question::FreeText { label, .. } => label,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::SingleSelect { .. } => QuestionKind::SingleSelect,
            Question::MultiSelect { .. } => QuestionKind::MultiSelect,
            Question::Slider { .. } => QuestionKind::Slider,
            Question::FreeText { .. } => QuestionKind::FreeText,
        }
    }

    /// Declared options, empty for sliders and free text
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Question::SingleSelect { options, .. } | Question::MultiSelect { options, .. } => {
                options
            }
            Question::Slider { .. } | Question::FreeText { .. } => &[],
        }
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options().contains(&value)
    }
}

// ─────────────────────────────────────────────────────────────────
// Step
// ─────────────────────────────────────────────────────────────────

/// An ordered group of questions shown together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [Question],
}

// ─────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────

/// Read-only view over the step list
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    steps: &'static [Step],
}

impl Catalog {
    /// The investor persona questionnaire
    pub fn investor() -> Self {
        Self { steps: STEPS }
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&'static Step> {
        self.steps.get(index)
    }

    /// All questions in traversal order
    pub fn questions(&self) -> impl Iterator<Item = &'static Question> {
        self.steps.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions().find(|q| q.id() == id)
    }

    /// Index of the step that owns a question
    pub fn step_of(&self, id: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.questions.iter().any(|q| q.id() == id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::investor()
    }
}

static STEPS: &[Step] = &[
    Step {
        id: "goals",
        title: "Goals & Prefs",
        description: "Define your investment objectives",
        questions: &[
            Question::SingleSelect {
                id: GOAL_PRIMARY,
                label: "Why are you exploring opportunities on Frantiger right now?",
                options: &[
                    "I want to invest capital and earn returns",
                    "I want to own and actively run a business",
                    "I want semi passive income that grows over time",
                    "I want to explore sectors before bigger bets",
                    "I am a consultant or broker looking for deals",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: TIME_HORIZON,
                label: "How long are you willing to stay invested before expecting strong returns?",
                options: &[HORIZON_UNDER_2, HORIZON_2_TO_4, HORIZON_4_TO_7, HORIZON_OVER_7],
                help: None,
            },
            Question::SingleSelect {
                id: TICKET_SIZE,
                label: "What total amount are you comfortable deploying per opportunity?",
                options: &[
                    TICKET_UP_TO_5L,
                    TICKET_5_TO_15L,
                    TICKET_15_TO_50L,
                    TICKET_50L_TO_2CR,
                    TICKET_ABOVE_2CR,
                ],
                help: None,
            },
            Question::Slider {
                id: RISK_TOLERANCE,
                label: "When it comes to business risk, where do you naturally sit?",
                min: 1,
                max: 5,
                help: "1 = Stable and predictable | 5 = High risk, high upside",
            },
            Question::SingleSelect {
                id: INVOLVEMENT_LEVEL,
                label: "How hands on do you want to be in your ideal opportunity?",
                options: &[
                    INVOLVEMENT_CAPITAL_PARTNER,
                    INVOLVEMENT_CO_PILOT,
                    INVOLVEMENT_OPERATOR,
                ],
                help: None,
            },
            Question::SingleSelect {
                id: TIME_PER_WEEK,
                label: "How much time can you realistically give per week?",
                options: &["0-2 hours", "2-5 hours", "5-10 hours", "10-20 hours", "Full time"],
                help: None,
            },
        ],
    },
    Step {
        id: "style",
        title: "Style & Exp",
        description: "Your approach to business",
        questions: &[
            Question::SingleSelect {
                id: REACTION_STYLE,
                label: "If your business reports a bad quarter, what are you most likely to do first?",
                options: &[
                    "Pause and review numbers calmly",
                    "Call the operator or founder to understand",
                    "Plan to exit and protect capital",
                    "Look at the long term and stay the course",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: DECISION_STYLE,
                label: "How would you describe your decision making style for investments?",
                options: &[
                    "Very quick, I go with my gut",
                    "Fairly quick, once key data is clear",
                    "I take my time, I like deep research",
                    "I move very slowly and cautiously",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: PARTNER_PREFERENCE,
                label: "Who do you prefer to work with the most?",
                options: &[
                    "A strong brand that already has systems in place",
                    "Scrappy founders building systems now",
                    "Professional management teams and COOs",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: CUSTOMER_SEGMENT,
                label: "Which type of customers do you feel most comfortable dealing with?",
                options: &[
                    "B2C - consumers, families, walk in users",
                    "B2B - companies and institutions",
                    "B2G - government and tenders",
                    "A mix is fine",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: BRAND_PREFERENCE,
                label: "If you had to choose, what would you prefer?",
                options: &[
                    "A well known brand that grows steadily",
                    "A lesser known brand with higher upside potential",
                    "Depends on the numbers, not the name",
                ],
                help: None,
            },
            Question::SingleSelect {
                id: EXPERIENCE_LEVEL,
                label: "What best describes your experience so far?",
                options: &[
                    EXPERIENCE_NEW,
                    EXPERIENCE_RAN_BUSINESS,
                    EXPERIENCE_INVESTED,
                    EXPERIENCE_SEASONED,
                ],
                help: None,
            },
            Question::SingleSelect {
                id: PRIORITY_FOCUS,
                label: "If you had to choose, what comes first for you?",
                options: &[
                    "People - team, founders, operators",
                    "Process - systems, playbooks, controls",
                    "Profit - margins, payback, upside",
                ],
                help: None,
            },
        ],
    },
    Step {
        id: "sectors",
        title: "Market Focus",
        description: "Where you want to play",
        questions: &[
            Question::MultiSelect {
                id: SECTORS,
                label: "Which sectors are you genuinely excited about right now?",
                options: &[
                    "Food and beverage",
                    "Education and upskilling",
                    "Health and wellness",
                    "Retail and lifestyle",
                    "Tech and SaaS",
                    "Manufacturing and industrial",
                    "Services and consulting",
                    "I am open if economics are strong",
                ],
            },
            Question::MultiSelect {
                id: GEO_SCOPE,
                label: "Where are you most interested in investing or operating?",
                options: &[
                    "Only my city",
                    "Within my state",
                    "Across India",
                    "Open to cross border opportunities",
                ],
            },
        ],
    },
    Step {
        id: "structures",
        title: "Final Details",
        description: "Deal types and unique insights",
        questions: &[
            Question::MultiSelect {
                id: DEAL_STRUCTURES,
                label: "What kind of deal structures appeal to you the most?",
                options: &[
                    "Single franchise I own and run",
                    "Multiple franchises I own with managers",
                    "Revenue or profit share deals",
                    "Fractional ownership or pooling",
                    "I am open to all, show me what is good",
                ],
            },
            Question::MultiSelect {
                id: NON_NEGOTIABLES,
                label: "What is absolutely non negotiable for you in any opportunity?",
                options: &[
                    "Clear unit economics",
                    "Strong compliance and legal hygiene",
                    "Brand reputation and ethics",
                    "Scalable model, not one location only",
                    "Skin in the game from founder or brand",
                ],
            },
            Question::FreeText {
                id: KEY_LESSON,
                label: "What is one lesson you never want to forget?",
                placeholder: "Example: Never enter a business where I do not trust the numbers...",
            },
        ],
    },
];

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
