//! Quiz core: the question catalog, the answer store, the wizard state
//! machine that edits it, and the score projection used for the summary.

pub mod answers;
pub mod catalog;
pub mod score;
pub mod wizard;

pub use answers::{AnswerStore, AnswerValue};
pub use catalog::{Catalog, Question, QuestionKind, Step};
pub use score::{Axis, AxisScore, RadarPoint, ScoreProfile};
pub use wizard::{Advance, PendingSubmission, QuizSession, Submission, Transition};
