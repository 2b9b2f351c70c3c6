use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Stable identifier of a question. Decks may use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correct_answer")]
    pub correct_answer: String,
}

impl Question {
    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option)
    }
}

/// Chosen option text per question id. Unanswered questions have no entry.
pub type AnswerMap = HashMap<QuestionId, String>;

/// The timed `Calculating` phase. Only a ticket whose generation matches the
/// controller's current generation may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringTicket {
    pub generation: u64,
    pub deadline: Instant,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Quiz,
    Calculating(ScoringTicket),
    Results { score: u8 },
}

/// Screen-level state on top of the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Quiz,
    QuitConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            ScoreTier::High
        } else if score >= 50 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }
}
