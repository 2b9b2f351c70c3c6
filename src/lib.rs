pub mod config;
pub mod logger;
pub mod models;
pub mod questions;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use config::QuizConfig;
pub use models::{
    AnswerMap, AppState, FlowState, InputOutcome, Question, QuestionId, ScoreTier, ScoringTicket,
};
pub use questions::{
    default_questions, load_questions, parse_questions, validate_questions, DeckError,
};
pub use session::{calculate_score, handle_quiz_input, QuizController};
pub use ui::{draw_app, draw_quit_confirmation, draw_quiz, draw_results, draw_scoring_transition};
