pub mod layout;
mod quiz;
mod results;
mod transition;

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks};
pub use quiz::{draw_quit_confirmation, draw_quiz, quit_prompt, QUIZ_SUBTITLE, QUIZ_TITLE};
pub use results::{draw_results, score_color};
pub use transition::draw_scoring_transition;

use crate::models::{AppState, FlowState};
use crate::session::QuizController;
use ratatui::Frame;

/// Draws whichever screen the controller's flow state calls for.
pub fn draw_app(f: &mut Frame, controller: &QuizController, app_state: AppState) {
    if app_state == AppState::QuitConfirm {
        draw_quit_confirmation(f, controller.status());
        return;
    }
    match controller.status() {
        FlowState::Quiz => draw_quiz(f, controller),
        FlowState::Calculating(_) => draw_scoring_transition(f),
        FlowState::Results { score } => draw_results(f, *score),
    }
}
