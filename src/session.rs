use crate::logger;
use crate::models::{AnswerMap, AppState, FlowState, InputOutcome, Question, ScoringTicket};
use crate::questions::{validate_questions, DeckError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Percentage of questions whose recorded answer equals the correct one,
/// rounded half up. Unanswered questions count as wrong.
///
/// The rounding is exact integer arithmetic. Rounding the floating-point
/// ratio would land below a true .5 on some large decks (23/40 is 57.4999...
/// as an f64); this function gives 58 there.
pub fn calculate_score(questions: &[Question], answers: &AnswerMap) -> u8 {
    let total = questions.len();
    if total == 0 {
        return 0;
    }
    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count();
    ((correct * 200 + total) / (2 * total)) as u8
}

#[derive(Debug)]
pub struct QuizController {
    questions: Vec<Question>,
    current_index: usize,
    selected: Option<String>,
    answers: AnswerMap,
    status: FlowState,
    highlighted: usize,
    generation: u64,
    scoring_delay: Duration,
}

impl QuizController {
    /// Rejects decks that fail `validate_questions`, so every question index
    /// the controller hands out is in range.
    pub fn new(questions: Vec<Question>, scoring_delay: Duration) -> Result<Self, DeckError> {
        validate_questions(&questions)?;
        Ok(Self {
            questions,
            current_index: 0,
            selected: None,
            answers: AnswerMap::new(),
            status: FlowState::Quiz,
            highlighted: 0,
            generation: 0,
            scoring_delay,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_first_question(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_current_answered(&self) -> bool {
        self.answers.contains_key(&self.current_question().id)
    }

    pub fn all_answered(&self) -> bool {
        self.questions
            .iter()
            .all(|q| self.answers.contains_key(&q.id))
    }

    pub fn status(&self) -> &FlowState {
        &self.status
    }

    pub fn final_score(&self) -> Option<u8> {
        match self.status {
            FlowState::Results { score } => Some(score),
            _ => None,
        }
    }

    pub fn select(&mut self, option: &str) {
        if self.status != FlowState::Quiz {
            return;
        }
        let Some(index) = self.current_question().option_index(option) else {
            return;
        };
        let id = self.current_question().id.clone();
        self.answers.insert(id, option.to_string());
        self.selected = Some(option.to_string());
        self.highlighted = index;
    }

    pub fn select_index(&mut self, index: usize) {
        if let Some(option) = self.current_question().options.get(index).cloned() {
            self.select(&option);
        }
    }

    pub fn select_highlighted(&mut self) {
        self.select_index(self.highlighted);
    }

    pub fn move_highlight_up(&mut self) {
        if self.status == FlowState::Quiz {
            self.highlighted = self.highlighted.saturating_sub(1);
        }
    }

    pub fn move_highlight_down(&mut self) {
        if self.status == FlowState::Quiz
            && self.highlighted < self.current_question().options.len().saturating_sub(1)
        {
            self.highlighted += 1;
        }
    }

    pub fn go_previous(&mut self) {
        if self.status != FlowState::Quiz || self.current_index == 0 {
            return;
        }
        self.current_index -= 1;
        self.restore_selection();
    }

    pub fn go_next(&mut self, now: Instant) {
        if self.status != FlowState::Quiz || !self.is_current_answered() {
            return;
        }
        if !self.is_last_question() {
            self.current_index += 1;
            self.restore_selection();
        } else if self.all_answered() {
            self.enter_calculating(now);
        }
    }

    fn restore_selection(&mut self) {
        let question = &self.questions[self.current_index];
        self.selected = self.answers.get(&question.id).cloned();
        self.highlighted = self
            .selected
            .as_deref()
            .and_then(|s| question.option_index(s))
            .unwrap_or(0);
    }

    fn enter_calculating(&mut self, now: Instant) {
        let score = calculate_score(&self.questions, &self.answers);
        let ticket = ScoringTicket {
            generation: self.generation,
            deadline: now + self.scoring_delay,
            score,
        };
        logger::log(&format!(
            "Entering calculating: {}/{} answered, ticket {}",
            self.answers.len(),
            self.questions.len(),
            ticket.generation
        ));
        self.status = FlowState::Calculating(ticket);
    }

    /// Completes the pending scoring ticket once its deadline has passed.
    /// Returns true only on the call that moves the flow to `Results`.
    pub fn poll_scoring(&mut self, now: Instant) -> bool {
        let FlowState::Calculating(ticket) = self.status else {
            return false;
        };
        if ticket.generation != self.generation || now < ticket.deadline {
            return false;
        }
        logger::log(&format!("Results ready: score {}%", ticket.score));
        self.status = FlowState::Results {
            score: ticket.score,
        };
        true
    }

    pub fn time_until_scoring(&self, now: Instant) -> Option<Duration> {
        match self.status {
            FlowState::Calculating(ticket) => Some(ticket.deadline.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// Drops any outstanding scoring ticket. A calculating quiz goes back to
    /// the last question with its answers intact.
    pub fn cancel_scoring(&mut self) {
        self.generation += 1;
        if matches!(self.status, FlowState::Calculating(_)) {
            logger::log("Scoring cancelled");
            self.status = FlowState::Quiz;
        }
    }

    pub fn restart(&mut self) {
        if !matches!(self.status, FlowState::Results { .. }) {
            return;
        }
        self.generation += 1;
        self.current_index = 0;
        self.selected = None;
        self.answers.clear();
        self.highlighted = 0;
        self.status = FlowState::Quiz;
        logger::log("Quiz restarted");
    }
}

pub fn handle_quiz_input(
    controller: &mut QuizController,
    key: KeyEvent,
    app_state: &mut AppState,
) -> InputOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        controller.cancel_scoring();
        return InputOutcome::Quit;
    }

    if *app_state == AppState::QuitConfirm {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                controller.cancel_scoring();
                return InputOutcome::Quit;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                *app_state = AppState::Quiz;
            }
            _ => {}
        }
        return InputOutcome::Continue;
    }

    match controller.status().clone() {
        FlowState::Quiz => match key.code {
            KeyCode::Esc => *app_state = AppState::QuitConfirm,
            KeyCode::Up | KeyCode::Char('k') => controller.move_highlight_up(),
            KeyCode::Down | KeyCode::Char('j') => controller.move_highlight_down(),
            KeyCode::Char(' ') => controller.select_highlighted(),
            KeyCode::Char(c @ '1'..='9') => {
                controller.select_index(c as usize - '1' as usize);
            }
            KeyCode::Left | KeyCode::Char('h') => controller.go_previous(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                controller.go_next(Instant::now());
            }
            _ => {}
        },
        FlowState::Calculating(_) => {
            if key.code == KeyCode::Esc {
                *app_state = AppState::QuitConfirm;
            }
        }
        FlowState::Results { .. } => match key.code {
            KeyCode::Char('r') => controller.restart(),
            KeyCode::Char('q') | KeyCode::Esc => return InputOutcome::Quit,
            _ => {}
        },
    }

    InputOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;
    use crate::questions::default_questions;

    fn create_test_controller() -> QuizController {
        QuizController::new(default_questions(), Duration::from_millis(1500)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn answer_all(controller: &mut QuizController, picks: [&str; 4], now: Instant) {
        for pick in picks {
            controller.select(pick);
            controller.go_next(now);
        }
    }

    fn finish_with(picks: [&str; 4]) -> u8 {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, picks, now);
        assert!(controller.poll_scoring(now + Duration::from_millis(1500)));
        controller.final_score().unwrap()
    }

    #[test]
    fn test_calculate_score_mixed_answers() {
        let questions = default_questions();
        let mut answers = AnswerMap::new();
        answers.insert(QuestionId::from(1u64), "Meow-Meow".to_string());
        answers.insert(QuestionId::from(2u64), "Ice-Cream".to_string());
        answers.insert(QuestionId::from(3u64), "Yellow".to_string());
        answers.insert(QuestionId::from(4u64), "Two".to_string());
        assert_eq!(calculate_score(&questions, &answers), 75);
    }

    #[test]
    fn test_calculate_score_missing_answers_count_as_wrong() {
        let questions = default_questions();
        let mut answers = AnswerMap::new();
        answers.insert(QuestionId::from(1u64), "Meow-Meow".to_string());
        assert_eq!(calculate_score(&questions, &answers), 25);
        assert_eq!(calculate_score(&questions, &AnswerMap::new()), 0);
        assert_eq!(calculate_score(&[], &answers), 0);
    }

    #[test]
    fn test_calculate_score_rounds_half_up() {
        let mut questions = Vec::new();
        let mut answers = AnswerMap::new();
        for i in 0..8u64 {
            questions.push(Question {
                id: i.into(),
                text: format!("Q{}", i),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: "a".to_string(),
            });
        }
        answers.insert(QuestionId::from(0u64), "a".to_string());
        // 1/8 = 12.5%
        assert_eq!(calculate_score(&questions, &answers), 13);

        let thirds: Vec<Question> = questions.into_iter().take(3).collect();
        answers.insert(QuestionId::from(1u64), "a".to_string());
        // 2/3 = 66.67%
        assert_eq!(calculate_score(&thirds, &answers), 67);
    }

    #[test]
    fn test_calculate_score_exact_half_on_large_deck() {
        let questions: Vec<Question> = (0..40u64)
            .map(|i| Question {
                id: i.into(),
                text: format!("Q{}", i),
                options: vec!["a".to_string(), "b".to_string()],
                correct_answer: "a".to_string(),
            })
            .collect();
        let answers: AnswerMap = (0..23u64)
            .map(|i| (QuestionId::from(i), "a".to_string()))
            .collect();
        // 23/40 = 57.5%
        assert_eq!(calculate_score(&questions, &answers), 58);
    }

    #[test]
    fn test_new_rejects_empty_deck() {
        let result = QuizController::new(Vec::new(), Duration::ZERO);
        assert!(matches!(result, Err(DeckError::Empty)));
    }

    #[test]
    fn test_new_rejects_invalid_deck() {
        let mut questions = default_questions();
        questions[0].correct_answer = "Woof".to_string();
        let result = QuizController::new(questions, Duration::ZERO);
        assert!(matches!(result, Err(DeckError::MissingCorrectAnswer(_))));
    }

    #[test]
    fn test_scores_through_controller() {
        assert_eq!(finish_with(["Meow-Meow", "Ice-Cream", "Yellow", "Two"]), 75);
        assert_eq!(
            finish_with(["Meow-Meow", "Ice-Cream", "Yellow", "Infinite"]),
            100
        );
        assert_eq!(finish_with(["Oink-Oink", "Shoes", "Red", "Two"]), 0);
    }

    #[test]
    fn test_select_records_answer_without_advancing() {
        let mut controller = create_test_controller();
        controller.select("Meow-Meow");
        assert_eq!(controller.selected_answer(), Some("Meow-Meow"));
        assert_eq!(
            controller.answers().get(&QuestionId::from(1u64)).map(String::as_str),
            Some("Meow-Meow")
        );
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.highlighted(), 1);

        controller.select("Oink-Oink");
        assert_eq!(controller.selected_answer(), Some("Oink-Oink"));
        assert_eq!(controller.answered_count(), 1);
    }

    #[test]
    fn test_select_ignores_unknown_option() {
        let mut controller = create_test_controller();
        controller.select("Woof");
        assert_eq!(controller.selected_answer(), None);
        assert!(controller.answers().is_empty());

        controller.select_index(3);
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn test_go_next_requires_answer() {
        let mut controller = create_test_controller();
        controller.go_next(Instant::now());
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.status(), &FlowState::Quiz);

        controller.select_index(0);
        controller.go_next(Instant::now());
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.selected_answer(), None);
    }

    #[test]
    fn test_go_previous_on_first_is_noop() {
        let mut controller = create_test_controller();
        controller.go_previous();
        assert_eq!(controller.current_index(), 0);
        assert!(controller.is_first_question());
    }

    #[test]
    fn test_navigation_restores_previous_answers() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        controller.select("Meow-Meow");
        controller.go_next(now);
        controller.select("Books");
        controller.go_next(now);

        controller.go_previous();
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.selected_answer(), Some("Books"));
        assert_eq!(controller.highlighted(), 1);

        controller.go_previous();
        assert_eq!(controller.selected_answer(), Some("Meow-Meow"));

        controller.go_next(now);
        assert_eq!(controller.selected_answer(), Some("Books"));

        // Third question has not been answered yet
        controller.go_next(now);
        assert_eq!(controller.current_index(), 2);
        assert_eq!(controller.selected_answer(), None);
        assert_eq!(controller.highlighted(), 0);
    }

    #[test]
    fn test_position_stays_in_bounds() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        for _ in 0..10 {
            controller.select_index(0);
            controller.go_next(now);
            if controller.status() != &FlowState::Quiz {
                controller.cancel_scoring();
            }
            assert!(controller.current_index() < controller.total_questions());
        }
        for _ in 0..10 {
            controller.go_previous();
            assert!(controller.current_index() < controller.total_questions());
        }
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_submit_enters_calculating_then_results_once() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);

        assert!(matches!(controller.status(), FlowState::Calculating(_)));
        assert_eq!(controller.final_score(), None);
        assert_eq!(
            controller.time_until_scoring(now),
            Some(Duration::from_millis(1500))
        );

        assert!(!controller.poll_scoring(now + Duration::from_millis(1499)));
        assert!(matches!(controller.status(), FlowState::Calculating(_)));

        assert!(controller.poll_scoring(now + Duration::from_millis(1500)));
        assert_eq!(controller.status(), &FlowState::Results { score: 75 });
        assert!(!controller.poll_scoring(now + Duration::from_secs(10)));
        assert_eq!(controller.time_until_scoring(now), None);
    }

    #[test]
    fn test_actions_ignored_outside_quiz() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);

        controller.select("Infinite");
        controller.go_previous();
        controller.restart();
        assert_eq!(controller.current_index(), 3);
        assert_eq!(
            controller.answers().get(&QuestionId::from(4u64)).map(String::as_str),
            Some("Two")
        );
        assert!(matches!(controller.status(), FlowState::Calculating(_)));
    }

    #[test]
    fn test_submit_refuses_when_earlier_question_unanswered() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);
        controller.cancel_scoring();
        controller.answers.remove(&QuestionId::from(2u64));

        controller.go_next(now);
        assert_eq!(controller.status(), &FlowState::Quiz);
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_cancel_scoring_invalidates_ticket() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);
        let FlowState::Calculating(stale) = *controller.status() else {
            panic!("expected calculating");
        };

        controller.cancel_scoring();
        assert_eq!(controller.status(), &FlowState::Quiz);
        assert_eq!(controller.current_index(), 3);

        // A stale ticket put back in place must not complete
        controller.status = FlowState::Calculating(stale);
        assert!(!controller.poll_scoring(now + Duration::from_secs(5)));

        controller.status = FlowState::Quiz;
        controller.go_next(now);
        assert!(controller.poll_scoring(now + Duration::from_millis(1500)));
        assert_eq!(controller.final_score(), Some(75));
    }

    #[test]
    fn test_restart_from_results() {
        let mut controller = create_test_controller();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Infinite"], now);
        let FlowState::Calculating(ticket) = *controller.status() else {
            panic!("expected calculating");
        };
        controller.poll_scoring(now + Duration::from_millis(1500));

        controller.restart();
        assert_eq!(controller.status(), &FlowState::Quiz);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.selected_answer(), None);
        assert!(controller.answers().is_empty());

        controller.status = FlowState::Calculating(ticket);
        assert!(!controller.poll_scoring(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_delay_completes_on_first_poll() {
        let mut controller = QuizController::new(default_questions(), Duration::ZERO).unwrap();
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Shoes", "Red", "Two"], now);
        assert!(controller.poll_scoring(now));
        assert_eq!(controller.final_score(), Some(25));
    }

    #[test]
    fn test_keys_drive_quiz() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;

        handle_quiz_input(&mut controller, key(KeyCode::Enter), &mut app_state);
        assert_eq!(controller.current_index(), 0);

        handle_quiz_input(&mut controller, key(KeyCode::Down), &mut app_state);
        handle_quiz_input(&mut controller, key(KeyCode::Char(' ')), &mut app_state);
        assert_eq!(controller.selected_answer(), Some("Meow-Meow"));

        handle_quiz_input(&mut controller, key(KeyCode::Right), &mut app_state);
        assert_eq!(controller.current_index(), 1);

        handle_quiz_input(&mut controller, key(KeyCode::Char('3')), &mut app_state);
        assert_eq!(controller.selected_answer(), Some("Ice-Cream"));

        handle_quiz_input(&mut controller, key(KeyCode::Left), &mut app_state);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.selected_answer(), Some("Meow-Meow"));
    }

    #[test]
    fn test_highlight_is_clamped() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;
        handle_quiz_input(&mut controller, key(KeyCode::Up), &mut app_state);
        assert_eq!(controller.highlighted(), 0);
        for _ in 0..5 {
            handle_quiz_input(&mut controller, key(KeyCode::Char('j')), &mut app_state);
        }
        assert_eq!(controller.highlighted(), 2);
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn test_digit_out_of_range_is_ignored() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;
        handle_quiz_input(&mut controller, key(KeyCode::Char('9')), &mut app_state);
        assert!(controller.answers().is_empty());
    }

    #[test]
    fn test_quit_confirmation_flow() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;

        let outcome = handle_quiz_input(&mut controller, key(KeyCode::Esc), &mut app_state);
        assert_eq!(outcome, InputOutcome::Continue);
        assert_eq!(app_state, AppState::QuitConfirm);

        // Quiz keys are swallowed while confirming
        handle_quiz_input(&mut controller, key(KeyCode::Char('1')), &mut app_state);
        assert!(controller.answers().is_empty());

        handle_quiz_input(&mut controller, key(KeyCode::Char('n')), &mut app_state);
        assert_eq!(app_state, AppState::Quiz);

        handle_quiz_input(&mut controller, key(KeyCode::Esc), &mut app_state);
        let outcome = handle_quiz_input(&mut controller, key(KeyCode::Char('y')), &mut app_state);
        assert_eq!(outcome, InputOutcome::Quit);
    }

    #[test]
    fn test_quit_during_calculating_cancels_ticket() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);

        handle_quiz_input(&mut controller, key(KeyCode::Char('r')), &mut app_state);
        assert!(matches!(controller.status(), FlowState::Calculating(_)));

        handle_quiz_input(&mut controller, key(KeyCode::Esc), &mut app_state);
        assert_eq!(app_state, AppState::QuitConfirm);
        let outcome = handle_quiz_input(&mut controller, key(KeyCode::Char('y')), &mut app_state);
        assert_eq!(outcome, InputOutcome::Quit);
        assert!(!controller.poll_scoring(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_results_keys() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;
        let now = Instant::now();
        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);
        controller.poll_scoring(now + Duration::from_secs(2));

        let outcome = handle_quiz_input(&mut controller, key(KeyCode::Char('r')), &mut app_state);
        assert_eq!(outcome, InputOutcome::Continue);
        assert_eq!(controller.status(), &FlowState::Quiz);

        answer_all(&mut controller, ["Meow-Meow", "Ice-Cream", "Yellow", "Two"], now);
        controller.poll_scoring(now + Duration::from_secs(2));
        let outcome = handle_quiz_input(&mut controller, key(KeyCode::Char('q')), &mut app_state);
        assert_eq!(outcome, InputOutcome::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut controller = create_test_controller();
        let mut app_state = AppState::Quiz;
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_quiz_input(&mut controller, ctrl_c, &mut app_state),
            InputOutcome::Quit
        );
    }
}
