use crate::models::{Question, QuestionId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Failed to read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse deck: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Deck contains no questions")]
    Empty,
    #[error("Duplicate question id {0}")]
    DuplicateId(QuestionId),
    #[error("Question {0} needs at least two options")]
    TooFewOptions(QuestionId),
    #[error("Question {0}: option {1:?} appears more than once")]
    DuplicateOption(QuestionId, String),
    #[error("Question {0} has no text")]
    EmptyText(QuestionId),
    #[error("Question {0}: correct answer is not one of its options")]
    MissingCorrectAnswer(QuestionId),
}

fn question(id: u64, text: &str, options: [&str; 3], correct_answer: &str) -> Question {
    Question {
        id: QuestionId::Number(id),
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct_answer.to_string(),
    }
}

/// The deck used when no file is configured.
pub fn default_questions() -> Vec<Question> {
    vec![
        question(
            1,
            "1. What sound does a cat make?",
            ["Bhau-Bhau", "Meow-Meow", "Oink-Oink"],
            "Meow-Meow",
        ),
        question(
            2,
            "2. What would you probably find in your fridge?",
            ["Shoes", "Books", "Ice-Cream"],
            "Ice-Cream",
        ),
        question(
            3,
            "3. What colour are bananas?",
            ["Yellow", "Green", "Red"],
            "Yellow",
        ),
        question(
            4,
            "4. How many stars are in the sky?",
            ["Two", "One Hundred", "Infinite"],
            "Infinite",
        ),
    ]
}

pub fn validate_questions(questions: &[Question]) -> Result<(), DeckError> {
    if questions.is_empty() {
        return Err(DeckError::Empty);
    }

    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(&q.id) {
            return Err(DeckError::DuplicateId(q.id.clone()));
        }
        if q.text.trim().is_empty() {
            return Err(DeckError::EmptyText(q.id.clone()));
        }
        if q.options.len() < 2 {
            return Err(DeckError::TooFewOptions(q.id.clone()));
        }
        let mut options = HashSet::new();
        if let Some(dup) = q.options.iter().find(|o| !options.insert(o.as_str())) {
            return Err(DeckError::DuplicateOption(q.id.clone(), dup.clone()));
        }
        if q.option_index(&q.correct_answer).is_none() {
            return Err(DeckError::MissingCorrectAnswer(q.id.clone()));
        }
    }

    Ok(())
}

pub fn parse_questions(content: &str) -> Result<Vec<Question>, DeckError> {
    let questions: Vec<Question> = serde_json::from_str(content)?;
    validate_questions(&questions)?;
    Ok(questions)
}

pub fn load_questions(path: &Path) -> Result<Vec<Question>, DeckError> {
    let content = fs::read_to_string(path)?;
    parse_questions(&content)
}
