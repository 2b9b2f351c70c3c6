use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub progress_area: Rect,
    pub question_area: Rect,
    pub note_area: Rect,
    pub help_area: Rect,
}

/// Vertically centred block used by the transition and results screens.
pub struct ScreenLayout {
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        progress_area: chunks[1],
        question_area: chunks[2],
        note_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_screen_chunks(area: Rect, content_height: u16) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(content_height),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        content_area: chunks[1],
        footer_area: chunks[3],
    }
}
