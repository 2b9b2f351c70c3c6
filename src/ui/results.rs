use crate::models::ScoreTier;
use crate::ui::layout::calculate_screen_chunks;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn score_color(score: u8) -> Color {
    match ScoreTier::from_score(score) {
        ScoreTier::High => Color::Green,
        ScoreTier::Medium => Color::Yellow,
        ScoreTier::Low => Color::Red,
    }
}

pub fn draw_results(f: &mut Frame, score: u8) {
    let layout = calculate_screen_chunks(f.area(), 5);

    let content = vec![
        Line::from(Span::styled("You Scored", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score),
            Style::default()
                .fg(score_color(score))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your final score is"),
    ];
    let body = Paragraph::new(content).alignment(Alignment::Center);
    f.render_widget(body, layout.content_area);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start Over  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
