use crate::models::FlowState;
use crate::session::QuizController;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::{progress_blocks, segment_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const QUIZ_TITLE: &str = "Test Your Knowledge";
pub const QUIZ_SUBTITLE: &str = "Answer all questions to see your results";

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn label_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn progress_line(controller: &QuizController, width: u16) -> Line<'static> {
    let total = controller.total_questions();
    let segment = "━".repeat(segment_width(width, total) as usize);
    let mut spans = Vec::new();
    for (i, filled) in progress_blocks(controller.current_index(), total)
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::from(" "));
        }
        let style = if filled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(segment.clone(), style));
    }
    Line::from(spans)
}

fn question_text(controller: &QuizController, width: usize) -> Text<'static> {
    let question = controller.current_question();
    let selected = controller.selected_answer();

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        question.text.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for (i, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(option.as_str());
        let is_highlighted = controller.highlighted() == i;
        let cursor = if is_highlighted { "›" } else { " " };
        let mark = if is_selected { "(•)" } else { "( )" };
        let style = if is_selected {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if is_highlighted {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let label = format!("{} {} {}. ", cursor, mark, i + 1);
        let option_width = width.saturating_sub(label.chars().count());
        text.push_line(Line::from(vec![
            Span::styled(label, style),
            Span::styled(truncate_to_width(option, option_width), style),
        ]));
    }

    text
}

pub fn draw_quiz(f: &mut Frame, controller: &QuizController) {
    let layout = calculate_quiz_chunks(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            QUIZ_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            QUIZ_SUBTITLE,
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Paragraph::new(progress_line(controller, layout.progress_area.width))
        .alignment(Alignment::Center);
    f.render_widget(progress, layout.progress_area);

    let title = format!(
        "Question {} / {}",
        controller.current_index() + 1,
        controller.total_questions()
    );
    let inner_width = layout.question_area.width.saturating_sub(2) as usize;
    let question = Paragraph::new(question_text(controller, inner_width))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(question, layout.question_area);

    if controller.is_first_question() {
        let note = Paragraph::new(Span::styled(
            "Best of Luck!",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Left);
        f.render_widget(note, layout.note_area);
    }

    let can_go_back = !controller.is_first_question();
    let can_advance = controller.is_current_answered();
    let forward_label = if controller.is_last_question() {
        " Submit"
    } else {
        " Next"
    };

    let help_text = vec![
        Line::from(vec![
            Span::styled("←", key_style(can_go_back)),
            Span::styled(" Previous  ", label_style(can_go_back)),
            Span::styled("→/Enter", key_style(can_advance)),
            Span::styled(forward_label, label_style(can_advance)),
        ]),
        Line::from(vec![
            Span::styled("↑/↓", key_style(true)),
            Span::from(" Move  "),
            Span::styled("Space", key_style(true)),
            Span::from(" Select  "),
            Span::styled("1-9", key_style(true)),
            Span::from(" Pick  "),
            Span::styled("Esc", key_style(true)),
            Span::from(" Quit  "),
            Span::styled("Ctrl+C", key_style(true)),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

/// Message and "stay" label for the quit dialog, worded for the screen
/// it was opened from.
pub fn quit_prompt(status: &FlowState) -> (&'static str, &'static str) {
    match status {
        FlowState::Quiz => (
            "Leave the quiz? Your answers will be lost.",
            " No (Continue Quiz)",
        ),
        FlowState::Calculating(_) => (
            "Leave now? Your score is almost ready.",
            " No (Keep Waiting)",
        ),
        FlowState::Results { .. } => ("Leave the quiz?", " No (Back to Results)"),
    }
}

pub fn draw_quit_confirmation(f: &mut Frame, status: &FlowState) {
    let (prompt, stay_label) = quit_prompt(status);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit Quiz")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(prompt)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Quit)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(stay_label),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
