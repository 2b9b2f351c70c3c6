use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use terminal_quiz::{
    default_questions, draw_app, handle_quiz_input, load_questions, logger, AppState,
    InputOutcome, QuizConfig, QuizController,
};

const IDLE_POLL: Duration = Duration::from_millis(250);

fn run<B: Backend>(terminal: &mut Terminal<B>, controller: &mut QuizController) -> io::Result<()> {
    let mut app_state = AppState::Quiz;

    loop {
        terminal.draw(|f| draw_app(f, controller, app_state))?;

        let timeout = controller
            .time_until_scoring(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_quiz_input(controller, key, &mut app_state) == InputOutcome::Quit
        {
            break;
        }

        controller.poll_scoring(Instant::now());
    }

    Ok(())
}

fn main() -> io::Result<ExitCode> {
    let config = QuizConfig::parse();
    if let Some(path) = &config.log_path
        && !logger::init(path)
    {
        eprintln!("warning: cannot open log file {}, logging disabled", path.display());
    }
    logger::log("Starting terminal-quiz");

    let questions = match &config.deck_path {
        Some(path) => match load_questions(path) {
            Ok(questions) => {
                logger::log(&format!(
                    "Loaded {} questions from {}",
                    questions.len(),
                    path.display()
                ));
                questions
            }
            Err(e) => {
                logger::log(&format!("Deck error: {}", e));
                eprintln!("{}: {}", path.display(), e);
                return Ok(ExitCode::FAILURE);
            }
        },
        None => {
            logger::log("Using built-in questions");
            default_questions()
        }
    };

    let mut controller = match QuizController::new(questions, config.scoring_delay()) {
        Ok(controller) => controller,
        Err(e) => {
            logger::log(&format!("Deck error: {}", e));
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    logger::log("Quiz closed");

    result.map(|()| ExitCode::SUCCESS)
}
