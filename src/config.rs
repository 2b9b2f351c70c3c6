use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SCORING_DELAY_MS: u64 = 1500;

pub const ENV_DECK: &str = "QUIZ_DECK";
pub const ENV_SCORING_DELAY_MS: &str = "QUIZ_SCORING_DELAY_MS";
pub const ENV_LOG: &str = "QUIZ_LOG";

/// Command-line options. Every option can also come from its `QUIZ_*`
/// environment variable; an argument on the command line wins.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "terminal-quiz", version, about = "Multiple-choice quiz in the terminal")]
pub struct QuizConfig {
    /// JSON deck to load instead of the built-in questions
    #[arg(value_name = "DECK", env = ENV_DECK)]
    pub deck_path: Option<PathBuf>,

    /// How long the "calculating" screen stays up, in milliseconds
    #[arg(
        long = "scoring-delay-ms",
        value_name = "MS",
        env = ENV_SCORING_DELAY_MS,
        default_value_t = DEFAULT_SCORING_DELAY_MS
    )]
    pub scoring_delay_ms: u64,

    /// Append timestamped log lines to this file
    #[arg(long = "log", value_name = "FILE", env = ENV_LOG)]
    pub log_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            deck_path: None,
            scoring_delay_ms: DEFAULT_SCORING_DELAY_MS,
            log_path: None,
        }
    }
}

impl QuizConfig {
    pub fn scoring_delay(&self) -> Duration {
        Duration::from_millis(self.scoring_delay_ms)
    }
}
