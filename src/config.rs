//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-binding")]
#[command(about = "A countdown timer with editable, synchronized hour/minute/second fields")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Timer identifier
    #[arg(long, default_value = "000")]
    pub id: String,

    /// Initial hours
    #[arg(short = 'H', long, default_value = "0")]
    pub hours: u64,

    /// Initial minutes
    #[arg(short, long, default_value = "1")]
    pub minutes: u64,

    /// Initial seconds
    #[arg(short, long, default_value = "5")]
    pub seconds: u64,

    /// Title shown in the status line and the completion alert
    #[arg(long)]
    pub title: Option<String>,

    /// Start counting down immediately
    #[arg(long)]
    pub autostart: bool,

    /// Print JSON snapshots instead of the text status line
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Initial duration in seconds
    pub fn initial_total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    /// Title to display, defaulting to `Timer <id>` with the id read as a number
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        match self.id.parse::<u64>() {
            Ok(n) => format!("Timer {}", n),
            Err(_) => format!("Timer {}", self.id),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["countdown-binding"]).unwrap();
        assert_eq!(config.initial_total_seconds(), 65);
        assert_eq!(config.title(), "Timer 0");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "countdown-binding",
            "-H",
            "1",
            "--minutes",
            "2",
            "-s",
            "3",
            "--id",
            "tea",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.initial_total_seconds(), 3723);
        assert_eq!(config.title(), "Timer tea");
        assert_eq!(config.log_level(), "debug");
    }
}
