//! Stdin command loop

use std::rc::Rc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, warn};

use crate::{
    state::{Component, Timer},
    views::MemoryView,
};

/// A command typed on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Status,
    /// Simulated user edit of a clock field
    Edit(Component, String),
    /// Simulated user edit of the title
    Title(String),
    Quit,
}

/// Parse one input line. Returns `None` for blank or unknown lines.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "start" => Command::Start,
        "pause" => Command::Pause,
        "toggle" | "t" => Command::Toggle,
        "reset" | "r" => Command::Reset,
        "status" => Command::Status,
        "quit" | "q" | "exit" => Command::Quit,
        "h" | "hours" => Command::Edit(Component::Hours, rest.to_string()),
        "m" | "min" | "minutes" => Command::Edit(Component::Minutes, rest.to_string()),
        "s" | "sec" | "seconds" => Command::Edit(Component::Seconds, rest.to_string()),
        "title" => Command::Title(rest.to_string()),
        _ => return None,
    };
    Some(command)
}

/// Apply a command to the timer. Returns `false` once the user asked to quit.
pub fn apply_command(timer: &Timer<MemoryView>, command: Command) -> bool {
    match command {
        Command::Start => timer.start(),
        Command::Pause => timer.pause(),
        Command::Toggle => timer.start_toggle(),
        Command::Reset => timer.reset(),
        Command::Status => match serde_json::to_string_pretty(&timer.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize snapshot: {}", e),
        },
        Command::Edit(component, text) => timer.field_view(component).input(&text),
        Command::Title(text) => timer.title_view().input(&text),
        Command::Quit => return false,
    }
    true
}

/// Read commands line by line until EOF or `quit`
pub async fn input_task<R>(timer: Rc<Timer<MemoryView>>, reader: R)
where
    R: AsyncBufRead + Unpin,
{
    info!("Reading commands from input");

    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(command) = parse_command(&line) else {
                    warn!("Unknown command: {:?}", line.trim());
                    continue;
                };
                if !apply_command(&timer, command) {
                    info!("Quit requested");
                    break;
                }
                // Phase changes do not notify on their own
                timer.refresh();
            }
            Ok(None) => {
                info!("Input closed");
                break;
            }
            Err(e) => {
                error!("Error reading input: {}", e);
                break;
            }
        }
    }
}
