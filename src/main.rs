//! Countdown Binding - a countdown timer kept in sync with its views
//! 
//! This is the main entry point for the countdown-binding application.

use std::{
    io::{self, Write},
    rc::Rc,
};
use tokio::{io::BufReader, task::LocalSet};
use tracing::{info, warn};

use countdown_binding::{
    config::Config,
    state::{Timer, TimerViews},
    tasks::{countdown_task, input_task},
    utils::shutdown_signal,
    views::{MemoryView, TerminalPanel},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the status line owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_binding={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-binding v1.0.0");
    info!("Configuration: id={}, duration={}s, autostart={}",
          config.id, config.initial_total_seconds(), config.autostart);

    let local = LocalSet::new();
    local.run_until(run(config)).await;

    info!("Shutdown complete");
    Ok(())
}

async fn run(config: Config) {
    let views = TimerViews {
        hours: MemoryView::default(),
        minutes: MemoryView::default(),
        seconds: MemoryView::default(),
        progress: MemoryView::default(),
        title: MemoryView::default(),
        root: MemoryView::default(),
    };

    let timer = Rc::new(Timer::new(
        config.id.clone(),
        config.title(),
        config.initial_total_seconds(),
        views,
        Box::new(|message: &str| {
            if let Err(e) = ring_alert(message) {
                warn!("Failed to write completion alert: {}", e);
            }
        }),
    ));
    let _panel = TerminalPanel::attach(&timer, config.json);
    timer.refresh();

    info!("Commands:");
    info!("  start | pause | toggle | reset | status | quit");
    info!("  h <hh> | m <mm> | s <ss>  - edit a field");
    info!("  title <text>              - rename the timer");

    // Start the tick background task
    tokio::task::spawn_local(countdown_task(Rc::downgrade(&timer)));

    if config.autostart {
        timer.start();
        timer.refresh();
    }

    let input = input_task(Rc::clone(&timer), BufReader::new(tokio::io::stdin()));

    tokio::select! {
        _ = input => {
            info!("Input finished");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }
}

/// Print the completion message with a terminal bell
fn ring_alert(message: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\x07{}", message)?;
    stdout.flush()
}
