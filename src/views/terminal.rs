//! Terminal status line observer

use std::{
    cell::RefCell,
    io::{self, Write},
    rc::{Rc, Weak},
};
use tracing::warn;

use crate::{
    binding::{Observer, ViewHandle},
    state::{ClockValue, Timer, TimerSnapshot},
    utils::format::format_clock,
};

const BAR_WIDTH: usize = 20;

/// Prints a status line, as text or as a JSON snapshot, whenever the
/// rendered status differs from the last one printed.
///
/// The panel watches both the clock and the title, so one command can
/// notify it several times; repeats are dropped.
pub struct TerminalPanel<V> {
    timer: Weak<Timer<V>>,
    json: bool,
    out: RefCell<Box<dyn Write>>,
    last_line: RefCell<Option<String>>,
}

impl<V: ViewHandle + 'static> TerminalPanel<V> {
    /// Attach a panel printing to stdout
    pub fn attach(timer: &Rc<Timer<V>>, json: bool) -> Rc<Self> {
        Self::attach_with_writer(timer, json, Box::new(io::stdout()))
    }

    /// Attach a panel to the timer's clock and title, printing to `out`
    pub fn attach_with_writer(timer: &Rc<Timer<V>>, json: bool, out: Box<dyn Write>) -> Rc<Self> {
        let panel = Rc::new(Self {
            timer: Rc::downgrade(timer),
            json,
            out: RefCell::new(out),
            last_line: RefCell::new(None),
        });
        timer.attach_observer(panel.clone());
        timer.title().attach(panel.clone());
        panel
    }

    fn render(&self, timer: &Timer<V>) -> io::Result<()> {
        let snapshot = timer.snapshot();
        let line = status_line(&snapshot);
        if self.last_line.borrow().as_deref() == Some(line.as_str()) {
            return Ok(());
        }

        let mut out = self.out.borrow_mut();
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
        } else {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        *self.last_line.borrow_mut() = Some(line);
        Ok(())
    }
}

impl<V: ViewHandle + 'static> Observer for TerminalPanel<V> {
    fn update_as_observer(&self) {
        let Some(timer) = self.timer.upgrade() else {
            return;
        };
        if let Err(e) = self.render(&timer) {
            warn!("Failed to write status line: {}", e);
        }
    }
}

/// `[Title] HH:MM:SS [#####---------------]  25% idle`
pub fn status_line(snapshot: &TimerSnapshot) -> String {
    let filled = usize::from(snapshot.progress_percent) * BAR_WIDTH / 100;
    format!(
        "[{}] {} [{}{}] {:>3}% {}",
        snapshot.title,
        format_clock(&ClockValue::from_secs(snapshot.total_seconds)),
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        snapshot.progress_percent,
        snapshot.phase.as_str(),
    )
}
