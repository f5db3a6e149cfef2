//! Countdown timer controller
//!
//! Owns the clock and title properties, binds them to the field, progress,
//! and title views, and runs the Idle/Running/Alerting state machine. The
//! periodic tick itself lives in [`crate::tasks::countdown_task`], which
//! follows the armed flag published here.

use std::{cell::Cell, rc::Rc};
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info};

use super::{ClockValue, Component, TimerPhase, TimerSnapshot};
use crate::binding::{
    component_renderer, digit_field_parser, progress_percent, progress_renderer, title_parser,
    title_renderer, BoundView, ObservableProperty, Observer, ViewHandle,
};

/// Class set on the root view while the completion alert is showing
pub const ALERT_CLASS: &str = "timer--alert";
/// Class set on the root view while counting down
pub const RUNNING_CLASS: &str = "timer--running";
/// Digits per clock field
pub const FIELD_WIDTH: usize = 2;

/// Completion signal, receives the alert message
pub type CompletionFn = Box<dyn Fn(&str)>;

/// The views a timer renders into
#[derive(Debug, Clone)]
pub struct TimerViews<V> {
    pub hours: V,
    pub minutes: V,
    pub seconds: V,
    pub progress: V,
    pub title: V,
    pub root: V,
}

/// State shared with the closures registered on the views
struct Session<V> {
    id: String,
    phase: Cell<TimerPhase>,
    initial_total_seconds: Cell<u64>,
    armed_tx: watch::Sender<bool>,
    root: V,
}

impl<V: ViewHandle> Session<V> {
    fn transition(&self, next: TimerPhase) {
        let previous = self.phase.replace(next);
        if previous == next {
            return;
        }
        self.armed_tx.send_replace(next.is_running());
        self.root.set_class(RUNNING_CLASS, next.is_running());
        self.root.set_class(ALERT_CLASS, next == TimerPhase::Alerting);
        debug!("Timer {}: {:?} -> {:?}", self.id, previous, next);
    }

    /// A field edit always wins over a running countdown or a showing alert
    fn interrupt_for_edit(&self) {
        match self.phase.get() {
            TimerPhase::Running => {
                info!("Timer {}: field edited while running, pausing", self.id);
                self.transition(TimerPhase::Idle);
            }
            TimerPhase::Alerting => {
                info!("Timer {}: field edited, dismissing alert", self.id);
                self.transition(TimerPhase::Idle);
            }
            TimerPhase::Idle => {}
        }
    }

    fn rebase(&self, total_seconds: u64) {
        debug!("Timer {}: session length now {}s", self.id, total_seconds);
        self.initial_total_seconds.set(total_seconds);
    }
}

/// A countdown timer bound to a set of views
pub struct Timer<V> {
    session: Rc<Session<V>>,
    counter: Rc<ObservableProperty<ClockValue>>,
    title: Rc<ObservableProperty<String>>,
    hours: Rc<BoundView<ClockValue, V>>,
    minutes: Rc<BoundView<ClockValue, V>>,
    seconds: Rc<BoundView<ClockValue, V>>,
    progress: Rc<BoundView<ClockValue, V>>,
    title_view: Rc<BoundView<String, V>>,
    completion: CompletionFn,
}

impl<V: ViewHandle + 'static> Timer<V> {
    /// Create an idle timer and render its initial state into `views`
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        initial_total_seconds: u64,
        views: TimerViews<V>,
        completion: CompletionFn,
    ) -> Self {
        let (armed_tx, _) = watch::channel(false);
        let session = Rc::new(Session {
            id: id.into(),
            phase: Cell::new(TimerPhase::Idle),
            initial_total_seconds: Cell::new(initial_total_seconds),
            armed_tx,
            root: views.root,
        });
        let counter = Rc::new(ObservableProperty::new(ClockValue::from_secs(initial_total_seconds)));
        let title = Rc::new(ObservableProperty::new(title.into()));

        let bind_field = |view: V, component: Component| {
            let hook = Rc::clone(&session);
            view.on_change(Rc::new(move || hook.interrupt_for_edit()));
            let rebase = Rc::clone(&session);
            BoundView::dual(
                view,
                &counter,
                component_renderer(component, FIELD_WIDTH),
                digit_field_parser(component, FIELD_WIDTH, move |clock: &ClockValue| {
                    rebase.rebase(clock.total_seconds())
                }),
            )
        };
        let hours = bind_field(views.hours, Component::Hours);
        let minutes = bind_field(views.minutes, Component::Minutes);
        let seconds = bind_field(views.seconds, Component::Seconds);

        let baseline = Rc::clone(&session);
        let progress = BoundView::one_way(
            views.progress,
            &counter,
            progress_renderer(move || baseline.initial_total_seconds.get()),
        );
        let title_view = BoundView::dual(views.title, &title, title_renderer(), title_parser());

        let timer = Self {
            session,
            counter,
            title,
            hours,
            minutes,
            seconds,
            progress,
            title_view,
            completion,
        };
        timer.refresh();
        info!(
            "Timer {} created with {}s",
            timer.session.id, initial_total_seconds
        );
        timer
    }

    pub fn id(&self) -> &str {
        &self.session.id
    }

    pub fn phase(&self) -> TimerPhase {
        self.session.phase.get()
    }

    pub fn button_label(&self) -> &'static str {
        self.phase().button_label()
    }

    /// Total the next reset restores
    pub fn initial_total_seconds(&self) -> u64 {
        self.session.initial_total_seconds.get()
    }

    pub fn counter(&self) -> &Rc<ObservableProperty<ClockValue>> {
        &self.counter
    }

    pub fn title(&self) -> &Rc<ObservableProperty<String>> {
        &self.title
    }

    /// Attach an extra observer to the clock, rendered after the bound views
    pub fn attach_observer(&self, observer: Rc<dyn Observer>) {
        self.counter.attach(observer);
    }

    pub fn field_view(&self, component: Component) -> &V {
        match component {
            Component::Hours => self.hours.view(),
            Component::Minutes => self.minutes.view(),
            Component::Seconds => self.seconds.view(),
        }
    }

    pub fn progress_view(&self) -> &V {
        self.progress.view()
    }

    pub fn title_view(&self) -> &V {
        self.title_view.view()
    }

    pub fn root_view(&self) -> &V {
        &self.session.root
    }

    /// Receiver reporting whether the periodic tick should be running
    pub fn subscribe_armed(&self) -> watch::Receiver<bool> {
        self.session.armed_tx.subscribe()
    }

    /// Re-render every view
    pub fn refresh(&self) {
        self.counter.notify();
        self.title.notify();
    }

    /// Begin counting down. Only valid from `Idle`; a zero clock alerts at once.
    pub fn start(&self) {
        match self.phase() {
            TimerPhase::Idle if self.counter.state().is_zero() => {
                info!("Timer {} started at zero", self.id());
                self.finish();
            }
            TimerPhase::Idle => {
                info!("Timer {} started", self.id());
                self.session.transition(TimerPhase::Running);
            }
            phase => debug!("Timer {}: start ignored while {:?}", self.id(), phase),
        }
    }

    /// Stop counting, keeping the current value. No-op unless running.
    pub fn pause(&self) {
        if self.phase().is_running() {
            info!("Timer {} paused", self.id());
            self.session.transition(TimerPhase::Idle);
        } else {
            debug!("Timer {}: pause ignored while {:?}", self.id(), self.phase());
        }
    }

    pub fn start_toggle(&self) {
        if self.phase().is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop, restore the session's initial value and re-render
    pub fn reset(&self) {
        let initial = self.initial_total_seconds();
        info!("Timer {} reset to {}s", self.id(), initial);
        self.session.transition(TimerPhase::Idle);
        self.counter
            .update_state(|clock| *clock = ClockValue::from_secs(initial));
        self.counter.notify();
    }

    /// Advance one second. Ignored unless running.
    pub fn tick(&self) -> TimerPhase {
        if !self.phase().is_running() {
            debug!("Timer {}: tick ignored while {:?}", self.id(), self.phase());
            return self.phase();
        }
        if let Err(e) = self.counter.update_state(|clock| clock.subtract_seconds(1)) {
            error!("Timer {}: failed to advance clock: {}", self.id(), e);
        }
        self.counter.notify();
        if self.counter.state().is_zero() {
            self.finish();
        }
        self.phase()
    }

    fn finish(&self) {
        self.session.transition(TimerPhase::Alerting);
        let message = format!("{} has finished!", self.title.state());
        info!("Timer {}: {}", self.id(), message);
        (self.completion)(&message);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let clock = self.counter.get_state();
        let initial = self.initial_total_seconds();
        TimerSnapshot {
            id: self.id().to_string(),
            title: self.title.get_state(),
            phase: self.phase(),
            total_seconds: clock.total_seconds(),
            hours: clock.hours(),
            minutes: clock.minutes(),
            seconds: clock.seconds(),
            initial_total_seconds: initial,
            progress_percent: progress_percent(clock.total_seconds(), initial),
            timestamp: Utc::now(),
        }
    }
}
