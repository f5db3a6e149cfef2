//! Countdown tick background task

use std::{rc::Weak, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    binding::ViewHandle,
    state::{Timer, TimerPhase},
};

/// Period between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it is armed.
///
/// Must run on a `LocalSet` since the timer is single-threaded. Holds only a
/// weak reference and returns once the timer is dropped.
pub async fn countdown_task<V: ViewHandle + 'static>(timer: Weak<Timer<V>>) {
    let Some((id, mut armed_rx)) = timer
        .upgrade()
        .map(|timer| (timer.id().to_string(), timer.subscribe_armed()))
    else {
        return;
    };
    info!("Starting countdown task for timer {}", id);

    loop {
        if !*armed_rx.borrow_and_update() {
            // Wait for the timer to be armed
            if armed_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Tick armed for timer {}", id);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let Some(timer) = timer.upgrade() else {
                        info!("Timer {} dropped, countdown task finished", id);
                        return;
                    };
                    if timer.tick() != TimerPhase::Running {
                        debug!("Timer {} stopped on tick", id);
                        break;
                    }
                }

                changed = armed_rx.changed() => {
                    if changed.is_err() {
                        info!("Timer {} dropped, countdown task finished", id);
                        return;
                    }
                    if !*armed_rx.borrow_and_update() {
                        debug!("Tick cancelled for timer {}", id);
                        break;
                    }
                }
            }
        }
    }

    info!("Countdown task for timer {} finished", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        state::{Component, TimerViews},
        views::MemoryView,
    };
    use std::{cell::Cell, rc::Rc};
    use tokio::task::LocalSet;

    fn timer(total: u64, alerts: Rc<Cell<u32>>) -> Rc<Timer<MemoryView>> {
        let views = TimerViews {
            hours: MemoryView::new(""),
            minutes: MemoryView::new(""),
            seconds: MemoryView::new(""),
            progress: MemoryView::new(""),
            title: MemoryView::new(""),
            root: MemoryView::new(""),
        };
        Rc::new(Timer::new(
            "001",
            "Timer 1",
            total,
            views,
            Box::new(move |_: &str| alerts.set(alerts.get() + 1)),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_alert() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let alerts = Rc::new(Cell::new(0));
                let timer = timer(3, Rc::clone(&alerts));
                tokio::task::spawn_local(countdown_task(Rc::downgrade(&timer)));

                timer.start();
                tokio::time::sleep(Duration::from_millis(2500)).await;
                assert_eq!(timer.counter().state().total_seconds(), 1);
                assert_eq!(timer.phase(), TimerPhase::Running);

                tokio::time::sleep(Duration::from_secs(5)).await;
                assert_eq!(timer.phase(), TimerPhase::Alerting);
                assert_eq!(timer.counter().state().total_seconds(), 0);
                assert_eq!(alerts.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticking() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let timer = timer(60, Rc::new(Cell::new(0)));
                tokio::task::spawn_local(countdown_task(Rc::downgrade(&timer)));

                timer.start();
                tokio::time::sleep(Duration::from_millis(3500)).await;
                timer.pause();
                tokio::time::sleep(Duration::from_secs(10)).await;

                assert_eq!(timer.counter().state().total_seconds(), 57);
                assert_eq!(timer.field_view(Component::Seconds).read(), "57");

                timer.start();
                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(timer.counter().state().total_seconds(), 56);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exits_when_timer_dropped() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let timer = timer(60, Rc::new(Cell::new(0)));
                let handle = tokio::task::spawn_local(countdown_task(Rc::downgrade(&timer)));

                timer.start();
                tokio::time::sleep(Duration::from_millis(1500)).await;
                assert_eq!(timer.counter().state().total_seconds(), 59);
                drop(timer);

                let finished = tokio::time::timeout(Duration::from_secs(5), handle).await;
                assert!(finished.is_ok(), "countdown task outlived its timer");
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exits_when_idle_timer_dropped() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let timer = timer(60, Rc::new(Cell::new(0)));
                let handle = tokio::task::spawn_local(countdown_task(Rc::downgrade(&timer)));
                tokio::task::yield_now().await;
                drop(timer);

                let finished = tokio::time::timeout(Duration::from_secs(5), handle).await;
                assert!(finished.is_ok(), "countdown task outlived its timer");
            })
            .await;
    }
}
