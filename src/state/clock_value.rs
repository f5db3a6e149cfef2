//! Clock value arithmetic over hours, minutes and seconds

use serde::{Deserialize, Serialize};

use crate::error::ClockError;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Which derived component of a [`ClockValue`] an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Hours,
    Minutes,
    Seconds,
}

impl Component {
    /// Number of seconds one unit of this component is worth
    pub fn scale(self) -> i64 {
        match self {
            Component::Hours => SECONDS_PER_HOUR,
            Component::Minutes => SECONDS_PER_MINUTE,
            Component::Seconds => 1,
        }
    }
}

/// A non-negative duration in seconds with derived hours/minutes/seconds.
///
/// `total_seconds` is the source of truth. The derived fields are recomputed
/// on every mutation, except for the seconds-only fast path of
/// [`subtract_seconds`](Self::subtract_seconds) which cannot change them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockValue {
    total_seconds: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl ClockValue {
    /// Create a clock holding `total_seconds`
    pub fn new(total_seconds: i64) -> Result<Self, ClockError> {
        if total_seconds < 0 {
            return Err(ClockError::InvalidDuration(total_seconds));
        }
        let mut clock = Self::default();
        clock.set_total(total_seconds);
        Ok(clock)
    }

    /// Create a clock from an unsigned second count; cannot fail
    pub fn from_secs(total_seconds: u64) -> Self {
        let mut clock = Self::default();
        clock.assign(total_seconds);
        clock
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Read a component by kind
    pub fn component(&self, component: Component) -> u64 {
        match component {
            Component::Hours => self.hours,
            Component::Minutes => self.minutes,
            Component::Seconds => self.seconds,
        }
    }

    /// Replace the total, flooring negative values at zero
    pub fn set_total(&mut self, seconds: i64) {
        self.assign(u64::try_from(seconds.max(0)).unwrap_or(0));
    }

    fn assign(&mut self, total: u64) {
        self.total_seconds = total;
        self.hours = total / SECONDS_PER_HOUR as u64;
        let rest = total % SECONDS_PER_HOUR as u64;
        self.minutes = rest / SECONDS_PER_MINUTE as u64;
        self.seconds = rest % SECONDS_PER_MINUTE as u64;
    }

    /// Subtract `n` seconds, `0 <= n < 60`, borrowing across minutes and
    /// hours as needed. The value never drops below zero.
    pub fn subtract_seconds(&mut self, n: i64) -> Result<(), ClockError> {
        if !(0..SECONDS_PER_MINUTE).contains(&n) {
            return Err(ClockError::InvalidArgument(n));
        }
        let n_unsigned = n as u64;

        if self.seconds >= n_unsigned {
            self.total_seconds -= n_unsigned;
            self.seconds -= n_unsigned;
        } else if self.total_seconds <= n_unsigned {
            *self = Self::default();
        } else {
            self.assign(self.total_seconds - n_unsigned);
        }
        Ok(())
    }

    pub fn set_hours_component(&mut self, hours: u64) {
        self.set_component(Component::Hours, hours);
    }

    pub fn set_minutes_component(&mut self, minutes: u64) {
        self.set_component(Component::Minutes, minutes);
    }

    pub fn set_seconds_component(&mut self, seconds: u64) {
        self.set_component(Component::Seconds, seconds);
    }

    /// Set one component while keeping the others, by applying the scaled
    /// delta to the total. Overflowing values ripple into the larger units.
    pub fn set_component(&mut self, component: Component, value: u64) {
        let requested = i64::try_from(value).unwrap_or(i64::MAX);
        let current = i64::try_from(self.component(component)).unwrap_or(i64::MAX);
        let delta = requested
            .saturating_sub(current)
            .saturating_mul(component.scale());
        let total = i64::try_from(self.total_seconds).unwrap_or(i64::MAX);
        self.set_total(total.saturating_add(delta));
    }

    /// True once the countdown has run out
    pub fn is_zero(&self) -> bool {
        self.total_seconds == 0
    }
}
