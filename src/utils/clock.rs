//! Time source abstraction so day-boundary logic can be driven in tests.

use crate::core::day_boundary::DayLabel;
use crate::errors::AppResult;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    /// Current time in epoch seconds.
    fn now(&self) -> i64;

    /// Current local calendar day.
    fn today(&self) -> AppResult<DayLabel> {
        DayLabel::from_epoch(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Local::now().timestamp()
    }
}

/// Manually driven clock (tests, `--now`).
#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn at(ts: i64) -> Self {
        Self { now: Cell::new(ts) }
    }

    pub fn set(&self, ts: i64) {
        self.now.set(ts);
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}
