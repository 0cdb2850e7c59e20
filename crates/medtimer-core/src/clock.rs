//! Wall-clock access for the session driver.
//!
//! The core computations (status resolution, adherence, due-soon scans) all
//! take an explicit `now` parameter so they stay pure and testable. The
//! `Clock` trait exists for the driver layer: it obtains exactly one `now`
//! per refresh cycle so every status within a render pass is derived from
//! the same instant.

use chrono::{Local, NaiveDateTime};

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The real local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually advanced clock for tests and scripted sessions.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::cell::Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: std::cell::Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: chrono::Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
