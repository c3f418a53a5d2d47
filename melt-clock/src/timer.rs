use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};

/// The two independent timers a clock runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Advances the melt and repaints.
    Frame,
    /// Steps the colors.
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// One-shot timers. The host calls back into the clock when a timer comes
/// due, and the clock schedules the next one.
pub trait Scheduler {
    fn schedule(&mut self, timer: TimerKind, delay: Duration) -> TimerHandle;

    /// Cancelling an unknown or already-fired handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Local wall-clock time.
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TimerHandle,
    timer: TimerKind,
    deadline: Instant,
}

/// Keeps deadlines for a host loop that sleeps until the next one.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    pending: Vec<Pending>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<Pending> = Vec::new();

        self.pending.retain(|p| {
            if p.deadline <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });

        due.sort_by_key(|p| p.deadline);
        due.into_iter().map(|p| p.timer).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn schedule_at(&mut self, timer: TimerKind, deadline: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        self.pending.push(Pending {
            handle,
            timer,
            deadline,
        });

        handle
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, timer: TimerKind, delay: Duration) -> TimerHandle {
        self.schedule_at(timer, Instant::now() + delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_timers_come_out_in_order() {
        let mut sched = DeadlineScheduler::new();
        let base = Instant::now();

        sched.schedule_at(TimerKind::Color, base + Duration::from_millis(20));
        sched.schedule_at(TimerKind::Frame, base + Duration::from_millis(10));
        sched.schedule_at(TimerKind::Frame, base + Duration::from_millis(500));

        assert_eq!(sched.next_deadline(), Some(base + Duration::from_millis(10)));

        let due = sched.take_due(base + Duration::from_millis(30));
        assert_eq!(due, vec![TimerKind::Frame, TimerKind::Color]);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn cancel_removes_only_that_handle() {
        let mut sched = DeadlineScheduler::new();
        let a = sched.schedule(TimerKind::Frame, Duration::ZERO);
        let _b = sched.schedule(TimerKind::Color, Duration::ZERO);

        sched.cancel(a);
        sched.cancel(a);

        assert_eq!(sched.take_due(Instant::now() + Duration::from_secs(1)), vec![TimerKind::Color]);
        assert!(sched.is_empty());
    }

    #[test]
    fn handles_are_unique() {
        let mut sched = DeadlineScheduler::new();
        let a = sched.schedule(TimerKind::Frame, Duration::ZERO);
        let b = sched.schedule(TimerKind::Frame, Duration::ZERO);

        assert_ne!(a, b);
    }
}
