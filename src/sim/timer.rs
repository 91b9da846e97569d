/// One-shot delayed callbacks.
///
/// The game loop feeds elapsed wall time into `advance()`; every timer whose
/// delay has run out is returned once and dropped. Timers cannot be
/// cancelled: a reset scheduled before another reset still fires.

use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Timer {
    /// Clear the `enter` flag of this row.
    ClearEnter { row: usize },
    /// Start a new round.
    Reset,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(Duration, Timer)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    pub fn schedule(&mut self, delay: Duration, timer: Timer) {
        self.pending.push((delay, timer));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Subtract `elapsed` from every timer; return the ones that expired,
    /// in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Timer> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|(remaining, timer)| {
            *remaining = remaining.saturating_sub(elapsed);
            if remaining.is_zero() {
                fired.push(*timer);
                false
            } else {
                true
            }
        });
        fired
    }
}
