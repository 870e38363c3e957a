// The frame clock and the one-shot callbacks it drives.
use std::fmt;
use std::time::Duration;

use crate::stage::Stage;

/// Monotonic frame counter plus the simulated time it represents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeline {
    pub tick: u64,
    pub elapsed: Duration,
}

impl Timeline {
    pub fn advance(&mut self, dt: Duration) {
        self.tick += 1;
        self.elapsed += dt;
    }
}

pub type Callback = Box<dyn FnOnce(&mut Stage) + Send + Sync>;

struct Pending {
    due: Duration,
    seq: u64,
    callback: Callback,
}

/// Callbacks waiting for the clock to reach their due time.
///
/// Runs on the game loop itself; nothing here ever sleeps. Callbacks that
/// become due on the same tick run in the order they were scheduled.
#[derive(Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn schedule(&mut self, now: Duration, delay: Duration, callback: Callback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: now + delay,
            seq,
            callback,
        });
    }

    /// Remove and return every callback due at `now`.
    pub fn due(&mut self, now: Duration) -> Vec<Callback> {
        let (mut ready, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|pending| pending.due <= now);
        self.pending = waiting;
        ready.sort_by_key(|pending| (pending.due, pending.seq));
        ready.into_iter().map(|pending| pending.callback).collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn callbacks_fire_once_in_due_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::default();
        for (label, delay) in [("late", 3), ("early", 1), ("tied", 1)] {
            let order = order.clone();
            scheduler.schedule(
                Duration::ZERO,
                Duration::from_secs(delay),
                Box::new(move |_: &mut Stage| order.lock().unwrap().push(label)),
            );
        }

        let mut stage = Stage::default();
        assert!(scheduler.due(Duration::from_millis(500)).is_empty());
        for callback in scheduler.due(Duration::from_secs(5)) {
            callback(&mut stage);
        }
        assert_eq!(*order.lock().unwrap(), ["early", "tied", "late"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn cancel_all_drops_pending_work() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(Duration::ZERO, Duration::from_secs(9), Box::new(|_: &mut Stage| {}));
        assert_eq!(scheduler.len(), 1);
        scheduler.cancel_all();
        assert!(scheduler.due(Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn timeline_counts_ticks() {
        let mut timeline = Timeline::default();
        for _ in 0..60 {
            timeline.advance(Duration::from_micros(16_667));
        }
        assert_eq!(timeline.tick, 60);
        assert!(timeline.elapsed >= Duration::from_millis(1000));
    }
}
