//! Virtual millisecond clock with repeating timers
//!
//! Replaces wall-clock intervals so a session can be advanced
//! deterministically. Timers due at the same instant fire in the order they
//! were registered.

/// Handle for cancelling a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u32);

#[derive(Debug, Clone)]
struct Timer<K> {
    handle: TimerHandle,
    kind: K,
    interval: u64,
    next_due: u64,
}

/// A set of repeating timers over a shared virtual clock
#[derive(Debug, Clone)]
pub struct Timers<K> {
    now: u64,
    timers: Vec<Timer<K>>,
    next_id: u32,
}

impl<K: Copy> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> Timers<K> {
    pub fn new() -> Self {
        Self {
            now: 0,
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire `kind` every `interval` ms, first after `first_in` ms
    ///
    /// A zero interval is treated as 1 ms so a timer can never stall the clock.
    pub fn every(&mut self, kind: K, interval: u64, first_in: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            kind,
            interval: interval.max(1),
            next_due: self.now + first_in,
        });
        handle
    }

    /// Stop a timer. Returns false if it was already gone.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the earliest firing due at or before `until`
    ///
    /// Moves the clock to the firing time and reschedules the timer.
    pub fn next_due(&mut self, until: u64) -> Option<(u64, K)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.next_due <= until)
            .min_by_key(|t| (t.next_due, t.handle))?;

        let due = timer.next_due;
        timer.next_due += timer.interval;
        self.now = self.now.max(due);
        Some((due, timer.kind))
    }

    /// Move the clock forward once every firing up to `until` has been drained
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        A,
        B,
    }

    fn drain(timers: &mut Timers<Kind>, until: u64) -> Vec<(u64, Kind)> {
        let mut fired = Vec::new();
        while let Some(firing) = timers.next_due(until) {
            fired.push(firing);
        }
        timers.advance_to(until);
        fired
    }

    #[test]
    fn test_fires_in_time_then_registration_order() {
        let mut timers = Timers::new();
        timers.every(Kind::A, 20, 0);
        timers.every(Kind::B, 10, 10);

        let fired = drain(&mut timers, 40);
        assert_eq!(
            fired,
            vec![
                (0, Kind::A),
                (10, Kind::B),
                (20, Kind::A),
                (20, Kind::B),
                (30, Kind::B),
                (40, Kind::A),
                (40, Kind::B),
            ]
        );
        assert_eq!(timers.now(), 40);
    }

    #[test]
    fn test_interval_count() {
        let mut timers = Timers::new();
        timers.every(Kind::A, 50, 50);
        let fired = drain(&mut timers, 2000);
        assert_eq!(fired.len(), 40);
        // Partial steps accumulate
        assert!(drain(&mut timers, 2049).is_empty());
        assert_eq!(drain(&mut timers, 2050), vec![(2050, Kind::A)]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let a = timers.every(Kind::A, 10, 10);
        timers.every(Kind::B, 10, 10);

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        assert!(!timers.is_active(a));
        assert!(drain(&mut timers, 30).iter().all(|(_, k)| *k == Kind::B));
    }

    #[test]
    fn test_registration_is_relative_to_now() {
        let mut timers = Timers::new();
        timers.advance_to(1000);
        timers.every(Kind::A, 100, 0);
        assert_eq!(drain(&mut timers, 1100), vec![(1000, Kind::A), (1100, Kind::A)]);
    }
}
