// src/core/pace.rs
//
// Minimum spacing between remote calls. Only sleeps for whatever is left of
// the interval since the previous call, so slow page loads are not padded.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Pacer {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last: None }
    }

    /// No spacing at all (tests, local fixtures).
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Time still to wait before the next call is allowed.
    pub fn remaining(&self) -> Duration {
        match self.last {
            Some(last) => self.min_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Block until the next call is allowed, then mark it as made.
    pub fn wait(&mut self) {
        let left = self.remaining();
        if !left.is_zero() {
            thread::sleep(left);
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_is_free() {
        let p = Pacer::new(Duration::from_secs(60));
        assert_eq!(p.remaining(), Duration::ZERO);
    }

    #[test]
    fn disabled_never_waits() {
        let mut p = Pacer::disabled();
        let t0 = Instant::now();
        for _ in 0..100 {
            p.wait();
        }
        assert!(t0.elapsed() < Duration::from_millis(500));
        assert_eq!(p.remaining(), Duration::ZERO);
    }

    #[test]
    fn spacing_is_enforced() {
        let mut p = Pacer::new(Duration::from_millis(30));
        let t0 = Instant::now();
        p.wait();
        p.wait();
        p.wait();
        assert!(t0.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn remaining_bounded_by_interval() {
        let mut p = Pacer::new(Duration::from_secs(5));
        p.wait();
        let left = p.remaining();
        assert!(left <= Duration::from_secs(5));
        assert!(left > Duration::from_secs(4));
    }
}
