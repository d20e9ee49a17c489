//! Manually driven millisecond stopwatch
//!
//! Start/stop/pause accumulate running intervals. A mark is an elapsed-time
//! deadline that can be polled with `has_reached_mark`. Every operation takes
//! the current clock reading so the same `now` can be shared by all consumers
//! within one frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Millis;

/// Precondition failures reported by a stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StopwatchError {
    #[error("stopwatch mark not set")]
    MarkNotSet,
}

/// Elapsed-time counter with pause and mark support
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stopwatch {
    is_ticking: bool,
    is_paused: bool,
    will_unpause_on_resume: bool,
    /// Clock reading when the current running interval began
    start_time: Millis,
    /// Time accumulated by finished running intervals
    elapsed_time: Millis,
    /// Manual bias added to the running interval
    increased_time: Millis,
    /// Manual bias subtracted from the running interval
    decreased_time: Millis,
    mark: Option<Millis>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            is_ticking: false,
            is_paused: false,
            will_unpause_on_resume: true,
            start_time: 0,
            elapsed_time: 0,
            increased_time: 0,
            decreased_time: 0,
            mark: None,
        }
    }

    /// Begin counting. Has no effect while already running.
    pub fn start(&mut self, now: Millis) {
        if !self.is_ticking {
            self.is_ticking = true;
            self.start_time = now;
        }
    }

    /// Fold the running interval into the accumulated time and stop.
    pub fn stop(&mut self, now: Millis) {
        if self.is_ticking {
            self.is_ticking = false;
            let stop_time = now + self.increased_time - self.decreased_time;
            self.elapsed_time += stop_time - self.start_time;
            // Adjustments are now part of elapsed_time
            self.increased_time = 0;
            self.decreased_time = 0;
            self.start_time = 0;
        }
    }

    /// Stop and remember that the stop was a pause
    pub fn pause(&mut self, now: Millis, will_resume: bool) {
        if self.is_ticking {
            self.stop(now);
            self.is_paused = true;
            self.will_unpause_on_resume = will_resume;
        }
    }

    /// Resume counting if the stopwatch was paused
    pub fn unpause(&mut self, now: Millis) {
        if self.is_paused {
            self.start(now);
        }
        self.is_paused = false;
        self.will_unpause_on_resume = true;
    }

    /// Whether a paused stopwatch should resume when the app returns to foreground
    pub fn will_unpause_on_resume(&self) -> bool {
        self.will_unpause_on_resume
    }

    pub fn is_running(&self) -> bool {
        self.is_ticking
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Clock reading at which the current running interval began
    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    /// Total elapsed milliseconds, including the running interval
    pub fn elapsed(&self, now: Millis) -> Millis {
        if self.is_ticking {
            (now - self.start_time) + self.increased_time - self.decreased_time + self.elapsed_time
        } else {
            self.elapsed_time
        }
    }

    /// Total elapsed whole seconds
    pub fn elapsed_seconds(&self, now: Millis) -> Millis {
        self.elapsed(now).div_euclid(1000)
    }

    /// Zero all counters, clear the mark and stop
    pub fn reset(&mut self, now: Millis) {
        self.start_time = now;
        self.elapsed_time = 0;
        self.increased_time = 0;
        self.decreased_time = 0;
        self.is_ticking = false;
        self.is_paused = false;
        self.will_unpause_on_resume = true;
        self.mark = None;
    }

    /// Zero all counters and keep running from `now`
    pub fn restart(&mut self, now: Millis) {
        self.reset(now);
        self.is_ticking = true;
    }

    pub fn increase_elapsed(&mut self, ms: Millis) {
        self.increased_time += ms;
    }

    pub fn decrease_elapsed(&mut self, ms: Millis) {
        self.decreased_time += ms;
    }

    /// Set a deadline `offset` ms past the current elapsed time (now if `offset <= 0`)
    pub fn set_mark(&mut self, now: Millis, offset: Millis) {
        let elapsed = self.elapsed(now);
        self.mark = Some(if offset <= 0 { elapsed } else { elapsed + offset });
    }

    /// Current mark, if any
    pub fn mark(&self) -> Option<Millis> {
        self.mark
    }

    pub fn is_mark_set(&self) -> bool {
        self.mark.is_some()
    }

    /// Whether elapsed time has reached the mark (inclusive)
    pub fn has_reached_mark(&self, now: Millis) -> Result<bool, StopwatchError> {
        let mark = self.mark.ok_or(StopwatchError::MarkNotSet)?;
        Ok(self.elapsed(now) >= mark)
    }

    /// Push the mark further out. No effect without a mark.
    pub fn add_time_to_mark(&mut self, ms: Millis) {
        if let Some(mark) = self.mark.as_mut() {
            *mark += ms;
        }
    }

    pub fn reset_mark(&mut self) {
        self.mark = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_matches_new() {
        let sw = Stopwatch::default();
        assert!(sw.will_unpause_on_resume());
        assert!(!sw.is_running());
        assert!(!sw.is_paused());
        assert_eq!(sw.mark(), None);
        assert_eq!(sw.elapsed(1000), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut sw = Stopwatch::new();
        sw.start(100);
        sw.start(300);
        assert_eq!(sw.start_time(), 100);
        assert_eq!(sw.elapsed(400), 300);

        sw.stop(500);
        sw.stop(900);
        assert_eq!(sw.elapsed(2000), 400);
        assert!(!sw.is_running());
    }

    #[test]
    fn test_reset_zeroes_and_clears_mark() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.set_mark(100, 50);
        sw.increase_elapsed(30);
        sw.reset(250);

        assert_eq!(sw.elapsed(250), 0);
        assert_eq!(sw.elapsed(900), 0);
        assert!(!sw.is_mark_set());
        assert!(!sw.is_running());
        assert!(!sw.is_paused());
    }

    #[test]
    fn test_restart_keeps_running_from_zero() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.stop(700);
        sw.restart(1000);

        assert!(sw.is_running());
        assert_eq!(sw.elapsed(1000), 0);
        assert_eq!(sw.elapsed(1040), 40);
    }

    #[test]
    fn test_pause_excludes_paused_interval() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.pause(300, false);
        assert!(sw.is_paused());
        assert!(!sw.will_unpause_on_resume());
        assert_eq!(sw.elapsed(5000), 300);

        sw.unpause(5000);
        assert!(!sw.is_paused());
        assert!(sw.will_unpause_on_resume());
        assert_eq!(sw.elapsed(5200), 500);
    }

    #[test]
    fn test_pause_requires_running() {
        let mut sw = Stopwatch::new();
        sw.pause(10, false);
        assert!(!sw.is_paused());

        // Unpause of a never-paused stopwatch does not start it
        sw.unpause(20);
        assert!(!sw.is_running());
    }

    #[test]
    fn test_mark_boundary_is_inclusive() {
        let mut sw = Stopwatch::new();
        sw.start(1000);
        sw.set_mark(1000, 500);

        assert_eq!(sw.has_reached_mark(1499), Ok(false));
        assert_eq!(sw.has_reached_mark(1500), Ok(true));
        assert_eq!(sw.has_reached_mark(1501), Ok(true));
    }

    #[test]
    fn test_unset_mark_is_an_error() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        assert_eq!(sw.has_reached_mark(10), Err(StopwatchError::MarkNotSet));

        sw.set_mark(10, 0);
        sw.reset_mark();
        assert_eq!(sw.has_reached_mark(20), Err(StopwatchError::MarkNotSet));
    }

    #[test]
    fn test_non_positive_mark_offset_marks_now() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.set_mark(250, -1);
        assert_eq!(sw.mark(), Some(250));
        assert_eq!(sw.has_reached_mark(250), Ok(true));
    }

    #[test]
    fn test_add_time_to_mark() {
        let mut sw = Stopwatch::new();
        sw.add_time_to_mark(100);
        assert_eq!(sw.mark(), None);

        sw.start(0);
        sw.set_mark(0, 200);
        sw.add_time_to_mark(100);
        assert_eq!(sw.mark(), Some(300));
        assert_eq!(sw.has_reached_mark(299), Ok(false));
        assert_eq!(sw.has_reached_mark(300), Ok(true));
    }

    #[test]
    fn test_adjustments_bias_reads() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.increase_elapsed(200);
        sw.decrease_elapsed(50);
        assert_eq!(sw.elapsed(100), 250);

        sw.stop(100);
        assert_eq!(sw.elapsed(100), 250);

        // Bias is folded in once, not counted again on the next interval
        sw.start(1000);
        assert_eq!(sw.elapsed(1100), 350);
    }

    #[test]
    fn test_elapsed_seconds_uses_total() {
        let mut sw = Stopwatch::new();
        sw.start(0);
        sw.stop(1500);
        sw.start(2000);

        // 1500 stopped + 700 running = 2200 ms
        assert_eq!(sw.elapsed_seconds(2700), 2);
        sw.stop(2700);
        assert_eq!(sw.elapsed_seconds(9999), 2);
        assert_eq!(sw.elapsed(9999), 2200);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start,
        Stop,
        Wait(Millis),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Start),
            Just(Op::Stop),
            (0i64..2000).prop_map(Op::Wait),
        ]
    }

    proptest! {
        #[test]
        fn prop_stopped_elapsed_is_sum_of_intervals(ops in prop::collection::vec(op(), 0..64)) {
            let mut sw = Stopwatch::new();
            let mut now: Millis = 0;
            let mut running_since: Option<Millis> = None;
            let mut expected: Millis = 0;

            for op in ops {
                match op {
                    Op::Start => {
                        sw.start(now);
                        if running_since.is_none() {
                            running_since = Some(now);
                        }
                    }
                    Op::Stop => {
                        sw.stop(now);
                        if let Some(since) = running_since.take() {
                            expected += now - since;
                        }
                    }
                    Op::Wait(ms) => now += ms,
                }
            }
            sw.stop(now);
            if let Some(since) = running_since.take() {
                expected += now - since;
            }

            prop_assert_eq!(sw.elapsed(now), expected);
            prop_assert_eq!(sw.elapsed(now + 12345), expected);
        }

        #[test]
        fn prop_elapsed_never_decreases_while_ticking(steps in prop::collection::vec(0i64..500, 1..32)) {
            let mut sw = Stopwatch::new();
            sw.start(0);
            let mut now = 0;
            let mut last = sw.elapsed(now);
            for step in steps {
                now += step;
                let current = sw.elapsed(now);
                prop_assert!(current >= last);
                last = current;
            }
        }
    }
}
