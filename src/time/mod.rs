//! Time keeping
//!
//! Everything here is driven by explicit millisecond readings:
//! - `Clock` supplies unscaled monotonic time once per callback
//! - `Stopwatch` accumulates elapsed time from those readings
//! - No stopwatch ever reads a clock on its own

pub mod clock;
pub mod stopwatch;

pub use clock::{Clock, ManualClock, SystemClock};
pub use stopwatch::{Stopwatch, StopwatchError};

/// Milliseconds since the clock origin
pub type Millis = i64;
