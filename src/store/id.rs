//! Time-ordered unique identifiers
//!
//! Version-7 (time-ordered) 128-bit identifiers, rendered as 32
//! lowercase hex characters. The millisecond timestamp occupies the
//! most significant bits, so identifiers sort lexicographically in
//! roughly creation order; a process-wide counter in the rand_a bits
//! keeps allocations within one millisecond strictly increasing.
//!
//! ## Layout
//!
//! ```text
//! ┌────────────────────┬─────┬───────────┬─────┬──────────────────┐
//! │ unix_ts_ms (48)    │ ver │ counter   │ var │ random (62)      │
//! │                    │ (4) │ (12)      │ (2) │                  │
//! └────────────────────┴─────┴───────────┴─────┴──────────────────┘
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::Rng;

/// Counter bits available in the rand_a field
const COUNTER_MAX: u16 = 0x0fff;

/// Process-wide generator state: last timestamp handed out, and the
/// sub-millisecond counter
struct GeneratorState {
    last_millis: u64,
    counter: u16,
}

static GENERATOR: Mutex<GeneratorState> = Mutex::new(GeneratorState {
    last_millis: 0,
    counter: 0,
});

/// A 128-bit time-ordered identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeUuid {
    msb: u64,
    lsb: u64,
}

impl TimeUuid {
    /// Generate a fresh version-7 identifier
    ///
    /// Repeated calls never collide, and identifiers allocated at
    /// increasing times render to lexicographically non-decreasing
    /// strings. If the clock stalls (or steps backwards), the counter
    /// keeps ordering; on counter overflow the timestamp is advanced.
    pub fn time_based_version7() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let (millis, counter) = {
            let mut state = GENERATOR.lock();
            if now > state.last_millis {
                state.last_millis = now;
                state.counter = 0;
            } else if state.counter < COUNTER_MAX {
                state.counter += 1;
            } else {
                state.last_millis += 1;
                state.counter = 0;
            }
            (state.last_millis, state.counter)
        };

        // 48-bit millis | version 7 | 12-bit counter
        let msb = (millis << 16) | 0x7000 | u64::from(counter);
        // variant 0b10 | 62 random bits
        let rand_b: u64 = rand::thread_rng().gen::<u64>() & 0x3fff_ffff_ffff_ffff;
        let lsb = 0x8000_0000_0000_0000 | rand_b;

        Self { msb, lsb }
    }

    /// Render as 32 lowercase hex characters, no separators
    ///
    /// Fixed width, timestamp first: lexicographic order on the result
    /// matches numeric order on the identifier.
    pub fn to_short_string(&self) -> String {
        format!("{:016x}{:016x}", self.msb, self.lsb)
    }

    /// Most significant 64 bits (timestamp, version, counter)
    pub fn msb(&self) -> u64 {
        self.msb
    }

    /// Least significant 64 bits (variant, random)
    pub fn lsb(&self) -> u64 {
        self.lsb
    }
}

impl std::fmt::Display for TimeUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_short_string())
    }
}
