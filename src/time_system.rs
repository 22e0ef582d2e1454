//! Frame timing and time-normalized speeds.
//!
//! The game loop owns a [`GameClock`] and advances it once per processed
//! frame. Each advance yields a [`FrameTime`] that remembers the cumulative
//! time of the previous processed frame, which is what lets a
//! [`TimeNormalizedSpeed`] notice that it sat out one or more frames.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

// =============================================================================
// FRAME TIME
// =============================================================================

/// Timing of a single processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time elapsed since the previous processed frame
    pub elapsed: Duration,
    /// Cumulative session time at this frame
    pub total: Duration,
    /// Cumulative session time of the previous processed frame
    pub previous_total: Duration,
}

impl FrameTime {
    pub fn new(elapsed: Duration, total: Duration, previous_total: Duration) -> Self {
        Self {
            elapsed,
            total,
            previous_total,
        }
    }
}

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Session clock advanced once per frame by the game loop.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    total: Duration,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            total: Duration::ZERO,
        }
    }

    /// Advance the clock by one frame and describe that frame.
    pub fn advance(&mut self, elapsed: Duration) -> FrameTime {
        let previous_total = self.total;
        self.total += elapsed;
        FrameTime {
            elapsed,
            total: self.total,
            previous_total,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }
}

// =============================================================================
// TIME UNITS
// =============================================================================

/// Unit a speed's rate is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// 100 nanoseconds
    Ticks,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    /// Any unit name not listed above; always produces zero movement
    #[serde(other)]
    Unknown,
}

impl TimeUnit {
    /// How many of this unit fit in `duration`.
    pub fn count(self, duration: Duration) -> f64 {
        match self {
            TimeUnit::Ticks => (duration.as_nanos() / NANOS_PER_TICK) as f64,
            TimeUnit::Milliseconds => duration.as_secs_f64() * 1_000.0,
            TimeUnit::Seconds => duration.as_secs_f64(),
            TimeUnit::Minutes => duration.as_secs_f64() / 60.0,
            TimeUnit::Hours => duration.as_secs_f64() / 3_600.0,
            TimeUnit::Days => duration.as_secs_f64() / 86_400.0,
            TimeUnit::Unknown => 0.0,
        }
    }
}

// =============================================================================
// TIME-NORMALIZED SPEED
// =============================================================================

/// A distance-per-time rate converted into per-frame displacement.
///
/// A speed that was not evaluated on the immediately preceding frame
/// returns zero for one frame instead of integrating the stale gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeNormalizedSpeed {
    /// Distance covered per `unit` of time
    pub rate: f32,
    pub unit: TimeUnit,
    #[serde(skip)]
    last_evaluated: Duration,
}

impl TimeNormalizedSpeed {
    pub fn new(rate: f32, unit: TimeUnit) -> Self {
        Self {
            rate,
            unit,
            last_evaluated: Duration::ZERO,
        }
    }

    pub fn per_second(rate: f32) -> Self {
        Self::new(rate, TimeUnit::Seconds)
    }

    /// Cumulative time at which this speed was last evaluated.
    pub fn last_evaluated(&self) -> Duration {
        self.last_evaluated
    }

    /// Distance to move during `frame`.
    pub fn movement_amount(&mut self, frame: &FrameTime) -> f32 {
        let stale = self.last_evaluated != frame.previous_total;
        self.last_evaluated = frame.total;
        if stale {
            return 0.0;
        }

        (self.unit.count(frame.elapsed) * f64::from(self.rate)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_clock_chains_previous_total() {
        let mut clock = GameClock::new();
        let first = clock.advance(FRAME);
        let second = clock.advance(FRAME);

        assert_eq!(first.previous_total, Duration::ZERO);
        assert_eq!(first.total, FRAME);
        assert_eq!(second.previous_total, first.total);
        assert_eq!(clock.total(), FRAME * 2);
    }

    #[test]
    fn test_fresh_speed_moves_on_first_session_frame() {
        let mut clock = GameClock::new();
        let mut speed = TimeNormalizedSpeed::per_second(100.0);
        let amount = speed.movement_amount(&clock.advance(Duration::from_millis(500)));
        assert_eq!(amount, 50.0);
    }

    #[test]
    fn test_stale_speed_suppresses_one_frame() {
        // Created mid-session: the first query sees a mismatched previous frame
        let mut speed = TimeNormalizedSpeed::new(1.0, TimeUnit::Ticks);
        let stale = FrameTime::new(FRAME, FRAME * 5, FRAME * 4);
        assert_eq!(speed.movement_amount(&stale), 0.0);
        assert_eq!(speed.last_evaluated(), FRAME * 5);

        let matching = FrameTime::new(FRAME, FRAME * 6, FRAME * 5);
        assert_eq!(speed.movement_amount(&matching), 160_000.0);
    }

    #[test]
    fn test_second_query_in_same_frame_is_zero() {
        let mut clock = GameClock::new();
        let mut speed = TimeNormalizedSpeed::per_second(10.0);
        let frame = clock.advance(Duration::from_secs(1));

        assert_eq!(speed.movement_amount(&frame), 10.0);
        assert_eq!(speed.movement_amount(&frame), 0.0);
    }

    #[test]
    fn test_dormant_speed_resumes_after_one_frame() {
        let mut clock = GameClock::new();
        let mut speed = TimeNormalizedSpeed::per_second(10.0);
        assert_eq!(speed.movement_amount(&clock.advance(Duration::from_secs(1))), 10.0);

        // Skipped frame
        clock.advance(Duration::from_secs(1));

        assert_eq!(speed.movement_amount(&clock.advance(Duration::from_secs(1))), 0.0);
        assert_eq!(speed.movement_amount(&clock.advance(Duration::from_secs(1))), 10.0);
    }

    #[test]
    fn test_units_scale_elapsed_time() {
        let elapsed = Duration::from_secs(90);
        assert_eq!(TimeUnit::Seconds.count(elapsed), 90.0);
        assert_eq!(TimeUnit::Milliseconds.count(elapsed), 90_000.0);
        assert_eq!(TimeUnit::Minutes.count(elapsed), 1.5);
        assert_eq!(TimeUnit::Hours.count(Duration::from_secs(7_200)), 2.0);
        assert_eq!(TimeUnit::Days.count(Duration::from_secs(43_200)), 0.5);
        assert_eq!(TimeUnit::Ticks.count(Duration::from_micros(1)), 10.0);
    }

    #[test]
    fn test_unknown_unit_never_moves() {
        let mut clock = GameClock::new();
        let mut speed = TimeNormalizedSpeed::new(1_000.0, TimeUnit::Unknown);
        assert_eq!(speed.movement_amount(&clock.advance(Duration::from_secs(1))), 0.0);
    }

    #[test]
    fn test_unrecognized_unit_name_deserializes_to_unknown() {
        let speed: TimeNormalizedSpeed =
            serde_json::from_str(r#"{ "rate": 5.0, "unit": "fortnights" }"#).unwrap();
        assert_eq!(speed.unit, TimeUnit::Unknown);

        let speed: TimeNormalizedSpeed =
            serde_json::from_str(r#"{ "rate": 5.0, "unit": "milliseconds" }"#).unwrap();
        assert_eq!(speed.unit, TimeUnit::Milliseconds);
        assert_eq!(speed.last_evaluated(), Duration::ZERO);
    }
}
