use crate::config::MAX_CATCH_UP_STEPS;

/// Fixed-interval step driver fed by variable frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    accumulator_ms: f64,
    interval_ms: f64,
}

impl SimulationClock {
    /// Creates an empty clock that releases one step per `interval_ms`.
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        debug_assert!(interval_ms.is_finite() && interval_ms > 0.0);

        Self {
            accumulator_ms: 0.0,
            interval_ms,
        }
    }

    /// Adds elapsed frame time. Negative and non-finite deltas count as 0.
    ///
    /// At most [`MAX_CATCH_UP_STEPS`] intervals are held; a stall longer than
    /// that is forgotten rather than replayed.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.accumulator_ms = (self.accumulator_ms + delta_ms).min(self.max_backlog_ms());
        }
    }

    fn max_backlog_ms(&self) -> f64 {
        self.interval_ms * f64::from(MAX_CATCH_UP_STEPS)
    }

    /// Takes one interval out of the accumulator if enough time has built up.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator_ms < self.interval_ms {
            return false;
        }

        self.accumulator_ms -= self.interval_ms;
        true
    }

    /// Drops any accumulated time.
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }

    #[must_use]
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
