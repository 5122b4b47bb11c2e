//! Power accumulation for the press-and-hold gesture in wheel mode.
//!
//! The controller is a plain state machine; the session owns the periodic
//! task that calls [`ChargeController::tick`].

use serde::{Deserialize, Serialize};

/// Where the controller is in a charge cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Power is accumulating on every tick.
    Charging,
    /// Power hit the ceiling; waiting for the release gesture.
    Released,
}

/// Result of one charge tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Power grew to the contained value.
    Advanced(u32),
    /// Power reached the ceiling and charging stopped on its own.
    Saturated(u32),
    /// The controller was not charging.
    Ignored,
}

/// Result of the release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Power exceeded the threshold: spin with this power.
    Commit(u32),
    /// Power was too low; no spin.
    Discard(u32),
    /// There was no charge to release.
    Ignored,
}

/// Power accumulation state machine.
#[derive(Debug, Clone)]
pub struct ChargeController {
    phase: ChargePhase,
    power: u32,
    step: u32,
    max: u32,
}

impl ChargeController {
    /// Create an idle controller gaining `step` per tick up to `max`.
    pub fn new(step: u32, max: u32) -> Self {
        Self {
            phase: ChargePhase::Idle,
            power: 0,
            step,
            max,
        }
    }

    /// Begin charging from zero. Returns `false` unless the controller was idle.
    pub fn start(&mut self) -> bool {
        if self.phase != ChargePhase::Idle {
            return false;
        }
        self.phase = ChargePhase::Charging;
        self.power = 0;
        true
    }

    /// Apply one periodic increment, clamped to the ceiling.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != ChargePhase::Charging {
            return TickOutcome::Ignored;
        }
        self.power = (self.power + self.step).min(self.max);
        if self.power >= self.max {
            self.phase = ChargePhase::Released;
            TickOutcome::Saturated(self.power)
        } else {
            TickOutcome::Advanced(self.power)
        }
    }

    /// Finish the gesture and return to idle.
    ///
    /// Commits when the accumulated power is strictly above `threshold`. The
    /// power value is left in place either way; the session clears it once
    /// the spin resolves.
    pub fn end(&mut self, threshold: u32) -> Release {
        if self.phase == ChargePhase::Idle {
            return Release::Ignored;
        }
        self.phase = ChargePhase::Idle;
        if self.power > threshold {
            Release::Commit(self.power)
        } else {
            Release::Discard(self.power)
        }
    }

    /// Drop any charge in progress and zero the power.
    pub fn reset(&mut self) {
        self.phase = ChargePhase::Idle;
        self.power = 0;
    }

    /// Zero the power without touching the phase.
    pub fn clear_power(&mut self) {
        self.power = 0;
    }

    /// Current phase.
    pub fn phase(&self) -> ChargePhase {
        self.phase
    }

    /// Current power, `0..=max`.
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Whether power is actively accumulating.
    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_power() {
        let mut c = ChargeController::new(2, 100);
        assert!(c.start());
        c.tick();
        c.tick();
        assert_eq!(c.power(), 4);
        c.end(10);
        assert!(c.start());
        assert_eq!(c.power(), 0);
    }

    #[test]
    fn double_start_is_rejected() {
        let mut c = ChargeController::new(2, 100);
        assert!(c.start());
        c.tick();
        assert!(!c.start());
        assert_eq!(c.power(), 2);
    }

    #[test]
    fn tick_while_idle_is_ignored() {
        let mut c = ChargeController::new(2, 100);
        assert_eq!(c.tick(), TickOutcome::Ignored);
        assert_eq!(c.power(), 0);
    }

    #[test]
    fn saturates_at_max() {
        let mut c = ChargeController::new(2, 100);
        c.start();
        for _ in 0..49 {
            assert!(matches!(c.tick(), TickOutcome::Advanced(_)));
        }
        assert_eq!(c.tick(), TickOutcome::Saturated(100));
        assert_eq!(c.phase(), ChargePhase::Released);
        assert!(!c.is_charging());
        assert_eq!(c.tick(), TickOutcome::Ignored);
        assert_eq!(c.power(), 100);
    }

    #[test]
    fn uneven_step_is_clamped() {
        let mut c = ChargeController::new(30, 100);
        c.start();
        c.tick();
        c.tick();
        c.tick();
        assert_eq!(c.tick(), TickOutcome::Saturated(100));
    }

    #[test]
    fn end_commits_above_threshold() {
        let mut c = ChargeController::new(2, 100);
        c.start();
        for _ in 0..6 {
            c.tick();
        }
        assert_eq!(c.end(10), Release::Commit(12));
        assert_eq!(c.phase(), ChargePhase::Idle);
    }

    #[test]
    fn end_at_threshold_discards() {
        let mut c = ChargeController::new(2, 100);
        c.start();
        for _ in 0..5 {
            c.tick();
        }
        assert_eq!(c.end(10), Release::Discard(10));
    }

    #[test]
    fn end_after_saturation_commits() {
        let mut c = ChargeController::new(50, 100);
        c.start();
        c.tick();
        c.tick();
        assert_eq!(c.end(10), Release::Commit(100));
    }

    #[test]
    fn end_while_idle_is_noop() {
        let mut c = ChargeController::new(2, 100);
        assert_eq!(c.end(10), Release::Ignored);
    }

    #[test]
    fn power_is_monotonic_while_charging() {
        let mut c = ChargeController::new(3, 100);
        c.start();
        let mut last = 0;
        while c.is_charging() {
            c.tick();
            assert!(c.power() >= last);
            assert!(c.power() <= 100);
            last = c.power();
        }
        assert_eq!(last, 100);
    }
}
