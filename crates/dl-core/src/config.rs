//! Design constants for a draw session, overridable by the host.

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, DrawResult};

/// Longest duration any timing field may hold: one hour of milliseconds.
pub const MAX_DURATION: u64 = 3_600_000;

/// Configuration for a draw session.
///
/// Durations are in abstract time units; both hosts treat them as
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// RNG seed for reproducible draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Interval between two power increments while charging.
    pub tick_interval: u64,
    /// Power added per charge tick.
    pub power_step: u32,
    /// Power ceiling; reaching it ends the charge on its own.
    pub max_power: u32,
    /// Minimum power for a spin. A released charge must exceed it.
    pub min_spin_power: u32,
    /// Shortest jar animation.
    pub jar_duration_min: u64,
    /// Longest jar animation (inclusive).
    pub jar_duration_max: u64,
    /// Fixed wheel animation length.
    pub spin_duration: u64,
    /// Full revolutions every spin makes regardless of power.
    pub base_rounds: u32,
    /// Power needed for each extra revolution.
    pub power_per_round: u32,
    /// Options required before any draw is allowed.
    pub min_options: usize,
    /// Label length enforced at the input boundary.
    pub max_label_chars: usize,
    /// Event log capacity (0 = unlimited).
    pub max_events: usize,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval: 30,
            power_step: 2,
            max_power: 100,
            min_spin_power: 10,
            jar_duration_min: 5000,
            jar_duration_max: 10000,
            spin_duration: 4000,
            base_rounds: 5,
            power_per_round: 20,
            min_options: 2,
            max_label_chars: 15,
            max_events: 256,
        }
    }
}

impl DrawConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> DrawResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DrawError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a usable session.
    pub fn validate(&self) -> DrawResult<()> {
        let fail = |msg: &str| Err(DrawError::InvalidConfig(msg.to_string()));
        if self.tick_interval == 0 {
            return fail("tick_interval must be positive");
        }
        if self.tick_interval > MAX_DURATION
            || self.jar_duration_max > MAX_DURATION
            || self.spin_duration > MAX_DURATION
        {
            return fail("durations must not exceed one hour (3600000)");
        }
        if self.power_step == 0 {
            return fail("power_step must be positive");
        }
        if self.max_power == 0 || self.max_power > 100 {
            return fail("max_power must be within 1..=100");
        }
        if self.min_spin_power >= self.max_power {
            return fail("min_spin_power must be below max_power");
        }
        if self.jar_duration_min > self.jar_duration_max {
            return fail("jar_duration_min exceeds jar_duration_max");
        }
        if self.base_rounds == 0 {
            return fail("base_rounds must be at least 1");
        }
        if self.power_per_round == 0 {
            return fail("power_per_round must be positive");
        }
        if self.min_options < 2 {
            return fail("min_options must be at least 2");
        }
        if self.max_label_chars == 0 {
            return fail("max_label_chars must be positive");
        }
        Ok(())
    }

    /// Set the RNG seed for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the charge tick interval and the power gained per tick.
    pub fn with_charge_rate(mut self, tick_interval: u64, power_step: u32) -> Self {
        self.tick_interval = tick_interval;
        self.power_step = power_step;
        self
    }

    /// Set the jar animation range.
    pub fn with_jar_duration(mut self, min: u64, max: u64) -> Self {
        self.jar_duration_min = min;
        self.jar_duration_max = max;
        self
    }

    /// Set the wheel animation length.
    pub fn with_spin_duration(mut self, duration: u64) -> Self {
        self.spin_duration = duration;
        self
    }

    /// Set the minimum spin power.
    pub fn with_min_spin_power(mut self, power: u32) -> Self {
        self.min_spin_power = power;
        self
    }

    /// Set the event log capacity (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}
