//! Rotation targets for the wheel.
//!
//! Segment `i` spans `[i * seg, (i + 1) * seg)` degrees clockwise from the
//! pointer at the top of the wheel when the wheel is at rest at 0 degrees.
//! Rotating the wheel by `a` degrees moves the segment centred at `c` under
//! the pointer exactly when `a = 360 - c (mod 360)`.

use serde::{Deserialize, Serialize};

use crate::config::DrawConfig;
use crate::error::{DrawError, DrawResult};

/// A computed spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    /// Angular width of one segment.
    pub segment_angle: f64,
    /// Full revolutions before settling.
    pub extra_rounds: u32,
    /// Absolute angle the wheel must reach.
    pub target: f64,
    /// `target mod 360`, the resting angle carried into the next spin.
    pub baseline: f64,
}

/// Computes rotation targets from power and the selected segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPlanner {
    base_rounds: u32,
    power_per_round: u32,
}

impl Default for RotationPlanner {
    fn default() -> Self {
        Self::new(5, 20)
    }
}

impl RotationPlanner {
    /// Create a planner making `base_rounds` revolutions plus one more per
    /// `power_per_round` of power.
    pub fn new(base_rounds: u32, power_per_round: u32) -> Self {
        Self {
            base_rounds: base_rounds.max(1),
            power_per_round: power_per_round.max(1),
        }
    }

    /// Build a planner from session configuration.
    pub fn from_config(config: &DrawConfig) -> Self {
        Self::new(config.base_rounds, config.power_per_round)
    }

    /// Number of revolutions a spin with `power` makes.
    pub fn extra_rounds(&self, power: u32) -> u32 {
        self.base_rounds + power.min(100) / self.power_per_round
    }

    /// Plan a spin that stops with segment `index` of `n` under the pointer.
    ///
    /// `last_rotation` is the resting angle left by the previous spin. The
    /// remainder past the full revolutions is measured from that resting
    /// angle, so the pointer lands on the segment centre for any baseline.
    pub fn plan(
        &self,
        n: usize,
        index: usize,
        power: u32,
        last_rotation: f64,
    ) -> DrawResult<RotationPlan> {
        if n < 2 {
            return Err(DrawError::InvalidArgument(format!(
                "a wheel needs at least 2 segments, got {n}"
            )));
        }
        if index >= n {
            return Err(DrawError::InvalidArgument(format!(
                "segment {index} does not exist on a wheel of {n}"
            )));
        }

        let segment_angle = 360.0 / n as f64;
        let extra_rounds = self.extra_rounds(power);
        let centre = index as f64 * segment_angle + segment_angle / 2.0;
        let remainder = ((360.0 - centre) - last_rotation).rem_euclid(360.0);
        let target = last_rotation + 360.0 * f64::from(extra_rounds) + remainder;

        Ok(RotationPlan {
            segment_angle,
            extra_rounds,
            target,
            baseline: target.rem_euclid(360.0),
        })
    }
}

/// Index of the segment under the pointer when the wheel sits at `angle`.
pub fn segment_at(angle: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let segment_angle = 360.0 / n as f64;
    let under = (360.0 - angle.rem_euclid(360.0)).rem_euclid(360.0);
    ((under / segment_angle).floor() as usize).min(n - 1)
}

/// Ease-out progress of a spin, `0.0..=1.0`, after `elapsed` of `duration`.
pub fn spin_progress(elapsed: u64, duration: u64) -> f64 {
    if duration == 0 || elapsed >= duration {
        return 1.0;
    }
    let t = elapsed as f64 / duration as f64;
    1.0 - (1.0 - t).powi(3)
}

/// Angle to display at `progress` of the way from `start` to `target`.
pub fn displayed_angle(start: f64, target: f64, progress: f64) -> f64 {
    start + (target - start) * progress.clamp(0.0, 1.0)
}

/// Display colour of a wheel segment; cycles through seven hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentColor {
    /// First hue.
    Red,
    /// Second hue.
    Orange,
    /// Third hue.
    Yellow,
    /// Fourth hue.
    Green,
    /// Fifth hue.
    Cyan,
    /// Sixth hue.
    Blue,
    /// Seventh hue.
    Purple,
}

/// Colour for segment `index`.
pub fn segment_color(index: usize) -> SegmentColor {
    const CYCLE: [SegmentColor; 7] = [
        SegmentColor::Red,
        SegmentColor::Orange,
        SegmentColor::Yellow,
        SegmentColor::Green,
        SegmentColor::Cyan,
        SegmentColor::Blue,
        SegmentColor::Purple,
    ];
    CYCLE[index % CYCLE.len()]
}
