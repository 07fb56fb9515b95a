//! Spring-driven settling of the indicator.
//!
//! The indicator position is expressed in segment units (`0.0` is the first
//! segment, `count - 1` the last), so an animation survives a resize without
//! being restarted: the control simply recomputes geometry from the
//! interpolated position on the next tick.

use std::time::Duration;

use crate::style::{SegmentedSwitchDefaults, SwitchStyle};

/// Envelope decay reached by the spring at the end of its duration
/// (`ln(1000)`, i.e. 0.1% of the initial displacement).
const SETTLE_DECAY: f32 = 6.907_755;
const MIN_DAMPING_RATIO: f32 = 0.05;

/// Damped-spring easing normalised to a fixed duration.
///
/// [`SpringCurve::progress`] maps elapsed time to a fraction of the travelled
/// distance. Underdamped springs (`damping_ratio < 1`) overshoot and ring;
/// ratios of `1` and above use the critically damped form. Progress is exactly
/// `1.0` once `duration` has elapsed, which is the logical completion of the
/// settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringCurve {
    /// Total settle time.
    pub duration: Duration,
    /// Damping ratio of the spring.
    pub damping_ratio: f32,
    /// Initial velocity in distances per second (`1.0` covers the whole
    /// travel in one second).
    pub initial_velocity: f32,
}

impl Default for SpringCurve {
    fn default() -> Self {
        Self {
            duration: SegmentedSwitchDefaults::ANIMATION_DURATION,
            damping_ratio: SegmentedSwitchDefaults::ANIMATION_DAMPING,
            initial_velocity: SegmentedSwitchDefaults::ANIMATION_VELOCITY,
        }
    }
}

impl SpringCurve {
    /// Builds the curve described by a style's animation fields.
    pub fn from_style(style: &SwitchStyle) -> Self {
        Self {
            duration: style.animation_duration,
            damping_ratio: style.animation_damping,
            initial_velocity: style.animation_velocity,
        }
    }

    /// Fraction of the distance covered after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let total = self.duration.as_secs_f32();
        let t = elapsed.as_secs_f32();
        if total <= 0.0 || t >= total {
            return 1.0;
        }

        let zeta = if self.damping_ratio.is_finite() {
            self.damping_ratio.max(MIN_DAMPING_RATIO)
        } else {
            1.0
        };
        let v0 = if self.initial_velocity.is_finite() {
            self.initial_velocity
        } else {
            0.0
        };

        let displacement = if zeta < 1.0 {
            let omega0 = SETTLE_DECAY / (zeta * total);
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega0 * t).exp();
            let sine_coeff = (zeta * omega0 - v0) / omega_d;
            decay * ((omega_d * t).cos() + sine_coeff * (omega_d * t).sin())
        } else {
            let omega0 = SETTLE_DECAY / total;
            (-omega0 * t).exp() * (1.0 + (omega0 - v0) * t)
        };
        1.0 - displacement
    }

    /// Returns `true` once `elapsed` reaches the curve's duration.
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// One interpolated animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Indicator position in segment units.
    pub position: f32,
    /// Segment the animation is heading to.
    pub target: usize,
    /// `true` on the tick that reaches the target.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveSettle {
    from: f32,
    target: usize,
    elapsed: Duration,
    position: f32,
}

/// Drives the indicator from an arbitrary position to a segment's resting
/// position.
///
/// The animator only interpolates; the owner applies each
/// [`AnimationFrame`] to the geometry and reports completion to the selection
/// state machine.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    curve: SpringCurve,
    active: Option<ActiveSettle>,
}

impl Animator {
    /// Creates an idle animator using `curve`.
    pub fn new(curve: SpringCurve) -> Self {
        Self {
            curve,
            active: None,
        }
    }

    /// Replaces the curve. A running settle keeps its elapsed time and
    /// continues on the new curve.
    pub fn set_curve(&mut self, curve: SpringCurve) {
        self.curve = curve;
    }

    /// Starts a settle from `from` toward `target`.
    ///
    /// Any running settle is superseded: the new one starts from `from`,
    /// which callers pass as the indicator's current live position.
    pub fn start(&mut self, from: f32, target: usize) {
        self.active = Some(ActiveSettle {
            from,
            target,
            elapsed: Duration::ZERO,
            position: from,
        });
    }

    /// Advances the running settle by `dt`.
    ///
    /// Returns `None` when nothing is animating. The returned frame has
    /// `finished == true` exactly once, after which the animator is idle.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationFrame> {
        let curve = self.curve;
        let settle = self.active.as_mut()?;
        settle.elapsed = settle.elapsed.saturating_add(dt);

        let target = settle.target as f32;
        let finished = curve.is_complete(settle.elapsed);
        settle.position = if finished {
            target
        } else {
            settle.from + (target - settle.from) * curve.progress(settle.elapsed)
        };

        let frame = AnimationFrame {
            position: settle.position,
            target: settle.target,
            finished,
        };
        if finished {
            self.active = None;
        }
        Some(frame)
    }

    /// Current interpolated position, if a settle is running.
    pub fn position(&self) -> Option<f32> {
        self.active.map(|settle| settle.position)
    }

    /// Target of the running settle.
    pub fn target(&self) -> Option<usize> {
        self.active.map(|settle| settle.target)
    }

    /// Stops the running settle without reaching its target. Returns the
    /// abandoned target.
    pub fn cancel(&mut self) -> Option<usize> {
        self.active.take().map(|settle| settle.target)
    }

    /// Whether a settle is in flight.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}
