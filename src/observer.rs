use log::trace;
use raylib::ease;

use crate::constants::*;

/// Tuning for the velocity-reactive rate program.
#[derive(Debug, Clone, Copy)]
pub struct ObserverConfig {
    /// Base rate factor; its sign follows the sample direction.
    pub factor: f32,
    pub kick_multiplier: f32,
    pub settle_divisor: f32,
    pub kick_duration: f32,
    pub hold_delay: f32,
    pub settle_duration: f32,
    /// Matches the strip's base direction so a flick along the strip's
    /// motion speeds it up rather than fighting it.
    pub reversed: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            factor: SCROLL_FACTOR,
            kick_multiplier: KICK_MULTIPLIER,
            settle_divisor: SETTLE_DIVISOR,
            kick_duration: KICK_DURATION,
            hold_delay: HOLD_DELAY,
            settle_duration: SETTLE_DURATION,
            reversed: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ShaperPhase {
    Kick,
    Hold,
    Settle,
}

/// One rate program: ramp to the kick rate, plateau, then decay to cruise.
struct RateShaper {
    phase: ShaperPhase,
    timer: f32,
    kick: ease::Tween,
    settle: ease::Tween,
    kick_target: f32,
    settle_target: f32,
    kick_duration: f32,
    hold_delay: f32,
    settle_duration: f32,
}

impl RateShaper {
    fn new(from: f32, kick_target: f32, settle_target: f32, config: &ObserverConfig) -> Self {
        Self {
            phase: ShaperPhase::Kick,
            timer: 0.0,
            kick: ease::Tween::new(ease::linear_none, from, kick_target, config.kick_duration),
            settle: ease::Tween::new(
                ease::linear_none,
                kick_target,
                settle_target,
                config.settle_duration,
            ),
            kick_target,
            settle_target,
            kick_duration: config.kick_duration,
            hold_delay: config.hold_delay,
            settle_duration: config.settle_duration,
        }
    }

    fn update(&mut self, dt: f32) -> (f32, bool) {
        let mut rate = match self.phase {
            ShaperPhase::Kick => self.kick.apply(dt),
            ShaperPhase::Hold => self.kick_target,
            ShaperPhase::Settle => self.settle.apply(dt),
        };

        self.timer += dt;
        let expected_duration = match self.phase {
            ShaperPhase::Kick => self.kick_duration,
            ShaperPhase::Hold => self.hold_delay,
            ShaperPhase::Settle => self.settle_duration,
        };

        let mut done = false;
        if self.timer >= expected_duration {
            self.timer = 0.0;
            match self.phase {
                ShaperPhase::Kick => {
                    rate = self.kick_target;
                    self.phase = ShaperPhase::Hold;
                }
                ShaperPhase::Hold => self.phase = ShaperPhase::Settle,
                ShaperPhase::Settle => {
                    rate = self.settle_target;
                    done = true;
                }
            }
        }
        (rate, done)
    }
}

/// Consumes scroll/drag velocity samples and shapes a play rate for the loop.
///
/// There is exactly one rate program slot: a new sample replaces whatever is
/// in flight, starting its kick from the rate the old program last produced.
/// Rapid samples therefore never queue up, and the strip never pops between
/// rates. The observer only shapes rates; it never touches item positions or
/// the current index.
pub struct ScrollObserver {
    config: ObserverConfig,
    shaper: Option<RateShaper>,
    current_rate: f32,
}

impl ScrollObserver {
    pub fn new(config: ObserverConfig) -> Self {
        Self { config, shaper: None, current_rate: 1.0 }
    }

    /// Feeds one velocity sample. Sign convention follows scroll deltas: a
    /// sample against the strip's base direction produces a negative factor
    /// and the strip runs backward until the next sample.
    pub fn on_velocity_sample(&mut self, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }
        let mut factor = self.config.factor;
        if (!self.config.reversed && delta_y < 0.0) || (self.config.reversed && delta_y > 0.0) {
            factor = -factor;
        }
        let kick_target = factor * self.config.kick_multiplier;
        let settle_target = factor / self.config.settle_divisor;
        trace!(
            "rate program: {:.2} -> {:.2} -> {:.2}",
            self.current_rate, kick_target, settle_target
        );
        self.shaper = Some(RateShaper::new(self.current_rate, kick_target, settle_target, &self.config));
    }

    /// Advances the active program by `dt` and returns the rate to apply this
    /// frame, or `None` when no program is in flight (the last settled rate
    /// stays in force on the loop).
    pub fn shape(&mut self, dt: f32) -> Option<f32> {
        let shaper = self.shaper.as_mut()?;
        let (rate, done) = shaper.update(dt);
        self.current_rate = rate;
        if done {
            self.shaper = None;
        }
        Some(rate)
    }

    /// Drops any in-flight program without touching the settled rate.
    pub fn cancel(&mut self) {
        self.shaper = None;
    }

    pub fn is_active(&self) -> bool {
        self.shaper.is_some()
    }
}
