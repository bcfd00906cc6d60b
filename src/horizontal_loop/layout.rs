use std::fmt;

use log::debug;

use crate::constants::*;
use crate::item::ItemMeasure;
use crate::{Error, Result};

/// Rounding applied to every authored percent value, to keep endpoints off
/// sub-pixel boundaries. The default rounds to the nearest whole percent;
/// hosts with discrete card widths can supply their own grid function.
pub enum Snap {
    Increment(f32),
    Custom(Box<dyn Fn(f32) -> f32>),
}

impl Snap {
    pub fn apply(&self, value: f32) -> f32 {
        match self {
            Snap::Increment(step) if *step > 0.0 => (value / step).round() * step,
            Snap::Increment(_) => value,
            Snap::Custom(f) => f(value),
        }
    }
}

impl Default for Snap {
    fn default() -> Self {
        Snap::Increment(DEFAULT_SNAP_INCREMENT)
    }
}

impl fmt::Debug for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snap::Increment(step) => write!(f, "Snap::Increment({step})"),
            Snap::Custom(_) => write!(f, "Snap::Custom(..)"),
        }
    }
}

/// Build options for a horizontal loop.
#[derive(Debug)]
pub struct LoopConfig {
    /// Strip speed at play rate 1.0, in pixels per second.
    pub speed_px_per_sec: f32,
    /// Extra distance after the last item before the strip repeats.
    pub padding_after_last: f32,
    /// Start with the strip running in the reverse direction.
    pub start_reversed: bool,
    /// Build the loop without starting playback.
    pub paused: bool,
    pub snap: Snap,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            speed_px_per_sec: DEFAULT_SPEED_PX_PER_SEC,
            padding_after_last: 0.0,
            start_reversed: false,
            paused: false,
            snap: Snap::default(),
        }
    }
}

/// Precomputed motion for one item over exactly one loop period.
///
/// The item slides from its natural position until it clears the strip's
/// trailing edge (`exit_percent` at `exit_time`), then re-enters one full
/// period ahead (`reenter_percent`, the same visual position) and slides
/// back to its natural position for the rest of the period.
#[derive(Debug)]
pub(crate) struct ItemTrack {
    pub start_percent: f32,
    pub exit_percent: f32,
    pub reenter_percent: f32,
    pub exit_time: f32,
    pub reenter_duration: f32,
    /// Time at which the item's left edge crosses the strip's reference edge.
    pub entry_time: f32,
}

/// The static geometry of one built loop: per-item tracks, the pixel length
/// of one full cycle and the period in seconds. Computed once at build time,
/// replaced wholesale on rebuild.
#[derive(Debug)]
pub(crate) struct LoopLayout {
    pub tracks: Vec<ItemTrack>,
    pub total_span: f32,
    pub duration: f32,
    pub speed: f32,
}

impl LoopLayout {
    pub fn compute(measures: &[ItemMeasure], config: &LoopConfig) -> Result<Self> {
        if measures.is_empty() {
            return Err(Error::EmptyItemSet);
        }
        let speed = config.speed_px_per_sec;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::InvalidSpeed(speed));
        }
        for (index, m) in measures.iter().enumerate() {
            if !m.width.is_finite() || m.width <= 0.0 || !m.offset.is_finite() {
                return Err(Error::InvalidWidth { index, width: m.width });
            }
        }

        let start_x = measures[0].offset;
        let last = &measures[measures.len() - 1];

        // Express each item's translation as a percentage of its own width so
        // the motion is independent of absolute pixel size.
        let start_percents: Vec<f32> = measures
            .iter()
            .map(|m| config.snap.apply(m.translate / m.width * 100.0))
            .collect();

        let last_percent = start_percents[start_percents.len() - 1];
        let total_span = last.offset + last_percent / 100.0 * last.width - start_x
            + last.width
            + config.padding_after_last;

        let mut tracks = Vec::with_capacity(measures.len());
        for (i, m) in measures.iter().enumerate() {
            let cur_x = start_percents[i] / 100.0 * m.width;
            let distance_to_start = m.offset + cur_x - start_x;
            // Distance until the item has fully cleared the reference edge.
            let distance_to_loop = distance_to_start + m.width;

            let exit_percent = config.snap.apply((cur_x - distance_to_loop) / m.width * 100.0);
            // Re-entry sits one full cycle ahead of the exit position, so the
            // wrap lands on the same on-screen pixel.
            let reenter_percent =
                config.snap.apply((cur_x - distance_to_loop + total_span) / m.width * 100.0);

            tracks.push(ItemTrack {
                start_percent: start_percents[i],
                exit_percent,
                reenter_percent,
                exit_time: distance_to_loop / speed,
                reenter_duration: (total_span - distance_to_loop) / speed,
                entry_time: distance_to_start / speed,
            });
        }

        let duration = total_span / speed;
        debug!(
            "loop layout: {} items, span {:.1}px at {:.0}px/s, period {:.3}s",
            tracks.len(),
            total_span,
            speed,
            duration
        );

        Ok(Self { tracks, total_span, duration, speed })
    }

    /// Item position (percent of own width) at wrapped time `t` in `[0, duration)`.
    pub fn sample(&self, index: usize, t: f32) -> f32 {
        let track = &self.tracks[index];
        if t < track.exit_time || track.reenter_duration <= 0.0 {
            if track.exit_time <= 0.0 {
                return track.start_percent;
            }
            let f = (t / track.exit_time).clamp(0.0, 1.0);
            track.start_percent + (track.exit_percent - track.start_percent) * f
        } else {
            let f = ((t - track.exit_time) / track.reenter_duration).clamp(0.0, 1.0);
            track.reenter_percent + (track.start_percent - track.reenter_percent) * f
        }
    }
}
