use log::debug;

use crate::Result;
use crate::horizontal_loop::layout::{LoopConfig, LoopLayout};
use crate::horizontal_loop::nav::NavTween;
use crate::item::{Item, ItemMeasure};

/// A built, drivable marquee loop.
///
/// Time lives in `[0, duration)` and wraps with `rem_euclid`, so playback in
/// either direction crosses the period boundary without any discontinuity
/// and unbounded run time never loses precision. Direction is a signed
/// combination of the `reversed` flag and the play rate.
pub struct HorizontalLoop {
    items: Vec<Item>,
    layout: LoopLayout,
    time: f32,
    play_rate: f32,
    reversed: bool,
    playing: bool,
    current_index: usize,
    pub(crate) nav: Option<NavTween>,
    pub(crate) nav_seq: u64,
    destroyed: bool,
}

impl HorizontalLoop {
    /// Builds the loop from measured item geometry. Fails on empty input,
    /// non-positive widths or a non-positive speed.
    ///
    /// Geometry is fixed for the life of the loop. When widths change
    /// (resize, content swap) destroy this loop, remeasure and build a new
    /// one; there is no partial patching.
    pub fn build(measures: Vec<ItemMeasure>, config: &LoopConfig) -> Result<Self> {
        let layout = LoopLayout::compute(&measures, config)?;
        let items = measures
            .iter()
            .enumerate()
            .map(|(index, m)| Item {
                index,
                width: m.width,
                offset: m.offset,
                display_percent: 0.0,
            })
            .collect();

        let mut looped = Self {
            items,
            layout,
            time: 0.0,
            play_rate: 1.0,
            reversed: config.start_reversed,
            playing: !config.paused,
            current_index: 0,
            nav: None,
            nav_seq: 0,
            destroyed: false,
        };
        // Settle every item into its canonical pre-loop position.
        looped.refresh_items();
        debug!(
            "built loop: {} items, span {:.1}px, period {:.3}s, reversed={}",
            looped.items.len(),
            looped.layout.total_span,
            looped.layout.duration,
            looped.reversed
        );
        Ok(looped)
    }

    /// Advances the playhead by `dt` seconds of host time. Navigation tweens
    /// take priority over regular playback; both end with the items
    /// refreshed to the new time.
    pub fn advance(&mut self, dt: f32) {
        if self.destroyed || dt <= 0.0 {
            return;
        }
        let duration = self.layout.duration;
        if let Some(nav) = self.nav.as_mut() {
            let raw = nav.step(dt);
            let finished = nav.finished();
            let target = nav.target();
            if finished {
                self.nav = None;
                self.time = target.rem_euclid(duration);
            } else {
                self.time = raw.rem_euclid(duration);
            }
        } else if self.playing {
            let direction = if self.reversed { -1.0 } else { 1.0 };
            self.time = (self.time + dt * self.play_rate * direction).rem_euclid(duration);
        }
        self.refresh_items();
    }

    /// Moves the playhead to `t` (wrapped into one period) without animating.
    pub fn seek(&mut self, t: f32) {
        if self.destroyed {
            return;
        }
        self.time = t.rem_euclid(self.layout.duration);
        self.refresh_items();
    }

    pub fn play(&mut self) {
        if !self.destroyed {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        if !self.destroyed {
            self.playing = false;
        }
    }

    /// Flips the playback direction in place.
    pub fn reverse(&mut self) {
        if !self.destroyed {
            self.reversed = !self.reversed;
        }
    }

    pub fn set_play_rate(&mut self, rate: f32) {
        if !self.destroyed {
            self.play_rate = rate;
        }
    }

    /// Tears the loop down: cancels any in-flight navigation and freezes the
    /// strip. Every later call on this loop is a silent no-op, so teardown
    /// can race with in-flight input events. Calling it twice is safe.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.playing = false;
        self.nav = None;
        debug!("loop destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_playing(&self) -> bool {
        self.playing && !self.destroyed
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn play_rate(&self) -> f32 {
        self.play_rate
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Seconds for one full cycle.
    pub fn duration(&self) -> f32 {
        self.layout.duration
    }

    /// Pixel length of one full cycle.
    pub fn total_span(&self) -> f32 {
        self.layout.total_span
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Timeline time at which item `index` crosses the reference edge.
    pub fn entry_time(&self, index: usize) -> f32 {
        self.layout.tracks[index].entry_time
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.current_index = index;
    }

    pub(crate) fn set_time_wrapped(&mut self, raw: f32) {
        self.time = raw.rem_euclid(self.layout.duration);
    }

    fn refresh_items(&mut self) {
        for item in &mut self.items {
            item.display_percent = self.layout.sample(item.index, self.time);
        }
    }

    pub(crate) fn refresh(&mut self) {
        self.refresh_items();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizontal_loop::layout::LoopConfig;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn build_five() -> HorizontalLoop {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        HorizontalLoop::build(measures, &LoopConfig::default()).unwrap()
    }

    #[test]
    fn starts_in_canonical_position() {
        let looped = build_five();
        for item in looped.items() {
            assert!(approx(item.display_percent, 0.0));
            assert!(approx(item.screen_x(), item.offset));
        }
    }

    #[test]
    fn positions_repeat_after_one_period() {
        let mut looped = build_five();
        looped.advance(1.3);
        let snapshot: Vec<f32> = looped.items().iter().map(|i| i.display_percent).collect();
        // 0.625 * 8 is exactly one 5s period in binary float.
        for _ in 0..8 {
            looped.advance(0.625);
        }
        for (item, before) in looped.items().iter().zip(&snapshot) {
            assert!(approx(item.display_percent, *before));
        }
    }

    #[test]
    fn irregular_deltas_do_not_drift() {
        let mut looped = build_five();
        let deltas = [0.013, 0.02, 0.0166, 0.031, 0.0083, 0.05, 0.001, 0.0172];
        let mut expected = 0.0f32;
        for _ in 0..40 {
            for &dt in &deltas {
                looped.advance(dt);
                expected = (expected + dt).rem_euclid(looped.duration());
            }
        }
        assert!(approx(looped.time(), expected));
    }

    #[test]
    fn reverse_wraps_through_zero() {
        let mut looped = build_five();
        looped.reverse();
        looped.advance(0.5);
        assert!(approx(looped.time(), 4.5));
        assert!(looped.is_reversed());
    }

    #[test]
    fn start_reversed_first_frame_is_seam_free() {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        let config = LoopConfig { start_reversed: true, ..Default::default() };
        let mut looped = HorizontalLoop::build(measures, &config).unwrap();
        looped.advance(0.25);
        assert!(approx(looped.time(), 4.75));
        // Item 0 is mid-way through its re-entry leg, not popped elsewhere.
        let percent = looped.items()[0].display_percent;
        assert!(percent > 0.0 && percent < 100.0);
    }

    #[test]
    fn pause_freezes_and_play_resumes() {
        let mut looped = build_five();
        looped.pause();
        looped.advance(1.0);
        assert!(approx(looped.time(), 0.0));
        looped.play();
        looped.advance(1.0);
        assert!(approx(looped.time(), 1.0));
    }

    #[test]
    fn negative_play_rate_runs_backward() {
        let mut looped = build_five();
        looped.set_play_rate(-2.0);
        looped.advance(0.5);
        assert!(approx(looped.time(), 4.0));
    }

    #[test]
    fn paused_config_builds_paused() {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        let config = LoopConfig { paused: true, ..Default::default() };
        let looped = HorizontalLoop::build(measures, &config).unwrap();
        assert!(!looped.is_playing());
    }

    #[test]
    fn destroy_is_idempotent_and_freezes_everything() {
        let mut looped = build_five();
        looped.advance(0.5);
        looped.destroy();
        looped.destroy();
        let frozen = looped.time();
        looped.advance(1.0);
        looped.play();
        looped.seek(2.0);
        looped.set_play_rate(5.0);
        assert!(approx(looped.time(), frozen));
        assert!(!looped.is_playing());
        assert!(looped.is_destroyed());
    }

    #[test]
    fn seek_wraps_into_one_period() {
        let mut looped = build_five();
        looped.seek(12.5);
        assert!(approx(looped.time(), 2.5));
        looped.seek(-1.0);
        assert!(approx(looped.time(), 4.0));
    }
}
