use crate::Result;
use crate::clock::Clock;
use crate::horizontal_loop::{HorizontalLoop, LoopConfig, NavHandle, NavOptions};
use crate::item::{Item, ItemMeasure};
use crate::observer::{ObserverConfig, ScrollObserver};

/// Combined build options for a marquee instance.
#[derive(Debug, Default)]
pub struct MarqueeConfig {
    pub timeline: LoopConfig,
    pub observer: ObserverConfig,
}

impl MarqueeConfig {
    /// Convenience for a strip that runs right-to-left reversed, keeping the
    /// scroll observer's direction correction in agreement.
    pub fn reversed() -> Self {
        let mut config = Self::default();
        config.timeline.start_reversed = true;
        config
    }
}

/// One mounted marquee: a built loop plus the scroll observer that modulates
/// its play rate. The host feeds `on_scroll` from its input source and calls
/// `advance` once per frame from its clock.
pub struct Marquee {
    timeline: HorizontalLoop,
    observer: ScrollObserver,
}

impl Marquee {
    pub fn build(measures: Vec<ItemMeasure>, mut config: MarqueeConfig) -> Result<Self> {
        // The observer's direction correction always follows the strip.
        config.observer.reversed = config.timeline.start_reversed;
        let timeline = HorizontalLoop::build(measures, &config.timeline)?;
        Ok(Self { timeline, observer: ScrollObserver::new(config.observer) })
    }

    /// Feeds one scroll/drag velocity sample. No-op after `destroy`.
    pub fn on_scroll(&mut self, delta_y: f32) {
        if self.timeline.is_destroyed() {
            return;
        }
        self.observer.on_velocity_sample(delta_y);
    }

    /// Advances one frame: applies the shaped rate, then moves the playhead.
    pub fn advance(&mut self, dt: f32) {
        if self.timeline.is_destroyed() {
            return;
        }
        if let Some(rate) = self.observer.shape(dt) {
            self.timeline.set_play_rate(rate);
        }
        self.timeline.advance(dt);
    }

    pub fn advance_with(&mut self, clock: &mut impl Clock) {
        let dt = clock.delta();
        self.advance(dt);
    }

    /// Tears down both halves. Idempotent; later input is silently dropped.
    pub fn destroy(&mut self) {
        self.observer.cancel();
        self.timeline.destroy();
    }

    pub fn timeline(&self) -> &HorizontalLoop {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut HorizontalLoop {
        &mut self.timeline
    }

    pub fn play(&mut self) {
        self.timeline.play();
    }

    pub fn pause(&mut self) {
        self.timeline.pause();
    }

    pub fn reverse(&mut self) {
        self.timeline.reverse();
    }

    pub fn next(&mut self, options: NavOptions) -> Option<NavHandle> {
        self.timeline.next(options)
    }

    pub fn previous(&mut self, options: NavOptions) -> Option<NavHandle> {
        self.timeline.previous(options)
    }

    pub fn to_index(&mut self, index: usize, options: NavOptions) -> Option<NavHandle> {
        self.timeline.to_index(index, options)
    }

    pub fn cancel(&mut self, handle: NavHandle) {
        self.timeline.cancel(handle);
    }

    pub fn current_index(&self) -> usize {
        self.timeline.current_index()
    }

    pub fn items(&self) -> &[Item] {
        self.timeline.items()
    }

    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    pub fn is_destroyed(&self) -> bool {
        self.timeline.is_destroyed()
    }

    pub fn play_rate(&self) -> f32 {
        self.timeline.play_rate()
    }

    pub fn time(&self) -> f32 {
        self.timeline.time()
    }

    pub fn duration(&self) -> f32 {
        self.timeline.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn build_five() -> Marquee {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        Marquee::build(measures, MarqueeConfig::default()).unwrap()
    }

    #[test]
    fn scroll_sample_kicks_the_play_rate() {
        let mut marquee = build_five();
        marquee.on_scroll(1.0);
        marquee.advance(0.2);
        // Kick completed at 6.25x, so the playhead moved 0.2 * 6.25.
        assert!(approx(marquee.play_rate(), 6.25));
        assert!(approx(marquee.time(), 1.25));
    }

    #[test]
    fn settled_rate_stays_in_force() {
        let mut marquee = build_five();
        marquee.on_scroll(1.0);
        for _ in 0..30 {
            marquee.advance(0.05);
        }
        assert!(approx(marquee.play_rate(), 1.0));
        let before = marquee.time();
        marquee.advance(0.5);
        assert!(approx(marquee.time(), (before + 0.5).rem_euclid(marquee.duration())));
    }

    #[test]
    fn reversed_marquee_flips_sample_direction() {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        let mut marquee = Marquee::build(measures, MarqueeConfig::reversed()).unwrap();
        marquee.on_scroll(1.0);
        marquee.advance(0.2);
        assert!(approx(marquee.play_rate(), -6.25));
    }

    #[test]
    fn destroyed_marquee_ignores_input_and_time() {
        let mut marquee = build_five();
        marquee.advance(0.5);
        marquee.destroy();
        marquee.destroy();
        let frozen = marquee.time();
        marquee.on_scroll(1.0);
        marquee.advance(1.0);
        assert!(approx(marquee.time(), frozen));
        assert!(marquee.is_destroyed());
    }

    #[test]
    fn advances_from_a_host_clock() {
        let mut marquee = build_five();
        let mut clock = ManualClock::new(vec![0.25, 0.25, 0.5]);
        marquee.advance_with(&mut clock);
        marquee.advance_with(&mut clock);
        marquee.advance_with(&mut clock);
        assert!(approx(marquee.time(), 1.0));
        // Exhausted clock reports zero deltas, the strip holds still.
        marquee.advance_with(&mut clock);
        assert!(approx(marquee.time(), 1.0));
    }
}
