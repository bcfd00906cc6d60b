use log::trace;
use raylib::ease;

use crate::horizontal_loop::timeline::HorizontalLoop;

/// Easing signature shared with the tween helpers: (t, start, delta, duration).
pub type EaseFn = fn(f32, f32, f32, f32) -> f32;

/// Options for `to_index` / `next` / `previous`.
#[derive(Debug, Clone, Copy)]
pub struct NavOptions {
    /// Tween length in seconds. Defaults to the timeline distance, i.e.
    /// travel at the strip's base speed.
    pub duration: Option<f32>,
    /// Seek instead of animating.
    pub jump: bool,
    pub ease: EaseFn,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self { duration: None, jump: false, ease: ease::linear_none }
    }
}

impl NavOptions {
    pub fn jump() -> Self {
        Self { jump: true, ..Default::default() }
    }

    pub fn over(duration: f32) -> Self {
        Self { duration: Some(duration), ..Default::default() }
    }
}

/// Identifies one navigation request so it can be cancelled. Stale handles
/// (superseded or completed navigations) cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavHandle(pub(crate) u64);

/// In-flight playhead tween. The raw value may run outside `[0, duration)`;
/// the timeline wraps it every frame so the tween always moves the playhead
/// monotonically even when the shortest route crosses the period boundary.
pub(crate) struct NavTween {
    pub(crate) id: u64,
    tween: ease::Tween,
    elapsed: f32,
    duration: f32,
    target: f32,
}

impl NavTween {
    pub(crate) fn step(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.tween.apply(dt)
    }

    pub(crate) fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub(crate) fn target(&self) -> f32 {
        self.target
    }
}

impl HorizontalLoop {
    /// Animates the strip so that item `index` becomes current, travelling
    /// the shorter way around the cycle. `current_index` updates immediately;
    /// the returned handle cancels the motion if it is still in flight.
    /// Returns `None` once the loop is destroyed.
    pub fn to_index(&mut self, index: usize, options: NavOptions) -> Option<NavHandle> {
        self.to_index_signed(index as i64, options)
    }

    pub fn next(&mut self, options: NavOptions) -> Option<NavHandle> {
        self.to_index_signed(self.current_index() as i64 + 1, options)
    }

    pub fn previous(&mut self, options: NavOptions) -> Option<NavHandle> {
        self.to_index_signed(self.current_index() as i64 - 1, options)
    }

    /// Cancels an in-flight navigation. No-op for stale handles.
    pub fn cancel(&mut self, handle: NavHandle) {
        if self.nav.as_ref().is_some_and(|nav| nav.id == handle.0) {
            self.nav = None;
        }
    }

    fn to_index_signed(&mut self, mut index: i64, options: NavOptions) -> Option<NavHandle> {
        if self.is_destroyed() {
            return None;
        }
        let len = self.item_count() as i64;
        let cur = self.current_index() as i64;

        // Take the shorter way around the cycle.
        if (index - cur).abs() > len / 2 {
            index += if index > cur { -len } else { len };
        }
        let new_index = index.rem_euclid(len) as usize;

        let mut target = self.entry_time(new_index);
        // When the raw time delta disagrees with the travel direction, shift
        // the target a full period so the playhead only ever moves one way.
        if (target > self.time()) != (index > cur) {
            target += self.duration() * if index > cur { 1.0 } else { -1.0 };
        }

        self.set_current_index(new_index);
        self.nav_seq += 1;
        let handle = NavHandle(self.nav_seq);

        let delta = target - self.time();
        let duration = if options.jump {
            0.0
        } else {
            options.duration.unwrap_or_else(|| delta.abs())
        };
        trace!(
            "to_index {new_index}: target {target:.3}s (delta {delta:+.3}s) over {duration:.3}s"
        );

        if duration <= f32::EPSILON || delta == 0.0 {
            self.nav = None;
            self.set_time_wrapped(target);
            self.refresh();
            return Some(handle);
        }

        self.nav = Some(NavTween {
            id: handle.0,
            tween: ease::Tween::new(options.ease, self.time(), target, duration),
            elapsed: 0.0,
            duration,
            target,
        });
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizontal_loop::layout::LoopConfig;
    use crate::item::ItemMeasure;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn build_five() -> HorizontalLoop {
        let measures = ItemMeasure::from_widths(&[100.0; 5], 0.0);
        HorizontalLoop::build(measures, &LoopConfig::default()).unwrap()
    }

    #[test]
    fn to_index_updates_current_index_immediately() {
        let mut looped = build_five();
        for i in 0..5 {
            looped.to_index(i, NavOptions::default());
            assert_eq!(looped.current_index(), i);
        }
    }

    #[test]
    fn wrap_case_travels_backward_one_step() {
        let mut looped = build_five();
        let handle = looped.to_index(4, NavOptions::default());
        assert!(handle.is_some());
        assert_eq!(looped.current_index(), 4);
        // Backward one step, so the playhead heads toward -1s, not +4s.
        looped.advance(0.5);
        assert!(approx(looped.time(), 4.5));
        looped.advance(10.0);
        assert!(approx(looped.time(), 4.0));
    }

    #[test]
    fn next_then_previous_restores_index() {
        let mut looped = build_five();
        for start in 0..5 {
            looped.to_index(start, NavOptions::jump());
            looped.next(NavOptions::jump());
            looped.previous(NavOptions::jump());
            assert_eq!(looped.current_index(), start);
            assert!(approx(looped.time(), looped.entry_time(start)));
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut looped = build_five();
        looped.previous(NavOptions::jump());
        assert_eq!(looped.current_index(), 4);
        assert!(approx(looped.time(), looped.entry_time(4)));
    }

    #[test]
    fn jump_lands_exactly_on_entry_time() {
        let mut looped = build_five();
        looped.to_index(2, NavOptions::jump());
        assert!(approx(looped.time(), 2.0));
        assert!(approx(looped.items()[2].display_percent, -200.0));
    }

    #[test]
    fn animated_navigation_arrives_at_entry_time() {
        let mut looped = build_five();
        looped.to_index(2, NavOptions::default());
        looped.advance(10.0);
        assert!(approx(looped.time(), 2.0));
        assert_eq!(looped.current_index(), 2);
    }

    #[test]
    fn new_navigation_replaces_in_flight_one() {
        let mut looped = build_five();
        looped.to_index(1, NavOptions::default());
        looped.advance(0.25);
        looped.to_index(2, NavOptions::default());
        looped.advance(10.0);
        // Only the latest request is observable once motion completes.
        assert!(approx(looped.time(), 2.0));
        assert_eq!(looped.current_index(), 2);
    }

    #[test]
    fn cancel_stops_the_motion_and_resumes_playback() {
        let mut looped = build_five();
        let handle = looped.to_index(3, NavOptions::over(2.0)).unwrap();
        looped.advance(0.5);
        let mid = looped.time();
        looped.cancel(handle);
        looped.advance(0.5);
        // Regular playback resumed from wherever the tween stopped.
        assert!(approx(looped.time(), mid + 0.5));
    }

    #[test]
    fn stale_handle_cancels_nothing() {
        let mut looped = build_five();
        let old = looped.to_index(1, NavOptions::default()).unwrap();
        looped.to_index(2, NavOptions::default());
        looped.cancel(old);
        looped.advance(10.0);
        assert!(approx(looped.time(), 2.0));
    }

    #[test]
    fn navigation_on_destroyed_loop_is_a_no_op() {
        let mut looped = build_five();
        looped.destroy();
        assert!(looped.to_index(3, NavOptions::default()).is_none());
        assert!(looped.next(NavOptions::default()).is_none());
        assert!(looped.previous(NavOptions::default()).is_none());
        assert_eq!(looped.current_index(), 0);
    }

    #[test]
    fn custom_duration_paces_the_tween() {
        let mut looped = build_five();
        looped.to_index(2, NavOptions::over(4.0));
        looped.advance(2.0);
        // Linear ease, halfway through a 0 -> 2s travel.
        assert!(approx(looped.time(), 1.0));
    }
}
