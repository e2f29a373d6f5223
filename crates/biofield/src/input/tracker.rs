use glam::Vec2;

use crate::api::config::InputConfig;
use crate::extensions::easing::{approach, approach_vec2};

/// Per-frame input snapshot consumed by the physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    /// Smoothed pointer position.
    pub pointer: Vec2,
    /// Repulsion is applied only while this is set.
    pub pointer_active: bool,
    /// Smoothed scroll velocity, pixels per nominal frame.
    pub scroll_velocity: f32,
}

impl InputFrame {
    /// A frame with no pointer and no scrolling.
    pub const IDLE: Self = Self {
        pointer: Vec2::ZERO,
        pointer_active: false,
        scroll_velocity: 0.0,
    };
}

/// Turns raw pointer and scroll events into smoothed per-frame values.
#[derive(Debug, Clone)]
pub struct InputTracker {
    config: InputConfig,
    raw_pointer: Vec2,
    pointer: Vec2,
    active: bool,
    /// Set by a pointer-move after inactivity; the next advance snaps.
    snap_pending: bool,
    raw_scroll: f32,
    scroll: f32,
    scroll_velocity: f32,
}

impl InputTracker {
    pub fn new(config: InputConfig) -> Self {
        let far = Vec2::splat(config.far_sentinel);
        Self {
            config,
            raw_pointer: far,
            pointer: far,
            active: false,
            snap_pending: false,
            raw_scroll: 0.0,
            scroll: 0.0,
            scroll_velocity: 0.0,
        }
    }

    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.active {
            self.snap_pending = true;
        }
        self.raw_pointer = pos;
        self.active = true;
    }

    pub fn pointer_leave(&mut self) {
        self.raw_pointer = Vec2::splat(self.config.far_sentinel);
        self.active = false;
        self.snap_pending = false;
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.raw_scroll = offset;
    }

    /// Advance smoothing by one frame of length `dt`.
    pub fn advance(&mut self, dt: f32) {
        if self.snap_pending {
            self.pointer = self.raw_pointer;
            self.snap_pending = false;
        } else {
            let rate = if self.active {
                self.config.pointer_follow
            } else {
                self.config.pointer_release
            };
            self.pointer = approach_vec2(self.pointer, self.raw_pointer, rate, dt);
        }

        let previous = self.scroll;
        self.scroll = approach(self.scroll, self.raw_scroll, self.config.scroll_follow, dt);
        let delta = if dt > 0.0 { (self.scroll - previous) / dt } else { 0.0 };
        self.scroll_velocity = approach(
            self.scroll_velocity,
            delta,
            self.config.scroll_velocity_follow,
            dt,
        );
    }

    /// Snapshot of the smoothed state.
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            pointer: self.pointer,
            pointer_active: self.active,
            scroll_velocity: self.scroll_velocity,
        }
    }

    pub fn raw_pointer(&self) -> Vec2 {
        self.raw_pointer
    }

    pub fn raw_scroll(&self) -> f32 {
        self.raw_scroll
    }

    pub fn smoothed_scroll(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> InputTracker {
        InputTracker::new(InputConfig::default())
    }

    #[test]
    fn starts_inactive_at_sentinel() {
        let t = tracker();
        let f = t.frame();
        assert!(!f.pointer_active);
        assert_eq!(f.pointer, Vec2::splat(-10_000.0));
        assert_eq!(f.scroll_velocity, 0.0);
    }

    #[test]
    fn first_move_snaps_then_follows() {
        let mut t = tracker();
        t.pointer_move(Vec2::new(100.0, 100.0));
        t.advance(1.0);
        assert_eq!(t.frame().pointer, Vec2::new(100.0, 100.0));
        assert!(t.frame().pointer_active);

        t.pointer_move(Vec2::new(200.0, 100.0));
        t.advance(1.0);
        let x = t.frame().pointer.x;
        assert!(x > 100.0 && x < 200.0, "smoothed x was {}", x);
    }

    #[test]
    fn leave_decays_slowly_toward_sentinel() {
        let mut t = tracker();
        t.pointer_move(Vec2::new(100.0, 100.0));
        t.advance(1.0);
        t.pointer_leave();
        t.advance(1.0);
        let f = t.frame();
        assert!(!f.pointer_active);
        assert!(f.pointer.x < 100.0);
        assert!(f.pointer.x > -10_000.0);
        assert_eq!(t.raw_pointer(), Vec2::splat(-10_000.0));
    }

    #[test]
    fn scrolling_produces_velocity_that_settles() {
        let mut t = tracker();
        t.scroll_to(500.0);
        t.advance(1.0);
        let v = t.frame().scroll_velocity;
        assert!(v > 0.0, "downward scroll should give positive velocity, got {}", v);

        for _ in 0..600 {
            t.advance(1.0);
        }
        assert!(t.frame().scroll_velocity.abs() < 1e-3);
        assert!((t.smoothed_scroll() - 500.0).abs() < 1e-2);
    }

    #[test]
    fn zero_dt_changes_nothing() {
        let mut t = tracker();
        t.scroll_to(500.0);
        t.advance(0.0);
        assert_eq!(t.smoothed_scroll(), 0.0);
        assert_eq!(t.frame().scroll_velocity, 0.0);
    }
}
