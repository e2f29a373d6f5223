use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::config::FieldConfig;
use crate::core::gate::{Gate, GateState, Transition};
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::tracker::{InputFrame, InputTracker};
use crate::renderer::traits::Surface;
use crate::systems::{generate, physics, render};

/// What a call to [`Backdrop::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The gate is dormant; nothing moved and nothing was drawn.
    Skipped,
    /// Physics ran and a frame was drawn.
    Rendered,
}

/// Lifecycle controller: owns the scene and everything that drives it.
///
/// The host pushes events at any time and calls [`tick`](Self::tick) once per
/// animation frame. Events only take effect at the start of a tick, so a
/// regeneration can never land in the middle of a draw.
pub struct Backdrop {
    config: FieldConfig,
    scene: Scene,
    tracker: InputTracker,
    clock: FrameClock,
    gate: Gate,
    rng: SmallRng,
    queue: InputQueue,
    /// Viewport to use at the next regeneration.
    viewport: Vec2,
    pending_regen: bool,
}

impl Backdrop {
    /// Create a dormant backdrop with an initial population for `viewport`.
    pub fn new(config: FieldConfig, viewport: Vec2, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let scene = generate::generate(&config, viewport, &mut rng);
        Self {
            tracker: InputTracker::new(config.input),
            clock: FrameClock::new(config.frame.nominal_ms, config.frame.max_dt),
            gate: Gate::new(config.accepted_themes.clone()),
            config,
            scene,
            rng,
            queue: InputQueue::new(),
            viewport,
            pending_regen: false,
        }
    }

    /// Queue a host event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Swap in a new configuration. The accepted theme set is re-checked
    /// against the current signal and the scene is rebuilt at the next tick.
    pub fn set_config(&mut self, config: FieldConfig) {
        self.tracker.set_config(config.input);
        self.clock = FrameClock::new(config.frame.nominal_ms, config.frame.max_dt);
        let transition = self.gate.set_accepted(config.accepted_themes.clone());
        self.config = config;
        self.on_transition(transition);
        self.pending_regen = true;
    }

    /// Run one frame at host time `now_ms`.
    pub fn tick<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> FrameStatus {
        for event in self.queue.drain() {
            self.apply(event);
        }

        let dt = self.clock.advance(now_ms);
        if !self.gate.is_active() {
            return FrameStatus::Skipped;
        }

        if self.pending_regen {
            generate::regenerate(&mut self.scene, &self.config, self.viewport, &mut self.rng);
            self.pending_regen = false;
        }

        self.tracker.advance(dt);
        let input = self.tracker.frame();
        physics::advance(&mut self.scene, &input, &self.config, dt, &mut self.rng);
        render::draw(&self.scene, &self.config, surface);
        FrameStatus::Rendered
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.tracker.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerLeave => self.tracker.pointer_leave(),
            InputEvent::Scroll { offset } => self.tracker.scroll_to(offset),
            InputEvent::Resize { width, height } => {
                self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
                if self.gate.is_active() {
                    self.pending_regen = true;
                }
            }
            InputEvent::ThemeChanged(theme) => {
                let transition = self.gate.set_signal(theme.as_deref());
                self.on_transition(transition);
            }
        }
    }

    fn on_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Activated => {
                log::info!("backdrop activated by theme {:?}", self.gate.signal());
                self.clock.reset();
                self.pending_regen = true;
            }
            Transition::Deactivated => {
                log::info!("backdrop dormant (theme {:?})", self.gate.signal());
            }
            Transition::Unchanged => {}
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    pub fn is_active(&self) -> bool {
        self.gate.is_active()
    }

    /// Smoothed input as of the last tick.
    pub fn input_frame(&self) -> InputFrame {
        self.tracker.frame()
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    /// Viewport the next regeneration will use.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Number of events waiting for the next tick.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCall, RecordingSurface};

    const FRAME: f64 = 1000.0 / 60.0;

    fn backdrop() -> Backdrop {
        Backdrop::new(FieldConfig::default(), Vec2::new(800.0, 600.0), 42)
    }

    fn theme(name: &str) -> InputEvent {
        InputEvent::ThemeChanged(Some(name.to_string()))
    }

    /// Run `n` ticks starting after `start`, returning the last timestamp.
    fn run(b: &mut Backdrop, start: f64, n: usize) -> f64 {
        let mut surface = RecordingSurface::new();
        let mut now = start;
        for _ in 0..n {
            now += FRAME;
            b.tick(now, &mut surface);
        }
        now
    }

    #[test]
    fn starts_dormant_and_skips() {
        let mut b = backdrop();
        let before = b.scene().positions();
        let mut surface = RecordingSurface::new();

        for i in 0..5 {
            assert_eq!(b.tick(i as f64 * FRAME, &mut surface), FrameStatus::Skipped);
        }
        assert_eq!(b.state(), GateState::Dormant);
        assert!(surface.calls.is_empty());
        assert_eq!(b.scene().positions(), before);
    }

    #[test]
    fn accepted_theme_activates_and_regenerates() {
        let mut b = backdrop();
        let initial = b.scene().atoms.clone();
        b.push_input(theme("biotech"));

        let mut surface = RecordingSurface::new();
        assert_eq!(b.tick(0.0, &mut surface), FrameStatus::Rendered);
        assert!(b.is_active());
        assert_ne!(b.scene().atoms, initial);
        assert!(matches!(surface.calls.first(), Some(DrawCall::ClearRect(..))));
    }

    #[test]
    fn unaccepted_or_missing_theme_stays_dormant() {
        let mut b = backdrop();
        let mut surface = RecordingSurface::new();

        b.push_input(theme("dark"));
        assert_eq!(b.tick(0.0, &mut surface), FrameStatus::Skipped);
        b.push_input(InputEvent::ThemeChanged(None));
        assert_eq!(b.tick(FRAME, &mut surface), FrameStatus::Skipped);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn leaving_accepted_theme_freezes_positions() {
        let mut b = backdrop();
        b.push_input(theme("academic"));
        let now = run(&mut b, 0.0, 10);

        b.push_input(theme("dark"));
        let before = b.scene().positions();
        let mut surface = RecordingSurface::new();
        assert_eq!(b.tick(now + FRAME, &mut surface), FrameStatus::Skipped);
        assert_eq!(b.scene().positions(), before);
        assert_eq!(b.state(), GateState::Dormant);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn resize_while_active_regenerates_for_new_viewport() {
        let mut b = backdrop();
        b.push_input(theme("academic"));
        let now = run(&mut b, 0.0, 3);

        let before = b.scene().atoms.clone();
        b.push_input(InputEvent::Resize { width: 320.0, height: 240.0 });
        run(&mut b, now, 1);

        assert_eq!(b.scene().viewport, Vec2::new(320.0, 240.0));
        assert_ne!(b.scene().atoms, before);
        assert_eq!(b.scene().atoms.len(), b.config().atoms.count);
    }

    #[test]
    fn resize_while_dormant_is_used_on_activation() {
        let mut b = backdrop();
        b.push_input(InputEvent::Resize { width: 400.0, height: 300.0 });
        let now = run(&mut b, 0.0, 1);
        assert_eq!(b.scene().viewport, Vec2::new(800.0, 600.0));

        b.push_input(theme("biotech"));
        run(&mut b, now, 1);
        assert_eq!(b.scene().viewport, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn events_apply_only_at_tick() {
        let mut b = backdrop();
        b.push_input(theme("biotech"));
        let now = run(&mut b, 0.0, 1);

        b.push_input(InputEvent::PointerMove { x: 100.0, y: 200.0 });
        b.push_input(InputEvent::Scroll { offset: 50.0 });
        assert_eq!(b.pending_events(), 2);
        assert!(!b.input_frame().pointer_active);
        assert_eq!(b.tracker().raw_scroll(), 0.0);

        run(&mut b, now, 1);
        assert_eq!(b.pending_events(), 0);
        let frame = b.input_frame();
        assert!(frame.pointer_active);
        assert_eq!(frame.pointer, Vec2::new(100.0, 200.0));
        assert_eq!(b.tracker().raw_scroll(), 50.0);
    }

    #[test]
    fn events_are_drained_while_dormant() {
        let mut b = backdrop();
        b.push_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        run(&mut b, 0.0, 1);
        assert_eq!(b.pending_events(), 0);
        assert_eq!(b.tracker().raw_pointer(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn config_change_regenerates_with_new_counts() {
        let mut b = backdrop();
        b.push_input(theme("biotech"));
        let now = run(&mut b, 0.0, 1);

        let mut cfg = FieldConfig::default();
        cfg.atoms.count = 12;
        cfg.helices.count = 1;
        b.set_config(cfg);
        run(&mut b, now, 1);

        assert_eq!(b.scene().atoms.len(), 12);
        assert_eq!(b.scene().helices.len(), 1);
    }

    #[test]
    fn out_of_range_config_values_tick_without_panicking() {
        let json = r#"{
            "frame": { "max_dt": -1.0 },
            "atoms": { "radius": { "min": 1.0, "max": 1e39 } },
            "helices": { "half_length": 1e39 }
        }"#;
        let mut b = backdrop();
        b.push_input(theme("biotech"));
        b.set_config(FieldConfig::from_json(json).unwrap());

        let mut surface = RecordingSurface::new();
        for i in 0..3 {
            assert_eq!(b.tick(i as f64 * FRAME, &mut surface), FrameStatus::Rendered);
        }
        assert!(b.scene().atoms.iter().all(|a| a.radius == 1.0));
    }

    #[test]
    fn config_without_current_theme_deactivates() {
        let mut b = backdrop();
        b.push_input(theme("biotech"));
        let now = run(&mut b, 0.0, 1);

        let mut cfg = FieldConfig::default();
        cfg.accepted_themes = vec!["lab".to_string()];
        b.set_config(cfg);
        assert_eq!(b.state(), GateState::Dormant);

        let mut surface = RecordingSurface::new();
        assert_eq!(b.tick(now + FRAME, &mut surface), FrameStatus::Skipped);
    }

    #[test]
    fn animation_time_advances_only_when_active() {
        let mut b = backdrop();
        run(&mut b, 0.0, 5);
        assert_eq!(b.scene().time, 0.0);

        b.push_input(theme("academic"));
        run(&mut b, 100.0, 5);
        assert!(b.scene().time > 0.0);
    }
}
