use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::renderer::traits::Rgba;

/// Inclusive `[min, max]` range sampled uniformly at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-half, half]`.
    pub const fn symmetric(half: f32) -> Self {
        Self { min: -half, max: half }
    }

    /// Draw a uniform value. A reversed span is sampled as if its ends were swapped.
    ///
    /// A span whose width is not finite (an end overflowed to infinity while
    /// parsing) yields its finite end, or zero when neither end is finite.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        if !(hi - lo).is_finite() {
            return [lo, hi].into_iter().find(|v| v.is_finite()).unwrap_or(0.0);
        }
        rng.random_range(lo..=hi)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min.min(self.max) && value <= self.max.max(self.min)
    }
}

/// Per-class motion constants shared by atoms and molecules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Peak pointer-repulsion impulse per unit dt (at distance zero).
    pub repel_strength: f32,
    /// Vertical velocity nudge per unit of smoothed scroll velocity.
    pub scroll_coupling: f32,
    /// Hard velocity magnitude cap.
    pub max_speed: f32,
    /// Free-drift speed; damping only removes speed above this.
    pub cruise_speed: f32,
    /// Per-frame velocity decay factor, raised to dt.
    pub damping: f32,
    /// Distance past the viewport edge before an entity wraps.
    pub wrap_margin: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            repel_strength: 0.6,
            scroll_coupling: 0.02,
            max_speed: 3.0,
            cruise_speed: 0.22,
            damping: 0.96,
            wrap_margin: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomConfig {
    pub count: usize,
    pub radius: Span,
    /// Range of each velocity component.
    pub velocity: Span,
    pub opacity: Span,
    pub phase: Span,
    /// Oscillation phase advance per unit dt.
    pub phase_rate: f32,
    pub motion: MotionConfig,
}

impl Default for AtomConfig {
    fn default() -> Self {
        Self {
            count: 80,
            radius: Span::new(1.0, 3.5),
            velocity: Span::symmetric(0.15),
            opacity: Span::new(0.04, 0.13),
            phase: Span::new(0.0, TAU),
            phase_rate: 0.02,
            motion: MotionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoleculeConfig {
    pub count: usize,
    pub size: Span,
    pub velocity: Span,
    pub opacity: Span,
    pub rotation: Span,
    pub rotation_speed: Span,
    pub motion: MotionConfig,
}

impl Default for MoleculeConfig {
    fn default() -> Self {
        Self {
            count: 7,
            size: Span::new(14.0, 32.0),
            velocity: Span::symmetric(0.12),
            opacity: Span::new(0.04, 0.12),
            rotation: Span::new(0.0, PI),
            rotation_speed: Span::symmetric(0.003),
            motion: MotionConfig {
                repel_strength: 0.35,
                scroll_coupling: 0.03,
                max_speed: 2.0,
                cruise_speed: 0.18,
                damping: 0.97,
                wrap_margin: 60.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    pub count: usize,
    /// Fractional viewport x of the anchor.
    pub anchor_x: Span,
    /// Fractional viewport y of the anchor.
    pub anchor_y: Span,
    /// Initial angle and every retargeted angle are drawn from this range.
    pub angle: Span,
    pub amplitude: Span,
    pub frequency: Span,
    pub phase: Span,
    pub scale: Span,
    pub opacity: Span,
    pub parallax: Span,
    /// Initial countdown before the first retarget, in frame units.
    pub initial_timer: Span,
    /// Countdown reset after each retarget, in frame units.
    pub retarget_interval: Span,
    /// Helix half-length as a fraction of the viewport diagonal (before scale).
    pub half_length: f32,
    pub repel_strength: f32,
    pub scroll_coupling: f32,
    pub max_drift_speed: f32,
    pub spring_x: f32,
    pub spring_y: f32,
    pub damping_x: f32,
    pub damping_y: f32,
    pub angle_spring: f32,
    pub angle_damping: f32,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            count: 6,
            anchor_x: Span::new(0.05, 0.95),
            anchor_y: Span::new(0.15, 0.85),
            angle: Span::symmetric(0.7),
            amplitude: Span::new(22.0, 44.0),
            frequency: Span::new(0.006, 0.012),
            phase: Span::new(0.0, TAU),
            scale: Span::new(0.6, 1.1),
            opacity: Span::new(0.04, 0.09),
            parallax: Span::new(0.2, 0.6),
            initial_timer: Span::new(0.0, 600.0),
            retarget_interval: Span::new(240.0, 600.0),
            half_length: 0.45,
            repel_strength: 0.25,
            scroll_coupling: 0.04,
            max_drift_speed: 2.5,
            spring_x: 0.004,
            spring_y: 0.006,
            damping_x: 0.94,
            damping_y: 0.92,
            angle_spring: 0.0006,
            angle_damping: 0.95,
        }
    }
}

/// Pointer and scroll smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radius around the smoothed pointer inside which entities are pushed.
    pub repel_radius: f32,
    /// Per-frame approach rate of the smoothed pointer while active.
    pub pointer_follow: f32,
    /// Per-frame approach rate toward the sentinel while inactive.
    pub pointer_release: f32,
    /// Where the raw pointer is parked after a pointer-leave.
    pub far_sentinel: f32,
    pub scroll_follow: f32,
    pub scroll_velocity_follow: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repel_radius: 150.0,
            pointer_follow: 0.25,
            pointer_release: 0.04,
            far_sentinel: -10_000.0,
            scroll_follow: 0.2,
            scroll_velocity_follow: 0.15,
        }
    }
}

/// Proximity graph and glyph shape constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondConfig {
    /// Atoms closer than this are connected.
    pub threshold: f32,
    /// Opacity of a bond at distance zero.
    pub max_alpha: f32,
    pub line_width: f32,
    /// Pairs closer than `threshold * double_fraction` get a second line.
    pub double_fraction: f32,
    pub double_offset: f32,
    /// Amplitude of the atom radius pulse.
    pub pulse_amplitude: f32,
    /// Atoms with a base radius above this get a halo and orbit ring.
    pub halo_radius: f32,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            threshold: 160.0,
            max_alpha: 0.12,
            line_width: 0.6,
            double_fraction: 0.35,
            double_offset: 2.0,
            pulse_amplitude: 0.8,
            halo_radius: 2.6,
        }
    }
}

/// Glyph colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Atom fill colours; each atom picks one at creation. Alpha is ignored.
    pub atoms: Vec<Rgba>,
    pub bond: Rgba,
    pub molecule: Rgba,
    pub strand_a: Rgba,
    pub strand_b: Rgba,
    pub rung: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            atoms: vec![
                Rgba::rgb8(26, 82, 118, 1.0),
                Rgba::rgb8(46, 134, 193, 1.0),
                Rgba::rgb8(133, 193, 233, 1.0),
                Rgba::rgb8(40, 116, 166, 1.0),
            ],
            bond: Rgba::rgb8(46, 134, 193, 1.0),
            molecule: Rgba::rgb8(26, 82, 118, 1.0),
            strand_a: Rgba::rgb8(26, 82, 118, 1.0),
            strand_b: Rgba::rgb8(133, 193, 233, 1.0),
            rung: Rgba::rgb8(46, 134, 193, 1.0),
        }
    }
}

/// Frame timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Nominal frame duration in milliseconds (dt == 1.0).
    pub nominal_ms: f32,
    /// Upper bound on dt after a long pause.
    pub max_dt: f32,
    /// Animation time advance per unit dt (helix wave phase).
    pub time_rate: f32,
    /// Local-y distance between helix samples.
    pub helix_step: f32,
    /// A rung is drawn every `rung_every` samples.
    pub rung_every: u32,
    /// A marker node is drawn every `marker_every` samples.
    pub marker_every: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            nominal_ms: 1000.0 / 60.0,
            max_dt: 3.0,
            time_rate: 0.015,
            helix_step: 6.0,
            rung_every: 4,
            marker_every: 12,
        }
    }
}

/// Complete backdrop configuration.
///
/// Every section defaults independently, so a JSON override only needs the
/// fields it changes:
///
/// ```
/// let cfg = biofield::FieldConfig::from_json(r#"{ "atoms": { "count": 40 } }"#).unwrap();
/// assert_eq!(cfg.atoms.count, 40);
/// assert_eq!(cfg.molecules.count, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Theme signal values that activate the backdrop.
    pub accepted_themes: Vec<String>,
    pub atoms: AtomConfig,
    pub molecules: MoleculeConfig,
    pub helices: HelixConfig,
    pub input: InputConfig,
    pub bonds: BondConfig,
    pub palette: Palette,
    pub frame: FrameConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            accepted_themes: vec!["academic".to_string(), "biotech".to_string()],
            atoms: AtomConfig::default(),
            molecules: MoleculeConfig::default(),
            helices: HelixConfig::default(),
            input: InputConfig::default(),
            bonds: BondConfig::default(),
            palette: Palette::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
