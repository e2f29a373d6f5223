use glam::Vec2;

/// Rotating double sine-wave structure.
///
/// The anchor is stored in fractional viewport coordinates so a resize keeps
/// helices in the same relative place until the next regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    /// Fractional viewport position (0..1 on each axis).
    pub anchor: Vec2,
    /// Pixel offset from the anchor; spring-restored toward zero.
    pub drift: Vec2,
    pub drift_vel: Vec2,
    /// Current rotation in radians.
    pub angle: f32,
    /// Angle the rotation spring pulls toward.
    pub target_angle: f32,
    pub angular_vel: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Scroll coupling strength.
    pub parallax: f32,
    /// Frames until the next target angle is picked.
    pub retarget_timer: f32,
}

impl Helix {
    /// Pixel position of the helix centre for the given viewport.
    pub fn center(&self, viewport: Vec2) -> Vec2 {
        self.anchor * viewport + self.drift
    }

    /// Signed backbone offset at local y for the given animation time.
    pub fn strand_offset(&self, local_y: f32, time: f32) -> f32 {
        self.amplitude * self.scale * (local_y * self.frequency + time + self.phase).sin()
    }
}
