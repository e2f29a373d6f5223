use glam::Vec2;

/// Smallest animated entity: a point mass in the proximity graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Base disc radius; the drawn radius pulses around it.
    pub radius: f32,
    /// Fixed at creation.
    pub opacity: f32,
    /// Oscillation phase in radians, advances every frame.
    pub phase: f32,
    /// Index into the atom palette.
    pub tint: usize,
}

impl Atom {
    /// Create a resting atom at `pos`.
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            opacity: 0.1,
            phase: 0.0,
            tint: 0,
        }
    }

    // -- Builder pattern --

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_tint(mut self, tint: usize) -> Self {
        self.tint = tint;
        self
    }
}
