use glam::Vec2;
use std::f32::consts::{FRAC_PI_3, TAU};

/// Bond angle of the bent triple (water-like), in radians.
const BENT_ANGLE: f32 = 104.5 * std::f32::consts::PI / 180.0;

/// Fixed topology of a molecule glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeShape {
    /// Hexagonal ring with alternating inner bonds.
    Ring,
    /// Heavy centre with two nodes at 104.5 degrees.
    BentTriple,
    /// Centre with three nodes at 120 degrees.
    StarTriple,
}

impl MoleculeShape {
    pub const ALL: [MoleculeShape; 3] = [
        MoleculeShape::Ring,
        MoleculeShape::BentTriple,
        MoleculeShape::StarTriple,
    ];

    /// Outer vertex offsets relative to the molecule centre.
    ///
    /// Ring: six vertices at distance `size`. Triples: the outer nodes only;
    /// the centre node sits at the origin.
    pub fn template(self, size: f32, rotation: f32) -> Vec<Vec2> {
        match self {
            MoleculeShape::Ring => (0..6)
                .map(|i| Vec2::from_angle(rotation + FRAC_PI_3 * i as f32) * size)
                .collect(),
            MoleculeShape::BentTriple => [-0.5, 0.5]
                .iter()
                .map(|side| Vec2::from_angle(rotation + side * BENT_ANGLE) * size)
                .collect(),
            MoleculeShape::StarTriple => (0..3)
                .map(|i| Vec2::from_angle(rotation + TAU / 3.0 * i as f32) * size)
                .collect(),
        }
    }
}

/// Small rigid polygon drifting and spinning through the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians. Not normalized; only ever fed to trig functions.
    pub rotation: f32,
    pub rotation_speed: f32,
    pub shape: MoleculeShape,
    pub size: f32,
    pub opacity: f32,
}
