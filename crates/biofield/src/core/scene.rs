use glam::Vec2;

use crate::components::{Atom, Helix, Molecule};

/// The three entity collections plus viewport and animation time.
///
/// Flat Vecs; entity counts are small fixed constants. Collections are only
/// ever replaced wholesale (see [`crate::systems::generate`]), never grown or
/// shrunk individually.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub atoms: Vec<Atom>,
    pub molecules: Vec<Molecule>,
    pub helices: Vec<Helix>,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Accumulated animation time driving the helix wave.
    pub time: f32,
}

impl Scene {
    /// Empty scene for the given viewport.
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Swap in freshly generated collections, keeping viewport and time.
    pub fn replace_entities(&mut self, atoms: Vec<Atom>, molecules: Vec<Molecule>, helices: Vec<Helix>) {
        self.atoms = atoms;
        self.molecules = molecules;
        self.helices = helices;
    }

    /// Total number of entities across all collections.
    pub fn len(&self) -> usize {
        self.atoms.len() + self.molecules.len() + self.helices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions of every entity in collection order (helices by centre).
    pub fn positions(&self) -> Vec<Vec2> {
        self.atoms
            .iter()
            .map(|a| a.pos)
            .chain(self.molecules.iter().map(|m| m.pos))
            .chain(self.helices.iter().map(|h| h.center(self.viewport)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_is_empty() {
        let scene = Scene::new(Vec2::new(800.0, 600.0));
        assert!(scene.is_empty());
        assert_eq!(scene.viewport, Vec2::new(800.0, 600.0));
        assert_eq!(scene.time, 0.0);
    }

    #[test]
    fn replace_keeps_time() {
        let mut scene = Scene::new(Vec2::new(100.0, 100.0));
        scene.time = 4.5;
        scene.replace_entities(vec![Atom::new(Vec2::ZERO, 2.0)], Vec::new(), Vec::new());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.time, 4.5);
        assert_eq!(scene.positions(), vec![Vec2::ZERO]);
    }
}
