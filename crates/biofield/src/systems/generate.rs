//! Scene population.
//!
//! Every call draws a fresh, independent population from the injected random
//! source. Collections are built in full and then swapped in, so a scene is
//! never observed half-populated.

use glam::Vec2;
use rand::Rng;

use crate::api::config::{AtomConfig, FieldConfig, HelixConfig, MoleculeConfig};
use crate::components::{Atom, Helix, Molecule, MoleculeShape};
use crate::core::scene::Scene;

/// Build a new scene for `viewport`.
pub fn generate<R: Rng + ?Sized>(config: &FieldConfig, viewport: Vec2, rng: &mut R) -> Scene {
    let mut scene = Scene::new(viewport);
    regenerate(&mut scene, config, viewport, rng);
    scene
}

/// Replace all three collections of `scene` with a fresh population sized to
/// `viewport`. Animation time is kept so the helix wave does not jump.
pub fn regenerate<R: Rng + ?Sized>(scene: &mut Scene, config: &FieldConfig, viewport: Vec2, rng: &mut R) {
    let atoms = spawn_atoms(&config.atoms, config.palette.atoms.len(), viewport, rng);
    let molecules = spawn_molecules(&config.molecules, viewport, rng);
    let helices = spawn_helices(&config.helices, rng);

    scene.viewport = viewport;
    scene.replace_entities(atoms, molecules, helices);

    log::debug!(
        "scene regenerated at {}x{}: {} atoms, {} molecules, {} helices",
        viewport.x,
        viewport.y,
        scene.atoms.len(),
        scene.molecules.len(),
        scene.helices.len(),
    );
}

fn random_point<R: Rng + ?Sized>(viewport: Vec2, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * viewport.x.max(0.0),
        rng.random::<f32>() * viewport.y.max(0.0),
    )
}

pub fn spawn_atoms<R: Rng + ?Sized>(
    cfg: &AtomConfig,
    tints: usize,
    viewport: Vec2,
    rng: &mut R,
) -> Vec<Atom> {
    (0..cfg.count)
        .map(|_| {
            let pos = random_point(viewport, rng);
            let vel = Vec2::new(cfg.velocity.sample(rng), cfg.velocity.sample(rng));
            let tint = if tints > 0 { rng.random_range(0..tints) } else { 0 };
            Atom::new(pos, cfg.radius.sample(rng))
                .with_vel(vel)
                .with_opacity(cfg.opacity.sample(rng))
                .with_phase(cfg.phase.sample(rng))
                .with_tint(tint)
        })
        .collect()
}

pub fn spawn_molecules<R: Rng + ?Sized>(cfg: &MoleculeConfig, viewport: Vec2, rng: &mut R) -> Vec<Molecule> {
    (0..cfg.count)
        .map(|_| Molecule {
            pos: random_point(viewport, rng),
            vel: Vec2::new(cfg.velocity.sample(rng), cfg.velocity.sample(rng)),
            rotation: cfg.rotation.sample(rng),
            rotation_speed: cfg.rotation_speed.sample(rng),
            shape: MoleculeShape::ALL[rng.random_range(0..MoleculeShape::ALL.len())],
            size: cfg.size.sample(rng),
            opacity: cfg.opacity.sample(rng),
        })
        .collect()
}

pub fn spawn_helices<R: Rng + ?Sized>(cfg: &HelixConfig, rng: &mut R) -> Vec<Helix> {
    (0..cfg.count)
        .map(|_| {
            let angle = cfg.angle.sample(rng);
            Helix {
                anchor: Vec2::new(cfg.anchor_x.sample(rng), cfg.anchor_y.sample(rng)),
                drift: Vec2::ZERO,
                drift_vel: Vec2::ZERO,
                angle,
                target_angle: angle,
                angular_vel: 0.0,
                amplitude: cfg.amplitude.sample(rng),
                frequency: cfg.frequency.sample(rng),
                phase: cfg.phase.sample(rng),
                scale: cfg.scale.sample(rng),
                opacity: cfg.opacity.sample(rng),
                parallax: cfg.parallax.sample(rng),
                retarget_timer: cfg.initial_timer.sample(rng),
            }
        })
        .collect()
}
