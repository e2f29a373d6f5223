//! Per-frame motion for every entity class.
//!
//! Each step accumulates forces into velocity (pointer repulsion, scroll
//! coupling), clamps the speed, damps, integrates, and then either wraps the
//! position (atoms, molecules) or lets a spring pull it home (helices). All
//! rates are per nominal frame and scaled by `dt`, with decay factors raised
//! to `dt`, so the motion is frame-rate independent.

use glam::Vec2;
use rand::Rng;

use crate::api::config::{FieldConfig, HelixConfig, MotionConfig};
use crate::components::{Atom, Helix, Molecule};
use crate::core::scene::Scene;
use crate::input::tracker::InputFrame;

/// Advance the whole scene by one frame of length `dt`.
///
/// `rng` is only used for helix retargeting.
pub fn advance<R: Rng + ?Sized>(
    scene: &mut Scene,
    input: &InputFrame,
    config: &FieldConfig,
    dt: f32,
    rng: &mut R,
) {
    let viewport = scene.viewport;
    let radius = config.input.repel_radius;

    for atom in &mut scene.atoms {
        step_atom(atom, input, &config.atoms.motion, radius, config.atoms.phase_rate, viewport, dt);
    }
    for molecule in &mut scene.molecules {
        step_molecule(molecule, input, &config.molecules.motion, radius, viewport, dt);
    }
    for helix in &mut scene.helices {
        step_helix(helix, input, &config.helices, radius, viewport, dt, rng);
    }

    scene.time += config.frame.time_rate * dt;
}

// ── Shared force terms ───────────────────────────────────────────────────

/// Repulsion impulse on a body at `pos` for this frame.
///
/// Linear falloff: full `strength` at the pointer, zero at `radius` and
/// beyond. Zero whenever the pointer is inactive. A body exactly under the
/// pointer is pushed along its own heading, or +X when at rest.
pub fn repulsion(pos: Vec2, vel: Vec2, input: &InputFrame, radius: f32, strength: f32, dt: f32) -> Vec2 {
    if !input.pointer_active || radius <= 0.0 {
        return Vec2::ZERO;
    }
    let away = pos - input.pointer;
    let dist = away.length();
    if dist >= radius {
        return Vec2::ZERO;
    }
    let dir = away
        .try_normalize()
        .or_else(|| vel.try_normalize())
        .unwrap_or(Vec2::X);
    dir * (1.0 - dist / radius) * strength * dt
}

/// Vertical nudge from scrolling. Scrolling down (positive velocity) pushes
/// content up, like a parallax layer.
#[inline]
pub fn scroll_push(scroll_velocity: f32, coupling: f32, dt: f32) -> Vec2 {
    Vec2::new(0.0, -scroll_velocity * coupling * dt)
}

/// Rescale `vel` to at most `max_speed`.
#[inline]
pub fn clamp_speed(vel: Vec2, max_speed: f32) -> Vec2 {
    vel.clamp_length_max(max_speed.max(0.0))
}

/// Decay the part of the speed above `cruise`; free drift is left alone.
pub fn damp_excess(vel: Vec2, cruise: f32, damping: f32, dt: f32) -> Vec2 {
    let speed = vel.length();
    if speed <= cruise {
        return vel;
    }
    let damped = (speed * damping.powf(dt)).max(cruise);
    vel * (damped / speed)
}

/// Toroidal wrap on one axis: past `extent + margin` reappears at `-margin`
/// and vice versa.
#[inline]
pub fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
    if value > extent + margin {
        -margin
    } else if value < -margin {
        extent + margin
    } else {
        value
    }
}

pub fn wrap(pos: Vec2, viewport: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, viewport.x, margin),
        wrap_axis(pos.y, viewport.y, margin),
    )
}

/// Velocity update shared by atoms and molecules.
fn drive(pos: Vec2, vel: Vec2, input: &InputFrame, motion: &MotionConfig, radius: f32, dt: f32) -> Vec2 {
    let mut vel = vel;
    vel += repulsion(pos, vel, input, radius, motion.repel_strength, dt);
    vel += scroll_push(input.scroll_velocity, motion.scroll_coupling, dt);
    vel = clamp_speed(vel, motion.max_speed);
    damp_excess(vel, motion.cruise_speed, motion.damping, dt)
}

// ── Entity steps ─────────────────────────────────────────────────────────

pub fn step_atom(
    atom: &mut Atom,
    input: &InputFrame,
    motion: &MotionConfig,
    radius: f32,
    phase_rate: f32,
    viewport: Vec2,
    dt: f32,
) {
    atom.vel = drive(atom.pos, atom.vel, input, motion, radius, dt);
    atom.pos = wrap(atom.pos + atom.vel * dt, viewport, motion.wrap_margin);
    atom.phase += phase_rate * dt;
}

pub fn step_molecule(
    molecule: &mut Molecule,
    input: &InputFrame,
    motion: &MotionConfig,
    radius: f32,
    viewport: Vec2,
    dt: f32,
) {
    molecule.vel = drive(molecule.pos, molecule.vel, input, motion, radius, dt);
    molecule.pos = wrap(molecule.pos + molecule.vel * dt, viewport, motion.wrap_margin);
    molecule.rotation += molecule.rotation_speed * dt;
}

pub fn step_helix<R: Rng + ?Sized>(
    helix: &mut Helix,
    input: &InputFrame,
    cfg: &HelixConfig,
    radius: f32,
    viewport: Vec2,
    dt: f32,
    rng: &mut R,
) {
    let center = helix.center(viewport);
    let mut vel = helix.drift_vel;
    vel += repulsion(center, vel, input, radius, cfg.repel_strength, dt);
    vel += scroll_push(input.scroll_velocity, cfg.scroll_coupling * helix.parallax, dt);
    // Spring back toward the anchor, x and y tuned independently
    vel.x -= helix.drift.x * cfg.spring_x * dt;
    vel.y -= helix.drift.y * cfg.spring_y * dt;
    vel = clamp_speed(vel, cfg.max_drift_speed);
    vel.x *= cfg.damping_x.powf(dt);
    vel.y *= cfg.damping_y.powf(dt);
    helix.drift_vel = vel;
    helix.drift += vel * dt;

    helix.retarget_timer -= dt;
    if helix.retarget_timer <= 0.0 {
        helix.target_angle = cfg.angle.sample(rng);
        helix.retarget_timer = cfg.retarget_interval.sample(rng);
    }
    helix.angular_vel += (helix.target_angle - helix.angle) * cfg.angle_spring * dt;
    helix.angular_vel *= cfg.angle_damping.powf(dt);
    helix.angle += helix.angular_vel * dt;
}
