//! Frame drawing.
//!
//! Pure read of the scene: clear, helices, molecules, the atom proximity
//! graph, then the atoms themselves. Everything goes through [`Surface`], so
//! the same pass feeds the browser canvas and the tessellating vector surface.

use glam::Vec2;

use crate::api::config::{BondConfig, FieldConfig, FrameConfig, Palette};
use crate::components::{Atom, Helix, Molecule, MoleculeShape};
use crate::core::scene::Scene;
use crate::renderer::traits::Surface;

/// Smallest helix sample spacing; keeps a bad config from exploding the path.
const MIN_HELIX_STEP: f32 = 0.5;
/// Inner bonds of the ring sit at this fraction of the circumradius.
const RING_INNER: f32 = 0.72;

/// Draw one full frame of `scene`.
pub fn draw<S: Surface + ?Sized>(scene: &Scene, config: &FieldConfig, surface: &mut S) {
    surface.clear_rect(Vec2::ZERO, scene.viewport);

    for helix in &scene.helices {
        draw_helix(helix, scene, config, surface);
    }
    for molecule in &scene.molecules {
        draw_molecule(molecule, &config.palette, surface);
    }
    draw_bonds(&scene.atoms, &config.bonds, &config.palette, surface);
    for atom in &scene.atoms {
        draw_atom(atom, &config.bonds, &config.palette, surface);
    }
}

/// Opacity of the bond between two atoms `distance` apart.
///
/// Linear falloff from `max_alpha` at zero distance to exactly zero at the
/// threshold; zero beyond it.
pub fn bond_opacity(distance: f32, threshold: f32, max_alpha: f32) -> f32 {
    if threshold <= 0.0 || distance >= threshold {
        return 0.0;
    }
    (1.0 - distance / threshold) * max_alpha
}

// ── Helices ──────────────────────────────────────────────────────────────

/// Local-space sample points of both backbones for `helix`.
pub fn helix_strands(helix: &Helix, viewport: Vec2, time: f32, frame: &FrameConfig, half_length: f32) -> (Vec<Vec2>, Vec<Vec2>) {
    let half = half_length * viewport.length() * helix.scale;
    if !(half > 0.0 && half.is_finite()) {
        return (Vec::new(), Vec::new());
    }
    let step = frame.helix_step.max(MIN_HELIX_STEP);
    let samples = (2.0 * half / step) as usize + 1;

    (0..samples)
        .map(|i| {
            let y = -half + i as f32 * step;
            let off = helix.strand_offset(y, time);
            (Vec2::new(off, y), Vec2::new(-off, y))
        })
        .unzip()
}

pub fn draw_helix<S: Surface + ?Sized>(helix: &Helix, scene: &Scene, config: &FieldConfig, surface: &mut S) {
    let frame = &config.frame;
    let palette = &config.palette;
    let (strand_a, strand_b) = helix_strands(helix, scene.viewport, scene.time, frame, config.helices.half_length);
    if strand_a.is_empty() {
        return;
    }

    surface.save();
    surface.translate(helix.center(scene.viewport));
    surface.rotate(helix.angle);

    let a_color = palette.strand_a.with_alpha(helix.opacity);
    let b_color = palette.strand_b.with_alpha(helix.opacity * 0.85);
    surface.stroke_polyline(&strand_a, 1.2 * helix.scale, a_color);
    surface.stroke_polyline(&strand_b, 1.2 * helix.scale, b_color);

    let rung_color = palette.rung.with_alpha(helix.opacity * 0.6);
    let marker_radius = 2.2 * helix.scale;
    for (i, (a, b)) in strand_a.iter().zip(&strand_b).enumerate() {
        if frame.rung_every > 0 && i % frame.rung_every as usize == 0 {
            surface.stroke_line(*a, *b, 0.8 * helix.scale, rung_color);
        }
        if frame.marker_every > 0 && i % frame.marker_every as usize == 0 {
            surface.fill_circle(*a, marker_radius, a_color.fade(1.4));
            surface.fill_circle(*b, marker_radius, b_color.fade(1.4));
        }
    }

    surface.restore();
}

// ── Molecules ────────────────────────────────────────────────────────────

pub fn draw_molecule<S: Surface + ?Sized>(molecule: &Molecule, palette: &Palette, surface: &mut S) {
    let color = palette.molecule.with_alpha(molecule.opacity);
    let center = molecule.pos;
    let size = molecule.size;
    let verts: Vec<Vec2> = molecule
        .shape
        .template(size, molecule.rotation)
        .into_iter()
        .map(|v| center + v)
        .collect();

    match molecule.shape {
        MoleculeShape::Ring => {
            surface.begin_path();
            surface.move_to(verts[0]);
            for v in &verts[1..] {
                surface.line_to(*v);
            }
            surface.close_path();
            surface.set_line_width(1.2);
            surface.set_stroke(color);
            surface.stroke();

            // Alternating inner bonds on edges 0, 2 and 4
            for k in (0..verts.len()).step_by(2) {
                let a = center + (verts[k] - center) * RING_INNER;
                let b = center + (verts[(k + 1) % verts.len()] - center) * RING_INNER;
                surface.stroke_line(a, b, 0.8, color.fade(0.8));
            }
            for v in &verts {
                surface.fill_circle(*v, size * 0.08, color.fade(0.9));
            }
        }
        MoleculeShape::BentTriple | MoleculeShape::StarTriple => {
            let (core_r, node_r) = match molecule.shape {
                MoleculeShape::BentTriple => (0.22, 0.14),
                _ => (0.16, 0.12),
            };
            for v in &verts {
                surface.stroke_line(center, *v, 1.2, color);
            }
            surface.fill_circle(center, size * core_r, color);
            for v in &verts {
                surface.fill_circle(*v, size * node_r, color.fade(0.85));
            }
        }
    }
}

// ── Atoms and bonds ──────────────────────────────────────────────────────

/// Draw a line for every atom pair closer than the bond threshold.
///
/// O(n²) over atoms. Fine for the fixed counts this backdrop uses; it is the
/// first thing to revisit if counts ever grow into the thousands.
pub fn draw_bonds<S: Surface + ?Sized>(atoms: &[Atom], bonds: &BondConfig, palette: &Palette, surface: &mut S) {
    let double_below = bonds.threshold * bonds.double_fraction;
    for (i, a) in atoms.iter().enumerate() {
        for b in &atoms[i + 1..] {
            let dist = a.pos.distance(b.pos);
            let alpha = bond_opacity(dist, bonds.threshold, bonds.max_alpha);
            if alpha <= 0.0 {
                continue;
            }
            let color = palette.bond.with_alpha(alpha);
            surface.stroke_line(a.pos, b.pos, bonds.line_width, color);

            if dist < double_below {
                let offset = (b.pos - a.pos).perp().normalize_or_zero() * bonds.double_offset;
                surface.stroke_line(a.pos + offset, b.pos + offset, bonds.line_width * 0.5, color.fade(0.6));
            }
        }
    }
}

/// Drawn radius of an atom at its current phase.
pub fn pulse_radius(atom: &Atom, amplitude: f32) -> f32 {
    (atom.radius + atom.phase.sin() * amplitude).max(0.3)
}

pub fn draw_atom<S: Surface + ?Sized>(atom: &Atom, bonds: &BondConfig, palette: &Palette, surface: &mut S) {
    let base = palette.atoms.get(atom.tint).copied().unwrap_or(palette.bond);
    let color = base.with_alpha(atom.opacity);
    let r = pulse_radius(atom, bonds.pulse_amplitude);

    surface.fill_circle(atom.pos, r, color);

    if atom.radius > bonds.halo_radius {
        surface.fill_circle(atom.pos, r + 4.0, color.fade(0.3));

        let ring = r + 6.0;
        surface.begin_path();
        surface.ellipse(atom.pos, Vec2::new(ring, ring * 0.45), atom.phase * 0.5);
        surface.set_line_width(0.5);
        surface.set_stroke(color.fade(0.5));
        surface.stroke();
    }
}
