// Copyright 2025 The ENKA-S Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Energy, momentum and scale functionals of a [`System`], plus the
//! Hénon-unit rescaling every integrator applies at `set_system`.

use crate::math::{Bivector3D, Vector3D};
use crate::system::System;

/// Gravitational constant in pc, solar masses and km/s. Only meaningful
/// before a system has been rescaled to Hénon units (G = 1 afterwards);
/// generators that sample in physical units and the one-time Hénon
/// rescaling are the only callers that should ever reference it.
pub const G: f64 = 0.004300917271;

/// `Σ_{i<j} mᵢmⱼ / sqrt(‖rᵢ−rⱼ‖² + ε²)`, the positive pairwise mass sum that
/// underlies both the potential energy and the virial radius.
fn softened_pairwise_mass_sum(system: &System, softening: f64) -> f64 {
    let eps2 = softening * softening;
    let n = system.count();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let dist2 = (system.positions[i] - system.positions[j]).norm2() + eps2;
            sum += system.masses[i] * system.masses[j] / dist2.sqrt();
        }
    }
    sum
}

/// Total kinetic energy, `½ Σ mᵢ‖vᵢ‖²`.
pub fn kinetic_energy(system: &System) -> f64 {
    let sum: f64 = system
        .velocities
        .iter()
        .zip(&system.masses)
        .map(|(v, &m)| m * v.norm2())
        .sum();
    0.5 * sum
}

/// Total potential energy, `−g · Σ_{i<j} mᵢmⱼ / sqrt(‖rᵢ−rⱼ‖² + ε²)`.
///
/// `g` is the gravitational constant to use: pass [`G`] for a system still
/// in physical units, or `1.0` once a system has been rescaled to Hénon
/// units (the case for every system an integrator actually steps).
pub fn potential_energy(system: &System, softening: f64, g: f64) -> f64 {
    -g * softened_pairwise_mass_sum(system, softening)
}

/// Total angular momentum, `Σ wedge(rᵢ, mᵢvᵢ)`.
pub fn angular_momentum(system: &System) -> Bivector3D {
    system
        .positions
        .iter()
        .zip(&system.velocities)
        .zip(&system.masses)
        .map(|((r, v), &m)| Bivector3D::wedge(r, &(*v * m)))
        .sum()
}

pub fn total_mass(system: &System) -> f64 {
    system.masses.iter().sum()
}

/// Centre of mass position, `(Σ mᵢrᵢ) / Σmᵢ`.
pub fn center_of_mass_pos(system: &System) -> Vector3D {
    let weighted: Vector3D = system
        .positions
        .iter()
        .zip(&system.masses)
        .map(|(r, &m)| *r * m)
        .sum();
    weighted / total_mass(system)
}

/// Centre of mass velocity, `(Σ mᵢvᵢ) / Σmᵢ`.
pub fn center_of_mass_vel(system: &System) -> Vector3D {
    let weighted: Vector3D = system
        .velocities
        .iter()
        .zip(&system.masses)
        .map(|(v, &m)| *v * m)
        .sum();
    weighted / total_mass(system)
}

/// Translate every position and velocity so the system sits in its own
/// barycentric frame (zero centre-of-mass position and velocity).
pub fn center_system(system: &mut System) {
    let com_pos = center_of_mass_pos(system);
    let com_vel = center_of_mass_vel(system);
    for r in &mut system.positions {
        *r -= com_pos;
    }
    for v in &mut system.velocities {
        *v -= com_vel;
    }
}

/// Virial radius, `M² / Σ_{i<j} mᵢmⱼ/‖rᵢ−rⱼ‖` (softened, matching the force
/// law actually integrated).
pub fn virial_radius(system: &System, softening: f64) -> f64 {
    let m = total_mass(system);
    m * m / softened_pairwise_mass_sum(system, softening)
}

/// Mean-square velocity about the centre-of-mass frame, `(1/N) Σ ‖vᵢ − com_vel‖²`.
pub fn mean_square_velocity(system: &System) -> f64 {
    let com_vel = center_of_mass_vel(system);
    let n = system.count();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = system.velocities.iter().map(|v| (*v - com_vel).norm2()).sum();
    sum / n as f64
}

/// Crossing time estimator, `r_vir / sqrt(ms_vel)` (Binney & Tremaine).
pub fn crossing_time(r_vir: f64, ms_vel: f64) -> f64 {
    r_vir / ms_vel.sqrt()
}

/// Rescale a system, in place, to standard N-body (Hénon) units: total mass
/// 1, total energy −¼, with `G` implicitly 1 from then on.
///
/// Centres the system first, then derives independent length and velocity
/// scale factors from the requirement that the rescaled dynamics are
/// dimensionally the same system under `G = 1`: the length unit is the
/// system's physical virial radius at its current total energy, and the
/// velocity unit follows from `G·M/L_unit = V_unit²`.
pub fn scale_to_henon_units(system: &mut System, softening: f64) {
    center_system(system);

    let e_kin = kinetic_energy(system);
    let e_pot = potential_energy(system, softening, G);
    let total_energy = (e_kin + e_pot).abs();
    let m = total_mass(system);

    let length_scale = 4.0 * total_energy / (G * m * m);
    let velocity_scale = (m / (4.0 * total_energy)).sqrt();

    for r in &mut system.positions {
        *r *= length_scale;
    }
    for v in &mut system.velocities {
        *v *= velocity_scale;
    }
    for mass in &mut system.masses {
        *mass /= m;
    }
}

/// Scalar and vector functionals of a [`System`] at one instant, sampled by
/// a [`crate::runner::Runner`] for the diagnostics stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub e_kin: f64,
    pub e_pot: f64,
    pub l_tot: Bivector3D,
    pub com_pos: Vector3D,
    pub com_vel: Vector3D,
    pub r_vir: f64,
    pub ms_vel: f64,
    pub t_cr: f64,
}

impl Diagnostics {
    /// Compute every functional of `system` at once. `g` should be `1.0`
    /// for any system that has already passed through
    /// [`scale_to_henon_units`] (the common case).
    pub fn compute(system: &System, softening: f64, g: f64) -> Diagnostics {
        let r_vir = virial_radius(system, softening);
        let ms_vel = mean_square_velocity(system);
        Diagnostics {
            e_kin: kinetic_energy(system),
            e_pot: potential_energy(system, softening, g),
            l_tot: angular_momentum(system),
            com_pos: center_of_mass_pos(system),
            com_vel: center_of_mass_vel(system),
            r_vir,
            ms_vel,
            t_cr: crossing_time(r_vir, ms_vel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_body_system() -> System {
        System::from_arrays(
            vec![
                Vector3D::new(0.0, 0.0, 0.0),
                Vector3D::new(1.0, 0.0, 0.0),
                Vector3D::new(0.0, 1.0, 0.0),
            ],
            vec![
                Vector3D::new(1.0, 0.0, 0.0),
                Vector3D::new(0.0, 2.0, 0.0),
                Vector3D::new(0.0, 0.0, 3.0),
            ],
            vec![1.0, 2.0, 3.0],
        )
    }

    #[test]
    fn kinetic_energy_matches_reference_scenario() {
        assert_eq!(kinetic_energy(&three_body_system()), 18.0);
    }

    #[test]
    fn potential_energy_matches_reference_scenario() {
        let e_pot = potential_energy(&three_body_system(), 1e-6, 1.0);
        assert!((e_pot - (-9.2426406871157241)).abs() < 1e-9);
    }

    #[test]
    fn angular_momentum_matches_reference_scenario() {
        let system = System::from_arrays(
            vec![
                Vector3D::new(1.0, 0.0, 0.0),
                Vector3D::new(0.0, 1.0, 0.0),
                Vector3D::new(0.0, 0.0, 1.0),
            ],
            vec![
                Vector3D::new(0.0, 1.0, 2.0),
                Vector3D::new(2.0, 3.0, 4.0),
                Vector3D::new(5.0, 6.0, 7.0),
            ],
            vec![1.0, 2.0, 3.0],
        );
        assert!((angular_momentum(&system).norm() - 16.673332000533065).abs() < 1e-9);
    }

    #[test]
    fn center_system_zeroes_com_pos_and_vel() {
        let mut system = System::from_arrays(
            vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(2.0, 0.0, 0.0), Vector3D::new(4.0, 0.0, 0.0)],
            vec![Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(2.0, 0.0, 0.0), Vector3D::new(4.0, 0.0, 0.0)],
            vec![1.0, 2.0, 4.0],
        );
        center_system(&mut system);
        assert!((system.positions[0].x - (-2.0)).abs() < 1e-12);
        assert!((system.positions[1].x - (-1.0)).abs() < 1e-12);
        assert!((system.positions[2].x - 1.0).abs() < 1e-12);
        assert!((system.velocities[0].x - (-2.0)).abs() < 1e-12);
        assert!((system.velocities[1].x - (-1.0)).abs() < 1e-12);
        assert!((system.velocities[2].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn henon_scaling_normalizes_mass_and_energy() {
        let mut system = three_body_system();
        scale_to_henon_units(&mut system, 1e-3);

        assert!((total_mass(&system) - 1.0).abs() < 1e-9);

        let e_kin = kinetic_energy(&system);
        let e_pot = potential_energy(&system, 1e-3, 1.0);
        assert!((e_kin + e_pot - (-0.25)).abs() < 1e-6);

        assert!(center_of_mass_pos(&system).norm() < 1e-9);
        assert!(center_of_mass_vel(&system).norm() < 1e-9);
    }

    #[test]
    fn diagnostics_compute_is_internally_consistent() {
        let mut system = three_body_system();
        scale_to_henon_units(&mut system, 1e-3);
        let diag = Diagnostics::compute(&system, 1e-3, 1.0);
        assert!((diag.t_cr - diag.r_vir / diag.ms_vel.sqrt()).abs() < 1e-12);
    }
}
