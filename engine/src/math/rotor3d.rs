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
//! A rotor: the geometric-algebra analogue of a unit quaternion.
//!
//! A `Rotor3D` rotates a [`Vector3D`] by the sandwich product `R v R⁻¹`.
//! Unlike a quaternion it is built directly out of scalar + bivector parts,
//! which keeps the construction from an (angle, plane) pair free of any
//! axis-vector intermediate.

use super::bivector3d::Bivector3D;
use super::vector3d::Vector3D;

/// A rotor: scalar part `s` plus a bivector part spanning the xy/xz/yz
/// planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotor3D {
    pub s: f64,
    pub b_xy: f64,
    pub b_xz: f64,
    pub b_yz: f64,
}

impl Rotor3D {
    /// The identity rotor (no rotation).
    pub const IDENTITY: Rotor3D = Rotor3D { s: 1.0, b_xy: 0.0, b_xz: 0.0, b_yz: 0.0 };

    pub const fn new(s: f64, b_xy: f64, b_xz: f64, b_yz: f64) -> Self {
        Rotor3D { s, b_xy, b_xz, b_yz }
    }

    /// Build the rotor that rotates by `angle_rad` radians in the plane
    /// spanned by `plane` (which need not be normalized).
    pub fn from_angle_plane(angle_rad: f64, plane: &Bivector3D) -> Self {
        let unit_plane = *plane / plane.norm();
        let sin_half = (angle_rad / 2.0).sin();
        Rotor3D {
            s: (angle_rad / 2.0).cos(),
            b_xy: -sin_half * unit_plane.xy,
            b_xz: -sin_half * unit_plane.xz,
            b_yz: -sin_half * unit_plane.yz,
        }
    }

    pub fn norm2(&self) -> f64 {
        self.s * self.s + self.b_xy * self.b_xy + self.b_xz * self.b_xz + self.b_yz * self.b_yz
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Return this rotor scaled to unit norm.
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        Rotor3D {
            s: self.s / n,
            b_xy: self.b_xy / n,
            b_xz: self.b_xz / n,
            b_yz: self.b_yz / n,
        }
    }

    /// The reverse rotor (the bivector part negated), which undoes the
    /// rotation this rotor applies.
    pub fn reverse(&self) -> Self {
        Rotor3D::new(self.s, -self.b_xy, -self.b_xz, -self.b_yz)
    }

    /// Compose two rotors: applying the result is equivalent to applying
    /// `rhs` first and then `self`.
    pub fn compose(&self, rhs: &Rotor3D) -> Self {
        Rotor3D {
            s: self.s * rhs.s - self.b_xy * rhs.b_xy - self.b_xz * rhs.b_xz - self.b_yz * rhs.b_yz,
            b_xy: self.s * rhs.b_xy + self.b_xy * rhs.s - self.b_xz * rhs.b_yz
                + self.b_yz * rhs.b_xz,
            b_xz: self.s * rhs.b_xz + self.b_xz * rhs.s + self.b_xy * rhs.b_yz
                - self.b_yz * rhs.b_xy,
            b_yz: self.s * rhs.b_yz + self.b_yz * rhs.s - self.b_xy * rhs.b_xz
                + self.b_xz * rhs.b_xy,
        }
    }

    /// Rotate a vector by this rotor via the sandwich product `R v R⁻¹`,
    /// expanded term-by-term so no explicit trivector temporary is needed.
    pub fn rotate(&self, vec: &Vector3D) -> Vector3D {
        let tmp = Vector3D::new(
            self.s * vec.x + vec.y * self.b_xy + vec.z * self.b_xz,
            self.s * vec.y - vec.x * self.b_xy + vec.z * self.b_yz,
            self.s * vec.z - vec.x * self.b_xz - vec.y * self.b_yz,
        );

        // Trivector component picked up by the first half of the sandwich.
        let t_xyz = vec.x * self.b_yz - vec.y * self.b_xz + vec.z * self.b_xy;

        Vector3D::new(
            self.s * tmp.x + tmp.y * self.b_xy + tmp.z * self.b_xz + t_xyz * self.b_yz,
            self.s * tmp.y - tmp.x * self.b_xy - t_xyz * self.b_xz + tmp.z * self.b_yz,
            self.s * tmp.z + t_xyz * self.b_xy - tmp.x * self.b_xz - tmp.y * self.b_yz,
        )
    }
}
