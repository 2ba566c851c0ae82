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
//! An oriented plane element in 3D geometric algebra.
//!
//! `Bivector3D` is used in this crate exclusively to represent angular
//! momentum (`L_tot`), which in 3D is more naturally a bivector than the
//! textbook axial-vector cross product. `wedge` and `getPerpendicular` let
//! callers move between the bivector and its Hodge-dual vector when needed.

use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use super::vector3d::Vector3D;

/// A bivector (oriented plane element) with components on the xy, xz and yz
/// basis planes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bivector3D {
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

impl Bivector3D {
    pub const ZERO: Bivector3D = Bivector3D { xy: 0.0, xz: 0.0, yz: 0.0 };

    pub const fn new(xy: f64, xz: f64, yz: f64) -> Self {
        Bivector3D { xy, xz, yz }
    }

    pub fn norm2(&self) -> f64 {
        self.xy * self.xy + self.xz * self.xz + self.yz * self.yz
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// The wedge (outer) product of two vectors, `a ^ b`.
    pub fn wedge(a: &Vector3D, b: &Vector3D) -> Bivector3D {
        Bivector3D::new(
            a.x * b.y - a.y * b.x,
            a.x * b.z - a.z * b.x,
            a.y * b.z - a.z * b.y,
        )
    }

    /// The Hodge dual: the vector perpendicular to the plane this bivector
    /// represents, with magnitude equal to the bivector's norm.
    pub fn get_perpendicular(&self) -> Vector3D {
        Vector3D::new(self.yz, -self.xz, self.xy)
    }
}

impl Add for Bivector3D {
    type Output = Bivector3D;
    fn add(self, rhs: Bivector3D) -> Bivector3D {
        Bivector3D::new(self.xy + rhs.xy, self.xz + rhs.xz, self.yz + rhs.yz)
    }
}

impl AddAssign for Bivector3D {
    fn add_assign(&mut self, rhs: Bivector3D) {
        self.xy += rhs.xy;
        self.xz += rhs.xz;
        self.yz += rhs.yz;
    }
}

impl Sub for Bivector3D {
    type Output = Bivector3D;
    fn sub(self, rhs: Bivector3D) -> Bivector3D {
        Bivector3D::new(self.xy - rhs.xy, self.xz - rhs.xz, self.yz - rhs.yz)
    }
}

impl SubAssign for Bivector3D {
    fn sub_assign(&mut self, rhs: Bivector3D) {
        self.xy -= rhs.xy;
        self.xz -= rhs.xz;
        self.yz -= rhs.yz;
    }
}

impl Mul<f64> for Bivector3D {
    type Output = Bivector3D;
    fn mul(self, rhs: f64) -> Bivector3D {
        Bivector3D::new(self.xy * rhs, self.xz * rhs, self.yz * rhs)
    }
}

impl Div<f64> for Bivector3D {
    type Output = Bivector3D;
    fn div(self, rhs: f64) -> Bivector3D {
        Bivector3D::new(self.xy / rhs, self.xz / rhs, self.yz / rhs)
    }
}

impl std::iter::Sum for Bivector3D {
    fn sum<I: Iterator<Item = Bivector3D>>(iter: I) -> Bivector3D {
        iter.fold(Bivector3D::ZERO, |acc, b| acc + b)
    }
}
