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
//! Geometric-algebra primitives shared by every module in this crate.

mod bivector3d;
mod rotor3d;
mod vector3d;

pub use bivector3d::Bivector3D;
pub use rotor3d::Rotor3D;
pub use vector3d::Vector3D;

use rand::Rng;
use std::f64::consts::PI;

/// Sample a uniformly random direction on the unit sphere.
///
/// Uses inverse-CDF sampling on the polar angle (`theta = acos(2u - 1)`)
/// rather than rejection, so it always terminates in constant time.
pub fn rand_on_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vector3D {
    let theta = (2.0 * rng.gen::<f64>() - 1.0).acos();
    let phi = 2.0 * PI * rng.gen::<f64>();
    Vector3D::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    )
}
