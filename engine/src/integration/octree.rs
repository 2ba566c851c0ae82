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
//! A Barnes-Hut octree stored in a flat arena instead of heap-allocated
//! nodes, rebuilt from scratch every step.

use crate::math::Vector3D;
use crate::system::System;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Cube {
    center: Vector3D,
    half_size: f64,
}

impl Cube {
    fn octant_of(&self, point: &Vector3D) -> usize {
        let mut index = 0;
        if point.x >= self.center.x {
            index |= 1;
        }
        if point.y >= self.center.y {
            index |= 2;
        }
        if point.z >= self.center.z {
            index |= 4;
        }
        index
    }

    fn child(&self, octant: usize) -> Cube {
        let half = self.half_size / 2.0;
        let sign = |bit: usize| if octant & bit != 0 { 1.0 } else { -1.0 };
        Cube {
            center: Vector3D::new(
                self.center.x + sign(1) * half,
                self.center.y + sign(2) * half,
                self.center.z + sign(4) * half,
            ),
            half_size: half,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    cube: Cube,
    mass: f64,
    com: Vector3D,
    /// Set on a leaf holding exactly one particle.
    particle_index: Option<usize>,
    /// Arena indices of the eight children, once subdivided.
    children: Option<[u32; 8]>,
}

impl Node {
    fn leaf(cube: Cube) -> Self {
        Node { cube, mass: 0.0, com: Vector3D::new(0.0, 0.0, 0.0), particle_index: None, children: None }
    }
}

/// A rebuild-every-step Barnes-Hut tree over a system's current positions.
pub struct BarnesHutTree {
    nodes: Vec<Node>,
}

impl BarnesHutTree {
    pub fn new() -> Self {
        BarnesHutTree { nodes: Vec::new() }
    }

    fn bounding_cube(positions: &[Vector3D]) -> Cube {
        let mut min = positions[0];
        let mut max = positions[0];
        for p in positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        let center = (min + max) / 2.0;
        let half_size = ((max.x - min.x).max(max.y - min.y).max(max.z - min.z) / 2.0).max(1e-12);
        Cube { center, half_size: half_size * 1.001 }
    }

    /// Rebuild the tree from `system`'s current positions and masses.
    pub fn build(&mut self, system: &System) {
        self.nodes.clear();
        let n = system.count();
        if n == 0 {
            return;
        }

        let root_cube = Self::bounding_cube(&system.positions);
        self.nodes.push(Node::leaf(root_cube));

        for i in 0..n {
            self.insert(0, i, system);
        }

        self.accumulate_mass(0, system);
    }

    /// Insert particle `i` into the subtree rooted at arena index `node_idx`.
    fn insert(&mut self, node_idx: usize, particle: usize, system: &System) {
        if let Some(children) = self.nodes[node_idx].children {
            let octant = self.nodes[node_idx].cube.octant_of(&system.positions[particle]);
            self.insert(children[octant] as usize, particle, system);
            return;
        }

        match self.nodes[node_idx].particle_index {
            None => {
                self.nodes[node_idx].particle_index = Some(particle);
            }
            Some(existing) => {
                let cube = self.nodes[node_idx].cube;
                let mut children = [0u32; 8];
                for (octant, slot) in children.iter_mut().enumerate() {
                    let child_idx = self.nodes.len() as u32;
                    self.nodes.push(Node::leaf(cube.child(octant)));
                    *slot = child_idx;
                }
                self.nodes[node_idx].children = Some(children);
                self.nodes[node_idx].particle_index = None;

                self.insert(node_idx, existing, system);
                self.insert(node_idx, particle, system);
            }
        }
    }

    /// Post-order accumulation of total mass and centre of mass.
    fn accumulate_mass(&mut self, node_idx: usize, system: &System) -> (f64, Vector3D) {
        if let Some(children) = self.nodes[node_idx].children {
            let mut mass = 0.0;
            let mut weighted = Vector3D::new(0.0, 0.0, 0.0);
            for child in children {
                let (child_mass, child_com) = self.accumulate_mass(child as usize, system);
                mass += child_mass;
                weighted += child_com * child_mass;
            }
            let com = if mass > 0.0 { weighted / mass } else { Vector3D::new(0.0, 0.0, 0.0) };
            self.nodes[node_idx].mass = mass;
            self.nodes[node_idx].com = com;
            (mass, com)
        } else if let Some(particle) = self.nodes[node_idx].particle_index {
            let mass = system.masses[particle];
            let com = system.positions[particle];
            self.nodes[node_idx].mass = mass;
            self.nodes[node_idx].com = com;
            (mass, com)
        } else {
            (0.0, Vector3D::new(0.0, 0.0, 0.0))
        }
    }

    /// Acceleration on `p` (excluding self-interaction with `self_index` if
    /// it names a particle) from an approximate tree walk.
    fn acceleration_on(
        &self,
        p: Vector3D,
        self_index: usize,
        theta_mac_sqr: f64,
        softening_sqr: f64,
    ) -> Vector3D {
        let mut acc = Vector3D::new(0.0, 0.0, 0.0);
        if self.nodes.is_empty() {
            return acc;
        }
        let mut stack = vec![0usize];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if node.mass <= 0.0 {
                continue;
            }
            if let Some(particle) = node.particle_index {
                if particle == self_index {
                    continue;
                }
            }

            let r = node.com - p;
            let dist2 = r.norm2();
            let side = node.cube.half_size * 2.0;

            let is_far_enough = side * side < theta_mac_sqr * dist2;
            if node.children.is_none() || is_far_enough {
                let denom = (dist2 + softening_sqr).powf(1.5);
                if denom > 0.0 {
                    acc += r * (node.mass / denom);
                }
                continue;
            }

            if let Some(children) = node.children {
                stack.extend(children.iter().map(|&c| c as usize));
            }
        }
        acc
    }

    /// Accelerations on every particle in `system`, written into `out`.
    pub fn update_forces(
        &self,
        system: &System,
        theta_mac_sqr: f64,
        softening_sqr: f64,
        out: &mut [Vector3D],
    ) {
        #[cfg(feature = "parallel")]
        {
            out.par_iter_mut().enumerate().for_each(|(i, acc)| {
                *acc = self.acceleration_on(system.positions[i], i, theta_mac_sqr, softening_sqr);
            });
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (i, acc) in out.iter_mut().enumerate() {
                *acc = self.acceleration_on(system.positions[i], i, theta_mac_sqr, softening_sqr);
            }
        }
    }
}
