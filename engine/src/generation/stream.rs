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
//! Reads a pre-built system from a CSV-formatted byte stream.
//!
//! Header row: `pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,mass`. Rows with fewer
//! than seven comma-separated fields, or a field that fails to parse as a
//! float, are skipped — never a hard error, per the reference contract.

use std::io::{BufRead, BufReader, Read};

use crate::error::EngineError;
use crate::math::Vector3D;
use crate::system::System;

pub fn create_system(reader: impl Read) -> Result<System, EngineError> {
    let mut lines = BufReader::new(reader).lines();
    lines.next(); // header

    let mut system = System::new();
    for line in lines {
        let line = line?;
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() < 7 {
            log::debug!("skipping malformed stream row: {line:?}");
            continue;
        }

        let parsed: Result<Vec<f64>, _> = cells[..7].iter().map(|c| c.trim().parse::<f64>()).collect();
        match parsed {
            Ok(values) => {
                system.positions.push(Vector3D::new(values[0], values[1], values[2]));
                system.velocities.push(Vector3D::new(values[3], values[4], values[5]));
                system.masses.push(values[6]);
            }
            Err(_) => log::debug!("skipping unparsable stream row: {line:?}"),
        }
    }

    Ok(system)
}
