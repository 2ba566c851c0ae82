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
//! Reference CSV persistence for the two output streams a [`crate::runner::Runner`]
//! produces. A GUI, a binary format, or a network sink are equally valid
//! [`SnapshotWriter`] implementations; this module just supplies the
//! default one.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EngineError;
use crate::physics::Diagnostics;
use crate::system::System;

/// Appends one time-stamped sample to a persistent sink.
pub trait SnapshotWriter<T> {
    fn write_snapshot(&mut self, time: f64, data: &T) -> Result<(), EngineError>;
}

fn open_append(path: &Path, header: &str) -> Result<BufWriter<File>, EngineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let is_new_file = !path.exists();

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    if is_new_file {
        writeln!(writer, "{header}")?;
    }
    Ok(writer)
}

/// One row per (time, particle): `time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,mass`.
pub struct CsvTrajectoryWriter {
    writer: BufWriter<File>,
}

impl CsvTrajectoryWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let writer = open_append(path.as_ref(), "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,mass")?;
        Ok(CsvTrajectoryWriter { writer })
    }
}

impl SnapshotWriter<System> for CsvTrajectoryWriter {
    fn write_snapshot(&mut self, time: f64, system: &System) -> Result<(), EngineError> {
        for i in 0..system.count() {
            let pos = system.positions[i];
            let vel = system.velocities[i];
            writeln!(
                self.writer,
                "{time},{},{},{},{},{},{},{}",
                pos.x, pos.y, pos.z, vel.x, vel.y, vel.z, system.masses[i]
            )?;
        }
        Ok(())
    }
}

/// One row per diagnostics sample. `L_tot` is serialized as its scalar
/// norm — callers needing the full bivector read it from the in-memory
/// [`Diagnostics`] directly rather than round-tripping through CSV.
pub struct CsvDiagnosticsWriter {
    writer: BufWriter<File>,
}

impl CsvDiagnosticsWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let writer = open_append(
            path.as_ref(),
            "time,e_kin,e_pot,L_tot,com_pos_x,com_pos_y,com_pos_z,com_vel_x,com_vel_y,com_vel_z,r_vir,ms_vel,t_cr",
        )?;
        Ok(CsvDiagnosticsWriter { writer })
    }
}

impl SnapshotWriter<Diagnostics> for CsvDiagnosticsWriter {
    fn write_snapshot(&mut self, time: f64, diagnostics: &Diagnostics) -> Result<(), EngineError> {
        writeln!(
            self.writer,
            "{time},{},{},{},{},{},{},{},{},{},{},{},{}",
            diagnostics.e_kin,
            diagnostics.e_pot,
            diagnostics.l_tot.norm(),
            diagnostics.com_pos.x,
            diagnostics.com_pos.y,
            diagnostics.com_pos.z,
            diagnostics.com_vel.x,
            diagnostics.com_vel.y,
            diagnostics.com_vel.z,
            diagnostics.r_vir,
            diagnostics.ms_vel,
            diagnostics.t_cr,
        )?;
        Ok(())
    }
}
