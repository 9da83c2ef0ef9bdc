/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use kahuna_infra_api::model::Volume;
use serde::Serialize;

use crate::error::CliResult;
use crate::output::{OutputFormat, TableRow, print_rows};

#[derive(Debug, Serialize)]
pub struct VolumeRow {
    pub id: u32,
    pub name: String,
    pub size_in_mb: u64,
    pub state: String,
    pub virtual_datacenter: u32,
    pub virtual_machine: Option<u32>,
}

impl From<&Volume> for VolumeRow {
    fn from(volume: &Volume) -> Self {
        VolumeRow {
            id: volume.id,
            name: volume.name.clone(),
            size_in_mb: volume.size_in_mb,
            state: volume.state.clone(),
            virtual_datacenter: volume.virtual_datacenter_id,
            virtual_machine: volume.attached_to.map(|vm| vm.virtual_machine_id),
        }
    }
}

impl TableRow for VolumeRow {
    const HEADERS: &'static [&'static str] =
        &["Id", "Name", "Size (MB)", "State", "VDC", "Virtual machine"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.size_in_mb.to_string(),
            self.state.clone(),
            self.virtual_datacenter.to_string(),
            self.virtual_machine
                .map(|id| id.to_string())
                .unwrap_or_default(),
        ]
    }
}

pub fn print_volumes(volumes: &[Volume], format: OutputFormat) -> CliResult<()> {
    let rows: Vec<VolumeRow> = volumes.iter().map(VolumeRow::from).collect();
    print_rows(&rows, format)
}

pub fn volume_not_found(name: &str) {
    println!("No volume found with name: {name}");
}
