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

use kahuna_infra_api::model::VirtualMachine;
use serde::Serialize;

use crate::error::CliResult;
use crate::output::{OutputFormat, TableRow, print_rows};

#[derive(Debug, Serialize)]
pub struct VmRow {
    pub id: u32,
    pub name: String,
    pub state: String,
    pub cpu: u32,
    pub ram: u32,
}

impl From<&VirtualMachine> for VmRow {
    fn from(vm: &VirtualMachine) -> Self {
        VmRow {
            id: vm.id,
            name: vm.name.clone(),
            state: vm.state.to_string(),
            cpu: vm.cpu,
            ram: vm.ram,
        }
    }
}

impl TableRow for VmRow {
    const HEADERS: &'static [&'static str] = &["Id", "Name", "State", "CPU", "RAM (MB)"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.state.clone(),
            self.cpu.to_string(),
            self.ram.to_string(),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct VmDetailRow {
    #[serde(flatten)]
    pub vm: VmRow,
    pub hypervisor_ip: Option<String>,
    pub template: Option<String>,
    pub virtual_datacenter: u32,
    pub virtual_appliance: u32,
}

impl From<&VirtualMachine> for VmDetailRow {
    fn from(vm: &VirtualMachine) -> Self {
        VmDetailRow {
            vm: vm.into(),
            hypervisor_ip: vm.hypervisor_ip.clone(),
            template: vm.template_name.clone(),
            virtual_datacenter: vm.virtual_datacenter_id,
            virtual_appliance: vm.virtual_appliance_id,
        }
    }
}

impl TableRow for VmDetailRow {
    const HEADERS: &'static [&'static str] = &[
        "Id",
        "Name",
        "State",
        "CPU",
        "RAM (MB)",
        "Hypervisor",
        "Template",
        "VDC",
        "VApp",
    ];

    fn cells(&self) -> Vec<String> {
        let mut cells = self.vm.cells();
        cells.extend([
            self.hypervisor_ip.clone().unwrap_or_default(),
            self.template.clone().unwrap_or_default(),
            self.virtual_datacenter.to_string(),
            self.virtual_appliance.to_string(),
        ]);
        cells
    }
}

pub fn print_vms(vms: &[VirtualMachine], verbose: bool, format: OutputFormat) -> CliResult<()> {
    if verbose {
        let rows: Vec<VmDetailRow> = vms.iter().map(VmDetailRow::from).collect();
        print_rows(&rows, format)
    } else {
        let rows: Vec<VmRow> = vms.iter().map(VmRow::from).collect();
        print_rows(&rows, format)
    }
}

pub fn vm_not_found(name: &str) {
    println!("No virtual machine found with name: {name}");
}
