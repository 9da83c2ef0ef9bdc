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

use kahuna_infra_api::model::{Datastore, Machine, MachineQuery};
use serde::Serialize;

use crate::output::TableRow;

/// Which machines a command applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    One(MachineQuery),
    All,
}

impl Selection {
    // The selector group guarantees one of the three is set.
    pub fn from_args(name: Option<String>, host: Option<String>) -> Self {
        match (name, host) {
            (Some(name), _) => Selection::One(MachineQuery::Name(name)),
            (None, Some(host)) => Selection::One(MachineQuery::Host(host)),
            (None, None) => Selection::All,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MachineRow {
    pub id: Option<u32>,
    pub name: String,
    pub ip: String,
    pub hypervisor: String,
    pub state: String,
    pub virtual_switch: String,
    pub rack: Option<u32>,
}

impl From<&Machine> for MachineRow {
    fn from(machine: &Machine) -> Self {
        MachineRow {
            id: machine.id,
            name: machine.name.clone(),
            ip: machine.ip.clone(),
            hypervisor: machine
                .hypervisor
                .map(|h| h.to_string())
                .unwrap_or_default(),
            state: machine.state.to_string(),
            virtual_switch: machine.virtual_switch.clone().unwrap_or_default(),
            rack: machine.rack_id,
        }
    }
}

impl TableRow for MachineRow {
    const HEADERS: &'static [&'static str] =
        &["Id", "Name", "Address", "Hypervisor", "State", "VSwitch", "Rack"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.name.clone(),
            self.ip.clone(),
            self.hypervisor.clone(),
            self.state.clone(),
            self.virtual_switch.clone(),
            self.rack.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }
}

pub fn machine_rows(machines: &[Machine]) -> Vec<MachineRow> {
    machines.iter().map(MachineRow::from).collect()
}

#[derive(Debug, Serialize)]
pub struct DatastoreRow {
    pub machine: String,
    pub name: String,
    pub uuid: String,
    pub root_path: String,
    pub enabled: bool,
    pub size: u64,
    pub used_size: u64,
}

impl DatastoreRow {
    pub fn new(machine: &str, datastore: &Datastore) -> Self {
        DatastoreRow {
            machine: machine.to_string(),
            name: datastore.name.clone(),
            uuid: datastore.uuid.clone(),
            root_path: datastore.root_path.clone(),
            enabled: datastore.enabled,
            size: datastore.size,
            used_size: datastore.used_size,
        }
    }
}

impl TableRow for DatastoreRow {
    const HEADERS: &'static [&'static str] = &[
        "Machine", "Name", "UUID", "Root path", "Enabled", "Size", "Used",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.machine.clone(),
            self.name.clone(),
            self.uuid.clone(),
            self.root_path.clone(),
            self.enabled.to_string(),
            self.size.to_string(),
            self.used_size.to_string(),
        ]
    }
}

pub fn datastore_rows(machines: &[Machine]) -> Vec<DatastoreRow> {
    machines
        .iter()
        .flat_map(|m| {
            let label = m.label();
            m.datastores
                .iter()
                .map(move |d| DatastoreRow::new(&label, d))
        })
        .collect()
}
