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

use std::fmt;

use serde::{Deserialize, Serialize};

use super::infrastructure::DatacenterId;
use super::machine::HypervisorType;

pub type VirtualDatacenterId = u32;
pub type VirtualApplianceId = u32;
pub type VirtualMachineId = u32;
pub type TemplateId = u32;
pub type VolumeId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDatacenter {
    pub id: VirtualDatacenterId,
    pub name: String,
    pub datacenter_id: DatacenterId,
    pub hypervisor_type: HypervisorType,
}

impl VirtualDatacenter {
    /// A template can be deployed in a virtual datacenter of the same
    /// datacenter whose hypervisor understands the template disk.
    pub fn is_compatible_with(&self, template: &Template) -> bool {
        self.datacenter_id == template.datacenter_id
            && (template.compatible_hypervisors.is_empty()
                || template.compatible_hypervisors.contains(&self.hypervisor_type))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAppliance {
    pub id: VirtualApplianceId,
    pub name: String,
    pub virtual_datacenter_id: VirtualDatacenterId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub datacenter_id: DatacenterId,
    #[serde(default)]
    pub compatible_hypervisors: Vec<HypervisorType>,
    #[serde(default)]
    pub cpu_required: u32,
    #[serde(default)]
    pub ram_required: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirtualMachineState {
    NotAllocated,
    Allocated,
    Configured,
    On,
    Off,
    Paused,
    Locked,
    #[default]
    #[serde(other)]
    Unknown,
}

impl VirtualMachineState {
    /// Whether the virtual machine is currently deployed in a hypervisor.
    pub fn exists_in_hypervisor(&self) -> bool {
        matches!(
            self,
            VirtualMachineState::On | VirtualMachineState::Off | VirtualMachineState::Paused
        )
    }
}

impl fmt::Display for VirtualMachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VirtualMachineState::NotAllocated => "NOT_ALLOCATED",
            VirtualMachineState::Allocated => "ALLOCATED",
            VirtualMachineState::Configured => "CONFIGURED",
            VirtualMachineState::On => "ON",
            VirtualMachineState::Off => "OFF",
            VirtualMachineState::Paused => "PAUSED",
            VirtualMachineState::Locked => "LOCKED",
            VirtualMachineState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Location of a virtual machine in the cloud hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineRef {
    pub virtual_datacenter_id: VirtualDatacenterId,
    pub virtual_appliance_id: VirtualApplianceId,
    pub virtual_machine_id: VirtualMachineId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    pub id: VirtualMachineId,
    pub name: String,
    #[serde(default)]
    pub state: VirtualMachineState,
    #[serde(default)]
    pub cpu: u32,
    #[serde(default)]
    pub ram: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default)]
    pub virtual_datacenter_id: VirtualDatacenterId,
    #[serde(default)]
    pub virtual_appliance_id: VirtualApplianceId,
}

impl VirtualMachine {
    pub fn reference(&self) -> VirtualMachineRef {
        VirtualMachineRef {
            virtual_datacenter_id: self.virtual_datacenter_id,
            virtual_appliance_id: self.virtual_appliance_id,
            virtual_machine_id: self.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: VolumeId,
    pub name: String,
    #[serde(default)]
    pub size_in_mb: u64,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub virtual_datacenter_id: VirtualDatacenterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_to: Option<VirtualMachineRef>,
}
