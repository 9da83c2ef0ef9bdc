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
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::infrastructure::{DatacenterId, RackId};

pub type MachineId = u32;

/// Hypervisor technologies a physical machine can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HypervisorType {
    #[serde(rename = "VBOX")]
    Vbox,
    #[serde(rename = "KVM")]
    Kvm,
    #[serde(rename = "XEN_3")]
    Xen3,
    #[serde(rename = "VMX_04")]
    Vmx04,
    #[serde(rename = "HYPERV_301")]
    Hyperv301,
    #[serde(rename = "XENSERVER")]
    Xenserver,
}

impl HypervisorType {
    /// Every hypervisor type, in probing order.
    pub const ALL: [HypervisorType; 6] = [
        HypervisorType::Vbox,
        HypervisorType::Kvm,
        HypervisorType::Xen3,
        HypervisorType::Vmx04,
        HypervisorType::Hyperv301,
        HypervisorType::Xenserver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HypervisorType::Vbox => "VBOX",
            HypervisorType::Kvm => "KVM",
            HypervisorType::Xen3 => "XEN_3",
            HypervisorType::Vmx04 => "VMX_04",
            HypervisorType::Hyperv301 => "HYPERV_301",
            HypervisorType::Xenserver => "XENSERVER",
        }
    }
}

impl fmt::Display for HypervisorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown hypervisor type '{0}'")]
pub struct UnknownHypervisorType(pub String);

impl FromStr for HypervisorType {
    type Err = UnknownHypervisorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HypervisorType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownHypervisorType(s.to_string()))
    }
}

/// State of a physical machine as last observed by the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineState {
    Stopped,
    Provisioned,
    NotManaged,
    Managed,
    Halted,
    Unlicensed,
    HaInProgress,
    DisabledForHa,
    HaltedForSave,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MachineState::Stopped => "STOPPED",
            MachineState::Provisioned => "PROVISIONED",
            MachineState::NotManaged => "NOT_MANAGED",
            MachineState::Managed => "MANAGED",
            MachineState::Halted => "HALTED",
            MachineState::Unlicensed => "UNLICENSED",
            MachineState::HaInProgress => "HA_IN_PROGRESS",
            MachineState::DisabledForHa => "DISABLED_FOR_HA",
            MachineState::HaltedForSave => "HALTED_FOR_SAVE",
            MachineState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A storage pool on a physical machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    #[serde(default, rename = "datastoreUUID")]
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub root_path: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub used_size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualSwitch {
    pub name: String,
}

/// A physical hypervisor host.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MachineId>,
    #[serde(default)]
    pub name: String,
    pub ip: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub hypervisor: Option<HypervisorType>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub datastores: Vec<Datastore>,
    #[serde(default)]
    pub available_virtual_switches: Vec<VirtualSwitch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_switch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter_id: Option<DatacenterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rack_id: Option<RackId>,
    #[serde(default)]
    pub state: MachineState,
}

impl Machine {
    /// Datastore whose name or UUID equals `selector`.
    pub fn find_datastore(&self, selector: &str) -> Option<&Datastore> {
        self.datastores
            .iter()
            .find(|d| d.name == selector || (!d.uuid.is_empty() && d.uuid == selector))
    }

    pub fn find_datastore_mut(&mut self, selector: &str) -> Option<&mut Datastore> {
        self.datastores
            .iter_mut()
            .find(|d| d.name == selector || (!d.uuid.is_empty() && d.uuid == selector))
    }

    pub fn datastore_named_mut(&mut self, name: &str) -> Option<&mut Datastore> {
        self.datastores.iter_mut().find(|d| d.name == name)
    }

    pub fn find_available_virtual_switch(&self, name: &str) -> Option<&VirtualSwitch> {
        self.available_virtual_switches
            .iter()
            .find(|vs| vs.name == name)
    }

    /// Human readable identifier used in messages.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.ip.clone()
        } else {
            format!("{} ({})", self.name, self.ip)
        }
    }
}

// Keeps credentials out of logs.
impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("ip", &self.ip)
            .field("hypervisor", &self.hypervisor)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("datastores", &self.datastores)
            .field("available_virtual_switches", &self.available_virtual_switches)
            .field("virtual_switch", &self.virtual_switch)
            .field("datacenter_id", &self.datacenter_id)
            .field("rack_id", &self.rack_id)
            .field("state", &self.state)
            .finish()
    }
}

/// Selects a machine by name or by host address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineQuery {
    Name(String),
    Host(String),
}

impl MachineQuery {
    pub fn matches(&self, machine: &Machine) -> bool {
        match self {
            MachineQuery::Name(name) => &machine.name == name,
            MachineQuery::Host(host) => &machine.ip == host,
        }
    }
}

impl fmt::Display for MachineQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineQuery::Name(name) => write!(f, "name: {name}"),
            MachineQuery::Host(host) => write!(f, "host: {host}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hypervisor_type_parses_case_insensitively() {
        assert_eq!("kvm".parse::<HypervisorType>().unwrap(), HypervisorType::Kvm);
        assert_eq!(
            "XEN_3".parse::<HypervisorType>().unwrap(),
            HypervisorType::Xen3
        );
        assert_eq!(
            " vmx_04 ".parse::<HypervisorType>().unwrap(),
            HypervisorType::Vmx04
        );
        assert!("esx".parse::<HypervisorType>().is_err());
    }

    #[test]
    fn test_unknown_machine_state_falls_back() {
        let state: MachineState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(state, MachineState::Unknown);
        let state: MachineState = serde_json::from_str("\"NOT_MANAGED\"").unwrap();
        assert_eq!(state, MachineState::NotManaged);
    }

    #[test]
    fn test_find_datastore_by_name_or_uuid() {
        let mut machine = Machine {
            ip: "10.0.0.9".to_string(),
            datastores: vec![Datastore {
                uuid: "8f1c-22".to_string(),
                name: "ds1".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(machine.find_datastore("ds1").is_some());
        assert!(machine.find_datastore("8f1c-22").is_some());
        assert!(machine.find_datastore("").is_none());
        assert!(machine.find_datastore("ds2").is_none());
        assert!(machine.datastore_named_mut("ds1").is_some());
        assert!(machine.datastore_named_mut("8f1c-22").is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let machine = Machine {
            ip: "10.0.0.9".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let out = format!("{machine:?}");
        assert!(!out.contains("hunter2"));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn test_machine_query_matches() {
        let machine = Machine {
            name: "nodo-1".to_string(),
            ip: "10.0.0.9".to_string(),
            ..Default::default()
        };
        assert!(MachineQuery::Name("nodo-1".to_string()).matches(&machine));
        assert!(MachineQuery::Host("10.0.0.9".to_string()).matches(&machine));
        assert!(!MachineQuery::Host("10.0.0.1".to_string()).matches(&machine));
    }
}
