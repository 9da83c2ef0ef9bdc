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

//! Layered lookup of per-host provisioning settings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OnboardingError, OnboardingResult};

/// Settings a host can be provisioned with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigProperty {
    User,
    Password,
    RemoteServicesIp,
    Datastore,
    VirtualSwitch,
    HypervisorType,
}

impl ConfigProperty {
    /// Key of the property in the configuration file.
    pub fn key(&self) -> &'static str {
        match self {
            ConfigProperty::User => "user",
            ConfigProperty::Password => "psswd",
            ConfigProperty::RemoteServicesIp => "remoteservicesip",
            ConfigProperty::Datastore => "datastore",
            ConfigProperty::VirtualSwitch => "vswitch",
            ConfigProperty::HypervisorType => "type",
        }
    }
}

impl fmt::Display for ConfigProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One bag of provisioning settings, either the global defaults or the
/// overrides of a single host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostProperties {
    /// User to log into the hypervisor with.
    pub user: Option<String>,
    /// Password to log into the hypervisor with.
    #[serde(rename = "psswd")]
    pub password: Option<String>,
    /// IP of the node collector and virtual system monitor.
    #[serde(rename = "remoteservicesip")]
    pub remote_services_ip: Option<String>,
    /// Datastore to enable on the machine.
    pub datastore: Option<String>,
    /// Virtual switch the machine's virtual machines will use.
    #[serde(rename = "vswitch")]
    pub virtual_switch: Option<String>,
    /// Hypervisor type; probing tries every type when unset.
    #[serde(rename = "type")]
    pub hypervisor_type: Option<String>,
}

impl HostProperties {
    pub fn get(&self, property: ConfigProperty) -> Option<&str> {
        let value = match property {
            ConfigProperty::User => &self.user,
            ConfigProperty::Password => &self.password,
            ConfigProperty::RemoteServicesIp => &self.remote_services_ip,
            ConfigProperty::Datastore => &self.datastore,
            ConfigProperty::VirtualSwitch => &self.virtual_switch,
            ConfigProperty::HypervisorType => &self.hypervisor_type,
        };
        non_empty(value.as_deref())
    }
}

/// Provisioning configuration: global defaults plus per-host overrides
/// keyed by host address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub global: HostProperties,
    pub hosts: BTreeMap<String, HostProperties>,
}

/// Resolves a setting from an explicit value, then the host's overrides,
/// then the global defaults. Empty strings count as unset at every level.
#[derive(Clone, Copy, Debug)]
pub struct ConfigResolver<'a> {
    config: &'a MachineConfig,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(config: &'a MachineConfig) -> Self {
        Self { config }
    }

    pub fn lookup(
        &self,
        explicit: Option<&str>,
        host: &str,
        property: ConfigProperty,
    ) -> Option<String> {
        non_empty(explicit)
            .or_else(|| {
                self.config
                    .hosts
                    .get(host)
                    .and_then(|props| props.get(property))
            })
            .or_else(|| self.config.global.get(property))
            .map(str::to_string)
    }

    /// Like [`lookup`](Self::lookup), failing with `ConfigMissing` when no
    /// level provides the value.
    pub fn require(
        &self,
        explicit: Option<&str>,
        host: &str,
        property: ConfigProperty,
    ) -> OnboardingResult<String> {
        self.lookup(explicit, host, property)
            .ok_or_else(|| OnboardingError::ConfigMissing {
                host: host.to_string(),
                property: property.key(),
            })
    }

    pub fn optional(
        &self,
        explicit: Option<&str>,
        host: &str,
        property: ConfigProperty,
    ) -> Option<String> {
        self.lookup(explicit, host, property)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
