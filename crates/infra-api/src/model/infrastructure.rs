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

pub type DatacenterId = u32;
pub type RackId = u32;

/// Kind of remote service a datacenter relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteServiceType {
    NodeCollector,
    VirtualSystemMonitor,
    VirtualFactory,
    StorageSystemMonitor,
    ApplianceManager,
    BpmService,
    DhcpService,
}

impl RemoteServiceType {
    /// Services deployed for a datacenter, in creation order. The two
    /// services needed to discover and monitor hosts come first.
    pub const ENTERPRISE: [RemoteServiceType; 7] = [
        RemoteServiceType::NodeCollector,
        RemoteServiceType::VirtualSystemMonitor,
        RemoteServiceType::VirtualFactory,
        RemoteServiceType::StorageSystemMonitor,
        RemoteServiceType::ApplianceManager,
        RemoteServiceType::BpmService,
        RemoteServiceType::DhcpService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteServiceType::NodeCollector => "NODE_COLLECTOR",
            RemoteServiceType::VirtualSystemMonitor => "VIRTUAL_SYSTEM_MONITOR",
            RemoteServiceType::VirtualFactory => "VIRTUAL_FACTORY",
            RemoteServiceType::StorageSystemMonitor => "STORAGE_SYSTEM_MONITOR",
            RemoteServiceType::ApplianceManager => "APPLIANCE_MANAGER",
            RemoteServiceType::BpmService => "BPM_SERVICE",
            RemoteServiceType::DhcpService => "DHCP_SERVICE",
        }
    }

    /// Default endpoint of this service when deployed on `ip`.
    pub fn default_uri(&self, ip: &str) -> String {
        match self {
            RemoteServiceType::NodeCollector => format!("http://{ip}:80/nodecollector"),
            RemoteServiceType::VirtualSystemMonitor => format!("http://{ip}:80/vsm"),
            RemoteServiceType::VirtualFactory => format!("http://{ip}:80/virtualfactory"),
            RemoteServiceType::StorageSystemMonitor => format!("http://{ip}:80/ssm"),
            RemoteServiceType::ApplianceManager => format!("http://{ip}:80/am"),
            RemoteServiceType::BpmService => format!("tcp://{ip}:61616"),
            RemoteServiceType::DhcpService => format!("omapi://{ip}:7911"),
        }
    }
}

impl fmt::Display for RemoteServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(rename = "type")]
    pub service_type: RemoteServiceType,
    pub uri: String,
}

impl RemoteService {
    /// A not yet persisted service of `service_type` listening on `ip`.
    pub fn for_ip(service_type: RemoteServiceType, ip: &str) -> Self {
        Self {
            id: None,
            service_type,
            uri: service_type.default_uri(ip),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub id: DatacenterId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub remote_services: Vec<RemoteService>,
}

impl Datacenter {
    /// Remote services of the given type, in the order the API returned them.
    pub fn remote_services_of(
        &self,
        service_type: RemoteServiceType,
    ) -> impl Iterator<Item = &RemoteService> {
        self.remote_services
            .iter()
            .filter(move |rs| rs.service_type == service_type)
    }
}

/// Parameters for creating a datacenter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacenterSpec {
    pub name: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: RackId,
    pub name: String,
    #[serde(default)]
    pub datacenter_id: DatacenterId,
}
