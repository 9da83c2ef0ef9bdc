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

//! Repository traits for infrastructure API resources.

use async_trait::async_trait;

use crate::error::InfraApiResult;
use crate::model::{
    Datacenter, DatacenterId, DatacenterSpec, HypervisorType, Machine, MachineQuery,
    MachineState, Rack, RemoteService, Template, TemplateId, VirtualAppliance,
    VirtualDatacenter, VirtualMachine, Volume,
};

/// Repository for datacenters and their remote services.
#[async_trait]
pub trait DatacenterRepository: Send + Sync {
    async fn list_datacenters(&self) -> InfraApiResult<Vec<Datacenter>>;
    async fn create_datacenter(&self, spec: &DatacenterSpec) -> InfraApiResult<Datacenter>;
    async fn create_remote_service(
        &self,
        datacenter: &Datacenter,
        service: &RemoteService,
    ) -> InfraApiResult<RemoteService>;
    async fn delete_datacenter(&self, id: DatacenterId) -> InfraApiResult<()>;
}

/// Repository for racks.
#[async_trait]
pub trait RackRepository: Send + Sync {
    async fn find_rack(&self, datacenter: &Datacenter, name: &str)
    -> InfraApiResult<Option<Rack>>;
    async fn create_rack(&self, datacenter: &Datacenter, name: &str) -> InfraApiResult<Rack>;
}

/// Repository for physical machines.
#[async_trait]
pub trait MachineRepository: Send + Sync {
    /// Asks the datacenter's node collector to inspect `host` assuming it
    /// runs `hypervisor`. Read-only on the remote side.
    async fn discover_machine(
        &self,
        datacenter: &Datacenter,
        host: &str,
        hypervisor: HypervisorType,
        user: &str,
        password: &str,
    ) -> InfraApiResult<Machine>;

    async fn list_machines(&self) -> InfraApiResult<Vec<Machine>>;

    async fn find_machine(&self, query: &MachineQuery) -> InfraApiResult<Option<Machine>> {
        Ok(self
            .list_machines()
            .await?
            .into_iter()
            .find(|m| query.matches(m)))
    }

    /// Persists a discovered machine in its rack.
    async fn save_machine(&self, machine: &Machine) -> InfraApiResult<Machine>;
    async fn update_machine(&self, machine: &Machine) -> InfraApiResult<Machine>;
    async fn delete_machine(&self, machine: &Machine) -> InfraApiResult<()>;
    async fn check_machine(&self, machine: &Machine) -> InfraApiResult<MachineState>;
}

/// Repository for virtual machines and the resources needed to create them.
#[async_trait]
pub trait VirtualMachineRepository: Send + Sync {
    async fn list_virtual_datacenters(&self) -> InfraApiResult<Vec<VirtualDatacenter>>;
    async fn list_virtual_machines(&self) -> InfraApiResult<Vec<VirtualMachine>>;

    async fn find_virtual_machine(&self, name: &str) -> InfraApiResult<Option<VirtualMachine>> {
        Ok(self
            .list_virtual_machines()
            .await?
            .into_iter()
            .find(|vm| vm.name == name))
    }

    async fn list_templates(&self, vdc: &VirtualDatacenter) -> InfraApiResult<Vec<Template>>;

    async fn find_template(&self, id: TemplateId) -> InfraApiResult<Option<Template>> {
        for vdc in self.list_virtual_datacenters().await? {
            if let Some(template) = self
                .list_templates(&vdc)
                .await?
                .into_iter()
                .find(|t| t.id == id)
            {
                return Ok(Some(template));
            }
        }
        Ok(None)
    }

    async fn find_compatible_virtual_datacenter(
        &self,
        template: &Template,
    ) -> InfraApiResult<Option<VirtualDatacenter>> {
        Ok(self
            .list_virtual_datacenters()
            .await?
            .into_iter()
            .find(|vdc| vdc.is_compatible_with(template)))
    }

    async fn find_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<Option<VirtualAppliance>>;
    async fn create_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<VirtualAppliance>;
    async fn create_virtual_machine(
        &self,
        appliance: &VirtualAppliance,
        template: &Template,
        cpu: Option<u32>,
        ram: Option<u32>,
    ) -> InfraApiResult<VirtualMachine>;

    /// Deploys the virtual machine and waits for the deployment task.
    async fn deploy_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<VirtualMachine>;
    /// Undeploys the virtual machine and waits for the undeploy task.
    async fn undeploy_virtual_machine(
        &self,
        vm: &VirtualMachine,
    ) -> InfraApiResult<VirtualMachine>;
    async fn delete_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<()>;

    async fn attach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()>;
    async fn detach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()>;
}

/// Repository for persistent volumes.
#[async_trait]
pub trait VolumeRepository: Send + Sync {
    async fn list_volumes(&self) -> InfraApiResult<Vec<Volume>>;

    async fn find_volume(&self, name: &str) -> InfraApiResult<Option<Volume>> {
        Ok(self
            .list_volumes()
            .await?
            .into_iter()
            .find(|v| v.name == name))
    }

    async fn refresh_volume(&self, volume: &Volume) -> InfraApiResult<Volume>;

    /// Virtual machine the volume is attached to, if any.
    async fn attached_virtual_machine(
        &self,
        volume: &Volume,
    ) -> InfraApiResult<Option<VirtualMachine>>;
}

/// The complete infrastructure API.
pub trait InfrastructureApi:
    DatacenterRepository
    + RackRepository
    + MachineRepository
    + VirtualMachineRepository
    + VolumeRepository
{
}

impl<T> InfrastructureApi for T where
    T: DatacenterRepository
        + RackRepository
        + MachineRepository
        + VirtualMachineRepository
        + VolumeRepository
{
}
