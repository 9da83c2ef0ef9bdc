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

//! In-memory implementation of the infrastructure API.
//!
//! [`MockInfrastructure`] keeps datacenters, racks, machines and cloud
//! resources in memory, records every call it receives, and can be told to
//! fail specific operations. Host discovery only succeeds for the
//! `(host, hypervisor)` pairs registered with
//! [`MockInfrastructure::discoverable`]; every other pair is answered with
//! the node collector's "wrong hypervisor" error, like a real node
//! collector would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use kahuna_infra_api::model::{
    Datacenter, DatacenterId, DatacenterSpec, HypervisorType, Machine, MachineState, Rack,
    RemoteService, RemoteServiceType, Template, VirtualAppliance, VirtualDatacenter,
    VirtualDatacenterId, VirtualMachine, VirtualMachineState, Volume,
};
use kahuna_infra_api::{
    DatacenterRepository, InfraApiError, InfraApiResult, MachineRepository, RackRepository,
    SessionResource, VirtualMachineRepository, VolumeRepository, codes,
};

/// Operations that can be told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDatacenters,
    CreateDatacenter,
    CreateRemoteService,
    DeleteDatacenter,
    CreateRack,
    ListMachines,
    SaveMachine,
    UpdateMachine,
    DeleteMachine,
    CheckMachine,
    DeployVirtualMachine,
    UndeployVirtualMachine,
    DeleteVirtualMachine,
    AttachVolume,
    DetachVolume,
}

/// A recorded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListDatacenters,
    CreateDatacenter { name: String, location: String },
    CreateRemoteService {
        datacenter: DatacenterId,
        service_type: RemoteServiceType,
        uri: String,
    },
    DeleteDatacenter(DatacenterId),
    FindRack { datacenter: DatacenterId, name: String },
    CreateRack { datacenter: DatacenterId, name: String },
    DiscoverMachine { host: String, hypervisor: HypervisorType },
    ListMachines,
    SaveMachine(String),
    UpdateMachine(String),
    DeleteMachine(String),
    CheckMachine(String),
    ListVirtualDatacenters,
    ListVirtualMachines,
    ListTemplates(VirtualDatacenterId),
    FindVirtualAppliance(String),
    CreateVirtualAppliance(String),
    CreateVirtualMachine { appliance: String, template: u32 },
    DeployVirtualMachine(String),
    UndeployVirtualMachine(String),
    DeleteVirtualMachine(String),
    AttachVolume { volume: String, vm: String },
    DetachVolume { volume: String, vm: String },
    ListVolumes,
    RefreshVolume(String),
    AttachedVirtualMachine(String),
}

#[derive(Default)]
struct MockState {
    next_id: u32,
    calls: Vec<Call>,
    failures: HashMap<(Operation, Option<String>), InfraApiError>,
    discoverable: HashMap<(String, HypervisorType), Machine>,
    discovery_errors: HashMap<(String, HypervisorType), InfraApiError>,
    observed_states: HashMap<String, MachineState>,
    datacenters: Vec<Datacenter>,
    racks: Vec<Rack>,
    machines: Vec<Machine>,
    virtual_datacenters: Vec<VirtualDatacenter>,
    templates: Vec<(VirtualDatacenterId, Template)>,
    appliances: Vec<VirtualAppliance>,
    virtual_machines: Vec<VirtualMachine>,
    volumes: Vec<Volume>,
}

impl MockState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Failure configured for `op` on `target`, or for `op` on any target.
    fn failure(&self, op: Operation, target: &str) -> Option<InfraApiError> {
        self.failures
            .get(&(op, Some(target.to_string())))
            .or_else(|| self.failures.get(&(op, None)))
            .cloned()
    }

    fn check(&self, op: Operation, target: &str) -> InfraApiResult<()> {
        match self.failure(op, target) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Shared handle to an in-memory infrastructure. Clones see the same state.
#[derive(Clone, Default)]
pub struct MockInfrastructure {
    state: Arc<Mutex<MockState>>,
    releases: Arc<AtomicUsize>,
}

impl MockInfrastructure {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a datacenter whose discovery services run on `ip`.
    pub fn with_datacenter(&self, name: &str, ip: &str) -> Datacenter {
        let services = [
            RemoteServiceType::NodeCollector,
            RemoteServiceType::VirtualSystemMonitor,
        ];
        let mut state = self.state();
        let id = state.next_id();
        let datacenter = Datacenter {
            id,
            name: name.to_string(),
            location: "somewhere".to_string(),
            remote_services: services
                .iter()
                .map(|t| RemoteService::for_ip(*t, ip))
                .collect(),
        };
        state.datacenters.push(datacenter.clone());
        datacenter
    }

    /// Adds a datacenter exactly as given; its id is kept.
    pub fn insert_datacenter(&self, datacenter: Datacenter) {
        let mut state = self.state();
        state.next_id = state.next_id.max(datacenter.id);
        state.datacenters.push(datacenter);
    }

    pub fn with_rack(&self, datacenter: &Datacenter, name: &str) -> Rack {
        let mut state = self.state();
        let rack = Rack {
            id: state.next_id(),
            name: name.to_string(),
            datacenter_id: datacenter.id,
        };
        state.racks.push(rack.clone());
        rack
    }

    /// Adds an already persisted machine.
    pub fn with_machine(&self, mut machine: Machine) -> Machine {
        let mut state = self.state();
        if machine.id.is_none() {
            machine.id = Some(state.next_id());
        }
        state.machines.push(machine.clone());
        machine
    }

    /// Makes discovery of `host` with `hypervisor` return `machine`.
    pub fn discoverable(&self, host: &str, hypervisor: HypervisorType, machine: Machine) {
        self.state()
            .discoverable
            .insert((host.to_string(), hypervisor), machine);
    }

    /// Makes discovery of `host` with `hypervisor` fail with `err`.
    pub fn discovery_fails(&self, host: &str, hypervisor: HypervisorType, err: InfraApiError) {
        self.state()
            .discovery_errors
            .insert((host.to_string(), hypervisor), err);
    }

    /// State reported by the next checks of the machine at `host`.
    pub fn observe_state(&self, host: &str, state: MachineState) {
        self.state()
            .observed_states
            .insert(host.to_string(), state);
    }

    /// Makes `op` fail with `err` on every target.
    pub fn fail(&self, op: Operation, err: InfraApiError) {
        self.state().failures.insert((op, None), err);
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Makes `op` fail with `err` on `target` only. Machines are targeted
    /// by IP, everything else by name.
    pub fn fail_for(&self, op: Operation, target: &str, err: InfraApiError) {
        self.state()
            .failures
            .insert((op, Some(target.to_string())), err);
    }

    pub fn with_virtual_datacenter(
        &self,
        name: &str,
        datacenter: DatacenterId,
        hypervisor_type: HypervisorType,
    ) -> VirtualDatacenter {
        let mut state = self.state();
        let vdc = VirtualDatacenter {
            id: state.next_id(),
            name: name.to_string(),
            datacenter_id: datacenter,
            hypervisor_type,
        };
        state.virtual_datacenters.push(vdc.clone());
        vdc
    }

    pub fn with_template(&self, vdc: &VirtualDatacenter, template: Template) {
        self.state().templates.push((vdc.id, template));
    }

    pub fn with_virtual_appliance(&self, vdc: &VirtualDatacenter, name: &str) -> VirtualAppliance {
        let mut state = self.state();
        let appliance = VirtualAppliance {
            id: state.next_id(),
            name: name.to_string(),
            virtual_datacenter_id: vdc.id,
        };
        state.appliances.push(appliance.clone());
        appliance
    }

    pub fn with_virtual_machine(
        &self,
        appliance: &VirtualAppliance,
        name: &str,
        vm_state: VirtualMachineState,
    ) -> VirtualMachine {
        let mut state = self.state();
        let vm = VirtualMachine {
            id: state.next_id(),
            name: name.to_string(),
            state: vm_state,
            cpu: 1,
            ram: 512,
            hypervisor_ip: None,
            template_name: None,
            virtual_datacenter_id: appliance.virtual_datacenter_id,
            virtual_appliance_id: appliance.id,
        };
        state.virtual_machines.push(vm.clone());
        vm
    }

    pub fn with_volume(&self, vdc: &VirtualDatacenter, name: &str) -> Volume {
        let mut state = self.state();
        let volume = Volume {
            id: state.next_id(),
            name: name.to_string(),
            size_in_mb: 1024,
            state: "DETACHED".to_string(),
            virtual_datacenter_id: vdc.id,
            attached_to: None,
        };
        state.volumes.push(volume.clone());
        volume
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of recorded calls accepted by `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn datacenters(&self) -> Vec<Datacenter> {
        self.state().datacenters.clone()
    }

    pub fn racks(&self) -> Vec<Rack> {
        self.state().racks.clone()
    }

    pub fn machines(&self) -> Vec<Machine> {
        self.state().machines.clone()
    }

    pub fn virtual_machines(&self) -> Vec<VirtualMachine> {
        self.state().virtual_machines.clone()
    }

    pub fn volumes(&self) -> Vec<Volume> {
        self.state().volumes.clone()
    }

    pub fn appliances(&self) -> Vec<VirtualAppliance> {
        self.state().appliances.clone()
    }

    /// How many times a session over this infrastructure was released.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl SessionResource for MockInfrastructure {
    fn release(&self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

fn not_found(what: &str) -> InfraApiError {
    InfraApiError::Remote {
        status: 404,
        errors: vec![kahuna_infra_api::ApiErrorEntry {
            code: "404".to_string(),
            message: format!("{what} not found"),
        }],
    }
}

#[async_trait]
impl DatacenterRepository for MockInfrastructure {
    async fn list_datacenters(&self) -> InfraApiResult<Vec<Datacenter>> {
        let mut state = self.state();
        state.calls.push(Call::ListDatacenters);
        state.check(Operation::ListDatacenters, "")?;
        Ok(state.datacenters.clone())
    }

    async fn create_datacenter(&self, spec: &DatacenterSpec) -> InfraApiResult<Datacenter> {
        let mut state = self.state();
        state.calls.push(Call::CreateDatacenter {
            name: spec.name.clone(),
            location: spec.location.clone(),
        });
        state.check(Operation::CreateDatacenter, &spec.name)?;
        let datacenter = Datacenter {
            id: state.next_id(),
            name: spec.name.clone(),
            location: spec.location.clone(),
            remote_services: Vec::new(),
        };
        state.datacenters.push(datacenter.clone());
        Ok(datacenter)
    }

    async fn create_remote_service(
        &self,
        datacenter: &Datacenter,
        service: &RemoteService,
    ) -> InfraApiResult<RemoteService> {
        let mut state = self.state();
        state.calls.push(Call::CreateRemoteService {
            datacenter: datacenter.id,
            service_type: service.service_type,
            uri: service.uri.clone(),
        });
        state.check(Operation::CreateRemoteService, &datacenter.name)?;
        let in_use = state.datacenters.iter().any(|dc| {
            dc.id != datacenter.id && dc.remote_services.iter().any(|rs| rs.uri == service.uri)
        });
        if in_use {
            return Err(InfraApiError::coded(
                codes::RS_3,
                format!("The remote service URI {} is already in use", service.uri),
            ));
        }
        let created = RemoteService {
            id: Some(state.next_id()),
            ..service.clone()
        };
        let dc = state
            .datacenters
            .iter_mut()
            .find(|dc| dc.id == datacenter.id)
            .ok_or_else(|| not_found("datacenter"))?;
        dc.remote_services.push(created.clone());
        Ok(created)
    }

    async fn delete_datacenter(&self, id: DatacenterId) -> InfraApiResult<()> {
        let mut state = self.state();
        state.calls.push(Call::DeleteDatacenter(id));
        state.check(Operation::DeleteDatacenter, &id.to_string())?;
        state.datacenters.retain(|dc| dc.id != id);
        state.racks.retain(|r| r.datacenter_id != id);
        Ok(())
    }
}

#[async_trait]
impl RackRepository for MockInfrastructure {
    async fn find_rack(
        &self,
        datacenter: &Datacenter,
        name: &str,
    ) -> InfraApiResult<Option<Rack>> {
        let mut state = self.state();
        state.calls.push(Call::FindRack {
            datacenter: datacenter.id,
            name: name.to_string(),
        });
        Ok(state
            .racks
            .iter()
            .find(|r| r.datacenter_id == datacenter.id && r.name == name)
            .cloned())
    }

    async fn create_rack(&self, datacenter: &Datacenter, name: &str) -> InfraApiResult<Rack> {
        let mut state = self.state();
        state.calls.push(Call::CreateRack {
            datacenter: datacenter.id,
            name: name.to_string(),
        });
        state.check(Operation::CreateRack, name)?;
        let rack = Rack {
            id: state.next_id(),
            name: name.to_string(),
            datacenter_id: datacenter.id,
        };
        state.racks.push(rack.clone());
        Ok(rack)
    }
}

#[async_trait]
impl MachineRepository for MockInfrastructure {
    async fn discover_machine(
        &self,
        datacenter: &Datacenter,
        host: &str,
        hypervisor: HypervisorType,
        user: &str,
        password: &str,
    ) -> InfraApiResult<Machine> {
        let mut state = self.state();
        state.calls.push(Call::DiscoverMachine {
            host: host.to_string(),
            hypervisor,
        });
        let key = (host.to_string(), hypervisor);
        if let Some(err) = state.discovery_errors.get(&key) {
            return Err(err.clone());
        }
        match state.discoverable.get(&key) {
            Some(machine) => {
                let mut machine = machine.clone();
                machine.ip = host.to_string();
                machine.hypervisor = Some(hypervisor);
                machine.user = user.to_string();
                machine.password = password.to_string();
                machine.datacenter_id = Some(datacenter.id);
                Ok(machine)
            }
            None => Err(InfraApiError::coded(
                codes::NC_3,
                format!("{host} does not run {hypervisor}"),
            )),
        }
    }

    async fn list_machines(&self) -> InfraApiResult<Vec<Machine>> {
        let mut state = self.state();
        state.calls.push(Call::ListMachines);
        state.check(Operation::ListMachines, "")?;
        Ok(state.machines.clone())
    }

    async fn save_machine(&self, machine: &Machine) -> InfraApiResult<Machine> {
        let mut state = self.state();
        state.calls.push(Call::SaveMachine(machine.ip.clone()));
        state.check(Operation::SaveMachine, &machine.ip)?;
        if state.machines.iter().any(|m| m.ip == machine.ip) {
            return Err(InfraApiError::coded(
                codes::HYPERVISOR_1,
                format!("The hypervisor {} is already managed", machine.ip),
            ));
        }
        let mut saved = machine.clone();
        saved.id = Some(state.next_id());
        saved.state = MachineState::Managed;
        state.machines.push(saved.clone());
        Ok(saved)
    }

    async fn update_machine(&self, machine: &Machine) -> InfraApiResult<Machine> {
        let mut state = self.state();
        state.calls.push(Call::UpdateMachine(machine.ip.clone()));
        state.check(Operation::UpdateMachine, &machine.ip)?;
        let stored = state
            .machines
            .iter_mut()
            .find(|m| m.id.is_some() && m.id == machine.id)
            .ok_or_else(|| not_found("machine"))?;
        *stored = machine.clone();
        Ok(machine.clone())
    }

    async fn delete_machine(&self, machine: &Machine) -> InfraApiResult<()> {
        let mut state = self.state();
        state.calls.push(Call::DeleteMachine(machine.ip.clone()));
        state.check(Operation::DeleteMachine, &machine.ip)?;
        state.machines.retain(|m| m.id != machine.id);
        Ok(())
    }

    async fn check_machine(&self, machine: &Machine) -> InfraApiResult<MachineState> {
        let mut state = self.state();
        state.calls.push(Call::CheckMachine(machine.ip.clone()));
        state.check(Operation::CheckMachine, &machine.ip)?;
        let observed = state
            .observed_states
            .get(&machine.ip)
            .copied()
            .unwrap_or(MachineState::Managed);
        if let Some(stored) = state.machines.iter_mut().find(|m| m.ip == machine.ip) {
            stored.state = observed;
        }
        Ok(observed)
    }
}

#[async_trait]
impl VirtualMachineRepository for MockInfrastructure {
    async fn list_virtual_datacenters(&self) -> InfraApiResult<Vec<VirtualDatacenter>> {
        let mut state = self.state();
        state.calls.push(Call::ListVirtualDatacenters);
        Ok(state.virtual_datacenters.clone())
    }

    async fn list_virtual_machines(&self) -> InfraApiResult<Vec<VirtualMachine>> {
        let mut state = self.state();
        state.calls.push(Call::ListVirtualMachines);
        Ok(state.virtual_machines.clone())
    }

    async fn list_templates(&self, vdc: &VirtualDatacenter) -> InfraApiResult<Vec<Template>> {
        let mut state = self.state();
        state.calls.push(Call::ListTemplates(vdc.id));
        Ok(state
            .templates
            .iter()
            .filter(|(id, _)| *id == vdc.id)
            .map(|(_, t)| t.clone())
            .collect())
    }

    async fn find_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<Option<VirtualAppliance>> {
        let mut state = self.state();
        state.calls.push(Call::FindVirtualAppliance(name.to_string()));
        Ok(state
            .appliances
            .iter()
            .find(|va| va.virtual_datacenter_id == vdc.id && va.name == name)
            .cloned())
    }

    async fn create_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<VirtualAppliance> {
        let mut state = self.state();
        state.calls.push(Call::CreateVirtualAppliance(name.to_string()));
        let appliance = VirtualAppliance {
            id: state.next_id(),
            name: name.to_string(),
            virtual_datacenter_id: vdc.id,
        };
        state.appliances.push(appliance.clone());
        Ok(appliance)
    }

    async fn create_virtual_machine(
        &self,
        appliance: &VirtualAppliance,
        template: &Template,
        cpu: Option<u32>,
        ram: Option<u32>,
    ) -> InfraApiResult<VirtualMachine> {
        let mut state = self.state();
        state.calls.push(Call::CreateVirtualMachine {
            appliance: appliance.name.clone(),
            template: template.id,
        });
        let id = state.next_id();
        let vm = VirtualMachine {
            id,
            name: format!("ABQ_{id}"),
            state: VirtualMachineState::NotAllocated,
            cpu: cpu.unwrap_or(template.cpu_required),
            ram: ram.unwrap_or(template.ram_required),
            hypervisor_ip: None,
            template_name: Some(template.name.clone()),
            virtual_datacenter_id: appliance.virtual_datacenter_id,
            virtual_appliance_id: appliance.id,
        };
        state.virtual_machines.push(vm.clone());
        Ok(vm)
    }

    async fn deploy_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<VirtualMachine> {
        let mut state = self.state();
        state.calls.push(Call::DeployVirtualMachine(vm.name.clone()));
        state.check(Operation::DeployVirtualMachine, &vm.name)?;
        let stored = state
            .virtual_machines
            .iter_mut()
            .find(|v| v.id == vm.id)
            .ok_or_else(|| not_found("virtual machine"))?;
        stored.state = VirtualMachineState::On;
        Ok(stored.clone())
    }

    async fn undeploy_virtual_machine(
        &self,
        vm: &VirtualMachine,
    ) -> InfraApiResult<VirtualMachine> {
        let mut state = self.state();
        state.calls.push(Call::UndeployVirtualMachine(vm.name.clone()));
        state.check(Operation::UndeployVirtualMachine, &vm.name)?;
        let stored = state
            .virtual_machines
            .iter_mut()
            .find(|v| v.id == vm.id)
            .ok_or_else(|| not_found("virtual machine"))?;
        stored.state = VirtualMachineState::NotAllocated;
        Ok(stored.clone())
    }

    async fn delete_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<()> {
        let mut state = self.state();
        state.calls.push(Call::DeleteVirtualMachine(vm.name.clone()));
        state.check(Operation::DeleteVirtualMachine, &vm.name)?;
        state.virtual_machines.retain(|v| v.id != vm.id);
        Ok(())
    }

    async fn attach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()> {
        let mut state = self.state();
        state.calls.push(Call::AttachVolume {
            volume: volume.name.clone(),
            vm: vm.name.clone(),
        });
        state.check(Operation::AttachVolume, &volume.name)?;
        let stored = state
            .volumes
            .iter_mut()
            .find(|v| v.id == volume.id)
            .ok_or_else(|| not_found("volume"))?;
        stored.attached_to = Some(vm.reference());
        stored.state = "ATTACHED".to_string();
        Ok(())
    }

    async fn detach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()> {
        let mut state = self.state();
        state.calls.push(Call::DetachVolume {
            volume: volume.name.clone(),
            vm: vm.name.clone(),
        });
        state.check(Operation::DetachVolume, &volume.name)?;
        let stored = state
            .volumes
            .iter_mut()
            .find(|v| v.id == volume.id)
            .ok_or_else(|| not_found("volume"))?;
        stored.attached_to = None;
        stored.state = "DETACHED".to_string();
        Ok(())
    }
}

#[async_trait]
impl VolumeRepository for MockInfrastructure {
    async fn list_volumes(&self) -> InfraApiResult<Vec<Volume>> {
        let mut state = self.state();
        state.calls.push(Call::ListVolumes);
        Ok(state.volumes.clone())
    }

    async fn refresh_volume(&self, volume: &Volume) -> InfraApiResult<Volume> {
        let mut state = self.state();
        state.calls.push(Call::RefreshVolume(volume.name.clone()));
        state
            .volumes
            .iter()
            .find(|v| v.id == volume.id)
            .cloned()
            .ok_or_else(|| not_found("volume"))
    }

    async fn attached_virtual_machine(
        &self,
        volume: &Volume,
    ) -> InfraApiResult<Option<VirtualMachine>> {
        let mut state = self.state();
        state
            .calls
            .push(Call::AttachedVirtualMachine(volume.name.clone()));
        Ok(volume.attached_to.and_then(|at| {
            state
                .virtual_machines
                .iter()
                .find(|vm| vm.id == at.virtual_machine_id)
                .cloned()
        }))
    }
}
