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

//! Onboarding of a single physical host.

use kahuna_infra_api::model::{HypervisorType, Machine};
use kahuna_infra_api::{DatacenterRepository, MachineRepository, RackRepository, codes};

use crate::config_resolver::{ConfigProperty, ConfigResolver, MachineConfig};
use crate::datacenter_resolver::DatacenterResolver;
use crate::error::{OnboardingError, OnboardingResult};
use crate::hypervisor_prober::{HypervisorProber, probe_candidates};
use crate::reporter::{OnboardingEvent, Reporter};

/// Stages a provisioning run goes through, in order. `Failed` can be
/// reached from any stage before `Done`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProvisioningStage {
    ResolvingConfig,
    ResolvingDatacenter,
    ProbingHypervisor,
    ValidatingResources,
    Persisting,
    Done,
    Failed,
}

/// Values given explicitly for a host. Anything left unset is taken from
/// the configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProvisioningRequest {
    pub host: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub hypervisor_type: Option<String>,
    pub remote_services_ip: Option<String>,
    pub datastore: Option<String>,
    pub virtual_switch: Option<String>,
}

impl ProvisioningRequest {
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }
}

/// A request with every setting resolved.
struct ResolvedRequest {
    user: String,
    password: String,
    remote_services_ip: String,
    datastore: String,
    virtual_switch: String,
    hypervisor: Option<HypervisorType>,
}

pub struct MachineProvisioner<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a MachineConfig,
    reporter: &'a dyn Reporter,
}

impl<'a, R> MachineProvisioner<'a, R>
where
    R: DatacenterRepository + RackRepository + MachineRepository + ?Sized,
{
    pub fn new(repo: &'a R, config: &'a MachineConfig, reporter: &'a dyn Reporter) -> Self {
        Self {
            repo,
            config,
            reporter,
        }
    }

    /// Discovers the host and registers it in the canonical rack of the
    /// datacenter serving its remote services IP.
    pub async fn provision(&self, request: &ProvisioningRequest) -> OnboardingResult<Machine> {
        let mut stage = ProvisioningStage::ResolvingConfig;
        match self.run(request, &mut stage).await {
            Ok(machine) => {
                self.enter(&request.host, &mut stage, ProvisioningStage::Done);
                Ok(machine)
            }
            Err(err) => {
                self.reporter.report(&OnboardingEvent::ProvisioningFailed {
                    host: request.host.clone(),
                    stage,
                    error: err.to_string(),
                });
                self.enter(&request.host, &mut stage, ProvisioningStage::Failed);
                Err(err)
            }
        }
    }

    fn enter(&self, host: &str, current: &mut ProvisioningStage, next: ProvisioningStage) {
        *current = next;
        self.reporter.report(&OnboardingEvent::StageEntered {
            host: host.to_string(),
            stage: next,
        });
    }

    async fn run(
        &self,
        request: &ProvisioningRequest,
        stage: &mut ProvisioningStage,
    ) -> OnboardingResult<Machine> {
        let host = request.host.as_str();

        self.enter(host, stage, ProvisioningStage::ResolvingConfig);
        let resolved = self.resolve_config(request)?;

        self.enter(host, stage, ProvisioningStage::ResolvingDatacenter);
        let datacenters = self.repo.list_datacenters().await?;
        let placement = DatacenterResolver::new(self.repo, self.reporter)
            .resolve(&datacenters, &resolved.remote_services_ip)
            .await?;

        self.enter(host, stage, ProvisioningStage::ProbingHypervisor);
        let candidates = probe_candidates(resolved.hypervisor);
        let mut machine = HypervisorProber::new(self.repo, self.reporter)
            .discover(
                &placement.datacenter,
                host,
                &resolved.user,
                &resolved.password,
                &candidates,
            )
            .await?
            .ok_or_else(|| OnboardingError::not_found(format!("Not machine found in {host}")))?;

        self.enter(host, stage, ProvisioningStage::ValidatingResources);
        match machine.datastore_named_mut(&resolved.datastore) {
            Some(datastore) => datastore.enabled = true,
            None => {
                return Err(OnboardingError::resource_missing(
                    "datastore",
                    resolved.datastore,
                ));
            }
        }
        if machine
            .find_available_virtual_switch(&resolved.virtual_switch)
            .is_none()
        {
            return Err(OnboardingError::resource_missing(
                "virtual switch",
                resolved.virtual_switch,
            ));
        }
        machine.virtual_switch = Some(resolved.virtual_switch);

        self.enter(host, stage, ProvisioningStage::Persisting);
        machine.datacenter_id = Some(placement.datacenter.id);
        machine.rack_id = Some(placement.rack.id);
        let saved = self.repo.save_machine(&machine).await.map_err(|err| {
            if err.has_any_error(&codes::ALREADY_REGISTERED) {
                OnboardingError::AlreadyExists(host.to_string())
            } else {
                err.into()
            }
        })?;
        self.reporter.report(&OnboardingEvent::MachineSaved {
            host: host.to_string(),
        });
        Ok(saved)
    }

    fn resolve_config(&self, request: &ProvisioningRequest) -> OnboardingResult<ResolvedRequest> {
        let resolver = ConfigResolver::new(self.config);
        let host = request.host.as_str();
        let require = |explicit: &Option<String>, property| {
            resolver.require(explicit.as_deref(), host, property)
        };

        let user = require(&request.user, ConfigProperty::User)?;
        let password = require(&request.password, ConfigProperty::Password)?;
        let remote_services_ip =
            require(&request.remote_services_ip, ConfigProperty::RemoteServicesIp)?;
        let datastore = require(&request.datastore, ConfigProperty::Datastore)?;
        let virtual_switch = require(&request.virtual_switch, ConfigProperty::VirtualSwitch)?;

        let hypervisor = resolver
            .optional(
                request.hypervisor_type.as_deref(),
                host,
                ConfigProperty::HypervisorType,
            )
            .map(|value| {
                value
                    .parse::<HypervisorType>()
                    .map_err(|_| OnboardingError::InvalidConfig {
                        property: ConfigProperty::HypervisorType.key(),
                        value,
                    })
            })
            .transpose()?;

        Ok(ResolvedRequest {
            user,
            password,
            remote_services_ip,
            datastore,
            virtual_switch,
            hypervisor,
        })
    }
}
