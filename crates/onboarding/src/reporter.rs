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

//! Progress reporting for the onboarding components.

use kahuna_infra_api::model::{HypervisorType, MachineState};

use crate::machine_provisioner::ProvisioningStage;

/// Something worth telling the operator about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OnboardingEvent {
    StageEntered {
        host: String,
        stage: ProvisioningStage,
    },
    ProvisioningFailed {
        host: String,
        stage: ProvisioningStage,
        error: String,
    },
    DatacenterMatched {
        datacenter: String,
        ip: String,
    },
    DatacenterCreated {
        datacenter: String,
        ip: String,
    },
    DatacenterRolledBack {
        datacenter: String,
        ip: String,
    },
    RackCreated {
        datacenter: String,
        rack: String,
    },
    ProbeAttempt {
        host: String,
        hypervisor: HypervisorType,
    },
    CandidateSkipped {
        host: String,
        hypervisor: HypervisorType,
        reason: String,
    },
    MachineDiscovered {
        host: String,
        hypervisor: HypervisorType,
    },
    MachineSaved {
        host: String,
    },
    MachineChecked {
        machine: String,
        state: MachineState,
    },
    MachineDeleted {
        machine: String,
    },
    DatastoreToggled {
        machine: String,
        datastore: String,
        enabled: bool,
    },
    BatchItemFailed {
        item: String,
        error: String,
    },
}

/// Receives the progress events of the onboarding components.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &OnboardingEvent);
}

/// Reporter emitting every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &OnboardingEvent) {
        use OnboardingEvent::*;
        match event {
            StageEntered { host, stage } => {
                tracing::debug!(%host, ?stage, "provisioning stage entered")
            }
            ProvisioningFailed { host, stage, error } => {
                tracing::debug!(%host, ?stage, %error, "provisioning failed")
            }
            DatacenterMatched { datacenter, ip } => tracing::debug!(
                %datacenter,
                %ip,
                "node collector and virtual system monitor found in datacenter"
            ),
            DatacenterCreated { datacenter, ip } => {
                tracing::info!(%datacenter, %ip, "created datacenter")
            }
            DatacenterRolledBack { datacenter, ip } => tracing::warn!(
                %datacenter,
                %ip,
                "remote services could not be created, datacenter removed"
            ),
            RackCreated { datacenter, rack } => {
                tracing::info!(%datacenter, %rack, "created rack")
            }
            ProbeAttempt { host, hypervisor } => {
                tracing::debug!(%host, %hypervisor, "trying hypervisor")
            }
            CandidateSkipped {
                host,
                hypervisor,
                reason,
            } => tracing::debug!(%host, %hypervisor, %reason, "not a match, skipping"),
            MachineDiscovered { host, hypervisor } => {
                tracing::debug!(%host, %hypervisor, "machine found")
            }
            MachineSaved { host } => tracing::debug!(%host, "machine saved"),
            MachineChecked { machine, state } => {
                tracing::debug!(%machine, %state, "machine checked")
            }
            MachineDeleted { machine } => tracing::debug!(%machine, "machine deleted"),
            DatastoreToggled {
                machine,
                datastore,
                enabled,
            } => tracing::debug!(%machine, %datastore, enabled, "datastore toggled"),
            BatchItemFailed { item, error } => tracing::error!(%item, %error, "operation failed"),
        }
    }
}
