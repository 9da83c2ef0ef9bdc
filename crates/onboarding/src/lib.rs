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

//! Onboarding of physical hypervisor hosts.
//!
//! The workflow resolves the host's configuration, finds or creates the
//! datacenter and rack that will own it, probes the host for its
//! hypervisor type, validates the requested datastore and virtual switch,
//! and persists the machine. Companion components check, toggle datastores
//! on, and remove machines that are already known.
//!
//! Every component borrows an infrastructure repository and a
//! [`Reporter`] that receives its progress events.

#![warn(clippy::all)]

pub mod batch;
pub mod config_resolver;
pub mod datacenter_resolver;
pub mod datastore_toggler;
pub mod error;
pub mod health_checker;
pub mod hypervisor_prober;
pub mod machine_provisioner;
pub mod machine_remover;
pub mod reporter;

#[cfg(test)]
mod test;

// Re-exports for convenience
pub use batch::{BatchItem, BatchReport};
pub use config_resolver::{ConfigProperty, ConfigResolver, HostProperties, MachineConfig};
pub use datacenter_resolver::{
    DATACENTER_LOCATION, DATACENTER_NAME, DatacenterResolver, Placement, RACK_NAME,
};
pub use datastore_toggler::{DatastoreToggle, DatastoreToggler};
pub use error::{OnboardingError, OnboardingResult};
pub use health_checker::MachineHealthChecker;
pub use hypervisor_prober::{HypervisorProber, ProbeOutcome, probe_candidates};
pub use machine_provisioner::{MachineProvisioner, ProvisioningRequest, ProvisioningStage};
pub use machine_remover::MachineRemover;
pub use reporter::{OnboardingEvent, Reporter, TracingReporter};
