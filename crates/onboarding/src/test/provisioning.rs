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

//! End to end tests for provisioning one host.

use kahuna_infra_api::model::{HypervisorType, Machine};
use kahuna_infra_api::{InfraApiError, codes};
use kahuna_infra_mock::{Call, MockInfrastructure, Operation};

use super::helpers::*;
use crate::config_resolver::{HostProperties, MachineConfig};
use crate::datacenter_resolver::RACK_NAME;
use crate::error::OnboardingError;
use crate::machine_provisioner::{MachineProvisioner, ProvisioningRequest, ProvisioningStage};
use crate::reporter::OnboardingEvent;

fn saves(mock: &MockInfrastructure) -> usize {
    mock.count(|c| matches!(c, Call::SaveMachine(_)))
}

fn stages(reporter: &RecordingReporter) -> Vec<ProvisioningStage> {
    reporter
        .events()
        .into_iter()
        .filter_map(|e| match e {
            OnboardingEvent::StageEntered { stage, .. } => Some(stage),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_provision_happy_path() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    let config = full_config();
    let reporter = RecordingReporter::default();

    let machine = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap();

    assert!(machine.id.is_some());
    assert_eq!(machine.ip, HOST);
    assert_eq!(machine.hypervisor, Some(HypervisorType::Kvm));
    assert_eq!(machine.virtual_switch.as_deref(), Some("eth1"));
    assert!(machine.find_datastore("ds1").unwrap().enabled);
    assert!(!machine.find_datastore("ds2").unwrap().enabled);
    assert_eq!(machine.datacenter_id, Some(dc.id));

    let rack = mock.racks().into_iter().find(|r| r.name == RACK_NAME).unwrap();
    assert_eq!(machine.rack_id, Some(rack.id));
    assert_eq!(saves(&mock), 1);
    assert_eq!(
        stages(&reporter),
        vec![
            ProvisioningStage::ResolvingConfig,
            ProvisioningStage::ResolvingDatacenter,
            ProvisioningStage::ProbingHypervisor,
            ProvisioningStage::ValidatingResources,
            ProvisioningStage::Persisting,
            ProvisioningStage::Done,
        ]
    );
}

#[tokio::test]
async fn test_explicit_values_override_config() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", "10.60.1.5");
    mock.discoverable(HOST, HypervisorType::Vmx04, discovered_machine("esx"));
    let config = full_config();
    let reporter = RecordingReporter::default();

    let request = ProvisioningRequest {
        host: HOST.to_string(),
        user: Some("admin".to_string()),
        hypervisor_type: Some("vmx_04".to_string()),
        remote_services_ip: Some("10.60.1.5".to_string()),
        datastore: Some("ds2".to_string()),
        virtual_switch: Some("eth0".to_string()),
        ..Default::default()
    };
    let machine = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&request)
        .await
        .unwrap();

    assert_eq!(machine.user, "admin");
    assert_eq!(machine.virtual_switch.as_deref(), Some("eth0"));
    assert!(machine.find_datastore("ds2").unwrap().enabled);
    // Only the requested type was probed, and no datacenter was created.
    assert_eq!(
        mock.count(|c| matches!(c, Call::DiscoverMachine { .. })),
        1
    );
    assert_eq!(
        mock.count(|c| matches!(c, Call::CreateDatacenter { .. })),
        0
    );
}

#[tokio::test]
async fn test_host_section_overrides_global() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Xenserver, discovered_machine("xs"));
    let mut config = full_config();
    config.hosts.insert(
        HOST.to_string(),
        HostProperties {
            hypervisor_type: Some("XENSERVER".to_string()),
            ..Default::default()
        },
    );
    let reporter = RecordingReporter::default();

    MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap();

    assert_eq!(
        mock.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DiscoverMachine { .. }))
            .collect::<Vec<_>>(),
        vec![Call::DiscoverMachine {
            host: HOST.to_string(),
            hypervisor: HypervisorType::Xenserver,
        }]
    );
}

#[tokio::test]
async fn test_missing_config_makes_no_remote_call() {
    let mock = MockInfrastructure::new();
    let mut config = full_config();
    config.global.password = None;
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OnboardingError::ConfigMissing {
            property: "psswd",
            ..
        }
    ));
    assert!(mock.calls().is_empty());
    assert_eq!(
        stages(&reporter),
        vec![ProvisioningStage::ResolvingConfig, ProvisioningStage::Failed]
    );
}

#[tokio::test]
async fn test_unknown_hypervisor_type_is_rejected() {
    let mock = MockInfrastructure::new();
    let config = full_config();
    let reporter = RecordingReporter::default();

    let request = ProvisioningRequest {
        hypervisor_type: Some("esxi".to_string()),
        ..ProvisioningRequest::for_host(HOST)
    };
    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&request)
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::InvalidConfig { .. }));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_missing_datastore_never_saves() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(
        HOST,
        HypervisorType::Kvm,
        Machine {
            datastores: vec![datastore("other", "uuid-other", false)],
            ..discovered_machine("nodo")
        },
    );
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OnboardingError::ResourceMissing { kind: "datastore", ref name } if name == "ds1"
    ));
    assert_eq!(saves(&mock), 0);
    assert!(reporter.events().contains(&OnboardingEvent::ProvisioningFailed {
        host: HOST.to_string(),
        stage: ProvisioningStage::ValidatingResources,
        error: err.to_string(),
    }));
}

#[tokio::test]
async fn test_datastore_is_matched_by_name_only() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(
        HOST,
        HypervisorType::Kvm,
        Machine {
            datastores: vec![datastore("other", "ds1", false)],
            ..discovered_machine("nodo")
        },
    );
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OnboardingError::ResourceMissing { kind: "datastore", ref name } if name == "ds1"
    ));
    assert_eq!(saves(&mock), 0);
}

#[tokio::test]
async fn test_missing_virtual_switch_never_saves() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    let config = full_config();
    let reporter = RecordingReporter::default();

    let request = ProvisioningRequest {
        virtual_switch: Some("vmnic9".to_string()),
        ..ProvisioningRequest::for_host(HOST)
    };
    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OnboardingError::ResourceMissing {
            kind: "virtual switch",
            ..
        }
    ));
    assert_eq!(saves(&mock), 0);
}

#[tokio::test]
async fn test_no_hypervisor_found() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::NotFound(_)));
    assert_eq!(err.to_string(), format!("Not machine found in {HOST}"));
    assert_eq!(saves(&mock), 0);
}

#[tokio::test]
async fn test_already_registered_host() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.with_machine(managed_machine("nodo", HOST));
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::AlreadyExists(ref host) if host == HOST));
}

#[tokio::test]
async fn test_second_registration_code_means_already_exists() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    mock.fail(
        Operation::SaveMachine,
        InfraApiError::coded(codes::HYPERVISOR_2, "ip already in use by a machine"),
    );
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_other_save_errors_pass_the_message_through() {
    let mock = MockInfrastructure::new();
    mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    mock.fail(
        Operation::SaveMachine,
        InfraApiError::coded("MACHINE-7", "license exceeded"),
    );
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::Remote(_)));
    assert_eq!(err.to_string(), "MACHINE-7: license exceeded");
}

#[tokio::test]
async fn test_fresh_install_creates_topology() {
    let mock = MockInfrastructure::new();
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("nodo"));
    let config = full_config();
    let reporter = RecordingReporter::default();

    let machine = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap();

    let datacenters = mock.datacenters();
    assert_eq!(datacenters.len(), 1);
    assert_eq!(machine.datacenter_id, Some(datacenters[0].id));
    assert_eq!(mock.racks().len(), 1);
}

#[tokio::test]
async fn test_authorization_failure_is_reported_as_such() {
    let mock = MockInfrastructure::new();
    mock.fail(
        Operation::ListDatacenters,
        InfraApiError::Authorization("bad credentials".to_string()),
    );
    let config = full_config();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    assert!(matches!(err, OnboardingError::Authorization(_)));
}

#[tokio::test]
async fn test_config_resolved_with_empty_hosts() {
    let mock = MockInfrastructure::new();
    let config = MachineConfig::default();
    let reporter = RecordingReporter::default();

    let err = MachineProvisioner::new(&mock, &config, &reporter)
        .provision(&ProvisioningRequest::for_host(HOST))
        .await
        .unwrap_err();

    // `user` is the first setting resolved.
    assert!(matches!(
        err,
        OnboardingError::ConfigMissing {
            property: "user",
            ..
        }
    ));
}
