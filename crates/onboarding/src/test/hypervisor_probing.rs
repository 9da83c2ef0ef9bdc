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

//! Tests for the ordered hypervisor search.

use kahuna_infra_api::model::HypervisorType;
use kahuna_infra_api::{InfraApiError, codes};
use kahuna_infra_mock::{Call, MockInfrastructure};

use super::helpers::*;
use crate::hypervisor_prober::{HypervisorProber, probe_candidates};
use crate::reporter::OnboardingEvent;

fn probes(mock: &MockInfrastructure) -> Vec<HypervisorType> {
    mock.calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::DiscoverMachine { hypervisor, .. } => Some(hypervisor),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_success_stops_the_search() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    // Third candidate in the fixed order.
    mock.discoverable(HOST, HypervisorType::Xen3, discovered_machine("xen"));
    let reporter = RecordingReporter::default();

    let machine = HypervisorProber::new(&mock, &reporter)
        .discover(&dc, HOST, "root", "pw", &probe_candidates(None))
        .await
        .unwrap()
        .expect("machine should be discovered");

    assert_eq!(machine.hypervisor, Some(HypervisorType::Xen3));
    assert_eq!(
        probes(&mock),
        vec![HypervisorType::Vbox, HypervisorType::Kvm, HypervisorType::Xen3]
    );
    assert_eq!(
        reporter.count(|e| matches!(e, OnboardingEvent::CandidateSkipped { .. })),
        2
    );
}

#[tokio::test]
async fn test_explicit_type_probes_once() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("kvm"));
    let reporter = RecordingReporter::default();

    let machine = HypervisorProber::new(&mock, &reporter)
        .discover(
            &dc,
            HOST,
            "root",
            "pw",
            &probe_candidates(Some(HypervisorType::Kvm)),
        )
        .await
        .unwrap();

    assert!(machine.is_some());
    assert_eq!(probes(&mock), vec![HypervisorType::Kvm]);
}

#[tokio::test]
async fn test_skip_code_then_success() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    mock.discovery_fails(
        HOST,
        HypervisorType::Vbox,
        InfraApiError::coded(codes::NC_3, "not a vbox"),
    );
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("second"));
    let reporter = RecordingReporter::default();

    let machine = HypervisorProber::new(&mock, &reporter)
        .discover(&dc, HOST, "root", "pw", &probe_candidates(None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(machine.name, "second");
    assert_eq!(probes(&mock).len(), 2);
}

#[tokio::test]
async fn test_unreachable_service_is_skipped() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    mock.discovery_fails(
        HOST,
        HypervisorType::Vbox,
        InfraApiError::coded(codes::RS_2, "vsm unreachable for vbox"),
    );
    mock.discoverable(HOST, HypervisorType::Kvm, discovered_machine("kvm"));
    let reporter = RecordingReporter::default();

    let machine = HypervisorProber::new(&mock, &reporter)
        .discover(&dc, HOST, "root", "pw", &probe_candidates(None))
        .await
        .unwrap();
    assert!(machine.is_some());
}

#[tokio::test]
async fn test_other_error_aborts() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    mock.discovery_fails(
        HOST,
        HypervisorType::Kvm,
        InfraApiError::coded("NC-1", "node collector down"),
    );
    mock.discoverable(HOST, HypervisorType::Xen3, discovered_machine("xen"));
    let reporter = RecordingReporter::default();

    let err = HypervisorProber::new(&mock, &reporter)
        .discover(&dc, HOST, "root", "pw", &probe_candidates(None))
        .await
        .unwrap_err();

    assert!(err.has_error("NC-1"));
    assert_eq!(
        probes(&mock),
        vec![HypervisorType::Vbox, HypervisorType::Kvm]
    );
}

#[tokio::test]
async fn test_exhausted_candidates_is_not_an_error() {
    let mock = MockInfrastructure::new();
    let dc = mock.with_datacenter("dc", RS_IP);
    let reporter = RecordingReporter::default();

    let machine = HypervisorProber::new(&mock, &reporter)
        .discover(&dc, HOST, "root", "pw", &probe_candidates(None))
        .await
        .unwrap();

    assert!(machine.is_none());
    assert_eq!(probes(&mock), HypervisorType::ALL.to_vec());
}
