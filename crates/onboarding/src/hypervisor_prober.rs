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

//! Ordered search for the hypervisor a host runs.

use kahuna_infra_api::model::{Datacenter, HypervisorType, Machine};
use kahuna_infra_api::{InfraApiError, InfraApiResult, MachineRepository, codes};

use crate::reporter::{OnboardingEvent, Reporter};

/// Classified result of probing one candidate.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The host runs the candidate hypervisor.
    Discovered(Machine),
    /// The host does not run the candidate; try the next one.
    Skip(String),
    /// Probing cannot continue.
    Fatal(InfraApiError),
}

impl ProbeOutcome {
    pub fn classify(result: InfraApiResult<Machine>) -> Self {
        match result {
            Ok(machine) => ProbeOutcome::Discovered(machine),
            Err(err) if err.has_any_error(&codes::PROBE_SKIP) => ProbeOutcome::Skip(err.to_string()),
            Err(err) => ProbeOutcome::Fatal(err),
        }
    }
}

/// Candidates to probe: the requested type alone, or every known type.
pub fn probe_candidates(requested: Option<HypervisorType>) -> Vec<HypervisorType> {
    match requested {
        Some(hypervisor) => vec![hypervisor],
        None => HypervisorType::ALL.to_vec(),
    }
}

pub struct HypervisorProber<'a, R: ?Sized> {
    repo: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: MachineRepository + ?Sized> HypervisorProber<'a, R> {
    pub fn new(repo: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { repo, reporter }
    }

    /// Tries each candidate in order and returns the first machine
    /// discovered. Candidates after a discovery are never probed. Returns
    /// `Ok(None)` when every candidate was skipped.
    pub async fn discover(
        &self,
        datacenter: &Datacenter,
        host: &str,
        user: &str,
        password: &str,
        candidates: &[HypervisorType],
    ) -> InfraApiResult<Option<Machine>> {
        for hypervisor in candidates.iter().copied() {
            self.reporter.report(&OnboardingEvent::ProbeAttempt {
                host: host.to_string(),
                hypervisor,
            });
            let result = self
                .repo
                .discover_machine(datacenter, host, hypervisor, user, password)
                .await;
            match ProbeOutcome::classify(result) {
                ProbeOutcome::Discovered(machine) => {
                    self.reporter.report(&OnboardingEvent::MachineDiscovered {
                        host: host.to_string(),
                        hypervisor,
                    });
                    return Ok(Some(machine));
                }
                ProbeOutcome::Skip(reason) => {
                    self.reporter.report(&OnboardingEvent::CandidateSkipped {
                        host: host.to_string(),
                        hypervisor,
                        reason,
                    });
                }
                ProbeOutcome::Fatal(err) => return Err(err),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert!(matches!(
            ProbeOutcome::classify(Ok(Machine::default())),
            ProbeOutcome::Discovered(_)
        ));
        assert!(matches!(
            ProbeOutcome::classify(Err(InfraApiError::coded(codes::NC_3, "nope"))),
            ProbeOutcome::Skip(_)
        ));
        assert!(matches!(
            ProbeOutcome::classify(Err(InfraApiError::coded(codes::RS_2, "nope"))),
            ProbeOutcome::Skip(_)
        ));
        assert!(matches!(
            ProbeOutcome::classify(Err(InfraApiError::coded("NC-1", "down"))),
            ProbeOutcome::Fatal(_)
        ));
        assert!(matches!(
            ProbeOutcome::classify(Err(InfraApiError::Authorization("no".to_string()))),
            ProbeOutcome::Fatal(_)
        ));
    }

    #[test]
    fn test_candidates() {
        assert_eq!(
            probe_candidates(Some(HypervisorType::Kvm)),
            vec![HypervisorType::Kvm]
        );
        assert_eq!(probe_candidates(None), HypervisorType::ALL.to_vec());
    }
}
