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

//! Refreshes the observed state of known machines.

use kahuna_infra_api::MachineRepository;
use kahuna_infra_api::model::{Machine, MachineQuery, MachineState};

use crate::batch::BatchReport;
use crate::error::{OnboardingError, OnboardingResult};
use crate::reporter::{OnboardingEvent, Reporter};

pub struct MachineHealthChecker<'a, R: ?Sized> {
    repo: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: MachineRepository + ?Sized> MachineHealthChecker<'a, R> {
    pub fn new(repo: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { repo, reporter }
    }

    /// Asks the API for the current state of `machine` and records it.
    pub async fn check(&self, machine: &mut Machine) -> OnboardingResult<MachineState> {
        let state = self.repo.check_machine(machine).await?;
        machine.state = state;
        self.reporter.report(&OnboardingEvent::MachineChecked {
            machine: machine.label(),
            state,
        });
        Ok(state)
    }

    /// Checks the machine selected by `query`.
    pub async fn check_one(&self, query: &MachineQuery) -> OnboardingResult<Machine> {
        let mut machine = self
            .repo
            .find_machine(query)
            .await?
            .ok_or_else(|| OnboardingError::not_found("Machine not found"))?;
        self.check(&mut machine).await?;
        Ok(machine)
    }

    /// Checks every known machine. A failing machine is recorded in the
    /// report and does not stop the others from being checked.
    pub async fn check_all(&self) -> OnboardingResult<BatchReport<Machine>> {
        let machines = self.repo.list_machines().await?;
        tracing::debug!("{} machines found.", machines.len());

        let mut report = BatchReport::new();
        for mut machine in machines {
            let label = machine.label();
            match self.check(&mut machine).await {
                Ok(_) => report.succeeded(label, machine),
                Err(err) => {
                    self.reporter.report(&OnboardingEvent::BatchItemFailed {
                        item: label.clone(),
                        error: err.to_string(),
                    });
                    report.failed(label, err);
                }
            }
        }
        Ok(report)
    }
}
