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

//! Removal of physical machines.

use kahuna_infra_api::MachineRepository;
use kahuna_infra_api::model::{Machine, MachineQuery};

use crate::batch::BatchReport;
use crate::error::{OnboardingError, OnboardingResult};
use crate::reporter::{OnboardingEvent, Reporter};

pub struct MachineRemover<'a, R: ?Sized> {
    repo: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: MachineRepository + ?Sized> MachineRemover<'a, R> {
    pub fn new(repo: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { repo, reporter }
    }

    pub async fn delete(&self, machine: &Machine) -> OnboardingResult<()> {
        self.repo.delete_machine(machine).await?;
        self.reporter.report(&OnboardingEvent::MachineDeleted {
            machine: machine.label(),
        });
        Ok(())
    }

    /// Deletes the machine selected by `query` and returns it.
    pub async fn delete_one(&self, query: &MachineQuery) -> OnboardingResult<Machine> {
        let machine = self
            .repo
            .find_machine(query)
            .await?
            .ok_or_else(|| OnboardingError::not_found("Machine not found"))?;
        self.delete(&machine).await?;
        Ok(machine)
    }

    /// Deletes every known machine, one at a time. A failed deletion is
    /// recorded and the remaining machines are still deleted.
    pub async fn delete_all(&self) -> OnboardingResult<BatchReport<Machine>> {
        let machines = self.repo.list_machines().await?;
        if machines.is_empty() {
            return Err(OnboardingError::not_found("Not machines found"));
        }

        let mut report = BatchReport::new();
        for machine in machines {
            let label = machine.label();
            match self.delete(&machine).await {
                Ok(()) => report.succeeded(label, machine),
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
