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

//! Enables or disables a datastore of a machine.

use kahuna_infra_api::MachineRepository;
use kahuna_infra_api::model::{Datastore, Machine};

use crate::error::{OnboardingError, OnboardingResult};
use crate::reporter::{OnboardingEvent, Reporter};

/// A datastore before and after a toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatastoreToggle {
    pub before: Datastore,
    pub after: Datastore,
}

impl DatastoreToggle {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

pub struct DatastoreToggler<'a, R: ?Sized> {
    repo: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: MachineRepository + ?Sized> DatastoreToggler<'a, R> {
    pub fn new(repo: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { repo, reporter }
    }

    /// Sets the `enabled` flag of the datastore named, or identified by
    /// UUID, `selector` and persists the machine. Asking for the value the
    /// datastore already has changes nothing.
    pub async fn set_enabled(
        &self,
        machine: &mut Machine,
        selector: &str,
        enabled: bool,
    ) -> OnboardingResult<DatastoreToggle> {
        let label = machine.label();
        let datastore = machine.find_datastore_mut(selector).ok_or_else(|| {
            OnboardingError::not_found(format!(
                "No datastore found with name or uuid {selector} in machine {label}"
            ))
        })?;
        let before = datastore.clone();
        if before.enabled == enabled {
            return Ok(DatastoreToggle {
                after: before.clone(),
                before,
            });
        }

        datastore.enabled = enabled;
        let after = datastore.clone();
        if let Err(err) = self.repo.update_machine(machine).await {
            // Keep the local copy in line with the remote one.
            if let Some(datastore) = machine.find_datastore_mut(selector) {
                datastore.enabled = before.enabled;
            }
            return Err(err.into());
        }

        self.reporter.report(&OnboardingEvent::DatastoreToggled {
            machine: label,
            datastore: after.name.clone(),
            enabled,
        });
        Ok(DatastoreToggle { before, after })
    }
}
