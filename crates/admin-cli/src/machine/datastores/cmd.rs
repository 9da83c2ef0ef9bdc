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

use kahuna_infra_api::MachineRepository;
use kahuna_infra_api::model::{Machine, MachineQuery};
use kahuna_onboarding::{DatastoreToggler, OnboardingError, Reporter};

use crate::error::CliResult;
use crate::machine::common::{DatastoreRow, Selection};

pub async fn machines_for<A: MachineRepository + ?Sized>(
    api: &A,
    selection: &Selection,
) -> CliResult<Vec<Machine>> {
    match selection {
        Selection::One(query) => Ok(vec![find(api, query).await?]),
        Selection::All => {
            let machines = api.list_machines().await?;
            if machines.is_empty() {
                return Err(OnboardingError::not_found("Not machines found").into());
            }
            tracing::debug!("{} machines found", machines.len());
            Ok(machines)
        }
    }
}

/// Sets the `enabled` flag of a datastore and returns the datastore as it
/// was before and after.
pub async fn toggle_datastore<A: MachineRepository + ?Sized>(
    api: &A,
    reporter: &dyn Reporter,
    query: &MachineQuery,
    datastore: &str,
    enabled: bool,
) -> CliResult<Vec<DatastoreRow>> {
    let mut machine = find(api, query).await?;
    tracing::debug!(
        "{}abling datastore '{datastore}'",
        if enabled { "en" } else { "dis" }
    );
    let toggle = DatastoreToggler::new(api, reporter)
        .set_enabled(&mut machine, datastore, enabled)
        .await?;
    let label = machine.label();
    Ok(vec![
        DatastoreRow::new(&label, &toggle.before),
        DatastoreRow::new(&label, &toggle.after),
    ])
}

async fn find<A: MachineRepository + ?Sized>(api: &A, query: &MachineQuery) -> CliResult<Machine> {
    let machine = api
        .find_machine(query)
        .await?
        .ok_or_else(|| OnboardingError::not_found("Machine not found"))?;
    Ok(machine)
}
