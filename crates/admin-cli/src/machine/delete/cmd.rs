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
use kahuna_infra_api::model::Machine;
use kahuna_onboarding::{BatchReport, MachineRemover, Reporter};

use crate::error::CliResult;
use crate::machine::common::Selection;

pub enum Deleted {
    One(Machine),
    All(BatchReport<Machine>),
}

pub async fn delete_machines<A: MachineRepository + ?Sized>(
    api: &A,
    reporter: &dyn Reporter,
    selection: Selection,
) -> CliResult<Deleted> {
    let remover = MachineRemover::new(api, reporter);
    Ok(match selection {
        Selection::One(query) => Deleted::One(remover.delete_one(&query).await?),
        Selection::All => Deleted::All(remover.delete_all().await?),
    })
}
