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
use kahuna_onboarding::{BatchReport, MachineHealthChecker, Reporter};

use crate::error::CliResult;
use crate::machine::common::{Selection, machine_rows};
use crate::output::{OutputFormat, print_batch, print_rows};

pub enum Checked {
    One(Machine),
    All(BatchReport<Machine>),
}

pub async fn check_machines<A: MachineRepository + ?Sized>(
    api: &A,
    reporter: &dyn Reporter,
    selection: Selection,
) -> CliResult<Checked> {
    let checker = MachineHealthChecker::new(api, reporter);
    Ok(match selection {
        Selection::One(query) => Checked::One(checker.check_one(&query).await?),
        Selection::All => Checked::All(checker.check_all().await?),
    })
}

pub fn print_checked(checked: &Checked, format: OutputFormat) -> CliResult<()> {
    match checked {
        Checked::One(machine) => print_rows(&machine_rows(std::slice::from_ref(machine)), format),
        Checked::All(report) => {
            let machines: Vec<Machine> = report.successes().map(|(_, m)| m.clone()).collect();
            print_rows(&machine_rows(&machines), format)?;
            if !report.is_success() {
                print_batch(report, "checked");
            }
            Ok(())
        }
    }
}
