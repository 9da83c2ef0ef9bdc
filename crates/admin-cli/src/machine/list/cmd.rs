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

use crate::error::CliResult;
use crate::machine::common::machine_rows;
use crate::output::{OutputFormat, print_rows};

pub async fn list_machines<A: MachineRepository + ?Sized>(
    api: &A,
    format: OutputFormat,
) -> CliResult<()> {
    let machines = api.list_machines().await?;
    if machines.is_empty() {
        println!("No machines found");
        return Ok(());
    }
    print_rows(&machine_rows(&machines), format)
}
