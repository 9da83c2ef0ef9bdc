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

use kahuna_infra_api::VirtualMachineRepository;

use crate::error::CliResult;

#[derive(Debug, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// Still deployed and undeploying was not asked for.
    Deployed,
    NotFound,
}

pub async fn delete_vm<A: VirtualMachineRepository + ?Sized>(
    api: &A,
    name: &str,
    undeploy: bool,
) -> CliResult<Deletion> {
    let Some(mut vm) = api.find_virtual_machine(name).await? else {
        return Ok(Deletion::NotFound);
    };
    if vm.state.exists_in_hypervisor() {
        if !undeploy {
            return Ok(Deletion::Deployed);
        }
        vm = api.undeploy_virtual_machine(&vm).await?;
    }
    api.delete_virtual_machine(&vm).await?;
    Ok(Deletion::Deleted)
}
