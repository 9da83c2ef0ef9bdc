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

use kahuna_infra_api::model::Volume;
use kahuna_infra_api::{VirtualMachineRepository, VolumeRepository};

use crate::error::CliResult;

#[derive(Debug)]
pub enum Attached {
    /// The volume as it is after attaching it.
    Volume(Volume),
    VolumeNotFound,
    VmNotFound,
}

pub async fn attach_volume<A>(api: &A, volume_name: &str, vm_name: &str) -> CliResult<Attached>
where
    A: VirtualMachineRepository + VolumeRepository + ?Sized,
{
    let Some(volume) = api.find_volume(volume_name).await? else {
        return Ok(Attached::VolumeNotFound);
    };
    let Some(vm) = api.find_virtual_machine(vm_name).await? else {
        return Ok(Attached::VmNotFound);
    };

    tracing::debug!(volume = %volume.name, vm = %vm.name, "attaching volume");
    if vm.state.exists_in_hypervisor() {
        println!("Attaching volume to a running virtual machine. This may take some time...");
    }
    api.attach_volume(&vm, &volume).await?;
    Ok(Attached::Volume(api.refresh_volume(&volume).await?))
}
