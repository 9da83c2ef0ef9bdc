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
pub enum Detached {
    Volume(Volume),
    VolumeNotFound,
    NotAttached,
}

pub async fn detach_volume<A>(api: &A, volume_name: &str) -> CliResult<Detached>
where
    A: VirtualMachineRepository + VolumeRepository + ?Sized,
{
    let Some(volume) = api.find_volume(volume_name).await? else {
        return Ok(Detached::VolumeNotFound);
    };
    let Some(vm) = api.attached_virtual_machine(&volume).await? else {
        return Ok(Detached::NotAttached);
    };

    tracing::debug!(volume = %volume.name, vm = %vm.name, "detaching volume");
    if vm.state.exists_in_hypervisor() {
        println!("Detaching volume from a running virtual machine. This may take some time...");
    }
    api.detach_volume(&vm, &volume).await?;
    Ok(Detached::Volume(api.refresh_volume(&volume).await?))
}
