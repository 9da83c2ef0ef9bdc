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
use kahuna_infra_api::model::VirtualMachine;

use crate::error::CliResult;

/// Deploys the virtual machine called `name` and waits for it. `None`
/// when there is no such virtual machine.
pub async fn deploy_by_name<A: VirtualMachineRepository + ?Sized>(
    api: &A,
    name: &str,
) -> CliResult<Option<VirtualMachine>> {
    let Some(vm) = api.find_virtual_machine(name).await? else {
        return Ok(None);
    };
    tracing::info!(vm = %vm.name, "deploying virtual machine");
    Ok(Some(api.deploy_virtual_machine(&vm).await?))
}

#[cfg(test)]
mod tests {
    use kahuna_infra_api::model::{HypervisorType, VirtualMachineState};
    use kahuna_infra_mock::{Call, MockInfrastructure};

    use super::*;

    #[tokio::test]
    async fn test_deploy_turns_the_vm_on() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        let vapp = mock.with_virtual_appliance(&vdc, "vapp");
        mock.with_virtual_machine(&vapp, "web", VirtualMachineState::NotAllocated);

        let vm = deploy_by_name(&mock, "web").await.unwrap().unwrap();

        assert_eq!(vm.state, VirtualMachineState::On);
    }

    #[tokio::test]
    async fn test_unknown_vm_is_not_deployed() {
        let mock = MockInfrastructure::new();

        assert!(deploy_by_name(&mock, "web").await.unwrap().is_none());
        assert_eq!(
            mock.count(|c| matches!(c, Call::DeployVirtualMachine(_))),
            0
        );
    }
}
