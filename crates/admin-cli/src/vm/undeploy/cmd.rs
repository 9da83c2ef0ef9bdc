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

pub async fn undeploy_by_name<A: VirtualMachineRepository + ?Sized>(
    api: &A,
    name: &str,
) -> CliResult<Option<VirtualMachine>> {
    let Some(vm) = api.find_virtual_machine(name).await? else {
        return Ok(None);
    };
    tracing::info!(vm = %vm.name, "undeploying virtual machine");
    Ok(Some(api.undeploy_virtual_machine(&vm).await?))
}

#[cfg(test)]
mod tests {
    use kahuna_infra_api::InfraApiError;
    use kahuna_infra_api::model::{HypervisorType, VirtualMachineState};
    use kahuna_infra_mock::{MockInfrastructure, Operation};

    use super::*;
    use crate::error::KahunaCliError;

    #[tokio::test]
    async fn test_undeploy_releases_the_vm() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        let vapp = mock.with_virtual_appliance(&vdc, "vapp");
        mock.with_virtual_machine(&vapp, "web", VirtualMachineState::On);

        let vm = undeploy_by_name(&mock, "web").await.unwrap().unwrap();

        assert_eq!(vm.state, VirtualMachineState::NotAllocated);
    }

    #[tokio::test]
    async fn test_failed_task_is_an_error() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        let vapp = mock.with_virtual_appliance(&vdc, "vapp");
        mock.with_virtual_machine(&vapp, "web", VirtualMachineState::On);
        mock.fail(
            Operation::UndeployVirtualMachine,
            InfraApiError::TaskFailed {
                task: "undeploy web".to_string(),
                state: "FINISHED_UNSUCCESSFULLY".to_string(),
            },
        );

        let err = undeploy_by_name(&mock, "web").await.unwrap_err();

        assert!(matches!(
            err,
            KahunaCliError::Api(InfraApiError::TaskFailed { .. })
        ));
    }
}
