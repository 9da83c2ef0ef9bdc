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

use super::args::Args;
use crate::error::CliResult;

#[derive(Debug)]
pub enum Created {
    Vm(VirtualMachine),
    TemplateNotFound,
    /// Name of the template no virtual datacenter can run.
    NoCompatibleDatacenter(String),
}

/// Name of the virtual appliance holding the virtual machines created by
/// `user`.
pub fn appliance_name(user: &str) -> String {
    format!("Kahuna-{user}")
}

pub async fn create_vm<A: VirtualMachineRepository + ?Sized>(
    api: &A,
    user: &str,
    args: &Args,
) -> CliResult<Created> {
    let Some(template) = api.find_template(args.template_id).await? else {
        return Ok(Created::TemplateNotFound);
    };
    tracing::debug!(template = %template.name, "using template");

    let Some(vdc) = api.find_compatible_virtual_datacenter(&template).await? else {
        return Ok(Created::NoCompatibleDatacenter(template.name));
    };
    tracing::debug!(vdc = %vdc.name, "using virtual datacenter");

    let name = appliance_name(user);
    let appliance = match api.find_virtual_appliance(&vdc, &name).await? {
        Some(appliance) => appliance,
        None => {
            tracing::debug!(vapp = %name, "virtual appliance not found, creating it");
            api.create_virtual_appliance(&vdc, &name).await?
        }
    };

    let mut vm = api
        .create_virtual_machine(&appliance, &template, args.cpu, args.ram)
        .await?;
    if args.deploy {
        vm = api.deploy_virtual_machine(&vm).await?;
    }
    Ok(Created::Vm(vm))
}

#[cfg(test)]
mod tests {
    use kahuna_infra_api::model::{HypervisorType, Template, VirtualMachineState};
    use kahuna_infra_mock::{Call, MockInfrastructure};

    use super::*;

    fn template(id: u32, hypervisors: Vec<HypervisorType>) -> Template {
        Template {
            id,
            name: format!("template-{id}"),
            datacenter_id: 1,
            compatible_hypervisors: hypervisors,
            cpu_required: 1,
            ram_required: 256,
        }
    }

    fn args(template_id: u32) -> Args {
        Args {
            template_id,
            cpu: None,
            ram: None,
            deploy: false,
        }
    }

    #[tokio::test]
    async fn test_creates_appliance_once_per_user() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        mock.with_template(&vdc, template(7, vec![HypervisorType::Kvm]));

        create_vm(&mock, "admin", &args(7)).await.unwrap();
        create_vm(&mock, "admin", &args(7)).await.unwrap();

        let appliances = mock.appliances();
        assert_eq!(appliances.len(), 1);
        assert_eq!(appliances[0].name, "Kahuna-admin");
        assert_eq!(mock.virtual_machines().len(), 2);
        assert_eq!(
            mock.count(|c| matches!(c, Call::CreateVirtualAppliance(_))),
            1
        );
    }

    #[tokio::test]
    async fn test_reuses_existing_appliance() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        mock.with_template(&vdc, template(7, vec![HypervisorType::Kvm]));
        mock.with_virtual_appliance(&vdc, "Kahuna-admin");

        create_vm(&mock, "admin", &args(7)).await.unwrap();

        assert_eq!(mock.appliances().len(), 1);
    }

    #[tokio::test]
    async fn test_overrides_and_deploy() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        mock.with_template(&vdc, template(7, vec![HypervisorType::Kvm]));

        let created = create_vm(
            &mock,
            "admin",
            &Args {
                cpu: Some(4),
                ram: Some(2048),
                deploy: true,
                ..args(7)
            },
        )
        .await
        .unwrap();

        let Created::Vm(vm) = created else {
            panic!("expected a virtual machine, got {created:?}");
        };
        assert_eq!(vm.cpu, 4);
        assert_eq!(vm.ram, 2048);
        assert_eq!(vm.state, VirtualMachineState::On);
    }

    #[tokio::test]
    async fn test_unknown_template() {
        let mock = MockInfrastructure::new();
        mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);

        let created = create_vm(&mock, "admin", &args(7)).await.unwrap();

        assert!(matches!(created, Created::TemplateNotFound));
        assert!(mock.appliances().is_empty());
    }

    #[tokio::test]
    async fn test_no_compatible_datacenter() {
        let mock = MockInfrastructure::new();
        let vdc = mock.with_virtual_datacenter("vdc", 1, HypervisorType::Kvm);
        mock.with_template(&vdc, template(7, vec![HypervisorType::Vmx04]));

        let created = create_vm(&mock, "admin", &args(7)).await.unwrap();

        assert!(matches!(created, Created::NoCompatibleDatacenter(ref name) if name == "template-7"));
        assert!(mock.virtual_machines().is_empty());
    }
}
