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

use kahuna_infra_api::InfrastructureApi;
use kahuna_infra_api::model::Machine;
use kahuna_onboarding::{MachineConfig, MachineProvisioner, ProvisioningRequest, Reporter};

use crate::error::CliResult;

pub async fn create_machine<A: InfrastructureApi + ?Sized>(
    api: &A,
    config: &MachineConfig,
    reporter: &dyn Reporter,
    request: ProvisioningRequest,
) -> CliResult<Machine> {
    tracing::info!(host = %request.host, "registering physical machine");
    let machine = MachineProvisioner::new(api, config, reporter)
        .provision(&request)
        .await?;
    Ok(machine)
}
