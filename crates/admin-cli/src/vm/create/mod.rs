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

pub mod args;
pub mod cmd;

pub use args::Args;

use super::common::print_vms;
use crate::cfg::run::Run;
use crate::cfg::runtime::RuntimeContext;
use crate::error::CliResult;

impl Run for Args {
    async fn run(self, ctx: &mut RuntimeContext) -> CliResult<()> {
        let api = ctx.api();
        match cmd::create_vm(api, api.user(), &self).await? {
            cmd::Created::Vm(vm) => print_vms(&[vm], false, ctx.config.format)?,
            cmd::Created::TemplateNotFound => {
                println!("No template was found with id {}", self.template_id)
            }
            cmd::Created::NoCompatibleDatacenter(template) => {
                println!("Could not find a compatible virtual datacenter for {template}")
            }
        }
        Ok(())
    }
}
