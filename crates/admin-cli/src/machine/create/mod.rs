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

use crate::cfg::run::Run;
use crate::cfg::runtime::RuntimeContext;
use crate::error::CliResult;
use crate::machine::common::machine_rows;
use crate::output::print_rows;

impl Run for Args {
    async fn run(self, ctx: &mut RuntimeContext) -> CliResult<()> {
        let machine = cmd::create_machine(
            ctx.api(),
            &ctx.config.machine_config,
            &ctx.reporter,
            self.into(),
        )
        .await?;
        print_rows(&machine_rows(&[machine]), ctx.config.format)
    }
}
