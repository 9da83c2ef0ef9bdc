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

use super::common::{Selection, datastore_rows};
use crate::cfg::run::Run;
use crate::cfg::runtime::RuntimeContext;
use crate::error::CliResult;
use crate::output::print_rows;

impl Run for Args {
    async fn run(self, ctx: &mut RuntimeContext) -> CliResult<()> {
        let toggle = self
            .toggle()
            .map(|(datastore, enabled)| (datastore.to_string(), enabled));
        let selection = Selection::from_args(self.name, self.host);
        let format = ctx.config.format;

        match (selection, toggle) {
            (Selection::One(query), Some((datastore, enabled))) => {
                let rows =
                    cmd::toggle_datastore(ctx.api(), &ctx.reporter, &query, &datastore, enabled)
                        .await?;
                print_rows(&rows, format)
            }
            (selection, _) => {
                let machines = cmd::machines_for(ctx.api(), &selection).await?;
                print_rows(&datastore_rows(&machines), format)
            }
        }
    }
}
