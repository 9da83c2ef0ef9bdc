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

mod check;
mod common;
mod create;
mod datastores;
mod delete;
mod list;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cfg::dispatch::Dispatch;

#[derive(Parser, Debug, Dispatch)]
pub enum Cmd {
    #[clap(about = "Refresh and show the state of physical machines", visible_alias = "c")]
    Check(check::Args),
    #[clap(about = "Discover a host and register it as a physical machine")]
    Create(create::Args),
    #[clap(about = "Delete physical machines", visible_alias = "d")]
    Delete(delete::Args),
    #[clap(about = "List all physical machines", visible_alias = "l")]
    List(list::Args),
    #[clap(about = "Show, enable or disable the datastores of physical machines")]
    Datastores(datastores::Args),
}
