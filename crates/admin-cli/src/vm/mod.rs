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

mod common;
mod create;
mod delete;
mod deploy;
mod find;
mod list;
mod undeploy;


use clap::Parser;

use crate::cfg::dispatch::Dispatch;

#[derive(Parser, Debug, Dispatch)]
pub enum Cmd {
    #[clap(about = "List all virtual machines", visible_alias = "l")]
    List(list::Args),
    #[clap(about = "Find a virtual machine by name", visible_alias = "f")]
    Find(find::Args),
    #[clap(about = "Deploy a virtual machine")]
    Deploy(deploy::Args),
    #[clap(about = "Undeploy a virtual machine")]
    Undeploy(undeploy::Args),
    #[clap(about = "Create a virtual machine from a template", visible_alias = "c")]
    Create(create::Args),
    #[clap(about = "Delete a virtual machine", visible_alias = "d")]
    Delete(delete::Args),
}
