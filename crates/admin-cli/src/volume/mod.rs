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

mod attach;
mod common;
mod detach;
mod find;
mod list;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cfg::dispatch::Dispatch;

#[derive(Parser, Debug, Dispatch)]
pub enum Cmd {
    #[clap(about = "List the volumes of every virtual datacenter", visible_alias = "l")]
    List(list::Args),
    #[clap(about = "Find a volume by name", visible_alias = "f")]
    Find(find::Args),
    #[clap(about = "Attach a volume to a virtual machine")]
    Attach(attach::Args),
    #[clap(about = "Detach a volume from its virtual machine")]
    Detach(detach::Args),
}
