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

use clap::Parser;

#[derive(Parser, Debug)]
pub struct Args {
    #[clap(short, long, help = "Id of the template to build the virtual machine from")]
    pub template_id: u32,
    #[clap(short, long, help = "Number of virtual CPUs, defaults to the template's")]
    pub cpu: Option<u32>,
    #[clap(short, long, help = "RAM in MB, defaults to the template's")]
    pub ram: Option<u32>,
    #[clap(short, long, action, help = "Deploy the virtual machine once created")]
    pub deploy: bool,
}
