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

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[clap(group(ArgGroup::new("selector").required(true).args(&["name", "host", "all"])))]
#[clap(group(ArgGroup::new("toggle").args(&["enable", "disable"]).requires("datastore")))]
pub struct Args {
    #[clap(short, long, help = "Name of the physical machine")]
    pub name: Option<String>,
    #[clap(short = 'i', long, help = "IP address of the physical machine")]
    pub host: Option<String>,
    #[clap(short, long, action, help = "Show the datastores of every physical machine")]
    pub all: bool,
    #[clap(
        short,
        long,
        requires = "toggle",
        conflicts_with = "all",
        help = "Name or UUID of the datastore to enable or disable"
    )]
    pub datastore: Option<String>,
    #[clap(long, action, help = "Enable the datastore")]
    pub enable: bool,
    #[clap(long, action, help = "Disable the datastore")]
    pub disable: bool,
}

impl Args {
    /// Requested state for `--datastore`, if any.
    pub fn toggle(&self) -> Option<(&str, bool)> {
        self.datastore
            .as_deref()
            .map(|datastore| (datastore, self.enable && !self.disable))
    }
}
