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

use std::path::PathBuf;

use clap::Parser;

use crate::cfg::dispatch::Dispatch;
use crate::output::OutputFormat;
use crate::{machine, vm, volume};

#[derive(Parser, Debug)]
#[clap(name = "kahuna", version)]
#[clap(about = "Onboard and manage hypervisor hosts, virtual machines and volumes")]
pub struct CliOptions {
    #[clap(long, env = "KAHUNA_API_URL")]
    #[clap(help = "Base URL of the infrastructure API, e.g. http://10.60.1.2/api")]
    pub api_url: Option<String>,

    #[clap(long, env = "KAHUNA_API_USER")]
    #[clap(help = "User to authenticate against the infrastructure API")]
    pub api_user: Option<String>,

    #[clap(long, env = "KAHUNA_API_PASSWORD", hide_env_values = true)]
    #[clap(help = "Password to authenticate against the infrastructure API")]
    pub api_password: Option<String>,

    #[clap(long, env = "KAHUNA_CONFIG", default_value = "config/machine.toml")]
    #[clap(help = "Machine configuration file with the provisioning defaults")]
    pub config: PathBuf,

    #[clap(short, long, value_enum, default_value = "ascii-table")]
    pub format: OutputFormat,

    #[clap(short, long, action = clap::ArgAction::Count)]
    #[clap(help = "Increase log verbosity, can be repeated")]
    pub debug: u8,

    #[clap(subcommand)]
    pub commands: Option<CliCommand>,
}

#[derive(Parser, Debug, Dispatch)]
pub enum CliCommand {
    #[clap(about = "Physical machine related handling", subcommand, visible_alias = "m")]
    #[dispatch]
    Machine(machine::Cmd),
    #[clap(about = "Virtual machine related handling", subcommand)]
    #[dispatch]
    Vm(vm::Cmd),
    #[clap(about = "Volume related handling", subcommand, visible_alias = "vol")]
    #[dispatch]
    Volume(volume::Cmd),
}
