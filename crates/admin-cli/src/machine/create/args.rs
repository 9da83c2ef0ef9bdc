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
use kahuna_onboarding::ProvisioningRequest;

// Values left out are taken from the machine configuration file, first
// from the section of the host and then from the global section.
#[derive(Parser, Debug)]
pub struct Args {
    #[clap(short = 'i', long, help = "IP address of the host to register")]
    pub host: String,
    #[clap(short, long, help = "User to log into the hypervisor")]
    pub user: Option<String>,
    #[clap(short, long = "psswd", help = "Password to log into the hypervisor")]
    pub password: Option<String>,
    #[clap(
        short = 't',
        long = "type",
        help = "Hypervisor type (VBOX, KVM, XEN_3, VMX_04, HYPERV_301, XENSERVER). All of them are tried when not given"
    )]
    pub hypervisor_type: Option<String>,
    #[clap(short, long = "rsip", help = "IP address of the remote services")]
    pub remote_services_ip: Option<String>,
    #[clap(short, long, help = "Datastore to enable on the machine")]
    pub datastore: Option<String>,
    #[clap(short = 's', long = "vswitch", help = "Virtual switch to use")]
    pub virtual_switch: Option<String>,
}

impl From<Args> for ProvisioningRequest {
    fn from(args: Args) -> Self {
        ProvisioningRequest {
            host: args.host,
            user: args.user,
            password: args.password,
            hypervisor_type: args.hypervisor_type,
            remote_services_ip: args.remote_services_ip,
            datastore: args.datastore,
            virtual_switch: args.virtual_switch,
        }
    }
}
