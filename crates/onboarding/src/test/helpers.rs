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

//! Shared test infrastructure for onboarding tests.

use std::sync::Mutex;

use kahuna_infra_api::model::{Datastore, Machine, VirtualSwitch};

use crate::config_resolver::{HostProperties, MachineConfig};
use crate::reporter::{OnboardingEvent, Reporter};

pub(crate) const RS_IP: &str = "10.60.1.4";
pub(crate) const HOST: &str = "10.60.1.120";

/// Reporter keeping every event for later inspection.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    events: Mutex<Vec<OnboardingEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<OnboardingEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&OnboardingEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &OnboardingEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub(crate) fn datastore(name: &str, uuid: &str, enabled: bool) -> Datastore {
    Datastore {
        uuid: uuid.to_string(),
        name: name.to_string(),
        root_path: format!("/var/lib/{name}"),
        enabled,
        size: 100 << 30,
        used_size: 0,
    }
}

/// A machine as the node collector reports it: two datastores, both
/// disabled, and two virtual switches.
pub(crate) fn discovered_machine(name: &str) -> Machine {
    Machine {
        name: name.to_string(),
        datastores: vec![
            datastore("ds1", "uuid-ds1", false),
            datastore("ds2", "uuid-ds2", false),
        ],
        available_virtual_switches: vec![
            VirtualSwitch {
                name: "eth0".to_string(),
            },
            VirtualSwitch {
                name: "eth1".to_string(),
            },
        ],
        ..Default::default()
    }
}

/// A machine already registered in a rack.
pub(crate) fn managed_machine(name: &str, ip: &str) -> Machine {
    Machine {
        ip: ip.to_string(),
        datacenter_id: Some(1),
        rack_id: Some(2),
        ..discovered_machine(name)
    }
}

/// Configuration giving every required setting globally.
pub(crate) fn full_config() -> MachineConfig {
    MachineConfig {
        global: HostProperties {
            user: Some("root".to_string()),
            password: Some("temporal".to_string()),
            remote_services_ip: Some(RS_IP.to_string()),
            datastore: Some("ds1".to_string()),
            virtual_switch: Some("eth1".to_string()),
            hypervisor_type: None,
        },
        hosts: Default::default(),
    }
}
