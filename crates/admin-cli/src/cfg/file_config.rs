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

//! Provisioning defaults read from the machine configuration file.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use kahuna_onboarding::MachineConfig;

use crate::error::CliResult;

pub const ENV_PREFIX: &str = "KAHUNA_";

/// Loads the machine configuration from `path`, with `KAHUNA_` prefixed
/// environment variables layered on top (`KAHUNA_GLOBAL__USER=root`). A
/// missing file yields an empty configuration.
pub fn load_machine_config(path: &Path) -> CliResult<MachineConfig> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "machine configuration file not found");
    }
    let config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_reads_global_and_host_sections() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "machine.toml",
                r#"
                [global]
                user = "root"
                psswd = "temporal"
                remoteservicesip = "10.60.1.4"
                datastore = "ds1"
                vswitch = "eth1"

                [hosts."10.60.1.120"]
                type = "KVM"
                datastore = "ds2"
                "#,
            )?;

            let config = load_machine_config(Path::new("machine.toml")).unwrap();
            assert_eq!(config.global.user.as_deref(), Some("root"));
            assert_eq!(config.global.password.as_deref(), Some("temporal"));
            let host = &config.hosts["10.60.1.120"];
            assert_eq!(host.hypervisor_type.as_deref(), Some("KVM"));
            assert_eq!(host.datastore.as_deref(), Some("ds2"));
            assert!(host.user.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "machine.toml",
                r#"
                [global]
                user = "root"
                "#,
            )?;
            jail.set_env("KAHUNA_GLOBAL__USER", "admin");
            jail.set_env("KAHUNA_GLOBAL__VSWITCH", "eth0");

            let config = load_machine_config(Path::new("machine.toml")).unwrap();
            assert_eq!(config.global.user.as_deref(), Some("admin"));
            assert_eq!(config.global.virtual_switch.as_deref(), Some("eth0"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_empty() {
        Jail::expect_with(|_jail| {
            let config = load_machine_config(Path::new("nope.toml")).unwrap();
            assert_eq!(config, MachineConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("machine.toml", "[global\nuser = ")?;
            assert!(load_machine_config(Path::new("machine.toml")).is_err());
            Ok(())
        });
    }
}
