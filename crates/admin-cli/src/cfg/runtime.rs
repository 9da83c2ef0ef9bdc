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

use kahuna_infra_api::{ApiConfig, HttpInfrastructureApi, Session};
use kahuna_onboarding::{MachineConfig, TracingReporter};

use crate::cfg::cli_options::CliOptions;
use crate::cfg::file_config::load_machine_config;
use crate::error::{CliResult, KahunaCliError};
use crate::output::OutputFormat;

pub struct RuntimeConfig {
    pub format: OutputFormat,
    pub machine_config: MachineConfig,
}

// RuntimeContext is handed to every command. It owns the API session,
// which is released once the command is done with the context.
pub struct RuntimeContext {
    pub api: Session<HttpInfrastructureApi>,
    pub config: RuntimeConfig,
    pub reporter: TracingReporter,
}

impl RuntimeContext {
    pub async fn connect(options: &CliOptions) -> CliResult<Self> {
        let api_config = ApiConfig {
            url: required(&options.api_url, "--api-url")?,
            user: required(&options.api_user, "--api-user")?,
            password: required(&options.api_password, "--api-password")?,
        };
        let machine_config = load_machine_config(&options.config)?;
        tracing::debug!(url = %api_config.url, user = %api_config.user, "connecting to the infrastructure API");
        let api = HttpInfrastructureApi::connect(api_config).await?;

        Ok(Self {
            api,
            config: RuntimeConfig {
                format: options.format,
                machine_config,
            },
            reporter: TracingReporter,
        })
    }

    pub fn api(&self) -> &HttpInfrastructureApi {
        self.api.api()
    }
}

fn required(value: &Option<String>, name: &'static str) -> CliResult<String> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .ok_or(KahunaCliError::MissingSetting(name))
}
