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

use kahuna_infra_api::InfraApiError;
use kahuna_onboarding::OnboardingError;
use thiserror::Error;

pub type CliResult<T> = Result<T, KahunaCliError>;

#[derive(Debug, Error)]
pub enum KahunaCliError {
    #[error("{0}")]
    Onboarding(#[from] OnboardingError),

    #[error("{0}")]
    Api(#[from] InfraApiError),

    #[error("Unable to load configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("Error while handling json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),
}

impl From<figment::Error> for KahunaCliError {
    fn from(err: figment::Error) -> Self {
        KahunaCliError::Config(Box::new(err))
    }
}
