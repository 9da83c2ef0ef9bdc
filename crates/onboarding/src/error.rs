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

//! Error types for the onboarding workflow.

use kahuna_infra_api::InfraApiError;
use thiserror::Error;

pub type OnboardingResult<T> = Result<T, OnboardingError>;

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("Missing configuration value '{property}' for host {host}")]
    ConfigMissing { host: String, property: &'static str },

    #[error("Invalid configuration value '{value}' for '{property}'")]
    InvalidConfig { property: &'static str, value: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Missing {kind} {name} in machine")]
    ResourceMissing { kind: &'static str, name: String },

    #[error("Machine already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Remote(InfraApiError),

    #[error("Not authorized: {0}")]
    Authorization(String),
}

impl OnboardingError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn resource_missing(kind: &'static str, name: impl Into<String>) -> Self {
        Self::ResourceMissing {
            kind,
            name: name.into(),
        }
    }
}

impl From<InfraApiError> for OnboardingError {
    fn from(err: InfraApiError) -> Self {
        match err {
            InfraApiError::Authorization(message) => Self::Authorization(message),
            other => Self::Remote(other),
        }
    }
}
