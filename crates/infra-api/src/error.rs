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

//! Error types for infrastructure API calls.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable error codes reported by the infrastructure API.
pub mod codes {
    /// The node collector could not talk to the host with the requested
    /// hypervisor type.
    pub const NC_3: &str = "NC-3";
    /// The remote service is unreachable for the requested hypervisor type.
    pub const RS_2: &str = "RS-2";
    /// The remote services IP is already in use by another datacenter.
    pub const RS_3: &str = "RS-3";
    pub const HYPERVISOR_1: &str = "HYPERVISOR-1";
    pub const HYPERVISOR_2: &str = "HYPERVISOR-2";

    /// Codes that mean "wrong hypervisor type, try the next one".
    pub const PROBE_SKIP: [&str; 2] = [NC_3, RS_2];

    /// Codes that mean the host is already registered.
    pub const ALREADY_REGISTERED: [&str; 2] = [HYPERVISOR_1, HYPERVISOR_2];
}

/// One entry of the error collection returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    pub code: String,
    pub message: String,
}

/// Wire format of an error response body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorCollection {
    #[serde(default)]
    pub collection: Vec<ApiErrorEntry>,
}

pub type InfraApiResult<T> = Result<T, InfraApiError>;

/// Error type for infrastructure API operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InfraApiError {
    #[error("{}", describe_remote(.status, .errors))]
    Remote {
        status: u16,
        errors: Vec<ApiErrorEntry>,
    },

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Error talking to the infrastructure API: {0}")]
    Communication(String),

    #[error("Error serialising/deserialising: {0}")]
    Serialization(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Task {task} did not finish successfully: {state}")]
    TaskFailed { task: String, state: String },
}

impl InfraApiError {
    /// Builds a remote error carrying a single coded entry.
    pub fn coded(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            status: 409,
            errors: vec![ApiErrorEntry {
                code: code.into(),
                message: message.into(),
            }],
        }
    }

    /// Whether the error carries the given remote code.
    pub fn has_error(&self, code: &str) -> bool {
        match self {
            Self::Remote { errors, .. } => errors.iter().any(|e| e.code == code),
            _ => false,
        }
    }

    /// Whether the error carries any of the given remote codes.
    pub fn has_any_error(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.has_error(code))
    }

    /// Remote codes carried by the error, empty for local failures.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            Self::Remote { errors, .. } => errors.iter().map(|e| e.code.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe_remote(status: &u16, errors: &[ApiErrorEntry]) -> String {
    if errors.is_empty() {
        return format!("Remote API error (HTTP {status})");
    }
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<reqwest::Error> for InfraApiError {
    fn from(value: reqwest::Error) -> InfraApiError {
        if value.is_decode() {
            InfraApiError::Serialization(value.to_string())
        } else {
            InfraApiError::Communication(format!("Communication error: {value}"))
        }
    }
}

impl From<serde_json::Error> for InfraApiError {
    fn from(value: serde_json::Error) -> InfraApiError {
        InfraApiError::Serialization(value.to_string())
    }
}

impl From<url::ParseError> for InfraApiError {
    fn from(value: url::ParseError) -> InfraApiError {
        InfraApiError::InvalidRequest(format!("bad URL: {value}"))
    }
}
