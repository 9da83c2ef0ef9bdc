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

//! Client library for the cloud infrastructure API.
//!
//! The API is modelled as a set of async repository traits (datacenters,
//! racks, physical machines, virtual machines and volumes) so the
//! onboarding logic can run against the real REST service or an in-memory
//! double.

#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod repository;
pub mod session;

// Re-exports for convenience
pub use error::{ApiErrorEntry, InfraApiError, InfraApiResult, codes};
pub use repository::{
    ApiConfig, DatacenterRepository, HttpInfrastructureApi, InfrastructureApi, MachineRepository,
    RackRepository, VirtualMachineRepository, VolumeRepository,
};
pub use session::{Session, SessionResource};
