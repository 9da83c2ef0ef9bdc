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

//! Finds or creates the datacenter and rack that own a remote services IP.

use kahuna_infra_api::model::{
    Datacenter, DatacenterSpec, Rack, RemoteService, RemoteServiceType,
};
use kahuna_infra_api::{DatacenterRepository, RackRepository, codes};

use crate::error::{OnboardingError, OnboardingResult};
use crate::reporter::{OnboardingEvent, Reporter};

pub const DATACENTER_NAME: &str = "Kahuna";
pub const DATACENTER_LOCATION: &str = "Kapapala";
pub const RACK_NAME: &str = "Volcano";

/// Where a machine will be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub datacenter: Datacenter,
    pub rack: Rack,
}

pub struct DatacenterResolver<'a, R: ?Sized> {
    repo: &'a R,
    reporter: &'a dyn Reporter,
}

impl<'a, R: DatacenterRepository + RackRepository + ?Sized> DatacenterResolver<'a, R> {
    pub fn new(repo: &'a R, reporter: &'a dyn Reporter) -> Self {
        Self { repo, reporter }
    }

    /// First datacenter, in list order, whose node collector and virtual
    /// system monitor URIs both contain `ip`.
    ///
    /// Matching is by substring, so `10.0.0.5` also matches a service on
    /// `10.0.0.50`.
    pub fn find_matching<'d>(datacenters: &'d [Datacenter], ip: &str) -> Option<&'d Datacenter> {
        let serves = |dc: &Datacenter, service_type| {
            dc.remote_services_of(service_type)
                .any(|rs| rs.uri.contains(ip))
        };
        datacenters.iter().find(|dc| {
            serves(dc, RemoteServiceType::NodeCollector)
                && serves(dc, RemoteServiceType::VirtualSystemMonitor)
        })
    }

    /// Returns the datacenter serving `ip` along with its canonical rack,
    /// creating whatever is missing.
    pub async fn resolve(
        &self,
        datacenters: &[Datacenter],
        ip: &str,
    ) -> OnboardingResult<Placement> {
        if let Some(datacenter) = Self::find_matching(datacenters, ip) {
            self.reporter.report(&OnboardingEvent::DatacenterMatched {
                datacenter: datacenter.name.clone(),
                ip: ip.to_string(),
            });
            let rack = self.ensure_rack(datacenter).await?;
            return Ok(Placement {
                datacenter: datacenter.clone(),
                rack,
            });
        }

        let datacenter = self.create_datacenter(ip).await?;
        let rack = self.create_rack(&datacenter).await?;
        Ok(Placement { datacenter, rack })
    }

    /// Finds the canonical rack of `datacenter`, creating it if absent.
    pub async fn ensure_rack(&self, datacenter: &Datacenter) -> OnboardingResult<Rack> {
        match self.repo.find_rack(datacenter, RACK_NAME).await? {
            Some(rack) => Ok(rack),
            None => self.create_rack(datacenter).await,
        }
    }

    async fn create_rack(&self, datacenter: &Datacenter) -> OnboardingResult<Rack> {
        let rack = self.repo.create_rack(datacenter, RACK_NAME).await?;
        self.reporter.report(&OnboardingEvent::RackCreated {
            datacenter: datacenter.name.clone(),
            rack: rack.name.clone(),
        });
        Ok(rack)
    }

    // A datacenter without its full set of remote services never matches
    // on a later run, so it is removed before the error is returned.
    async fn roll_back(&self, datacenter: &Datacenter, ip: &str) {
        if let Err(cleanup) = self.repo.delete_datacenter(datacenter.id).await {
            tracing::warn!(
                error = %cleanup,
                datacenter = %datacenter.name,
                "could not remove partially created datacenter"
            );
        }
        self.reporter.report(&OnboardingEvent::DatacenterRolledBack {
            datacenter: datacenter.name.clone(),
            ip: ip.to_string(),
        });
    }

    async fn create_datacenter(&self, ip: &str) -> OnboardingResult<Datacenter> {
        let spec = DatacenterSpec {
            name: DATACENTER_NAME.to_string(),
            location: DATACENTER_LOCATION.to_string(),
        };
        let mut datacenter = match self.repo.create_datacenter(&spec).await {
            Ok(datacenter) => datacenter,
            Err(err) if err.has_error(codes::RS_3) => return Err(ip_in_use(ip)),
            Err(err) => return Err(err.into()),
        };

        for service_type in RemoteServiceType::ENTERPRISE {
            let service = RemoteService::for_ip(service_type, ip);
            match self.repo.create_remote_service(&datacenter, &service).await {
                Ok(created) => datacenter.remote_services.push(created),
                Err(err) => {
                    self.roll_back(&datacenter, ip).await;
                    if err.has_error(codes::RS_3) {
                        return Err(ip_in_use(ip));
                    }
                    return Err(err.into());
                }
            }
        }

        self.reporter.report(&OnboardingEvent::DatacenterCreated {
            datacenter: datacenter.name.clone(),
            ip: ip.to_string(),
        });
        Ok(datacenter)
    }
}

fn ip_in_use(ip: &str) -> OnboardingError {
    OnboardingError::Conflict(format!(
        "Ip {ip} to create remote services has been used yet, try with another one"
    ))
}
