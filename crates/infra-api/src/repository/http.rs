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

//! REST implementation of the infrastructure API.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use super::traits::{
    DatacenterRepository, MachineRepository, RackRepository, VirtualMachineRepository,
    VolumeRepository,
};
use crate::error::{ApiErrorEntry, ErrorCollection, InfraApiError, InfraApiResult};
use crate::model::{
    Datacenter, DatacenterId, DatacenterSpec, HypervisorType, Link, Machine, MachineState, Rack,
    RemoteService, Template, VirtualAppliance, VirtualDatacenter, VirtualMachine,
    VirtualMachineRef, Volume,
};
use crate::session::{Session, SessionResource};

const TASK_POLL_INTERVAL: Duration = Duration::from_secs(5);
const AUTH_COOKIE: &str = "auth";

/// Connection settings for the infrastructure API.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `http://10.60.1.2/api`.
    pub url: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Collection<T> {
    #[serde(default)]
    collection: Vec<T>,
}

#[derive(Deserialize)]
struct AcceptedRequest {
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TaskState {
    Queueing,
    Pending,
    Started,
    FinishedSuccessfully,
    FinishedUnsuccessfully,
    Aborted,
    Cancelled,
    AckError,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    fn in_progress(&self) -> bool {
        matches!(
            self,
            TaskState::Queueing | TaskState::Pending | TaskState::Started
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Task {
    task_id: String,
    state: TaskState,
}

#[derive(Deserialize)]
struct MachineStateResponse {
    state: MachineState,
}

#[derive(Serialize)]
struct NamedSpec<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VirtualMachineSpec {
    template_id: u32,
    cpu: u32,
    ram: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VolumeReference {
    id: u32,
    virtual_datacenter_id: u32,
}

/// Infrastructure API client speaking JSON over HTTP.
pub struct HttpInfrastructureApi {
    client: reqwest::Client,
    base: Url,
    config: ApiConfig,
    token: Mutex<Option<String>>,
}

impl HttpInfrastructureApi {
    pub fn new(config: ApiConfig) -> InfraApiResult<Self> {
        let mut base = Url::parse(&config.url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base,
            config,
            token: Mutex::new(None),
        })
    }

    /// Authenticates against the API and hands back the session guard
    /// owning the client.
    pub async fn connect(config: ApiConfig) -> InfraApiResult<Session<Self>> {
        let api = Self::new(config)?;
        api.login().await?;
        Ok(Session::new(api))
    }

    pub fn user(&self) -> &str {
        &self.config.user
    }

    async fn login(&self) -> InfraApiResult<()> {
        let response = self.send(self.request(Method::GET, "login")?).await?;
        let token = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| {
                value
                    .strip_prefix(AUTH_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .and_then(|rest| rest.split(';').next())
                    .map(str::to_string)
            });
        tracing::debug!(
            user = %self.config.user,
            token = token.is_some(),
            "authenticated against {}",
            self.base
        );
        self.set_token(token);
        Ok(())
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.lock() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn current_token(&self) -> Option<String> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn url(&self, path: &str) -> InfraApiResult<Url> {
        Ok(self.base.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> InfraApiResult<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self.authorize(self.client.request(method, url)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(ACCEPT, "application/json");
        match self.current_token() {
            Some(token) => builder.header(COOKIE, format!("{AUTH_COOKIE}={token}")),
            None => builder.basic_auth(&self.config.user, Some(&self.config.password)),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> InfraApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::trace!(%status, path = response.url().path(), "API response");
        if status.is_success() {
            return Ok(response);
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%status, error = %err, "could not read API error body");
                String::new()
            }
        };
        Err(error_from_response(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> InfraApiResult<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Ok(response.json().await?)
    }

    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> InfraApiResult<Vec<T>> {
        Ok(self.get::<Collection<T>>(path).await?.collection)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> InfraApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> InfraApiResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path)?.json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> InfraApiResult<()> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// Sends an action request. When the API accepts it as an asynchronous
    /// task, waits until the task ends.
    async fn run_action(&self, builder: RequestBuilder) -> InfraApiResult<()> {
        let response = self.send(builder).await?;
        if response.status() != StatusCode::ACCEPTED {
            return Ok(());
        }
        let accepted: AcceptedRequest = response.json().await?;
        match accepted.links.iter().find(|l| l.rel == "status") {
            Some(link) => self.wait_for_task(&link.href).await,
            None => Ok(()),
        }
    }

    async fn wait_for_task(&self, href: &str) -> InfraApiResult<()> {
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(_) => self.url(href)?,
        };
        loop {
            let task: Task = self
                .send(self.authorize(self.client.get(url.clone())))
                .await?
                .json()
                .await?;
            if task.state == TaskState::FinishedSuccessfully {
                return Ok(());
            }
            if !task.state.in_progress() {
                return Err(InfraApiError::TaskFailed {
                    task: task.task_id,
                    state: format!("{:?}", task.state),
                });
            }
            tracing::debug!(task = %task.task_id, state = ?task.state, "waiting for task");
            tokio::time::sleep(TASK_POLL_INTERVAL).await;
        }
    }

    async fn get_virtual_machine(&self, at: VirtualMachineRef) -> InfraApiResult<VirtualMachine> {
        let mut vm: VirtualMachine = self.get(&vm_path(&at)).await?;
        vm.virtual_datacenter_id = at.virtual_datacenter_id;
        vm.virtual_appliance_id = at.virtual_appliance_id;
        Ok(vm)
    }

    async fn list_racks(&self, datacenter: DatacenterId) -> InfraApiResult<Vec<Rack>> {
        let mut racks: Vec<Rack> = self
            .get_collection(&format!("admin/datacenters/{datacenter}/racks"))
            .await?;
        for rack in &mut racks {
            rack.datacenter_id = datacenter;
        }
        Ok(racks)
    }

    async fn list_virtual_appliances(
        &self,
        vdc: &VirtualDatacenter,
    ) -> InfraApiResult<Vec<VirtualAppliance>> {
        let mut appliances: Vec<VirtualAppliance> = self
            .get_collection(&format!(
                "cloud/virtualdatacenters/{}/virtualappliances",
                vdc.id
            ))
            .await?;
        for appliance in &mut appliances {
            appliance.virtual_datacenter_id = vdc.id;
        }
        Ok(appliances)
    }
}

impl SessionResource for HttpInfrastructureApi {
    fn release(&self) {
        self.set_token(None);
    }
}

fn error_from_response(status: StatusCode, body: &str) -> InfraApiError {
    let errors = serde_json::from_str::<ErrorCollection>(body)
        .map(|c| c.collection)
        .unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = match errors.first() {
            Some(entry) => entry.message.clone(),
            None => status.to_string(),
        };
        return InfraApiError::Authorization(message);
    }

    let errors = if errors.is_empty() {
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body.trim().to_string()
        };
        vec![ApiErrorEntry {
            code: status.as_u16().to_string(),
            message,
        }]
    } else {
        errors
    };
    InfraApiError::Remote {
        status: status.as_u16(),
        errors,
    }
}

fn machines_path(datacenter: DatacenterId, rack: u32) -> String {
    format!("admin/datacenters/{datacenter}/racks/{rack}/machines")
}

fn machine_path(machine: &Machine) -> InfraApiResult<String> {
    match (machine.datacenter_id, machine.rack_id, machine.id) {
        (Some(dc), Some(rack), Some(id)) => Ok(format!("{}/{id}", machines_path(dc, rack))),
        _ => Err(InfraApiError::InvalidRequest(format!(
            "machine {} is not persisted in a rack",
            machine.label()
        ))),
    }
}

fn vm_path(at: &VirtualMachineRef) -> String {
    format!(
        "cloud/virtualdatacenters/{}/virtualappliances/{}/virtualmachines/{}",
        at.virtual_datacenter_id, at.virtual_appliance_id, at.virtual_machine_id
    )
}

#[async_trait]
impl DatacenterRepository for HttpInfrastructureApi {
    async fn list_datacenters(&self) -> InfraApiResult<Vec<Datacenter>> {
        let mut datacenters: Vec<Datacenter> = self.get_collection("admin/datacenters").await?;
        for dc in &mut datacenters {
            dc.remote_services = self
                .get_collection(&format!("admin/datacenters/{}/remoteservices", dc.id))
                .await?;
        }
        Ok(datacenters)
    }

    async fn create_datacenter(&self, spec: &DatacenterSpec) -> InfraApiResult<Datacenter> {
        self.post("admin/datacenters", spec).await
    }

    async fn create_remote_service(
        &self,
        datacenter: &Datacenter,
        service: &RemoteService,
    ) -> InfraApiResult<RemoteService> {
        self.post(
            &format!("admin/datacenters/{}/remoteservices", datacenter.id),
            service,
        )
        .await
    }

    async fn delete_datacenter(&self, id: DatacenterId) -> InfraApiResult<()> {
        self.delete(&format!("admin/datacenters/{id}")).await
    }
}

#[async_trait]
impl RackRepository for HttpInfrastructureApi {
    async fn find_rack(
        &self,
        datacenter: &Datacenter,
        name: &str,
    ) -> InfraApiResult<Option<Rack>> {
        Ok(self
            .list_racks(datacenter.id)
            .await?
            .into_iter()
            .find(|r| r.name == name))
    }

    async fn create_rack(&self, datacenter: &Datacenter, name: &str) -> InfraApiResult<Rack> {
        let mut rack: Rack = self
            .post(
                &format!("admin/datacenters/{}/racks", datacenter.id),
                &NamedSpec { name },
            )
            .await?;
        rack.datacenter_id = datacenter.id;
        Ok(rack)
    }
}

#[async_trait]
impl MachineRepository for HttpInfrastructureApi {
    async fn discover_machine(
        &self,
        datacenter: &Datacenter,
        host: &str,
        hypervisor: HypervisorType,
        user: &str,
        password: &str,
    ) -> InfraApiResult<Machine> {
        let path = format!("admin/datacenters/{}/action/discoversingle", datacenter.id);
        let builder = self.request(Method::GET, &path)?.query(&[
            ("ip", host),
            ("hypervisor", hypervisor.as_str()),
            ("user", user),
            ("password", password),
        ]);
        let mut machine: Machine = self.send(builder).await?.json().await?;
        if machine.ip.is_empty() {
            machine.ip = host.to_string();
        }
        machine.hypervisor.get_or_insert(hypervisor);
        machine.user = user.to_string();
        machine.password = password.to_string();
        machine.datacenter_id = Some(datacenter.id);
        Ok(machine)
    }

    async fn list_machines(&self) -> InfraApiResult<Vec<Machine>> {
        let mut machines = Vec::new();
        let datacenters: Vec<Datacenter> = self.get_collection("admin/datacenters").await?;
        for dc in datacenters {
            for rack in self.list_racks(dc.id).await? {
                let mut in_rack: Vec<Machine> =
                    self.get_collection(&machines_path(dc.id, rack.id)).await?;
                for machine in &mut in_rack {
                    machine.datacenter_id = Some(dc.id);
                    machine.rack_id = Some(rack.id);
                }
                machines.extend(in_rack);
            }
        }
        Ok(machines)
    }

    async fn save_machine(&self, machine: &Machine) -> InfraApiResult<Machine> {
        let (Some(dc), Some(rack)) = (machine.datacenter_id, machine.rack_id) else {
            return Err(InfraApiError::InvalidRequest(format!(
                "machine {} has no rack assigned",
                machine.label()
            )));
        };
        let mut saved: Machine = self.post(&machines_path(dc, rack), machine).await?;
        saved.datacenter_id = Some(dc);
        saved.rack_id = Some(rack);
        Ok(saved)
    }

    async fn update_machine(&self, machine: &Machine) -> InfraApiResult<Machine> {
        let mut updated: Machine = self.put(&machine_path(machine)?, machine).await?;
        updated.datacenter_id = machine.datacenter_id;
        updated.rack_id = machine.rack_id;
        Ok(updated)
    }

    async fn delete_machine(&self, machine: &Machine) -> InfraApiResult<()> {
        self.delete(&machine_path(machine)?).await
    }

    async fn check_machine(&self, machine: &Machine) -> InfraApiResult<MachineState> {
        let path = format!("{}/action/checkstate", machine_path(machine)?);
        Ok(self.get::<MachineStateResponse>(&path).await?.state)
    }
}

#[async_trait]
impl VirtualMachineRepository for HttpInfrastructureApi {
    async fn list_virtual_datacenters(&self) -> InfraApiResult<Vec<VirtualDatacenter>> {
        self.get_collection("cloud/virtualdatacenters").await
    }

    async fn list_virtual_machines(&self) -> InfraApiResult<Vec<VirtualMachine>> {
        let mut vms = Vec::new();
        for vdc in self.list_virtual_datacenters().await? {
            for appliance in self.list_virtual_appliances(&vdc).await? {
                let mut in_appliance: Vec<VirtualMachine> = self
                    .get_collection(&format!(
                        "cloud/virtualdatacenters/{}/virtualappliances/{}/virtualmachines",
                        vdc.id, appliance.id
                    ))
                    .await?;
                for vm in &mut in_appliance {
                    vm.virtual_datacenter_id = vdc.id;
                    vm.virtual_appliance_id = appliance.id;
                }
                vms.extend(in_appliance);
            }
        }
        Ok(vms)
    }

    async fn list_templates(&self, vdc: &VirtualDatacenter) -> InfraApiResult<Vec<Template>> {
        self.get_collection(&format!(
            "cloud/virtualdatacenters/{}/action/templates",
            vdc.id
        ))
        .await
    }

    async fn find_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<Option<VirtualAppliance>> {
        Ok(self
            .list_virtual_appliances(vdc)
            .await?
            .into_iter()
            .find(|va| va.name == name))
    }

    async fn create_virtual_appliance(
        &self,
        vdc: &VirtualDatacenter,
        name: &str,
    ) -> InfraApiResult<VirtualAppliance> {
        let mut appliance: VirtualAppliance = self
            .post(
                &format!("cloud/virtualdatacenters/{}/virtualappliances", vdc.id),
                &NamedSpec { name },
            )
            .await?;
        appliance.virtual_datacenter_id = vdc.id;
        Ok(appliance)
    }

    async fn create_virtual_machine(
        &self,
        appliance: &VirtualAppliance,
        template: &Template,
        cpu: Option<u32>,
        ram: Option<u32>,
    ) -> InfraApiResult<VirtualMachine> {
        let spec = VirtualMachineSpec {
            template_id: template.id,
            cpu: cpu.unwrap_or(template.cpu_required),
            ram: ram.unwrap_or(template.ram_required),
        };
        let mut vm: VirtualMachine = self
            .post(
                &format!(
                    "cloud/virtualdatacenters/{}/virtualappliances/{}/virtualmachines",
                    appliance.virtual_datacenter_id, appliance.id
                ),
                &spec,
            )
            .await?;
        vm.virtual_datacenter_id = appliance.virtual_datacenter_id;
        vm.virtual_appliance_id = appliance.id;
        Ok(vm)
    }

    async fn deploy_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<VirtualMachine> {
        let at = vm.reference();
        let path = format!("{}/action/deploy", vm_path(&at));
        self.run_action(self.request(Method::POST, &path)?).await?;
        self.get_virtual_machine(at).await
    }

    async fn undeploy_virtual_machine(
        &self,
        vm: &VirtualMachine,
    ) -> InfraApiResult<VirtualMachine> {
        let at = vm.reference();
        let path = format!("{}/action/undeploy", vm_path(&at));
        self.run_action(self.request(Method::POST, &path)?).await?;
        self.get_virtual_machine(at).await
    }

    async fn delete_virtual_machine(&self, vm: &VirtualMachine) -> InfraApiResult<()> {
        self.delete(&vm_path(&vm.reference())).await
    }

    async fn attach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()> {
        let path = format!("{}/storage/volumes", vm_path(&vm.reference()));
        let body = VolumeReference {
            id: volume.id,
            virtual_datacenter_id: volume.virtual_datacenter_id,
        };
        self.run_action(self.request(Method::POST, &path)?.json(&body))
            .await
    }

    async fn detach_volume(&self, vm: &VirtualMachine, volume: &Volume) -> InfraApiResult<()> {
        let path = format!("{}/storage/volumes/{}", vm_path(&vm.reference()), volume.id);
        self.run_action(self.request(Method::DELETE, &path)?).await
    }
}

#[async_trait]
impl VolumeRepository for HttpInfrastructureApi {
    async fn list_volumes(&self) -> InfraApiResult<Vec<Volume>> {
        let mut volumes = Vec::new();
        for vdc in self.list_virtual_datacenters().await? {
            let mut in_vdc: Vec<Volume> = self
                .get_collection(&format!("cloud/virtualdatacenters/{}/volumes", vdc.id))
                .await?;
            for volume in &mut in_vdc {
                volume.virtual_datacenter_id = vdc.id;
            }
            volumes.extend(in_vdc);
        }
        Ok(volumes)
    }

    async fn refresh_volume(&self, volume: &Volume) -> InfraApiResult<Volume> {
        let mut refreshed: Volume = self
            .get(&format!(
                "cloud/virtualdatacenters/{}/volumes/{}",
                volume.virtual_datacenter_id, volume.id
            ))
            .await?;
        refreshed.virtual_datacenter_id = volume.virtual_datacenter_id;
        Ok(refreshed)
    }

    async fn attached_virtual_machine(
        &self,
        volume: &Volume,
    ) -> InfraApiResult<Option<VirtualMachine>> {
        match volume.attached_to {
            Some(at) => Ok(Some(self.get_virtual_machine(at).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;

    fn api(url: &str) -> HttpInfrastructureApi {
        HttpInfrastructureApi::new(ApiConfig {
            url: url.to_string(),
            user: "admin".to_string(),
            password: "xabiquo".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_paths_join_under_base_path() {
        let api = api("http://10.60.1.2/api");
        assert_eq!(
            api.url("admin/datacenters").unwrap().as_str(),
            "http://10.60.1.2/api/admin/datacenters"
        );

        let api = api_with_slash();
        assert_eq!(
            api.url("cloud/virtualdatacenters").unwrap().as_str(),
            "http://10.60.1.2/api/cloud/virtualdatacenters"
        );
    }

    fn api_with_slash() -> HttpInfrastructureApi {
        api("http://10.60.1.2/api/")
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpInfrastructureApi::new(ApiConfig {
            url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(InfraApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_coded_error_body_is_parsed() {
        let body = r#"{"collection":[{"code":"NC-3","message":"Hypervisor type mismatch"}]}"#;
        let err = error_from_response(StatusCode::CONFLICT, body);
        assert!(err.has_error(codes::NC_3));
        assert!(matches!(err, InfraApiError::Remote { status: 409, .. }));
    }

    #[test]
    fn test_unstructured_error_body_is_kept() {
        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "stack trace");
        assert_eq!(err.codes(), vec!["500"]);
        assert_eq!(err.to_string(), "500: stack trace");
    }

    #[test]
    fn test_empty_error_body_uses_status_reason() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.codes(), vec!["502"]);
        assert_eq!(err.to_string(), "502: Bad Gateway");
    }

    #[test]
    fn test_collection_without_items_is_empty() {
        let parsed: Collection<Link> = serde_json::from_str("{}").unwrap();
        assert!(parsed.collection.is_empty());

        let parsed: Collection<String> =
            serde_json::from_str(r#"{"collection":["a","b"]}"#).unwrap();
        assert_eq!(parsed.collection, vec!["a", "b"]);
    }

    #[test]
    fn test_discovery_credentials_stay_out_of_logged_path() {
        let mut url = api("http://10.60.1.2/api")
            .url("admin/datacenters/1/action/discoversingle")
            .unwrap();
        url.query_pairs_mut()
            .append_pair("user", "root")
            .append_pair("password", "temporal");
        assert!(url.as_str().contains("temporal"));
        assert_eq!(url.path(), "/api/admin/datacenters/1/action/discoversingle");
    }

    #[test]
    fn test_auth_failures_map_to_authorization() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, InfraApiError::Authorization(_)));

        let body = r#"{"collection":[{"code":"SEC-1","message":"Not enough privileges"}]}"#;
        let err = error_from_response(StatusCode::FORBIDDEN, body);
        assert_eq!(
            err,
            InfraApiError::Authorization("Not enough privileges".to_string())
        );
    }

    #[test]
    fn test_machine_path_requires_rack_placement() {
        let mut machine = Machine {
            ip: "10.0.0.9".to_string(),
            ..Default::default()
        };
        assert!(machine_path(&machine).is_err());

        machine.datacenter_id = Some(1);
        machine.rack_id = Some(2);
        machine.id = Some(3);
        assert_eq!(
            machine_path(&machine).unwrap(),
            "admin/datacenters/1/racks/2/machines/3"
        );
    }

    #[test]
    fn test_release_forgets_token() {
        let api = api("http://10.60.1.2/api");
        api.set_token(Some("abc".to_string()));
        assert_eq!(api.current_token().as_deref(), Some("abc"));
        api.release();
        assert!(api.current_token().is_none());
    }

    #[test]
    fn test_task_state_progress() {
        let state: TaskState = serde_json::from_str("\"STARTED\"").unwrap();
        assert!(state.in_progress());
        let state: TaskState = serde_json::from_str("\"FINISHED_UNSUCCESSFULLY\"").unwrap();
        assert!(!state.in_progress());
        let state: TaskState = serde_json::from_str("\"WHATEVER\"").unwrap();
        assert_eq!(state, TaskState::Unknown);
    }
}
