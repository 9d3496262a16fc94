use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::{automock, predicate::*};

const SLOT_NOT_FOUND: u32 = 404;

#[allow(unused)]
pub struct AppServiceClient {
    endpoint: String,
    api_client: reqwest::blocking::Client,
}

#[allow(unused)]
#[cfg_attr(test, automock)]
impl AppServiceClient {
    pub fn new(endpoint: String, api_token: String) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", api_token)).unwrap(),
        );

        let api_client = reqwest::blocking::Client::builder()
            .default_headers(default_headers)
            .build()
            .unwrap();

        AppServiceClient {
            endpoint,
            api_client,
        }
    }

    pub fn get_slot(&self, app_name: &str, slot_name: &str) -> anyhow::Result<GetSlotResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.get(&url).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn create_slot(
        &self,
        app_name: &str,
        slot_name: &str,
        request: &CreateSlotBody,
    ) -> anyhow::Result<CreateSlotResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.put(&url).json(request).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn delete_slot(&self, app_name: &str, slot_name: &str) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.delete(&url).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn start_slot(&self, app_name: &str, slot_name: &str) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}/start",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.post(&url).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn stop_slot(&self, app_name: &str, slot_name: &str) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}/stop",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.post(&url).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn restart_slot(&self, app_name: &str, slot_name: &str) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}/restart",
            self.endpoint, app_name, slot_name
        );
        let response = self.api_client.post(&url).send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }

    pub fn deploy_package(
        &self,
        app_name: &str,
        slot_name: &str,
        deploy_type: &str,
        file: &Path,
    ) -> anyhow::Result<ActionResponse> {
        let url = format!(
            "{}/management/v1/apps/{}/slots/{}/deploy",
            self.endpoint, app_name, slot_name
        );
        let form = reqwest::blocking::multipart::Form::new().file("package", file)?;
        let response = self
            .api_client
            .post(&url)
            .query(&[("type", deploy_type)])
            .multipart(form)
            .send()?;
        let response = serde_json::from_reader(response)?;
        Ok(response)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ManagementResult<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ManagementMessage>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ManagementResult<T> {
    pub fn is_not_found(&self) -> bool {
        self.errors.iter().any(|e| e.code == SLOT_NOT_FOUND)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ManagementMessage {
    pub code: u32,
    pub message: String,
}

pub type GetSlotResponse = ManagementResult<SlotDetails>;

pub type CreateSlotResponse = ManagementResult<SlotDetails>;

pub type ActionResponse = ManagementResult<serde_json::Value>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SlotDetails {
    pub name: String,
    #[serde(default)]
    pub host_name: Option<String>,
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct CreateSlotBody {
    pub runtime: Option<RuntimeBody>,
    pub docker: Option<DockerBody>,
}

#[derive(Debug, Serialize)]
pub struct RuntimeBody {
    pub os: String,
    pub web_container: Option<String>,
    pub java_version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DockerBody {
    pub registry_url: Option<String>,
    pub image: String,
    pub username: String,
    pub password: String,
}
