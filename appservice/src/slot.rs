use std::path::Path;

use anyhow::anyhow;
use mockall_double::double;

use crate::client::{CreateSlotBody, DockerBody, RuntimeBody, SlotDetails};
use crate::models::{DeployType, DockerConfiguration, Runtime};

#[double]
use crate::client::AppServiceClient;

/// A named handle to one deployment slot of a hosted application. Every call
/// delegates synchronously to the management API; the remote system owns the
/// actual lifecycle state.
pub struct DeploymentSlot {
    client: AppServiceClient,
    app_name: String,
    slot_name: String,
}

/// Read-only snapshot of a slot as last reported by the platform.
#[derive(Clone, Debug)]
pub struct DeploymentSlotEntity {
    pub name: String,
    pub host: Option<String>,
    pub state: String,
}

impl From<SlotDetails> for DeploymentSlotEntity {
    fn from(details: SlotDetails) -> Self {
        DeploymentSlotEntity {
            name: details.name,
            host: details.host_name,
            state: details.state,
        }
    }
}

impl DeploymentSlot {
    pub fn new(
        client: AppServiceClient,
        app_name: impl AsRef<str>,
        slot_name: impl AsRef<str>,
    ) -> DeploymentSlot {
        DeploymentSlot {
            client,
            app_name: app_name.as_ref().to_owned(),
            slot_name: slot_name.as_ref().to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.slot_name
    }

    pub fn create(&self) -> DeploymentSlotCreator<'_> {
        DeploymentSlotCreator {
            slot: self,
            runtime: None,
            docker_configuration: None,
        }
    }

    pub fn start(&self) -> anyhow::Result<()> {
        let response = self.client.start_slot(&self.app_name, &self.slot_name)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to start slot {} with response {:?}",
                self.slot_name,
                response
            ));
        }
        Ok(())
    }

    pub fn stop(&self) -> anyhow::Result<()> {
        let response = self.client.stop_slot(&self.app_name, &self.slot_name)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to stop slot {} with response {:?}",
                self.slot_name,
                response
            ));
        }
        Ok(())
    }

    pub fn restart(&self) -> anyhow::Result<()> {
        let response = self.client.restart_slot(&self.app_name, &self.slot_name)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to restart slot {} with response {:?}",
                self.slot_name,
                response
            ));
        }
        Ok(())
    }

    pub fn delete(&self) -> anyhow::Result<()> {
        let response = self.client.delete_slot(&self.app_name, &self.slot_name)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to delete slot {} with response {:?}",
                self.slot_name,
                response
            ));
        }
        Ok(())
    }

    /// Uploads an artifact, inferring the deploy type from the file name.
    pub fn deploy(&self, file: &Path) -> anyhow::Result<()> {
        self.deploy_as(DeployType::from_path(file), file)
    }

    pub fn deploy_as(&self, deploy_type: DeployType, file: &Path) -> anyhow::Result<()> {
        info!(
            "Deploying {:?} to slot {} as {}",
            file, self.slot_name, deploy_type
        );
        let response =
            self.client
                .deploy_package(&self.app_name, &self.slot_name, deploy_type.as_str(), file)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to deploy {:?} to slot {} with response {:?}",
                file,
                self.slot_name,
                response
            ));
        }
        Ok(())
    }

    pub fn exists(&self) -> anyhow::Result<bool> {
        let response = self.client.get_slot(&self.app_name, &self.slot_name)?;
        if response.success {
            Ok(true)
        } else if response.is_not_found() {
            Ok(false)
        } else {
            Err(anyhow!(
                "Failed to look up slot {} with response {:?}",
                self.slot_name,
                response
            ))
        }
    }

    pub fn entity(&self) -> anyhow::Result<DeploymentSlotEntity> {
        let response = self.client.get_slot(&self.app_name, &self.slot_name)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to fetch slot {} with response {:?}",
                self.slot_name,
                response
            ));
        }
        response.result.map(Into::into).ok_or_else(|| {
            anyhow!(
                "Slot lookup for {} succeeded but returned no details",
                self.slot_name
            )
        })
    }
}

/// Collects the provisioning configuration for a new slot; nothing is sent
/// until commit.
pub struct DeploymentSlotCreator<'a> {
    slot: &'a DeploymentSlot,
    runtime: Option<Runtime>,
    docker_configuration: Option<DockerConfiguration>,
}

impl DeploymentSlotCreator<'_> {
    pub fn runtime(mut self, runtime: Option<Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn docker_configuration(mut self, docker_configuration: Option<DockerConfiguration>) -> Self {
        self.docker_configuration = docker_configuration;
        self
    }

    pub fn commit(self) -> anyhow::Result<DeploymentSlotEntity> {
        let request = CreateSlotBody {
            runtime: self.runtime.as_ref().map(runtime_body),
            docker: self.docker_configuration.as_ref().map(docker_body),
        };
        info!("Creating slot {}", self.slot.slot_name);
        let response =
            self.slot
                .client
                .create_slot(&self.slot.app_name, &self.slot.slot_name, &request)?;
        if !response.success {
            return Err(anyhow!(
                "Failed to create slot {} with response {:?}",
                self.slot.slot_name,
                response
            ));
        }
        response.result.map(Into::into).ok_or_else(|| {
            anyhow!(
                "Slot creation for {} succeeded but returned no details",
                self.slot.slot_name
            )
        })
    }
}

fn runtime_body(runtime: &Runtime) -> RuntimeBody {
    match runtime {
        Runtime::Docker => RuntimeBody {
            os: "docker".to_string(),
            web_container: None,
            java_version: None,
        },
        Runtime::Managed {
            os,
            web_container,
            java_version,
        } => RuntimeBody {
            os: os.to_string(),
            web_container: Some(web_container.to_string()),
            java_version: Some(java_version.to_string()),
        },
    }
}

fn docker_body(configuration: &DockerConfiguration) -> DockerBody {
    DockerBody {
        registry_url: configuration.registry_url.clone(),
        image: configuration.image.clone(),
        username: configuration.user_name.clone(),
        password: configuration.password.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testhelpers;
    use crate::models::{JavaVersion, OperatingSystem, WebContainer};

    fn test_slot(client: AppServiceClient) -> DeploymentSlot {
        DeploymentSlot::new(client, "demo-app", "staging")
    }

    #[test]
    fn test_exists_for_running_slot() {
        let mut mock = AppServiceClient::default();
        mock.expect_get_slot()
            .returning(|_, _| Ok(serde_json::from_str(testhelpers::GET_SLOT_RESPONSE).unwrap()));

        let slot = test_slot(mock);
        assert!(slot.exists().unwrap());
    }

    #[test]
    fn test_exists_maps_not_found_to_false() {
        let mut mock = AppServiceClient::default();
        mock.expect_get_slot().returning(|_, _| {
            Ok(serde_json::from_str(testhelpers::SLOT_NOT_FOUND_RESPONSE).unwrap())
        });

        let slot = test_slot(mock);
        assert!(!slot.exists().unwrap());
    }

    #[test]
    fn test_exists_surfaces_other_failures() {
        let mut mock = AppServiceClient::default();
        mock.expect_get_slot().returning(|_, _| {
            Ok(serde_json::from_str(testhelpers::ACTION_FAILURE_RESPONSE).unwrap())
        });

        let slot = test_slot(mock);
        assert!(slot.exists().is_err());
    }

    #[test]
    fn test_entity_snapshot() {
        let mut mock = AppServiceClient::default();
        mock.expect_get_slot()
            .returning(|_, _| Ok(serde_json::from_str(testhelpers::GET_SLOT_RESPONSE).unwrap()));

        let slot = test_slot(mock);
        let entity = slot.entity().unwrap();
        assert_eq!(entity.name, "staging");
        assert_eq!(
            entity.host.as_deref(),
            Some("demo-app-staging.apphost.example.com")
        );
        assert_eq!(entity.state, "Running");
    }

    #[test]
    fn test_create_sends_managed_runtime() {
        let mut mock = AppServiceClient::default();
        mock.expect_create_slot()
            .times(1)
            .withf(|_, _, request| {
                let runtime = request.runtime.as_ref().unwrap();
                runtime.os == "linux"
                    && runtime.web_container.as_deref() == Some("tomcat 9.0")
                    && runtime.java_version.as_deref() == Some("java 11")
                    && request.docker.is_none()
            })
            .returning(|_, _, _| {
                Ok(serde_json::from_str(testhelpers::CREATE_SLOT_RESPONSE).unwrap())
            });

        let slot = test_slot(mock);
        let runtime = Runtime::from_parts(
            OperatingSystem::Linux,
            WebContainer::Tomcat90,
            JavaVersion::Java11,
        );
        let entity = slot.create().runtime(runtime).commit().unwrap();
        assert_eq!(entity.state, "Stopped");
    }

    #[test]
    fn test_create_sends_docker_configuration() {
        let mut mock = AppServiceClient::default();
        mock.expect_create_slot()
            .times(1)
            .withf(|_, _, request| {
                let runtime = request.runtime.as_ref().unwrap();
                let docker = request.docker.as_ref().unwrap();
                runtime.os == "docker"
                    && runtime.web_container.is_none()
                    && docker.image == "library/demo:1.0"
                    && docker.username == "ci-bot"
            })
            .returning(|_, _, _| {
                Ok(serde_json::from_str(testhelpers::CREATE_SLOT_RESPONSE).unwrap())
            });

        let slot = test_slot(mock);
        let docker_configuration = DockerConfiguration {
            registry_url: Some("https://registry.example.com".to_string()),
            image: "library/demo:1.0".to_string(),
            user_name: "ci-bot".to_string(),
            password: "hunter2".to_string(),
        };
        slot.create()
            .runtime(Some(Runtime::Docker))
            .docker_configuration(Some(docker_configuration))
            .commit()
            .unwrap();
    }

    #[test]
    fn test_create_fails_when_slot_already_exists() {
        let mut mock = AppServiceClient::default();
        mock.expect_create_slot().returning(|_, _, _| {
            Ok(serde_json::from_str(testhelpers::SLOT_CONFLICT_RESPONSE).unwrap())
        });

        let slot = test_slot(mock);
        let result = slot.create().commit();
        assert!(result.is_err());
    }

    #[test]
    fn test_start_failure_propagates() {
        let mut mock = AppServiceClient::default();
        mock.expect_start_slot().returning(|_, _| {
            Ok(serde_json::from_str(testhelpers::ACTION_FAILURE_RESPONSE).unwrap())
        });

        let slot = test_slot(mock);
        assert!(slot.start().is_err());
    }

    #[test]
    fn test_lifecycle_verbs_succeed_on_success_envelope() {
        let mut mock = AppServiceClient::default();
        mock.expect_stop_slot()
            .returning(|_, _| Ok(serde_json::from_str(testhelpers::ACTION_RESPONSE).unwrap()));
        mock.expect_restart_slot()
            .returning(|_, _| Ok(serde_json::from_str(testhelpers::ACTION_RESPONSE).unwrap()));
        mock.expect_delete_slot()
            .returning(|_, _| Ok(serde_json::from_str(testhelpers::ACTION_RESPONSE).unwrap()));

        let slot = test_slot(mock);
        slot.stop().unwrap();
        slot.restart().unwrap();
        slot.delete().unwrap();
    }

    #[test]
    fn test_deploy_infers_type_from_file_name() {
        let mut mock = AppServiceClient::default();
        mock.expect_deploy_package()
            .times(1)
            .withf(|_, _, deploy_type, file| {
                deploy_type == "war" && file.ends_with("app.war")
            })
            .returning(|_, _, _, _| {
                Ok(serde_json::from_str(testhelpers::ACTION_RESPONSE).unwrap())
            });

        let slot = test_slot(mock);
        slot.deploy(Path::new("target/app.war")).unwrap();
    }
}
