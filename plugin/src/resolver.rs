use lazy_static::lazy_static;
use regex::Regex;

use slipway_appservice::config::ConfigurationError;
use slipway_appservice::models::{
    DockerConfiguration, JavaVersion, OperatingSystem, Region, Runtime, WebContainer,
};

use crate::artifacts;
use crate::config::{DeploySettings, RuntimeSettings};
use crate::credentials::CredentialStore;
use crate::descriptor::{Artifact, DeploymentDescriptor};

lazy_static! {
    static ref NAME_VALIDATION_REGEX: Regex =
        Regex::new("^[a-zA-Z0-9][a-zA-Z0-9-]{0,58}[a-zA-Z0-9]$").unwrap();
}

const DEFAULT_SLOT_NAME: &str = "production";

/// Turns the raw project settings into a validated deployment descriptor.
/// Each resolver method is a pure function of the settings; failures name
/// the offending field.
pub struct ConfigResolver<'a> {
    settings: &'a DeploySettings,
    credentials: &'a dyn CredentialStore,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(settings: &'a DeploySettings, credentials: &'a dyn CredentialStore) -> Self {
        ConfigResolver {
            settings,
            credentials,
        }
    }

    pub fn app_name(&self) -> Result<String, ConfigurationError> {
        validated_name("app_name", &self.settings.app_name)
    }

    pub fn slot_name(&self) -> Result<String, ConfigurationError> {
        let name = self
            .settings
            .slot_name
            .as_deref()
            .unwrap_or(DEFAULT_SLOT_NAME);
        validated_name("slot_name", name)
    }

    pub fn region(&self) -> Result<Region, ConfigurationError> {
        let raw = self
            .settings
            .region
            .as_deref()
            .ok_or_else(|| ConfigurationError::MissingConfigurationValue("region".into()))?;
        Region::from_name(raw).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "region".into(),
                format!("unrecognized region code '{}'", raw),
            )
        })
    }

    pub fn operating_system(&self) -> Result<OperatingSystem, ConfigurationError> {
        let runtime = self
            .settings
            .runtime
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingConfigurationValue("runtime".into()))?;
        let raw = runtime
            .os
            .as_deref()
            .ok_or_else(|| ConfigurationError::MissingConfigurationValue("runtime.os".into()))?;
        OperatingSystem::from_name(raw).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "runtime.os".into(),
                format!("unrecognized operating system '{}'", raw),
            )
        })
    }

    /// `None` when no runtime block is configured, the fixed container
    /// runtime when the OS is docker, otherwise the validated managed stack.
    pub fn runtime(&self) -> Result<Option<Runtime>, ConfigurationError> {
        let runtime = match &self.settings.runtime {
            None => return Ok(None),
            Some(runtime) => runtime,
        };
        let os = self.operating_system()?;
        self.runtime_for(runtime, os).map(Some)
    }

    /// `None` unless the runtime block is present and the OS is docker.
    pub fn docker_configuration(
        &self,
    ) -> Result<Option<DockerConfiguration>, ConfigurationError> {
        let runtime = match &self.settings.runtime {
            None => return Ok(None),
            Some(runtime) => runtime,
        };
        let os = self.operating_system()?;
        self.docker_configuration_for(runtime, os)
    }

    pub fn artifacts(&self) -> Result<Vec<Artifact>, ConfigurationError> {
        match &self.settings.deployment {
            None => Ok(Vec::new()),
            Some(deployment) => artifacts::expand_resources(&deployment.resources),
        }
    }

    /// Resolves the whole configuration in a single validation pass; the
    /// operating system token is validated exactly once.
    pub fn resolve(&self) -> Result<DeploymentDescriptor, ConfigurationError> {
        let app_name = self.app_name()?;
        let slot_name = self.slot_name()?;
        let region = self.region()?;

        let (runtime, docker_configuration) = match &self.settings.runtime {
            None => (None, None),
            Some(settings) => {
                let os = self.operating_system()?;
                (
                    Some(self.runtime_for(settings, os)?),
                    self.docker_configuration_for(settings, os)?,
                )
            }
        };

        let artifacts = self.artifacts()?;

        Ok(DeploymentDescriptor {
            app_name,
            slot_name,
            region,
            runtime,
            docker_configuration,
            artifacts,
        })
    }

    fn runtime_for(
        &self,
        settings: &RuntimeSettings,
        os: OperatingSystem,
    ) -> Result<Runtime, ConfigurationError> {
        if os == OperatingSystem::Docker {
            return Ok(Runtime::Docker);
        }

        let raw_java = settings.java_version.as_deref().ok_or_else(|| {
            ConfigurationError::MissingConfigurationValue("runtime.java_version".into())
        })?;
        let java_version = JavaVersion::from_name(raw_java).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "runtime.java_version".into(),
                format!("unrecognized java version '{}'", raw_java),
            )
        })?;

        let raw_container = settings.web_container.as_deref().ok_or_else(|| {
            ConfigurationError::MissingConfigurationValue("runtime.web_container".into())
        })?;
        let web_container = WebContainer::from_name(raw_container).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "runtime.web_container".into(),
                format!("unrecognized web container '{}'", raw_container),
            )
        })?;

        Runtime::from_parts(os, web_container, java_version).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "runtime".into(),
                format!(
                    "unsupported runtime stack {} / {} / {}",
                    os, web_container, java_version
                ),
            )
        })
    }

    fn docker_configuration_for(
        &self,
        settings: &RuntimeSettings,
        os: OperatingSystem,
    ) -> Result<Option<DockerConfiguration>, ConfigurationError> {
        if os != OperatingSystem::Docker {
            return Ok(None);
        }

        let image = settings.image.as_deref().ok_or_else(|| {
            ConfigurationError::MissingConfigurationValue("runtime.image".into())
        })?;
        let server_id = settings.server_id.as_deref().ok_or_else(|| {
            ConfigurationError::MissingConfigurationValue("runtime.server_id".into())
        })?;
        let credential = self.credentials.lookup(server_id).ok_or_else(|| {
            ConfigurationError::InvalidConfigurationValue(
                "runtime.server_id".into(),
                format!("no stored credentials for server '{}'", server_id),
            )
        })?;

        Ok(Some(DockerConfiguration {
            registry_url: settings.registry_url.clone(),
            image: image.to_owned(),
            user_name: credential.username,
            password: credential.password,
        }))
    }
}

fn validated_name(field: &str, name: &str) -> Result<String, ConfigurationError> {
    if NAME_VALIDATION_REGEX.is_match(name) {
        Ok(name.to_owned())
    } else {
        Err(ConfigurationError::InvalidConfigurationValue(
            field.to_owned(),
            format!(
                "'{}' must be 2-60 characters of letters, digits and hyphens",
                name
            ),
        ))
    }
}
