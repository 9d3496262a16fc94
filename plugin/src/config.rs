use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;

use slipway_appservice::config::ConfigurationError;

/// The raw `webapp` deployment settings as authored in the project
/// descriptor. Field validation happens in the resolver, not here.
#[derive(Debug, Deserialize)]
pub struct DeploySettings {
    pub app_name: String,
    #[serde(default)]
    pub slot_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub runtime: Option<RuntimeSettings>,
    #[serde(default)]
    pub deployment: Option<DeploymentSettings>,
}

#[derive(Debug, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub java_version: Option<String>,
    #[serde(default)]
    pub web_container: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub registry_url: Option<String>,
    #[serde(default)]
    pub server_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeploymentSettings {
    #[serde(default)]
    pub resources: Vec<ResourceSettings>,
}

/// One file-glob resource group: files under `directory` matching any of
/// `includes` and none of `excludes`.
#[derive(Debug, Deserialize)]
pub struct ResourceSettings {
    #[serde(default)]
    pub directory: Option<String>,
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

pub fn figment(config_path: Option<&Path>) -> Figment {
    let default_path = Env::var_or("SLIPWAY_CONFIG", "./slipway.toml");
    let figment = match config_path {
        Some(path) => Figment::from(Toml::file(path)),
        None => Figment::from(Toml::file(default_path)),
    };
    figment.merge(Env::prefixed("SLIPWAY_").split("__"))
}

pub fn deploy_settings(figment: &Figment) -> Result<DeploySettings, ConfigurationError> {
    Ok(figment.extract()?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_extract_full_descriptor() {
        let figment = Figment::from(Toml::string(
            r#"
            app_name = "demo-app"
            region = "eastus"

            [runtime]
            os = "linux"
            java_version = "11"
            web_container = "tomcat 9.0"

            [[deployment.resources]]
            directory = "target"
            includes = ["*.war"]
            excludes = ["*-sources.war"]
            "#,
        ));
        let settings = deploy_settings(&figment).unwrap();
        assert_eq!(settings.app_name, "demo-app");
        assert_eq!(settings.region.as_deref(), Some("eastus"));
        let runtime = settings.runtime.unwrap();
        assert_eq!(runtime.os.as_deref(), Some("linux"));
        let deployment = settings.deployment.unwrap();
        assert_eq!(deployment.resources.len(), 1);
        assert_eq!(deployment.resources[0].includes, vec!["*.war"]);
    }

    #[test]
    fn test_missing_app_name_names_the_field() {
        let figment = Figment::from(Toml::string(r#"region = "eastus""#));
        let error = deploy_settings(&figment).unwrap_err();
        match error {
            ConfigurationError::MissingConfigurationValue(field) => {
                assert_eq!(field, "app_name")
            }
            other => panic!("Expected missing field error, got {:?}", other),
        }
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SLIPWAY_APP_NAME", "env-app");
            jail.set_env("SLIPWAY_RUNTIME__OS", "docker");
            let settings = deploy_settings(&figment(None)).expect("extract settings");
            assert_eq!(settings.app_name, "env-app");
            assert_eq!(settings.runtime.unwrap().os.as_deref(), Some("docker"));
            Ok(())
        });
    }
}
