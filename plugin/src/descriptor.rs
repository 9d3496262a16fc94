use std::path::PathBuf;

use slipway_appservice::models::{DeployType, DockerConfiguration, Region, Runtime};

/// One artifact to upload, paired with its inferred deploy type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file: PathBuf,
    pub deploy_type: DeployType,
}

/// The validated, normalized form of the user's deployment configuration.
/// Built fresh per invocation and discarded afterwards.
#[derive(Clone, Debug)]
pub struct DeploymentDescriptor {
    pub app_name: String,
    pub slot_name: String,
    pub region: Region,
    pub runtime: Option<Runtime>,
    pub docker_configuration: Option<DockerConfiguration>,
    pub artifacts: Vec<Artifact>,
}
