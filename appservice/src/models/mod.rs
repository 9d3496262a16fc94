mod deploy_type;
mod docker;
mod region;
mod runtime;

pub use deploy_type::DeployType;
pub use docker::DockerConfiguration;
pub use region::Region;
pub use runtime::{JavaVersion, OperatingSystem, Runtime, WebContainer};
