/// Registry access for a container-image deployment. Only populated when the
/// runtime is the container-image variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockerConfiguration {
    pub registry_url: Option<String>,
    pub image: String,
    pub user_name: String,
    pub password: String,
}
