use figment::Figment;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockerCredential {
    pub username: String,
    pub password: String,
}

/// Resolves a credential-server identifier to registry credentials. The
/// host build tool owns the actual credential storage.
#[cfg_attr(test, automock)]
pub trait CredentialStore {
    fn lookup(&self, server_id: &str) -> Option<DockerCredential>;
}

/// Credential store backed by `[credentials.<server_id>]` blocks in the
/// project configuration.
pub struct FigmentCredentialStore {
    figment: Figment,
}

impl FigmentCredentialStore {
    pub fn new(figment: Figment) -> FigmentCredentialStore {
        FigmentCredentialStore { figment }
    }
}

impl CredentialStore for FigmentCredentialStore {
    fn lookup(&self, server_id: &str) -> Option<DockerCredential> {
        let username = self
            .figment
            .extract_inner(&format!("credentials.{}.username", server_id))
            .ok()?;
        let password = self
            .figment
            .extract_inner(&format!("credentials.{}.password", server_id))
            .ok()?;
        Some(DockerCredential { username, password })
    }
}
