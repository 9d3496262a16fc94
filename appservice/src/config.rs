use figment::Figment;
use std::error;
use std::fmt;

use crate::client::AppServiceClient;

#[derive(Debug)]
pub enum ConfigurationError {
    MissingConfigurationValue(String),
    InvalidConfigurationValue(String, String),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl From<figment::Error> for ConfigurationError {
    fn from(error: figment::Error) -> Self {
        match error.kind {
            figment::error::Kind::MissingField(cow) => {
                Self::MissingConfigurationValue(cow.to_string())
            }
            _ => Self::Other(Box::new(error)),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfigurationValue(field) => {
                write!(f, "Please configure the <{}> value", field)
            }
            Self::InvalidConfigurationValue(field, detail) => {
                write!(f, "The value of <{}> is not supported: {}", field, detail)
            }
            Self::Other(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Other(e) => Some(&**e),
            _ => None,
        }
    }
}

const API_ENDPOINT: &str = "api.endpoint";
const API_TOKEN: &str = "api.token";

pub fn client(figment: &Figment) -> Result<AppServiceClient, ConfigurationError> {
    let endpoint: String = figment
        .extract_inner(API_ENDPOINT)
        .map_err(|_e| ConfigurationError::MissingConfigurationValue(API_ENDPOINT.into()))?;
    let token: String = figment
        .extract_inner(API_TOKEN)
        .map_err(|_e| ConfigurationError::MissingConfigurationValue(API_TOKEN.into()))?;
    Ok(AppServiceClient::new(endpoint, token))
}

#[cfg(test)]
mod test {
    use figment::providers::Serialized;

    use super::*;

    #[test]
    fn test_client_from_complete_configuration() {
        let figment = Figment::from(Serialized::globals(serde_json::json!({
            "api": {
                "endpoint": "https://management.example.com",
                "token": "test-token",
            }
        })));
        assert!(client(&figment).is_ok());
    }

    #[test]
    fn test_client_requires_token() {
        let figment = Figment::from(Serialized::globals(serde_json::json!({
            "api": { "endpoint": "https://management.example.com" }
        })));
        let result = client(&figment);
        match result {
            Err(ConfigurationError::MissingConfigurationValue(field)) => {
                assert_eq!(field, "api.token")
            }
            other => panic!("Expected missing token error, got {:?}", other.err()),
        }
    }
}
