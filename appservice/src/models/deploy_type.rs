use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Artifact format classification. Governs how the platform installs an
/// uploaded file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeployType {
    War,
    Jar,
    Ear,
    Zip,
    Unknown,
}

lazy_static! {
    static ref EXTENSION_TABLE: HashMap<&'static str, DeployType> = HashMap::from([
        ("war", DeployType::War),
        ("jar", DeployType::Jar),
        ("ear", DeployType::Ear),
        ("zip", DeployType::Zip),
    ]);
}

impl DeployType {
    /// Infers the deploy type from the file extension.
    pub fn from_path(path: &Path) -> DeployType {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| EXTENSION_TABLE.get(extension.to_lowercase().as_str()))
            .copied()
            .unwrap_or(DeployType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeployType::War => "war",
            DeployType::Jar => "jar",
            DeployType::Ear => "ear",
            DeployType::Zip => "zip",
            DeployType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeployType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deploy_type_from_extension() {
        assert_eq!(DeployType::from_path(Path::new("app.war")), DeployType::War);
        assert_eq!(DeployType::from_path(Path::new("app.jar")), DeployType::Jar);
        assert_eq!(DeployType::from_path(Path::new("app.ear")), DeployType::Ear);
        assert_eq!(DeployType::from_path(Path::new("site.zip")), DeployType::Zip);
    }

    #[test]
    fn test_unrecognized_extension_falls_back_to_unknown() {
        assert_eq!(
            DeployType::from_path(Path::new("app.unknown")),
            DeployType::Unknown
        );
        assert_eq!(DeployType::from_path(Path::new("noextension")), DeployType::Unknown);
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(DeployType::from_path(Path::new("APP.WAR")), DeployType::War);
    }
}
