use std::path::PathBuf;

use glob::Pattern;
use slipway_appservice::config::ConfigurationError;
use slipway_appservice::models::DeployType;

use crate::config::ResourceSettings;
use crate::descriptor::Artifact;

const INCLUDES_FIELD: &str = "deployment.resources.includes";
const EXCLUDES_FIELD: &str = "deployment.resources.excludes";

/// Expands the configured resource groups into concrete files, each paired
/// with the deploy type inferred from its extension. Resource groups that
/// match nothing contribute nothing; no resource groups means no artifacts.
pub fn expand_resources(
    resources: &[ResourceSettings],
) -> Result<Vec<Artifact>, ConfigurationError> {
    let mut files: Vec<PathBuf> = Vec::new();
    for resource in resources {
        let directory = resource.directory.as_deref().unwrap_or(".");
        let excludes = exclude_patterns(&resource.excludes)?;

        for include in &resource.includes {
            let pattern = format!("{}/{}", directory.trim_end_matches('/'), include);
            let matches = glob::glob(&pattern).map_err(|e| {
                ConfigurationError::InvalidConfigurationValue(
                    INCLUDES_FIELD.to_string(),
                    e.to_string(),
                )
            })?;

            for entry in matches {
                let path = entry.map_err(|e| ConfigurationError::Other(Box::new(e)))?;
                if !path.is_file() {
                    continue;
                }
                let relative = path.strip_prefix(directory).unwrap_or(path.as_path());
                if excludes.iter().any(|exclude| exclude.matches_path(relative)) {
                    continue;
                }
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();

    Ok(files
        .into_iter()
        .map(|file| Artifact {
            deploy_type: DeployType::from_path(&file),
            file,
        })
        .collect())
}

fn exclude_patterns(excludes: &[String]) -> Result<Vec<Pattern>, ConfigurationError> {
    excludes
        .iter()
        .map(|exclude| {
            Pattern::new(exclude).map_err(|e| {
                ConfigurationError::InvalidConfigurationValue(
                    EXCLUDES_FIELD.to_string(),
                    e.to_string(),
                )
            })
        })
        .collect()
}
