use crate::domain::error::DomainResult;
use crate::infrastructure::error::InfrastructureError;
use hf_hub::api::sync::Api;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Fetch a model artifact from the Hugging Face hub.
///
/// The hub client keeps a local cache, so a file that was downloaded before
/// is returned without touching the network.
#[instrument]
pub fn fetch_model(repo_id: &str, filename: &str) -> DomainResult<PathBuf> {
    let api = Api::new()
        .map_err(|e| InfrastructureError::ModelHub(format!("Hub client init failed: {}", e)))?;

    let path = api.model(repo_id.to_string()).get(filename).map_err(|e| {
        InfrastructureError::ModelHub(format!(
            "Download of {}/{} failed: {}",
            repo_id, filename, e
        ))
    })?;

    debug!("Model artifact at {:?}", path);
    Ok(path)
}
