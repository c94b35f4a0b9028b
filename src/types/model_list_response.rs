use serde::{Deserialize, Serialize};

use crate::types::ModelDescriptor;

/// Response from the list models endpoint.
///
/// Open WebUI deployments answer either with a bare JSON array of catalog
/// entries or with an OpenAI-style `{"data": [...]}` wrapper; both parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelListResponse {
    /// `{"data": [...]}` wrapper.
    Wrapped {
        /// List of models returned by the backend.
        data: Vec<ModelDescriptor>,
    },

    /// Bare JSON array.
    Bare(Vec<ModelDescriptor>),
}

impl ModelListResponse {
    /// Get the list of models.
    pub fn models(&self) -> &[ModelDescriptor] {
        match self {
            ModelListResponse::Wrapped { data } => data,
            ModelListResponse::Bare(models) => models,
        }
    }

    /// Consume the response, yielding the list of models.
    pub fn into_models(self) -> Vec<ModelDescriptor> {
        match self {
            ModelListResponse::Wrapped { data } => data,
            ModelListResponse::Bare(models) => models,
        }
    }
}
