//! Model catalog management.
//!
//! This module provides the `ModelCatalog` struct which caches the set of
//! models the backend can serve and tracks the single active selection.

use crate::client::OpenWebUi;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::ModelDescriptor;

/// The cached model list and the active selection.
///
/// The catalog performs no retries and no polling; it is refreshed on
/// demand by the host, typically once per configuration change. The active
/// selection is stored as an id and resolved against the cache on read, so
/// a selection that disappears from a later refresh reads as `None` rather
/// than pointing at a model the backend no longer serves.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
    active_id: Option<String>,
}

impl ModelCatalog {
    /// Creates a new, empty catalog with no active selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the model list from the backend and replaces the cache.
    ///
    /// On success the new catalog (possibly empty) is returned. On any
    /// failure the previous cache and the active selection are left
    /// untouched and the error is returned to the caller.
    pub async fn refresh(&mut self, client: &OpenWebUi) -> Result<&[ModelDescriptor]> {
        observability::CATALOG_REFRESHES.click();
        match client.list_models().await {
            Ok(models) => {
                self.models = models;
                Ok(&self.models)
            }
            Err(err) => {
                observability::CATALOG_REFRESH_ERRORS.click();
                Err(err)
            }
        }
    }

    /// Activates a model by id.
    ///
    /// Fails without mutating state unless the id is present in the
    /// current cache.
    pub fn set_active(&mut self, model_id: &str) -> Result<()> {
        if self.models.iter().any(|model| model.id == model_id) {
            self.active_id = Some(model_id.to_string());
            Ok(())
        } else {
            Err(Error::invalid_model(model_id))
        }
    }

    /// Returns the active model, if one is selected and still cached.
    pub fn active_model(&self) -> Option<&ModelDescriptor> {
        let active_id = self.active_id.as_deref()?;
        self.models.iter().find(|model| model.id == active_id)
    }

    /// Returns the cached catalog.
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn seed(models: Vec<ModelDescriptor>) -> Self {
        Self {
            models,
            active_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_model_catalog() -> ModelCatalog {
        ModelCatalog::seed(vec![
            ModelDescriptor::new("gpt-a", "gpt-a"),
            ModelDescriptor::new("gpt-b", "GPT B"),
        ])
    }

    #[test]
    fn empty_catalog_has_no_active_model() {
        let catalog = ModelCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.active_model().is_none());
    }

    #[test]
    fn set_active_rejects_unknown_id() {
        let mut catalog = two_model_catalog();
        let err = catalog.set_active("gpt-z").unwrap_err();
        assert!(err.is_invalid_model());
        assert!(catalog.active_model().is_none());
    }

    #[test]
    fn set_active_resolves_display_name() {
        let mut catalog = two_model_catalog();
        catalog.set_active("gpt-b").unwrap();
        let active = catalog.active_model().unwrap();
        assert_eq!(active.id, "gpt-b");
        assert_eq!(active.display_name, "GPT B");
    }

    #[test]
    fn selection_survives_reactivation() {
        let mut catalog = two_model_catalog();
        catalog.set_active("gpt-a").unwrap();
        catalog.set_active("gpt-b").unwrap();
        assert_eq!(catalog.active_model().unwrap().id, "gpt-b");
    }

    #[test]
    fn stale_selection_reads_as_none() {
        let mut catalog = two_model_catalog();
        catalog.set_active("gpt-b").unwrap();
        catalog.models = vec![ModelDescriptor::new("gpt-a", "gpt-a")];
        assert!(catalog.active_model().is_none());
    }
}
