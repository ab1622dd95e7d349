//! Configurator definition operations for the service.

use log::info;

use super::ConfiguratorService;
use crate::{
    db::Database,
    error::{ConfiguratorError, Result},
    models::{ConfiguratorSchema, ConfiguratorSummary},
    params::{ConfiguratorKey, Id, ImportConfigurator},
};

/// Loads a configurator by ID, falling back to the key as a slug.
pub(crate) fn load_by_key(db: &Database, key: &ConfiguratorKey) -> Result<Option<ConfiguratorSchema>> {
    if let Some(id) = key.as_id() {
        if let Some(schema) = db.get_configurator(id)? {
            return Ok(Some(schema));
        }
    }
    db.get_configurator_by_slug(key.as_str())
}

fn not_found(key: &ConfiguratorKey) -> ConfiguratorError {
    ConfiguratorError::ConfiguratorNotFound {
        key: key.to_string(),
    }
}

impl ConfiguratorService {
    /// Validates and stores a configurator definition.
    pub async fn import_configurator(&self, params: &ImportConfigurator) -> Result<ConfiguratorSchema> {
        let definition = params.definition.clone();
        let replace = params.replace;

        let schema = self
            .with_database(move |db| db.import_configurator(&definition, replace))
            .await?;
        info!(
            "Imported configurator '{}' (ID: {}) with {} steps",
            schema.slug,
            schema.id,
            schema.steps.len()
        );
        Ok(schema)
    }

    /// Retrieves a configurator by its ID.
    pub async fn get_configurator(&self, params: &Id) -> Result<Option<ConfiguratorSchema>> {
        let id = params.id;
        self.with_database(move |db| db.get_configurator(id)).await
    }

    /// Retrieves a configurator by ID or slug.
    ///
    /// # Errors
    ///
    /// Returns `ConfiguratorError::ConfiguratorNotFound` when neither matches.
    pub async fn find_configurator(&self, key: &ConfiguratorKey) -> Result<ConfiguratorSchema> {
        let lookup = key.clone();
        self.with_database(move |db| load_by_key(db, &lookup))
            .await?
            .ok_or_else(|| not_found(key))
    }

    /// Lists all configurators with step and submission counts.
    pub async fn list_configurators(&self) -> Result<Vec<ConfiguratorSummary>> {
        self.with_database(|db| db.list_configurators()).await
    }

    /// Deletes a configurator definition and returns it. Its submissions are
    /// kept.
    pub async fn delete_configurator(&self, key: &ConfiguratorKey) -> Result<ConfiguratorSchema> {
        let lookup = key.clone();
        let deleted = self
            .with_database(move |db| {
                let Some(schema) = load_by_key(db, &lookup)? else {
                    return Ok(None);
                };
                db.delete_configurator(schema.id)?;
                Ok(Some(schema))
            })
            .await?
            .ok_or_else(|| not_found(key))?;

        info!("Deleted configurator '{}' (ID: {})", deleted.slug, deleted.id);
        Ok(deleted)
    }
}
