//! Builder for creating and configuring Controller instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;

use super::{rehydrate, Controller, Settings};
use crate::{
    config::Config,
    error::Result,
    generation::{GeminiClient, ImageGenerator, PlanGenerator},
    store::{SqliteStore, Store},
};

/// Builder for creating and configuring Controller instances.
///
/// Anything not set explicitly is derived from a [`Config`]: the store
/// defaults to a [`SqliteStore`] at the configured (or XDG) data file and both
/// generators default to one [`GeminiClient`].
#[derive(Clone, Default)]
pub struct ControllerBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn Store>>,
    data_file: Option<PathBuf>,
    plan_generator: Option<Arc<dyn PlanGenerator>>,
    image_generator: Option<Arc<dyn ImageGenerator>>,
    settings: Option<Settings>,
}

impl ControllerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` instead of [`Config::from_env`].
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Uses an already constructed store. Takes precedence over
    /// [`ControllerBuilder::with_data_file`].
    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets a custom SQLite file for the default store.
    ///
    /// If not specified, uses the config's `data_file`, then the XDG Base
    /// Directory specification: `$XDG_DATA_HOME/cadence/cadence.db`.
    pub fn with_data_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_file = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_plan_generator(mut self, generator: Arc<dyn PlanGenerator>) -> Self {
        self.plan_generator = Some(generator);
        self
    }

    pub fn with_image_generator(mut self, generator: Arc<dyn ImageGenerator>) -> Self {
        self.image_generator = Some(generator);
        self
    }

    /// Uses one Gemini client for both plans and images.
    pub fn with_gemini(self, client: GeminiClient) -> Self {
        let client = Arc::new(client);
        self.with_plan_generator(client.clone())
            .with_image_generator(client)
    }

    /// Overrides the limits taken from the config.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Builds the controller and restores the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `CadenceError::XdgDirectory` if no default data path can be
    /// determined, `CadenceError::FileSystem` or `CadenceError::Database` if
    /// the SQLite store cannot be opened, and `CadenceError::Configuration`
    /// if the HTTP client cannot be created. Unreadable persisted records
    /// are not errors; they fall back to defaults.
    pub async fn build(self) -> Result<Controller> {
        let config = self.config.unwrap_or_else(Config::from_env);

        let store: Arc<dyn Store> = match self.store {
            Some(store) => store,
            None => {
                let path = match self.data_file.or_else(|| config.data_file.clone()) {
                    Some(path) => path,
                    None => SqliteStore::default_path()?,
                };
                debug!("Opening store at {}", path.display());
                Arc::new(SqliteStore::open(path).await?)
            }
        };

        let (plan_generator, image_generator) = match (self.plan_generator, self.image_generator) {
            (Some(plans), Some(images)) => (plans, images),
            (plans, images) => {
                let client = Arc::new(GeminiClient::from_config(&config)?);
                (
                    plans.unwrap_or_else(|| client.clone() as Arc<dyn PlanGenerator>),
                    images.unwrap_or(client as Arc<dyn ImageGenerator>),
                )
            }
        };

        let settings = self.settings.unwrap_or_else(|| Settings::from(&config));
        let session = rehydrate::rehydrate(store.as_ref(), &settings).await;

        Ok(Controller::new(
            store,
            plan_generator,
            image_generator,
            settings,
            session,
        ))
    }
}
