//! Global context for remotely operations.
//!
//! Holds the application registry and the class registry. Everything that
//! issues requests takes the context explicitly; there is no process-wide
//! state.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::model_class::ModelClass;
use crate::core::registry::ClassRegistry;
use crate::errors;
use crate::ops::Resource;
use crate::sources::{AppRegistry, Application, Connection};
use crate::util::config::Config;

/// Applications and model classes for one process (or one test).
#[derive(Debug, Clone, Default)]
pub struct GlobalContext {
    apps: AppRegistry,
    classes: ClassRegistry,
}

impl GlobalContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with one application per `[apps.*]` entry.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut ctx = GlobalContext::new();

        for (name, entry) in &config.apps {
            ctx.apps
                .register_with(name, |app| entry.apply(app, &config.http))
                .with_context(|| format!("invalid configuration for application `{}`", name))?;
        }

        tracing::debug!("Loaded {} application(s) from config", ctx.apps.len());
        Ok(ctx)
    }

    pub fn apps(&self) -> &AppRegistry {
        &self.apps
    }

    pub fn apps_mut(&mut self) -> &mut AppRegistry {
        &mut self.apps
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    /// Register an application by URL.
    pub fn register_app(&mut self, name: &str, url: &str) -> errors::Result<&Application> {
        self.apps.register(name, url)
    }

    /// Register an application configured by a closure.
    pub fn register_app_with<F>(&mut self, name: &str, configure: F) -> errors::Result<&Application>
    where
        F: FnOnce(&mut Application) -> errors::Result<()>,
    {
        self.apps.register_with(name, configure)
    }

    /// Register a model class.
    pub fn define(&mut self, class: ModelClass) -> Arc<ModelClass> {
        self.classes.register(class)
    }

    /// Register a subclass of a registered class.
    pub fn define_subclass<F>(&mut self, parent: &str, name: &str, configure: F) -> errors::Result<Arc<ModelClass>>
    where
        F: FnOnce(ModelClass) -> ModelClass,
    {
        self.classes.register_subclass(parent, name, configure)
    }

    /// A registered class.
    pub fn class(&self, name: &str) -> errors::Result<Arc<ModelClass>> {
        self.classes.lookup(name)
    }

    /// Class-level operations for a registered class.
    pub fn resource(&self, name: &str) -> errors::Result<Resource<'_>> {
        Ok(Resource::new(self, self.class(name)?))
    }

    /// Class-level operations for any class.
    pub fn resource_for(&self, class: Arc<ModelClass>) -> Resource<'_> {
        Resource::new(self, class)
    }

    /// The application serving `class`.
    ///
    /// An explicit name wins over the class's application; without either,
    /// the single registered application is used.
    pub fn app_for(&self, class: &ModelClass, app: Option<&str>) -> errors::Result<&Application> {
        self.apps.resolve(app.or(class.app()))
    }

    /// The connection of an application, by optional name.
    pub fn connection_for(&self, app: Option<&str>) -> errors::Result<&Connection> {
        self.apps.resolve(app)?.connection()
    }

    /// Forget every application and class.
    pub fn reset(&mut self) {
        self.apps.reset();
        self.classes.clear();
    }
}
