//! Application registry.
//!
//! Applications are keyed by name. A lookup without a name falls back to the
//! only registered application, and is ambiguous when there are several.

use std::collections::BTreeMap;

use crate::errors::{Error, Result};
use crate::sources::application::Application;

/// The set of configured applications.
#[derive(Debug, Clone, Default)]
pub struct AppRegistry {
    apps: BTreeMap<String, Application>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an application by URL, replacing one with the same name.
    pub fn register(&mut self, name: &str, url: &str) -> Result<&Application> {
        self.register_with(name, |app| {
            app.set_url(url)?;
            Ok(())
        })
    }

    /// Register an application configured by a closure.
    ///
    /// ```
    /// use remotely::AppRegistry;
    ///
    /// let mut apps = AppRegistry::new();
    /// apps.register_with("adventure_app", |app| {
    ///     app.set_url("localhost:1234")?;
    ///     app.token_auth("secret");
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(apps.get("adventure_app").unwrap().url(), Some("http://localhost:1234"));
    /// ```
    pub fn register_with<F>(&mut self, name: &str, configure: F) -> Result<&Application>
    where
        F: FnOnce(&mut Application) -> Result<()>,
    {
        let mut app = Application::new(name);
        configure(&mut app)?;

        if self.apps.contains_key(name) {
            tracing::debug!("Replacing application {}", name);
        }
        self.apps.insert(name.to_string(), app);
        self.get(name)
    }

    /// Get an application by name.
    pub fn get(&self, name: &str) -> Result<&Application> {
        self.apps.get(name).ok_or_else(|| Error::UnknownApp {
            name: name.to_string(),
            known: self.apps.keys().cloned().collect(),
        })
    }

    /// Resolve an optional application name.
    ///
    /// Without a name, the single registered application is used.
    pub fn resolve(&self, name: Option<&str>) -> Result<&Application> {
        if let Some(name) = name {
            return self.get(name);
        }

        let mut apps = self.apps.values();
        match (apps.next(), apps.next()) {
            (Some(only), None) => Ok(only),
            (None, _) => Err(Error::NoApps),
            (Some(_), Some(_)) => Err(Error::AmbiguousApp {
                names: self.apps.keys().cloned().collect(),
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.apps.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.apps.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Application> {
        self.apps.values()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Remove every application.
    pub fn reset(&mut self) {
        self.apps.clear();
    }
}
