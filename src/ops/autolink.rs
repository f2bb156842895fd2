//! Auto-links derived from `*_id` attributes.
//!
//! A loaded model with a `user_id` attribute exposes a `user` link that
//! finds `User` by that id. Links need no declaration and never use a path
//! template; they are unrelated to the declared association table.

use crate::core::attributes::{AttributeError, Attributes, Value};
use crate::core::model::Model;
use crate::errors::{Error, Result};
use crate::ops::classify::Fetched;
use crate::util::context::GlobalContext;
use crate::util::inflector;

const SUFFIX: &str = "_id";

/// The link name for an attribute, if it is `*_id` shaped.
pub fn link_name(attribute: &str) -> Option<&str> {
    attribute.strip_suffix(SUFFIX).filter(|name| !name.is_empty())
}

/// Link names for every `*_id` attribute, in attribute order.
pub fn link_names(attributes: &Attributes) -> Vec<String> {
    attributes
        .keys()
        .filter_map(link_name)
        .map(str::to_string)
        .collect()
}

/// The class a link resolves to: `user` -> `User`.
pub fn target_class_name(link: &str) -> String {
    inflector::classify(link)
}

impl Model {
    /// Follow the auto-link `name`, fetching on first access or when
    /// `reload` is set.
    ///
    /// The current value of `<name>_id` is read at fetch time.
    pub fn link(&mut self, ctx: &GlobalContext, name: &str, reload: bool) -> Result<&Fetched> {
        if self.links.needs_fetch(name, reload) {
            let id = self.link_id(name)?;
            let class = ctx.classes().class_for(&target_class_name(name));

            tracing::debug!("Following {}#{} to {} {}", self.class_name(), name, class.name(), id);
            let fetched = ctx.resource_for(class).find(id)?;
            return Ok(self.links.store(name, fetched));
        }

        self.links.get(name).ok_or_else(|| {
            Error::Attribute(AttributeError::NoMethod {
                class: self.class_name().to_string(),
                method: name.to_string(),
            })
        })
    }

    fn link_id(&self, name: &str) -> Result<Value> {
        let attribute = format!("{}{}", name, SUFFIX);
        match self.attribute(&attribute) {
            None => Err(Error::Attribute(AttributeError::NoMethod {
                class: self.class_name().to_string(),
                method: name.to_string(),
            })),
            Some(Value::Null) => Err(Error::MissingAttribute {
                class: self.class_name().to_string(),
                attribute,
            }),
            Some(id) => Ok(id.clone()),
        }
    }
}
