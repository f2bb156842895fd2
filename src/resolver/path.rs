//! Association path resolution.
//!
//! Turns an association descriptor and the current attributes of a model
//! into the request path. See [`crate::core::association`] for the
//! conventions.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::association::{AssociationDescriptor, Cardinality};
use crate::core::attributes::to_param;
use crate::core::model::Model;
use crate::core::url::Url;
use crate::errors::{Error, Result};
use crate::url;
use crate::util::inflector::{pluralize, singularize};

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r":(\w+)").expect("static regex is valid"))
}

/// Resolve the request path of `descriptor` for `model`.
pub fn resolve(model: &Model, descriptor: &AssociationDescriptor) -> Result<Url> {
    if descriptor.has_misplaced_foreign_key() {
        return Err(Error::HasManyForeignKey {
            class: model.class_name().to_string(),
            association: descriptor.name().to_string(),
            cardinality: descriptor.cardinality().to_string(),
        });
    }

    if let Some(template) = descriptor.path() {
        let template = template.evaluate(model)?;
        return interpolate(model, &template);
    }

    let class = model.class();
    let name = descriptor.name();
    let path = match descriptor.cardinality() {
        Cardinality::HasMany => url!(class.base_resource_name(), param(model, "id")?, pluralize(name)),
        Cardinality::HasOne => url!(class.base_resource_name(), param(model, "id")?, singularize(name)),
        Cardinality::BelongsTo => {
            let foreign_key = descriptor.foreign_key_attribute();
            url!(pluralize(name), param(model, &foreign_key)?)
        }
    };

    Ok(path)
}

/// Replace every `:token` in `template` with the model's `token` attribute.
pub fn interpolate(model: &Model, template: &str) -> Result<Url> {
    let mut path = String::with_capacity(template.len());
    let mut last = 0;

    for captures in token_pattern().captures_iter(template) {
        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        path.push_str(&template[last..whole.start()]);
        path.push_str(&param(model, token.as_str())?);
        last = whole.end();
    }
    path.push_str(&template[last..]);

    Ok(Url::parse(path))
}

/// An attribute rendered as a path segment; absent or null is an error.
fn param(model: &Model, attribute: &str) -> Result<String> {
    model
        .attribute(attribute)
        .and_then(to_param)
        .ok_or_else(|| Error::MissingAttribute {
            class: model.class_name().to_string(),
            attribute: attribute.to_string(),
        })
}
