//! Declared association accessors.
//!
//! `model.association(&ctx, "members", false)` answers from the instance's
//! cache when it can, and otherwise resolves the path, fetches it from the
//! association's application and stores the classified result. A cached
//! failure is returned as-is until the caller reloads.

use crate::core::association::{AssociationDescriptor, Cardinality};
use crate::core::collection::ParentRef;
use crate::core::model::Model;
use crate::errors::{Error, Result};
use crate::ops::classify::Fetched;
use crate::ops::http::{self, RequestOptions};
use crate::resolver;
use crate::util::context::GlobalContext;

/// Fetch an association without touching the cache.
///
/// The application is chosen from the descriptor, then the model's class,
/// then the single-application fallback.
pub fn fetch_association(
    ctx: &GlobalContext,
    model: &Model,
    descriptor: &AssociationDescriptor,
) -> Result<Fetched> {
    let path = resolver::resolve(model, descriptor)?;
    let target = ctx.classes().class_for(&descriptor.target_class_name());
    let app = ctx.app_for(model.class(), descriptor.app())?;

    let parent = match descriptor.cardinality() {
        Cardinality::HasMany => ParentRef::of(model),
        Cardinality::HasOne | Cardinality::BelongsTo => None,
    };

    tracing::debug!(
        "Fetching {}#{} ({}) from {}",
        model.class_name(),
        descriptor.name(),
        descriptor.cardinality(),
        app.name()
    );
    http::get(
        app.connection()?,
        &path,
        &target,
        RequestOptions::new().parent(parent),
    )
}

impl Model {
    /// Read a declared association, fetching it on first access or when
    /// `reload` is set.
    pub fn association(&mut self, ctx: &GlobalContext, name: &str, reload: bool) -> Result<&Fetched> {
        self.association_mut(ctx, name, reload).map(|fetched| &*fetched)
    }

    /// Like [`Model::association`], with mutable access to the cached value.
    pub fn association_mut(&mut self, ctx: &GlobalContext, name: &str, reload: bool) -> Result<&mut Fetched> {
        if self.associations.needs_fetch(name, reload) {
            let class = std::sync::Arc::clone(self.class());
            let descriptor = class.association(name).ok_or_else(|| Error::UnknownAssociation {
                class: self.class_name().to_string(),
                name: name.to_string(),
            })?;

            let fetched = fetch_association(ctx, self, descriptor)?;
            tracing::debug!("Caching {}#{} as {}", self.class_name(), name, fetched.kind());
            return Ok(self.associations.store(name, fetched));
        }

        tracing::debug!("Cache hit for {}#{}", self.class_name(), name);
        let class_name = self.class_name().to_string();
        self.associations
            .get_mut(name)
            .ok_or_else(|| Error::UnknownAssociation {
                class: class_name,
                name: name.to_string(),
            })
    }
}
