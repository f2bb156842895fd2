//! Class-level and instance-level resource operations.
//!
//! A [`Resource`] binds a model class to a context and performs the CRUD
//! requests on the class's collection URI:
//!
//! | operation        | request                        | result     |
//! |------------------|--------------------------------|------------|
//! | `find(id)`       | `GET <uri>/<id>`               | `Fetched`  |
//! | `where_(attrs)`  | `GET <uri>/search?<attrs>`     | `Fetched`  |
//! | `all()`          | `GET <uri>`                    | `Fetched`  |
//! | `create(attrs)`  | `POST <uri>`                   | `Fetched`  |
//! | `save(id, attrs)`| `PUT <uri>/<id>`               | `bool`     |
//! | `destroy(id)`    | `DELETE <uri>/<id>`            | `bool`     |

use std::sync::Arc;

use crate::core::attributes::{to_param, Attributes, Value};
use crate::core::model::Model;
use crate::core::model_class::ModelClass;
use crate::core::url::Url;
use crate::errors::{Error, Result};
use crate::ops::classify::Fetched;
use crate::ops::http::{self, RequestOptions};
use crate::sources::{Application, Connection};
use crate::util::context::GlobalContext;

/// A model class bound to a context.
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    ctx: &'a GlobalContext,
    class: Arc<ModelClass>,
}

impl<'a> Resource<'a> {
    pub fn new(ctx: &'a GlobalContext, class: Arc<ModelClass>) -> Self {
        Resource { ctx, class }
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// The application serving this class.
    pub fn app(&self) -> Result<&'a Application> {
        self.ctx.app_for(&self.class, None)
    }

    pub fn connection(&self) -> Result<&'a Connection> {
        self.app()?.connection()
    }

    /// Fetch one member by id.
    pub fn find(&self, id: impl Into<Value>) -> Result<Fetched> {
        let path = self.member_path(&id.into())?;
        http::get(self.connection()?, &path, &self.class, RequestOptions::new())
    }

    /// Search members by attribute values.
    pub fn where_(&self, criteria: &Attributes) -> Result<Fetched> {
        let path = self.class.uri().clone() + "search";
        http::get(
            self.connection()?,
            &path,
            &self.class,
            RequestOptions::new().query(criteria.to_query()),
        )
    }

    /// Fetch the whole collection.
    pub fn all(&self) -> Result<Fetched> {
        http::get(self.connection()?, self.class.uri(), &self.class, RequestOptions::new())
    }

    /// Create a member remotely.
    pub fn create(&self, attributes: &Attributes) -> Result<Fetched> {
        http::post(
            self.connection()?,
            self.class.uri(),
            &self.class,
            attributes,
            RequestOptions::new(),
        )
    }

    /// Update a member remotely.
    pub fn save(&self, id: impl Into<Value>, attributes: &Attributes) -> Result<bool> {
        let path = self.member_path(&id.into())?;
        http::put(self.connection()?, &path, attributes, RequestOptions::new())
    }

    /// Delete a member remotely.
    pub fn destroy(&self, id: impl Into<Value>) -> Result<bool> {
        let path = self.member_path(&id.into())?;
        http::delete(self.connection()?, &path, RequestOptions::new())
    }

    fn member_path(&self, id: &Value) -> Result<Url> {
        let id = to_param(id).ok_or_else(|| Error::MissingAttribute {
            class: self.class.name().to_string(),
            attribute: "id".to_string(),
        })?;
        Ok(self.class.uri().clone() + id.as_str())
    }
}

impl Model {
    /// Attributes sent on save: the savable ones when declared, else all.
    pub fn savable_attributes(&self) -> Attributes {
        match self.class().savable_attributes() {
            Some(names) => self.attributes().select(names),
            None => self.attributes().clone(),
        }
    }

    /// Create (new record) or update (persisted) this model remotely.
    ///
    /// A created model takes the attributes the remote side returned.
    pub fn save(&mut self, ctx: &GlobalContext) -> Result<bool> {
        let resource = ctx.resource_for(Arc::clone(self.class()));
        let attributes = self.savable_attributes();

        match self.id().cloned() {
            Some(id) => resource.save(id, &attributes),
            None => match resource.create(&attributes)? {
                Fetched::Failed => Ok(false),
                Fetched::Model(created) => {
                    let mut merged = self.attributes().clone();
                    merged.merge(created.attributes().clone());
                    self.set_attributes(merged);
                    Ok(true)
                }
                _ => Ok(true),
            },
        }
    }

    /// Delete this model remotely.
    pub fn destroy(&self, ctx: &GlobalContext) -> Result<bool> {
        let id = self.persisted_id()?;
        ctx.resource_for(Arc::clone(self.class())).destroy(id)
    }

    /// Re-fetch this model by id and replace its attributes.
    ///
    /// Cached associations are kept; pass `reload` to an accessor to refresh
    /// them.
    pub fn reload(&mut self, ctx: &GlobalContext) -> Result<bool> {
        let id = self.persisted_id()?;
        match ctx.resource_for(Arc::clone(self.class())).find(id)? {
            Fetched::Model(fresh) => {
                self.set_attributes(fresh.attributes().clone());
                Ok(true)
            }
            Fetched::Failed => Ok(false),
            other => Err(Error::MalformedResponse {
                class: self.class_name().to_string(),
                reason: format!("reload returned a {}, not an object", other.kind()),
            }),
        }
    }

    fn persisted_id(&self) -> Result<Value> {
        self.id().cloned().ok_or_else(|| Error::MissingAttribute {
            class: self.class_name().to_string(),
            attribute: "id".to_string(),
        })
    }
}
