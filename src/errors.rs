//! Error types for remotely.
//!
//! Configuration and programmer mistakes are errors. A remote rejection
//! (status >= 400) is not: it is reported in-band as [`crate::Fetched::Failed`]
//! or `Ok(false)`.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::attributes::AttributeError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Result type used throughout remotely.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the association engine.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum Error {
    #[error("unknown application `{name}`")]
    #[diagnostic(code(remotely::app::unknown))]
    UnknownApp { name: String, known: Vec<String> },

    #[error("more than one application is registered; specify which one to use")]
    #[diagnostic(
        code(remotely::app::ambiguous),
        help("Pass an app name on the class or association")
    )]
    AmbiguousApp { names: Vec<String> },

    #[error("no applications are registered")]
    #[diagnostic(code(remotely::app::none), help("Register an application first"))]
    NoApps,

    #[error("application `{name}` has no url")]
    #[diagnostic(code(remotely::app::no_url))]
    AppWithoutUrl { name: String },

    #[error("invalid url `{url}` for application `{name}`")]
    #[diagnostic(code(remotely::app::invalid_url))]
    InvalidUrl {
        name: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("`{attribute}` is required to build the path for {class}")]
    #[diagnostic(code(remotely::path::missing_attribute))]
    MissingAttribute { class: String, attribute: String },

    #[error("`foreign_key` is only valid for belongs_to, not {cardinality} :{association}")]
    #[diagnostic(
        code(remotely::association::foreign_key),
        help("Use an explicit `path` instead")
    )]
    HasManyForeignKey {
        class: String,
        association: String,
        cardinality: String,
    },

    #[error("{class} has no association named `{name}`")]
    #[diagnostic(code(remotely::association::unknown))]
    UnknownAssociation { class: String, name: String },

    #[error("unknown model class `{name}`")]
    #[diagnostic(code(remotely::class::unknown))]
    UnknownClass { name: String },

    #[error("received an HTML page instead of JSON (status {status})")]
    #[diagnostic(
        code(remotely::response::non_json),
        help("The endpoint is probably misconfigured and serving an error page")
    )]
    NonJsonResponse { status: u16, body: String },

    #[error("malformed response for {class}: {reason}")]
    #[diagnostic(code(remotely::response::malformed))]
    MalformedResponse { class: String, reason: String },

    #[error("cannot add a {found} to a collection of {expected}")]
    #[diagnostic(code(remotely::collection::class_mismatch))]
    ElementClassMismatch { expected: String, found: String },

    #[error(transparent)]
    #[diagnostic(code(remotely::attribute))]
    Attribute(#[from] AttributeError),

    #[error("request failed")]
    #[diagnostic(code(remotely::transport))]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON")]
    #[diagnostic(code(remotely::json))]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Convert to a diagnostic for the CLI.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::from_miette(self);

        match self {
            Error::UnknownApp { known, .. } if known.is_empty() => diag.with_help(suggestions::NO_APPS),
            Error::UnknownApp { known, .. } => diag
                .with_note(format!("registered applications: {}", known.join(", ")))
                .with_help(suggestions::LIST_APPS),

            Error::AmbiguousApp { names } => diag
                .with_note(format!("registered applications: {}", names.join(", ")))
                .with_help("Pass `--app <NAME>` to choose one"),

            Error::NoApps => diag.with_help(suggestions::NO_APPS),

            Error::AppWithoutUrl { name } => {
                diag.with_help(format!("Set `url` under [apps.{}] in the configuration", name))
            }

            Error::MissingAttribute { attribute, .. } => diag.with_help(format!(
                "Set the `{}` attribute before fetching the association",
                attribute
            )),

            Error::NonJsonResponse { body, .. } => {
                let excerpt: String = body.chars().take(120).collect();
                diag.with_note(format!("body starts with: {}", excerpt.trim()))
                    .with_help(suggestions::CHECK_URL)
            }

            Error::Transport(_) => diag.with_help(suggestions::CHECK_URL),

            _ => diag,
        }
    }
}
