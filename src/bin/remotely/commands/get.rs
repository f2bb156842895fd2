//! `remotely get` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GetArgs;
use remotely::ops::http::{self, RequestOptions};
use remotely::util::inflector;
use remotely::Url;

pub fn execute(args: GetArgs, config: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config)?;
    let path = Url::parse(&args.path);

    let class_name = match args.class {
        Some(name) => name,
        None => inflector::classify(path.segments().next().unwrap_or("record")),
    };
    let class = ctx.classes().class_for(&class_name);

    let app = ctx.apps().resolve(args.app.as_deref())?;
    tracing::debug!("GET {} from {} as {}", path, app.name(), class_name);

    let fetched = http::get(
        app.connection()?,
        &path,
        &class,
        RequestOptions::new().query(args.query),
    )?;

    super::print_fetched(&fetched, path.as_str())
}
