//! `remotely find` command

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::FindArgs;
use remotely::ModelClass;

pub fn execute(args: FindArgs, config: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config)?;

    let mut class = ModelClass::new(args.class.as_str());
    if let Some(app) = args.app {
        class = class.with_app(app);
    }

    let resource = ctx.resource_for(Arc::new(class));
    let fetched = resource.find(args.id.as_str())?;

    super::print_fetched(&fetched, &format!("{} {}", args.class, args.id))
}
