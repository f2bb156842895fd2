//! `remotely path` command

use std::sync::Arc;

use anyhow::Result;

use crate::cli::PathArgs;
use remotely::resolver;
use remotely::{Attributes, Model, ModelClass};

pub fn execute(args: PathArgs) -> Result<()> {
    let attributes: Attributes = args.attrs.into_iter().collect();
    let model = Model::new(Arc::new(ModelClass::new("Template")), attributes);

    let path = resolver::interpolate(&model, &args.template)?;
    println!("{}", path);
    Ok(())
}
