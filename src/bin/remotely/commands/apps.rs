//! `remotely apps` command

use std::path::Path;

use anyhow::Result;

use crate::cli::AppsArgs;

pub fn execute(_args: AppsArgs, config: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config)?;

    if ctx.apps().is_empty() {
        println!("No applications configured");
        return Ok(());
    }

    for app in ctx.apps().iter() {
        let auth = app.auth().map(|a| a.kind()).unwrap_or("none");
        println!(
            "{:<20} {} (auth: {})",
            app.name(),
            app.url().unwrap_or("<no url>"),
            auth
        );
    }

    Ok(())
}
