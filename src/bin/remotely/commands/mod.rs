//! Command implementations

pub mod apps;
pub mod find;
pub mod get;
pub mod path;

use std::path::Path;

use anyhow::{bail, Context, Result};

use remotely::util::config::{self, Config};
use remotely::{Fetched, GlobalContext};

/// Build the context from `--config`, or from the global and project files.
pub fn load_context(explicit: Option<&Path>) -> Result<GlobalContext> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            let project = config::project_config_path(&cwd);
            match config::global_config_path() {
                Some(global) => config::load_config(&global, &project),
                None => Config::load_or_default(&project),
            }
        }
    };

    GlobalContext::from_config(&config)
}

/// Print a fetch result as JSON, failing on a remote rejection.
pub fn print_fetched(fetched: &Fetched, what: &str) -> Result<()> {
    if fetched.is_failure() {
        bail!("the remote application rejected the request for {}", what);
    }

    let json = serde_json::to_string_pretty(&fetched.to_json_value())?;
    println!("{}", json);
    Ok(())
}
