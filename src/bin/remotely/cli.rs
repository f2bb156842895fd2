//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// remotely - inspect remote resources the way models see them
#[derive(Parser)]
#[command(name = "remotely")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (replaces the global and project files)
    #[arg(long, global = true, env = "REMOTELY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured applications
    Apps(AppsArgs),

    /// GET a path and print the classified result
    Get(GetArgs),

    /// Find a resource by class name and id
    Find(FindArgs),

    /// Interpolate a path template offline
    Path(PathArgs),
}

#[derive(Args)]
pub struct AppsArgs {}

#[derive(Args)]
pub struct GetArgs {
    /// Request path (e.g. /adventures/1/members)
    pub path: String,

    /// Application to query (defaults to the only configured one)
    #[arg(long)]
    pub app: Option<String>,

    /// Query parameter, repeatable
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub query: Vec<(String, String)>,

    /// Class to materialize results as (defaults to the first path segment)
    #[arg(long)]
    pub class: Option<String>,
}

#[derive(Args)]
pub struct FindArgs {
    /// Class name (e.g. Adventure)
    pub class: String,

    /// Resource id
    pub id: String,

    /// Application to query (defaults to the only configured one)
    #[arg(long)]
    pub app: Option<String>,
}

#[derive(Args)]
pub struct PathArgs {
    /// Path template with `:token` placeholders
    pub template: String,

    /// Attribute value, repeatable
    #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub attrs: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}
