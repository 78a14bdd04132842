//! folio CLI - serve Markdown pages and policy documents over HTTP.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use folio_site::SiteLayout;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Serve Markdown pages and policy documents over HTTP")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Locations of the site's inputs.
#[derive(Args)]
struct LayoutArgs {
    /// Path to the JSON site configuration
    #[arg(short, long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Directory containing base.html, header.html, footer.html and policy.html
    #[arg(long, global = true, default_value = "static/templates")]
    templates: PathBuf,

    /// Directory of Markdown pages
    #[arg(long, global = true, default_value = "static/pages")]
    pages: PathBuf,

    /// Directory of Markdown policy documents
    #[arg(long, global = true, default_value = "static/policies")]
    policies: PathBuf,

    /// Directory served under /static
    #[arg(long, global = true, default_value = "static")]
    static_dir: PathBuf,
}

impl From<LayoutArgs> for SiteLayout {
    fn from(args: LayoutArgs) -> Self {
        Self {
            config_path: args.config,
            templates_dir: args.templates,
            pages_dir: args.pages,
            policies_dir: args.policies,
            static_dir: args.static_dir,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load the site and serve it
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Load the site and list its routes without serving
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let layout = SiteLayout::from(cli.layout);

    // Execute command
    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve::run(layout, host, port).await?;
        }
        Commands::Check => {
            commands::check::run(layout)?;
        }
    }

    Ok(())
}
