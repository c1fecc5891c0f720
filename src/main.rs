//! Showreel - A terminal portfolio gallery for video work.
//!
//! # Usage
//!
//! ```bash
//! showreel catalog.json
//! showreel --category wedding catalog.json
//! showreel --no-images catalog.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use showreel::app::App;
use showreel::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal portfolio gallery for video work
#[derive(Parser, Debug)]
#[command(name = "showreel", version, about, long_about = None)]
struct Cli {
    /// Catalog file to browse
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Disable inline thumbnail rendering (text cards only)
    #[arg(long)]
    no_images: bool,

    /// Start with a category filter applied
    #[arg(long, value_name = "TAG")]
    category: Option<String>,

    /// External command the share action invokes with title, text, and
    /// link arguments; without it, sharing copies the link
    #[arg(long, value_name = "CMD")]
    share_cmd: Option<String>,

    /// Save current command-line flags as defaults in .showreelrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .showreelrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Verify the catalog exists before touching the terminal
    if !cli.catalog.exists() {
        anyhow::bail!("Catalog not found: {}", cli.catalog.display());
    }

    // Run the application
    let mut app = App::new(cli.catalog)
        .with_images_enabled(!effective.no_images)
        .with_category(effective.category)
        .with_share_cmd(effective.share_cmd);

    app.run().context("Application error")
}
