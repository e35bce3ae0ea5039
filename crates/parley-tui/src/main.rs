mod i18n;
mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parley_core::tracing_setup::init_file_tracing;
use parley_core::{ApiClient, ClientConfig};

use crate::i18n::Catalog;
use crate::runtime::run_app;
use crate::ui::App;

/// Terminal chat client
#[derive(Parser, Debug)]
#[command(name = "parley-tui", version, about)]
struct Args {
    /// JSON config file (default: <config dir>/parley/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and PARLEY_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Session token sent as the session cookie
    #[arg(long, env = "PARLEY_SESSION_TOKEN", hide_env_values = true)]
    session_token: Option<String>,

    /// Translations file replacing the built-in English strings
    #[arg(long)]
    locale: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(args.config.as_deref())?.with_env_overrides();
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(token) = &args.session_token {
        config.session_token = Some(token.clone());
    }
    config.validated()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_file_tracing("parley-tui")?;

    let config = load_config(&args)?;
    let catalog = match &args.locale {
        Some(path) => Catalog::load(path)?,
        None => Catalog::embedded()?,
    };

    // One client for the whole UI tree; every session mounts against it
    let client = Arc::new(ApiClient::new(&config)?);
    tracing::info!(base_url = client.base_url(), session = client.has_session(), "starting");

    let mut app = App::new(
        client,
        config.base_url.clone(),
        config.request_timeout(),
        catalog,
    );

    ui::terminal::install_panic_hook();
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app).await;

    // Aborts a request that is still in flight
    drop(app);
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
