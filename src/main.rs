//! Price one quote read as JSON from stdin.

use std::io::{self, Read};

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use cotizador::history::JsonFileHistory;
use cotizador::pricing::{format_money, price_quote, PricingError};
use cotizador::{Catalog, CotizadorConfig, QuoteCommand};

fn main() -> anyhow::Result<()> {
    let config = CotizadorConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load rate table {}", config.catalog_path.display()))?;

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let input = QuoteCommand::from_json(&raw)
        .context("Invalid quote JSON")?
        .into_input(&catalog);

    let mut history = JsonFileHistory::new(&config.history_path, config.history_capacity);
    tracing::debug!("Recording quotes in {}", history.path().display());

    match price_quote(input, &mut history, Utc::now()) {
        Ok(priced) => {
            tracing::info!("Quote total {}", format_money(priced.result.total));
            println!("{}", serde_json::to_string_pretty(&priced)?);
            Ok(())
        }
        Err(e @ PricingError::Validation { .. }) => {
            println!("{}", serde_json::to_string_pretty(&e.to_response())?);
            Err(e.into())
        }
    }
}
