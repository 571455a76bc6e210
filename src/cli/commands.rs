//! CLI command definitions and handlers

use clap::Subcommand;

/// Commands for TransLingua
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Bind address (default: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (default: 8000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Translate a single text from the command line
    Translate {
        /// Text to translate
        text: String,

        /// Language pair label, e.g. "English to French"
        #[arg(short = 'l', long)]
        pair: Option<String>,

        /// Source language code, used together with --to
        #[arg(long)]
        from: Option<String>,

        /// Target language code, used together with --from
        #[arg(long)]
        to: Option<String>,
    },

    /// List supported language pairs
    Pairs,
}

/// Handle server command
pub async fn handle_serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    use crate::core::config::AppConfig;
    use crate::server::api::run_server;
    use tracing::info;

    let mut config = AppConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    info!("Starting HTTP server on {}:{}", config.host, config.port);
    println!("🚀 Server starting on http://{}:{}", config.host, config.port);

    run_server(&config).await?;

    Ok(())
}

/// Handle one-shot translation command
pub async fn handle_translate(
    text: String,
    pair: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> anyhow::Result<()> {
    use std::sync::Arc;
    use std::time::Duration;

    use indicatif::{ProgressBar, ProgressStyle};

    use crate::core::catalog::LanguagePair;
    use crate::core::config::AppConfig;
    use crate::core::translator::Translator;
    use crate::engine::marian::MarianEngine;

    // Empty-input guard lives here, before any model work
    if text.trim().is_empty() {
        println!("⚠️  Please enter text to translate.");
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    let engine = Arc::new(MarianEngine::new(&config)?);
    let translator = Translator::new(engine);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message("Loading model (first run downloads artifacts)...");
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = match (pair, from, to) {
        (Some(label), _, _) => translator.translate(&text, &label).await,
        (None, Some(from), Some(to)) => {
            translator
                .translate_pair(&text, &LanguagePair::new(from, to))
                .await
        }
        _ => {
            pb.finish_and_clear();
            anyhow::bail!("specify either --pair LABEL or both --from and --to");
        }
    };

    pb.finish_and_clear();

    let result = result?;
    println!("✅ {} ({}ms, {})", result.translation, result.elapsed_ms, result.model_id);

    Ok(())
}

/// Handle pairs listing command
pub async fn handle_pairs() -> anyhow::Result<()> {
    use crate::core::catalog::LanguagePairCatalog;
    use crate::core::config::AppConfig;

    let config = AppConfig::from_env()?;
    let catalog = LanguagePairCatalog::default();

    println!("Supported language pairs:");
    for (label, pair) in catalog.entries() {
        println!(
            "   {:<22} {} -> {}   {}-{}-{}",
            label, pair.source, pair.target, config.model_namespace, pair.source, pair.target
        );
    }

    Ok(())
}
