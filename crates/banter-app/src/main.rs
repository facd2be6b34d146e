//! Banter terminal binary - composition root.
//!
//! Ties the banter crates together into a single interactive executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Build the resolution engine (rule normalizer + response selector)
//! 3. Spawn the render loop and the catalog load (which queues the welcome)
//! 4. Run the stdin read loop
//! 5. On the goodbye handoff, toggle to the host view and exit

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use banter_catalog::{load_catalog, ResponseCatalog};
use banter_core::BanterConfig;
use banter_engine::{ChatEngine, EngineConfig, Resolution, SideEffectKind};
use banter_nlp::RuleNormalizer;
use banter_term::{RenderConfig, StdoutSink, TypingRenderer, ViewToggle};

mod cli;
use cli::CliArgs;

/// Shown when input arrives before the catalog has finished loading.
const LOADING_REPLY: &str = "Responses are still loading... Please try again in a moment.";

const PROMPT: &str = "> ";

/// Map the loaded configuration onto the engine's settings.
fn engine_config(config: &BanterConfig) -> EngineConfig {
    EngineConfig {
        help_key: config.catalog.help_key.clone(),
        goodbye_key: config.catalog.goodbye_key.clone(),
        unknown_key: config.catalog.unknown_key.clone(),
        ask_name_key: config.catalog.ask_name_key.clone(),
        fuzzy_threshold: config.engine.fuzzy_threshold,
        max_redraws: config.engine.max_redraws,
        greeting_template: config.engine.greeting_template.clone(),
    }
}

/// Map the loaded configuration onto the renderer's settings.
fn render_config(config: &BanterConfig, plain: bool) -> RenderConfig {
    RenderConfig {
        animate: config.render.animate && !plain,
        min_char_delay_ms: config.render.min_char_delay_ms,
        max_char_delay_ms: config.render.max_char_delay_ms,
        message_gap_ms: config.render.message_gap_ms,
    }
}

/// Fetch the catalog, install it, and queue the welcome sequence. A failed
/// load installs an empty catalog instead and skips the boot lines, so the
/// engine answers everything with the fallback rather than wedging.
async fn load_and_install(
    engine: Arc<ChatEngine>,
    path: std::path::PathBuf,
    renderer: TypingRenderer,
    welcome: Vec<String>,
) {
    match load_catalog(&path).await {
        Ok(catalog) => {
            engine.install_catalog(catalog);
            for line in welcome {
                let _ = renderer.submit(line);
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Catalog load failed, starting with an empty catalog"
            );
            engine.install_catalog(ResponseCatalog::empty());
        }
    }
}

fn print_prompt() {
    let mut out = std::io::stdout();
    let _ = out.write_all(PROMPT.as_bytes());
    let _ = out.flush();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = BanterConfig::load_or_default(&config_file);

    // Tracing. RUST_LOG wins over the resolved log level.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting banter v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Engine.
    let engine = Arc::new(ChatEngine::new(
        Box::new(RuleNormalizer::new()),
        engine_config(&config),
    ));

    // Renderer loop.
    let renderer = TypingRenderer::new(render_config(&config, args.plain), Box::new(StdoutSink));
    let worker = renderer.clone();
    tokio::spawn(async move { worker.run().await });

    // Host/terminal view, and the one-time catalog load. The welcome
    // sequence queues from the loader once the catalog is in.
    let view = ViewToggle::new();
    let catalog_path = args.resolve_catalog_path(&config.catalog.path);
    tokio::spawn(load_and_install(
        Arc::clone(&engine),
        catalog_path,
        renderer.clone(),
        config.render.welcome.clone(),
    ));

    // === Read loop ===

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            tracing::info!("Input closed, exiting");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match engine.resolve(&line) {
            Resolution::Loading => {
                let _ = renderer.submit(LOADING_REPLY)?.await;
            }
            Resolution::Reply(reply) => {
                let done = renderer.submit(reply.text)?;
                let _ = done.await;

                let handoff = reply
                    .side_effects
                    .iter()
                    .any(|e| e.kind == SideEffectKind::ToggleView);
                if handoff {
                    // The reply is fully on screen; give it a beat before
                    // handing the view back to the host.
                    tokio::time::sleep(tokio::time::Duration::from_millis(
                        config.render.handoff_delay_ms,
                    ))
                    .await;
                    let state = view.toggle();
                    tracing::info!(view = %state, "Handoff complete");
                    break;
                }
            }
        }
    }

    renderer.shutdown();
    Ok(())
}
