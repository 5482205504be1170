use std::sync::Arc;

use anyhow::Context;

use persona_wizard::cli;
use persona_wizard::config::WizardConfig;
use persona_wizard::llm::create_provider;
use persona_wizard::wizard::{
    wizard_routes, AnalysisPipeline, LlmAnalysisPipeline, QuestionCatalog, WizardManager,
    WizardRouteState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = WizardConfig::from_env().context("Invalid configuration")?;

    // ── Catalog ──────────────────────────────────────────────────────────
    let catalog = match &config.catalog_path {
        Some(path) => QuestionCatalog::load(path)
            .with_context(|| format!("Failed to load question catalog from {}", path.display()))?,
        None => QuestionCatalog::builtin(),
    };
    let catalog = Arc::new(catalog);

    eprintln!("✨ Persona Wizard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!(
        "   Catalog: {} categories, {} questions",
        catalog.len(),
        catalog.total_questions()
    );

    // ── Analysis pipeline ────────────────────────────────────────────────
    let llm = create_provider(&config.llm).context("Failed to create LLM provider")?;
    let pipeline: Arc<dyn AnalysisPipeline> = Arc::new(LlmAnalysisPipeline::new(
        llm,
        Arc::clone(&catalog),
        config.analysis.clone(),
    ));
    let manager = Arc::new(WizardManager::new(catalog, pipeline));

    // ── Presentation ─────────────────────────────────────────────────────
    match config.http_port {
        Some(port) => {
            let app = wizard_routes(WizardRouteState {
                manager: Arc::clone(&manager),
            });
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
                .await
                .with_context(|| format!("Failed to bind port {port}"))?;
            eprintln!("   Wizard API: http://0.0.0.0:{port}/api/wizard");
            tracing::info!(port, "Wizard HTTP server started");
            axum::serve(listener, app).await?;
        }
        None => {
            eprintln!("   Answer with an option number or text. /quit to exit.");
            cli::run(&manager).await?;
        }
    }

    Ok(())
}
