use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use appenv::{app, config, db, env, run_with_context, Env};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ───────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── Config ────────────────────────────────────────────────
    let config = config::Config::from_env()?;
    tracing::info!(app = %config.app_name, env = %config.app_env, "Starting");
    if config.is_development() {
        tracing::warn!("Running with development settings");
    }

    // ── Database ──────────────────────────────────────────────
    let pool = db::connect(&config).await?;

    // ── Environment ───────────────────────────────────────────
    let env = Env::new(env::tracing_log_fn(), config, pool);
    tracing::debug!(?env, "Environment ready");

    let report = run_with_context(env, app::run()).await?;

    tracing::info!(report = %serde_json::to_string(&report)?, "Run complete");
    Ok(())
}
