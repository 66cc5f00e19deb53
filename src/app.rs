//! The application chain. None of these functions take the environment as an
//! argument; they reach it through [`crate::context`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    context::{self, ContextError},
    db,
    errors::AppResult,
};

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub host:      String,
    pub database:  String,
    pub reachable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub app_name:    String,
    pub app_env:     String,
    pub database:    DatabaseStatus,
    pub started_at:  DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Entry action, meant to be driven by `run_with_context`.
pub async fn run() -> AppResult<RunReport> {
    let started_at = Utc::now();

    announce()?;
    let database = check_database().await?;

    let config = context::config()?;
    let report = RunReport {
        app_name: config.app_name.clone(),
        app_env: config.app_env.clone(),
        database,
        started_at,
        finished_at: Utc::now(),
    };

    context::log("run complete")?;
    Ok(report)
}

pub fn announce() -> Result<(), ContextError> {
    let config = context::config()?;
    context::log(&format!("starting {} ({})", config.app_name, config.app_env))
}

/// `<app_name>@<app_env>` for the current environment.
pub fn describe() -> Result<String, ContextError> {
    context::with_env(|env| format!("{}@{}", env.config().app_name, env.config().app_env))
}

pub async fn check_database() -> AppResult<DatabaseStatus> {
    let pool = context::db()?;
    let config = context::config()?;

    db::ping(&pool).await?;
    context::log("database reachable")?;

    Ok(DatabaseStatus {
        host: config.db_host.clone(),
        database: config.db_name.clone(),
        reachable: true,
    })
}
