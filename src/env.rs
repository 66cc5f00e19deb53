//! The application environment: everything an action may need, bundled once
//! at startup and never mutated afterwards.

use std::{fmt, future::Future, sync::Arc};

use crate::{config::Config, context, db::Db};

/// A logging capability: takes a message, performs a side effect.
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Immutable bundle of config, database handle and log function.
///
/// All parts are shared behind `Arc`s (the pool is `Arc`-backed itself), so
/// clones are cheap and every clone observes the same resources.
#[derive(Clone)]
pub struct Env {
    log_fn: LogFn,
    config: Arc<Config>,
    db:     Db,
}

impl Env {
    pub fn new(log_fn: LogFn, config: Config, db: Db) -> Self {
        Self {
            log_fn,
            config: Arc::new(config),
            db,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn log_fn(&self) -> &LogFn {
        &self.log_fn
    }

    /// Invoke the log function once with `message`, unchanged.
    pub fn log(&self, message: &str) {
        (self.log_fn)(message)
    }

    /// Run `action` with this environment as the current context.
    ///
    /// Shorthand for [`context::run_with_context`].
    pub async fn run<F>(self, action: F) -> F::Output
    where
        F: Future,
    {
        context::run_with_context(self, action).await
    }

    /// True when both values share the same log function and config.
    ///
    /// The pool is not compared; `MySqlPool` exposes no identity.
    pub fn same_as(&self, other: &Env) -> bool {
        Arc::ptr_eq(&self.log_fn, &other.log_fn) && Arc::ptr_eq(&self.config, &other.config)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("app_name", &self.config.app_name)
            .field("app_env", &self.config.app_env)
            .field("db_host", &self.config.db_host)
            .finish_non_exhaustive()
    }
}

/// Production log function: forwards every message to `tracing` under the
/// `app` target.
pub fn tracing_log_fn() -> LogFn {
    Arc::new(|message: &str| tracing::info!(target: "app", "{message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_db, recording_log};

    #[tokio::test]
    async fn log_calls_the_injected_function_once() {
        let (log_fn, buffer) = recording_log();
        let env = Env::new(log_fn, Config::default(), fake_db());

        env.log("direct");

        assert_eq!(*buffer.lock().unwrap(), vec!["direct".to_string()]);
    }

    #[tokio::test]
    async fn clones_share_parts() {
        let (log_fn, _) = recording_log();
        let env = Env::new(log_fn, Config::default(), fake_db());
        let copy = env.clone();

        assert!(env.same_as(&copy));
        assert!(Arc::ptr_eq(env.config(), copy.config()));
    }

    #[tokio::test]
    async fn separately_built_envs_are_distinct() {
        let (log_fn, _) = recording_log();
        let a = Env::new(log_fn.clone(), Config::default(), fake_db());
        let b = Env::new(log_fn, Config::default(), fake_db());

        assert!(!a.same_as(&b));
    }

    #[tokio::test]
    async fn debug_omits_credentials() {
        let (log_fn, _) = recording_log();
        let config = Config {
            db_password: "hunter2".into(),
            ..Config::default()
        };
        let env = Env::new(log_fn, config, fake_db());

        let rendered = format!("{env:?}");
        assert!(rendered.contains("appenv"));
        assert!(!rendered.contains("hunter2"));
    }
}
