//! Implicit environment propagation.
//!
//! [`run_with_context`] installs an [`Env`] as the current context for the
//! lifetime of one action. Any function the action calls, at any depth, can
//! then reach it with [`ask`] (or the [`log`], [`config`] and [`db`]
//! helpers) without taking it as a parameter.
//!
//! The environment lives in a task-local slot scoped to the action's future,
//! so concurrent actions under different environments never see each other's.
//! The carrier itself never catches, wraps or logs anything the action
//! returns or raises.

use std::{future::Future, sync::Arc};

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{config::Config, db::Db, env::Env};

tokio::task_local! {
    static CURRENT: Env;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("No environment in scope; run the action through run_with_context")]
    NoContext,
}

/// Drive `action` to completion with `env` as its context.
///
/// The action's output is returned unchanged. A panic inside the action
/// unwinds through here untouched.
pub async fn run_with_context<F>(env: Env, action: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(env, action).await
}

/// Blocking counterpart of [`run_with_context`] for synchronous actions.
pub fn run_with_context_blocking<F, T>(env: Env, action: F) -> T
where
    F: FnOnce() -> T,
{
    CURRENT.sync_scope(env, action)
}

/// The current environment.
pub fn ask() -> Result<Env, ContextError> {
    with_env(Env::clone)
}

pub fn try_ask() -> Option<Env> {
    ask().ok()
}

/// Read the current environment in place, without cloning it.
pub fn with_env<F, R>(f: F) -> Result<R, ContextError>
where
    F: FnOnce(&Env) -> R,
{
    CURRENT.try_with(f).map_err(|_| ContextError::NoContext)
}

/// Log `message` through the current environment's log function.
pub fn log(message: &str) -> Result<(), ContextError> {
    // Call out with the slot released: a log function that enters a nested
    // scope would otherwise find the task-local still borrowed.
    let log_fn = with_env(|env| Arc::clone(env.log_fn()))?;
    log_fn(message);
    Ok(())
}

pub fn config() -> Result<Arc<Config>, ContextError> {
    with_env(|env| Arc::clone(env.config()))
}

pub fn db() -> Result<Db, ContextError> {
    with_env(|env| env.db().clone())
}

/// Spawn `future` on the tokio runtime inside the current environment.
///
/// Task locals do not follow `tokio::spawn`, so concurrent work started
/// from within an action goes through here to keep its context.
pub fn spawn<F>(future: F) -> Result<JoinHandle<F::Output>, ContextError>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let env = ask()?;
    Ok(tokio::spawn(CURRENT.scope(env, future)))
}
