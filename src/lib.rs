//! Reader-style application environment.
//!
//! An [`Env`] bundles config, a database pool and a log function once at
//! startup. [`run_with_context`] drives an action with that environment in
//! scope, and everything the action calls reaches it through [`context`]
//! instead of taking it as a parameter.

pub mod app;
pub mod config;
pub mod context;
pub mod db;
pub mod env;
pub mod errors;

#[cfg(test)]
mod testing;

pub use context::{ask, log, run_with_context, run_with_context_blocking, ContextError};
pub use env::{Env, LogFn};
pub use errors::{AppError, AppResult};
