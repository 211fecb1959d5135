// src/lib.rs

//! drover, an administrative CLI for fleet package deployment
//!
//! drover takes one user-issued action, resolves it against a declarative
//! registry of supported operations, enforces that operation's
//! preconditions, and only then hands the validated request to the depot
//! backend that performs the real work.
//!
//! # Architecture
//!
//! - Registry-first: every action, alias, and capability flag lives in
//!   one static table with derived views
//! - Linear validation: ordered fail-fast precondition checks, each a
//!   plain function returning a tagged error
//! - Total dispatch: an exhaustive match routes each action to exactly
//!   one backend call
//! - Scoped teardown: the server connection is released exactly once on
//!   every exit path

pub mod admin;
pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod dispatch;
mod error;
pub mod help;
pub mod logging;
pub mod registry;
pub mod session;
pub mod validate;

pub use backend::{AgentBackend, Backend};
pub use config::{Config, Verbosity};
pub use context::{ExpirationValue, OptionSet, RequestContext};
pub use error::{Error, Result};
pub use registry::{Action, ActionSpec, ArgKind, REGISTRY};
pub use session::Session;
