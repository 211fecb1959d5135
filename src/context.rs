// src/context.rs

//! Per-invocation request state
//!
//! A `RequestContext` is built fresh for each process run, owned
//! exclusively by the pipeline, and never persisted.

use crate::admin;
use crate::registry::ActionSpec;

/// A `--expiration` value: textual as decoded from the command line,
/// integral once validation has converted it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpirationValue {
    Raw(String),
    Days(u32),
}

/// The decoded flag set the pipeline consumes. Populated once from the
/// command line; validation may only convert the expiration value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    pub quiet: bool,
    pub verbose: bool,
    pub debug: bool,
    pub puppies: bool,
    pub no_puppy_notification: bool,
    pub force: bool,
    pub freeze: bool,
    pub admin: Option<String>,
    pub expiration: Option<ExpirationValue>,
}

/// Everything the validator and dispatcher need for one invocation
#[derive(Debug)]
pub struct RequestContext {
    pub action: &'static ActionSpec,
    pub options: OptionSet,
    pub targets: Vec<String>,
    admin: Option<String>,
}

impl RequestContext {
    pub fn new(action: &'static ActionSpec, options: OptionSet, targets: Vec<String>) -> Self {
        Self { action, options, targets, admin: None }
    }

    /// Resolve and cache the operator identity. Idempotent: later calls
    /// return the first result unchanged.
    pub fn resolve_admin(&mut self) -> &str {
        if self.admin.is_none() {
            self.admin = Some(admin::resolve(self.options.admin.as_deref()));
        }
        self.admin.as_deref().unwrap_or_default()
    }

    /// The cached identity, or empty if resolution has not run yet
    pub fn admin(&self) -> &str {
        self.admin.as_deref().unwrap_or_default()
    }
}
