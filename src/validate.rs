// src/validate.rs

//! Ordered precondition checks run before any action is dispatched
//!
//! The pipeline is a straight line: each check either passes or
//! early-returns its error, and the first failure aborts the invocation.
//! Ordering matters. The privilege gate runs before anything touches the
//! support directory, the expiration check assumes the action is already
//! resolved, and the connection comes last so nothing is established for
//! a request that will be rejected anyway.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::admin::DISALLOWED_ADMINS;
use crate::config::{Config, SUPPORT_DIR_MODE};
use crate::context::{ExpirationValue, RequestContext};
use crate::registry::{self, Action};
use crate::session::Session;
use crate::{Error, Result};

static EXPIRATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Run every precondition in order, stopping at the first failure.
///
/// Action resolution (the first check of the sequence) already happened
/// in `registry::resolve` before a context could be built at all.
pub fn run_checks(
    ctx: &mut RequestContext,
    config: &Config,
    session: &mut Session,
    elevated: bool,
) -> Result<()> {
    check_privilege(ctx, config, elevated)?;
    check_agent_present(config)?;
    check_admin_attribution(ctx)?;
    check_expiration(ctx)?;
    check_targets(ctx)?;
    check_connection(ctx, session)?;
    Ok(())
}

/// Privilege gate, run for every invocation.
///
/// Elevated runs keep the support directory present with fixed
/// permissions as a side effect of this check. Unprivileged runs may only
/// perform actions from the allowed-without-root set.
pub fn check_privilege(ctx: &RequestContext, config: &Config, elevated: bool) -> Result<()> {
    if elevated {
        ensure_support_dir(&config.support_dir)?;
        return Ok(());
    }
    if registry::allowed_without_root().contains(&ctx.action.name) {
        return Ok(());
    }
    Err(Error::Permission(ctx.action.name.to_string()))
}

fn ensure_support_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::set_permissions(dir, fs::Permissions::from_mode(SUPPORT_DIR_MODE))?;
    debug!("support directory ready at {}", dir.display());
    Ok(())
}

/// The management agent performs every backend operation; without it no
/// action can proceed, whichever one was requested.
pub fn check_agent_present(config: &Config) -> Result<()> {
    let path = &config.agent_path;
    if path.is_absolute() {
        if is_executable(path) {
            return Ok(());
        }
        return Err(Error::MissingDependency(path.display().to_string()));
    }
    // Bare names resolve through PATH
    which::which(path)
        .map(|_| ())
        .map_err(|_| Error::MissingDependency(path.display().to_string()))
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Resolve the operator identity for every action, then reject
/// placeholder identities when the action requires attribution.
///
/// Resolution always runs because the identity reaches the backend
/// environment even for unattributed actions.
pub fn check_admin_attribution(ctx: &mut RequestContext) -> Result<()> {
    let admin = ctx.resolve_admin().to_string();
    if registry::needs_admin().contains(&ctx.action.name)
        && DISALLOWED_ADMINS.contains(&admin.as_str())
    {
        return Err(Error::Argument(format!(
            "'{}' must be attributed to a real admin; pass --admin <name>",
            ctx.action.name
        )));
    }
    debug!("operator identity: '{}'", admin);
    Ok(())
}

/// Install-time expiration values must be unsigned integers. A valid
/// value replaces its textual form in place.
pub fn check_expiration(ctx: &mut RequestContext) -> Result<()> {
    if ctx.action.action != Action::Install {
        return Ok(());
    }
    let Some(ExpirationValue::Raw(text)) = ctx.options.expiration.clone() else {
        return Ok(());
    };
    if !EXPIRATION_RE.is_match(&text) {
        return Err(Error::Argument(format!(
            "Invalid expiration '{}': expected a non-negative number of days",
            text
        )));
    }
    let days: u32 = text.parse().map_err(|_| {
        Error::Argument(format!("Invalid expiration '{}': value out of range", text))
    })?;
    ctx.options.expiration = Some(ExpirationValue::Days(days));
    Ok(())
}

/// Actions that operate on a target need at least one.
pub fn check_targets(ctx: &RequestContext) -> Result<()> {
    if let Some(kind) = ctx.action.arg_kind {
        if ctx.targets.is_empty() {
            return Err(Error::Argument(format!(
                "'{}' requires at least one {}",
                ctx.action.name, kind
            )));
        }
    }
    Ok(())
}

/// Connected actions establish the server session up front, so dispatch
/// never has to. Connection failure propagates unwrapped.
pub fn check_connection(ctx: &RequestContext, session: &mut Session) -> Result<()> {
    if registry::needs_connection().contains(&ctx.action.name) {
        session.connect()?;
    }
    Ok(())
}
