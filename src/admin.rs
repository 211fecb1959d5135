// src/admin.rs

//! Operator identity resolution for audit attribution
//!
//! Every invocation is attributed to an operator name, which the backend
//! records on receipts. An explicit `--admin` value always wins; the
//! fallback is a best-effort lookup of the human behind the invocation.

use std::env;

use nix::unistd::{Uid, User};

/// Placeholder identities that carry no real attribution. Actions that
/// require admin attribution reject all of these.
pub const DISALLOWED_ADMINS: &[&str] = &["", "root", "unknown", "auto-installed"];

/// Resolve the operator identity for this invocation.
pub fn resolve(explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    console_operator().unwrap_or_default()
}

/// Best-effort lookup of the non-root human operator.
///
/// sudo preserves the invoking account in `SUDO_USER`; failing that, an
/// unprivileged run is attributed to its own account. A direct root
/// session has no usable identity and yields nothing.
fn console_operator() -> Option<String> {
    if let Ok(name) = env::var("SUDO_USER") {
        if !name.is_empty() {
            return Some(name);
        }
    }
    let uid = Uid::effective();
    if uid.is_root() {
        return None;
    }
    User::from_uid(uid).ok().flatten().map(|user| user.name)
}
