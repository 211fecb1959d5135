// src/registry.rs

//! Declarative registry of every supported action
//!
//! Each action carries a canonical name, an optional alias, the kind of
//! target argument it consumes, and three capability flags. The registry
//! is a static table in declaration order; resolution and the derived
//! capability views never mutate it.

use std::sync::LazyLock;

use strum_macros::{Display, EnumIter};

use crate::{Error, Result};

/// Every operation drover can perform, one variant per registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Install,
    Uninstall,
    Dequeue,
    Sync,
    Freeze,
    Thaw,
    Forget,
    ListAvailable,
    ListInstalled,
    ListManual,
    ListPilots,
    ListFrozen,
    ListQueue,
    ListDetails,
    ListFiles,
    QueryFiles,
    Help,
}

/// What a required target argument represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArgKind {
    #[strum(serialize = "package basename")]
    PackageBasename,
    #[strum(serialize = "receipt basename")]
    ReceiptBasename,
    #[strum(serialize = "file path")]
    FilePath,
}

/// One registry entry: the capabilities an action requires
#[derive(Debug)]
pub struct ActionSpec {
    pub action: Action,
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub arg_kind: Option<ArgKind>,
    pub needs_admin: bool,
    pub needs_connection: bool,
    pub needs_root: bool,
}

/// The full action table, in declaration order. Resolution walks this
/// table front to back, so earlier entries win if a name ever collides.
pub static REGISTRY: &[ActionSpec] = &[
    ActionSpec {
        action: Action::Install,
        name: "install",
        alias: None,
        arg_kind: Some(ArgKind::PackageBasename),
        needs_admin: true,
        needs_connection: true,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Uninstall,
        name: "uninstall",
        alias: Some("remove"),
        arg_kind: Some(ArgKind::PackageBasename),
        needs_admin: true,
        needs_connection: true,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Dequeue,
        name: "dequeue",
        alias: Some("dq"),
        arg_kind: Some(ArgKind::PackageBasename),
        needs_admin: false,
        needs_connection: false,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Sync,
        name: "sync",
        alias: None,
        arg_kind: None,
        needs_admin: false,
        needs_connection: true,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Freeze,
        name: "freeze",
        alias: None,
        arg_kind: Some(ArgKind::ReceiptBasename),
        needs_admin: false,
        needs_connection: false,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Thaw,
        name: "thaw",
        alias: None,
        arg_kind: Some(ArgKind::ReceiptBasename),
        needs_admin: false,
        needs_connection: false,
        needs_root: true,
    },
    ActionSpec {
        action: Action::Forget,
        name: "forget",
        alias: None,
        arg_kind: Some(ArgKind::ReceiptBasename),
        needs_admin: false,
        needs_connection: false,
        needs_root: true,
    },
    ActionSpec {
        action: Action::ListAvailable,
        name: "list_available",
        alias: Some("avail"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: true,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListInstalled,
        name: "list_installed",
        alias: Some("li"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListManual,
        name: "list_manual",
        alias: Some("manual"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListPilots,
        name: "list_pilots",
        alias: Some("pilots"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListFrozen,
        name: "list_frozen",
        alias: Some("frozen"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListQueue,
        name: "list_queue",
        alias: Some("lq"),
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListDetails,
        name: "list_details",
        alias: Some("ld"),
        arg_kind: Some(ArgKind::PackageBasename),
        needs_admin: false,
        needs_connection: true,
        needs_root: false,
    },
    ActionSpec {
        action: Action::ListFiles,
        name: "list_files",
        alias: Some("lf"),
        arg_kind: Some(ArgKind::PackageBasename),
        needs_admin: false,
        needs_connection: true,
        needs_root: false,
    },
    ActionSpec {
        action: Action::QueryFiles,
        name: "query_files",
        alias: Some("qf"),
        arg_kind: Some(ArgKind::FilePath),
        needs_admin: false,
        needs_connection: true,
        needs_root: false,
    },
    ActionSpec {
        action: Action::Help,
        name: "help",
        alias: None,
        arg_kind: None,
        needs_admin: false,
        needs_connection: false,
        needs_root: false,
    },
];

/// Resolve a raw user-typed token to its registry entry.
///
/// Hyphens normalize to underscores and matching is case-insensitive.
/// Canonical names are checked before aliases; within each pass the first
/// matching entry wins.
pub fn resolve(raw: &str) -> Result<&'static ActionSpec> {
    let token = raw.trim().to_ascii_lowercase().replace('-', "_");
    if let Some(spec) = REGISTRY.iter().find(|spec| spec.name == token) {
        return Ok(spec);
    }
    if let Some(spec) = REGISTRY.iter().find(|spec| spec.alias == Some(token.as_str())) {
        return Ok(spec);
    }
    Err(Error::UnknownAction(raw.to_string()))
}

/// Look up the registry entry for an action variant.
///
/// The registry is total over `Action`; a missing entry is a programming
/// error, not a user error, and aborts.
pub fn spec_of(action: Action) -> &'static ActionSpec {
    REGISTRY
        .iter()
        .find(|spec| spec.action == action)
        .unwrap_or_else(|| panic!("action '{}' has no registry entry", action))
}

static NEEDS_ARGUMENT: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    REGISTRY.iter().filter(|s| s.arg_kind.is_some()).map(|s| s.name).collect()
});

static NEEDS_ADMIN: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    REGISTRY.iter().filter(|s| s.needs_admin).map(|s| s.name).collect()
});

static NEEDS_CONNECTION: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    REGISTRY.iter().filter(|s| s.needs_connection).map(|s| s.name).collect()
});

static ALLOWED_WITHOUT_ROOT: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    REGISTRY.iter().filter(|s| !s.needs_root).map(|s| s.name).collect()
});

/// Actions that require at least one target argument
pub fn needs_argument() -> &'static [&'static str] {
    &NEEDS_ARGUMENT
}

/// Actions that require real admin attribution
pub fn needs_admin() -> &'static [&'static str] {
    &NEEDS_ADMIN
}

/// Actions that require a depot server connection
pub fn needs_connection() -> &'static [&'static str] {
    &NEEDS_CONNECTION
}

/// Actions an unprivileged principal may run
pub fn allowed_without_root() -> &'static [&'static str] {
    &ALLOWED_WITHOUT_ROOT
}
