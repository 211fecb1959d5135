// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use std::cell::RefCell;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::rc::Rc;

use drover::config::Verbosity;
use drover::{Backend, Config, Error, OptionSet, RequestContext, Result, registry};

/// Call log handle shared between a test and its boxed backend.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Backend double that records every call instead of shelling out.
pub struct RecordingBackend {
    calls: CallLog,
    pub fail_connect: bool,
}

impl RecordingBackend {
    pub fn new() -> (Self, CallLog) {
        let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
        (Self { calls: Rc::clone(&calls), fail_connect: false }, calls)
    }

    pub fn failing_connect() -> (Self, CallLog) {
        let (mut backend, calls) = Self::new();
        backend.fail_connect = true;
        (backend, calls)
    }

    fn record(&self, entry: String) {
        self.calls.borrow_mut().push(entry);
    }
}

impl Backend for RecordingBackend {
    fn push_environment(&mut self, admin: &str, debug: bool) {
        self.record(format!("env admin={} debug={}", admin, debug));
    }

    fn connect(&mut self) -> Result<()> {
        if self.fail_connect {
            return Err(Error::Connection("depot server unreachable".to_string()));
        }
        self.record("connect".to_string());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.record("disconnect".to_string());
        Ok(())
    }

    fn install(&mut self, targets: &[String], options: &OptionSet) -> Result<()> {
        self.record(format!("install {} admin={:?}", targets.join(" "), options.admin));
        Ok(())
    }

    fn uninstall(&mut self, targets: &[String], _options: &OptionSet) -> Result<()> {
        self.record(format!("uninstall {}", targets.join(" ")));
        Ok(())
    }

    fn sync(&mut self, _options: &OptionSet) -> Result<()> {
        self.record("sync".to_string());
        Ok(())
    }

    fn dequeue_pending(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("dequeue_pending {}", targets.join(" ")));
        Ok(())
    }

    fn freeze(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("freeze {}", targets.join(" ")));
        Ok(())
    }

    fn thaw(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("thaw {}", targets.join(" ")));
        Ok(())
    }

    fn forget(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("forget {}", targets.join(" ")));
        Ok(())
    }

    fn list_available(&mut self, force: bool) -> Result<()> {
        self.record(format!("list_available force={}", force));
        Ok(())
    }

    fn list_installed(&mut self) -> Result<()> {
        self.record("list_installed".to_string());
        Ok(())
    }

    fn list_manual(&mut self) -> Result<()> {
        self.record("list_manual".to_string());
        Ok(())
    }

    fn list_pilots(&mut self) -> Result<()> {
        self.record("list_pilots".to_string());
        Ok(())
    }

    fn list_frozen(&mut self) -> Result<()> {
        self.record("list_frozen".to_string());
        Ok(())
    }

    fn list_pending_queue(&mut self) -> Result<()> {
        self.record("list_pending_queue".to_string());
        Ok(())
    }

    fn list_details(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("list_details {}", targets.join(" ")));
        Ok(())
    }

    fn list_files(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("list_files {}", targets.join(" ")));
        Ok(())
    }

    fn query_files(&mut self, targets: &[String]) -> Result<()> {
        self.record(format!("query_files {}", targets.join(" ")));
        Ok(())
    }
}

/// Config rooted in a temp directory, with an executable fake agent.
pub fn test_config(dir: &Path) -> Config {
    let agent = dir.join("fleet-agent");
    fs::write(&agent, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&agent, fs::Permissions::from_mode(0o755)).unwrap();
    Config {
        support_dir: dir.join("support"),
        agent_path: agent,
        log_path: dir.join("drover.log"),
        server_url: None,
        verbosity: Verbosity::Normal,
    }
}

/// Resolve a raw token and build a context around it.
pub fn make_ctx(token: &str, options: OptionSet, targets: &[&str]) -> RequestContext {
    let spec = registry::resolve(token).unwrap();
    RequestContext::new(spec, options, targets.iter().map(|t| t.to_string()).collect())
}
