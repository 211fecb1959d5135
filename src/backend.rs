// src/backend.rs

//! Backend collaborator boundary
//!
//! The core never installs, queries, or mounts anything itself. A
//! validated request becomes exactly one call on the `Backend` trait;
//! the production implementation shells out to the local management
//! agent, which talks to the depot server and the receipt store.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::config::Config;
use crate::context::{ExpirationValue, OptionSet};
use crate::{Error, Result};

/// Operations the depot backend performs on behalf of a validated request
pub trait Backend {
    /// Stage the operator identity and debug flag into the runtime
    /// environment every subsequent operation runs under.
    fn push_environment(&mut self, admin: &str, debug: bool);

    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;

    fn install(&mut self, targets: &[String], options: &OptionSet) -> Result<()>;
    fn uninstall(&mut self, targets: &[String], options: &OptionSet) -> Result<()>;
    fn sync(&mut self, options: &OptionSet) -> Result<()>;
    fn dequeue_pending(&mut self, targets: &[String]) -> Result<()>;
    fn freeze(&mut self, targets: &[String]) -> Result<()>;
    fn thaw(&mut self, targets: &[String]) -> Result<()>;
    fn forget(&mut self, targets: &[String]) -> Result<()>;
    fn list_available(&mut self, force: bool) -> Result<()>;
    fn list_installed(&mut self) -> Result<()>;
    fn list_manual(&mut self) -> Result<()>;
    fn list_pilots(&mut self) -> Result<()>;
    fn list_frozen(&mut self) -> Result<()>;
    fn list_pending_queue(&mut self) -> Result<()>;
    fn list_details(&mut self, targets: &[String]) -> Result<()>;
    fn list_files(&mut self, targets: &[String]) -> Result<()>;
    fn query_files(&mut self, targets: &[String]) -> Result<()>;
}

/// Production backend: every operation shells the management agent
pub struct AgentBackend {
    agent_path: PathBuf,
    server_url: Option<String>,
    admin: String,
    debug: bool,
}

impl AgentBackend {
    pub fn new(config: &Config) -> Self {
        Self {
            agent_path: config.agent_path.clone(),
            server_url: config.server_url.clone(),
            admin: String::new(),
            debug: false,
        }
    }

    /// Base agent command with the staged environment applied
    fn agent(&self) -> Command {
        let mut cmd = Command::new(&self.agent_path);
        cmd.env("DROVER_ADMIN", &self.admin);
        cmd.env("DROVER_DEBUG", if self.debug { "1" } else { "0" });
        if let Some(url) = &self.server_url {
            cmd.env("DROVER_SERVER", url);
        }
        cmd
    }

    fn run(&self, mut cmd: Command) -> Result<()> {
        debug!("running agent command: {:?}", cmd);
        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Agent(format!("agent exited with status {}", status)))
        }
    }

    fn apply_install_options(cmd: &mut Command, options: &OptionSet) {
        if options.force {
            cmd.arg("--force");
        }
        if options.freeze {
            cmd.arg("--freeze");
        }
        if options.puppies {
            cmd.arg("--puppies");
        }
        if options.no_puppy_notification {
            cmd.arg("--no-puppy-notification");
        }
        if let Some(ExpirationValue::Days(days)) = options.expiration {
            cmd.arg("--expiration").arg(days.to_string());
        }
    }
}

impl Backend for AgentBackend {
    fn push_environment(&mut self, admin: &str, debug: bool) {
        self.admin = admin.to_string();
        self.debug = debug;
    }

    fn connect(&mut self) -> Result<()> {
        info!("connecting to the depot server");
        let mut cmd = self.agent();
        cmd.arg("checkin");
        let status = cmd.status().map_err(|err| Error::Connection(err.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Connection(format!("agent checkin exited with status {}", status)))
        }
    }

    fn disconnect(&mut self) -> Result<()> {
        debug!("releasing the depot server connection");
        let mut cmd = self.agent();
        cmd.arg("release");
        self.run(cmd)
    }

    fn install(&mut self, targets: &[String], options: &OptionSet) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("install").args(targets);
        Self::apply_install_options(&mut cmd, options);
        self.run(cmd)
    }

    fn uninstall(&mut self, targets: &[String], options: &OptionSet) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("uninstall").args(targets);
        if options.force {
            cmd.arg("--force");
        }
        self.run(cmd)
    }

    fn sync(&mut self, options: &OptionSet) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("sync");
        if options.force {
            cmd.arg("--force");
        }
        if options.puppies {
            cmd.arg("--puppies");
        }
        self.run(cmd)
    }

    fn dequeue_pending(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("dequeue").args(targets);
        self.run(cmd)
    }

    fn freeze(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("freeze").args(targets);
        self.run(cmd)
    }

    fn thaw(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("thaw").args(targets);
        self.run(cmd)
    }

    fn forget(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("forget").args(targets);
        self.run(cmd)
    }

    fn list_available(&mut self, force: bool) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-available");
        if force {
            cmd.arg("--force");
        }
        self.run(cmd)
    }

    fn list_installed(&mut self) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-installed");
        self.run(cmd)
    }

    fn list_manual(&mut self) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-manual");
        self.run(cmd)
    }

    fn list_pilots(&mut self) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-pilots");
        self.run(cmd)
    }

    fn list_frozen(&mut self) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-frozen");
        self.run(cmd)
    }

    fn list_pending_queue(&mut self) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-queue");
        self.run(cmd)
    }

    fn list_details(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-details").args(targets);
        self.run(cmd)
    }

    fn list_files(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("list-files").args(targets);
        self.run(cmd)
    }

    fn query_files(&mut self, targets: &[String]) -> Result<()> {
        let mut cmd = self.agent();
        cmd.arg("query-files").args(targets);
        self.run(cmd)
    }
}
