// src/session.rs

//! Scoped ownership of the backend connection
//!
//! A `Session` owns the backend for exactly one invocation. If a
//! connection was established, it is torn down exactly once, no matter
//! how the invocation ends: `disconnect` is idempotent and also runs
//! from `Drop`, which covers success, error, and unwind paths alike.

use tracing::warn;

use crate::Result;
use crate::backend::Backend;

pub struct Session {
    backend: Box<dyn Backend>,
    connected: bool,
}

impl Session {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend, connected: false }
    }

    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Establish the depot server connection. Connecting twice is a
    /// no-op; a failed attempt leaves the session disconnected.
    pub fn connect(&mut self) -> Result<()> {
        if !self.connected {
            self.backend.connect()?;
            self.connected = true;
        }
        Ok(())
    }

    /// Tear the connection down. Teardown failures are logged, never
    /// raised: they must not mask whatever ended the invocation.
    pub fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            if let Err(err) = self.backend.disconnect() {
                warn!("backend disconnect failed: {}", err);
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
