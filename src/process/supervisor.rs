use std::{io, process::ExitStatus};

use tokio::process::Child;

/// Holds the terminal stage of a pipeline until the pipeline is settled.
///
/// Only the last stage is ever waited on. Earlier stages are dropped as soon
/// as they are spawned and reaped by the runtime once they exit.
#[derive(Debug)]
pub struct Supervisor {
    background: bool,
    terminal: Option<Child>,
}

impl Supervisor {
    pub fn new(background: bool) -> Self {
        Self {
            background,
            terminal: None,
        }
    }

    pub fn adopt(&mut self, child: Child) {
        trace!(pid = ?child.id(), background = self.background, "adopting terminal stage");
        self.terminal = Some(child);
    }

    /// Blocks on the terminal stage in the foreground and returns its status.
    ///
    /// In the background, or when the terminal stage never started, this
    /// returns `None` straight away.
    pub async fn settle(self) -> io::Result<Option<ExitStatus>> {
        let Some(mut child) = self.terminal else {
            return Ok(None);
        };

        if self.background {
            debug!(pid = ?child.id(), "leaving pipeline in the background");
            return Ok(None);
        }

        let status = child.wait().await?;
        trace!(%status, "terminal stage exited");

        Ok(Some(status))
    }
}
