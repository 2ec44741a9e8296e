//! Shutdown signalling for the render loop

use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Requests a shutdown; cheap to clone
#[derive(Debug, Clone)]
pub struct ShutdownHandle(Sender<()>);

impl ShutdownHandle {
    pub fn request(&self) {
        // The loop may already be gone
        let _ = self.0.send(());
    }
}

/// Observed by the render loop while it waits for the next tick
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: Receiver<()>,
}

impl ShutdownSignal {
    pub fn new() -> (ShutdownHandle, Self) {
        let (tx, rx) = mpsc::channel();
        (ShutdownHandle(tx), Self { rx })
    }

    /// Signal fed by SIGINT and SIGTERM
    pub fn from_termination_signals() -> Result<Self> {
        let (handle, signal) = Self::new();
        ctrlc::set_handler(move || {
            log::info!("Termination signal received");
            handle.request();
        })
        .context("installing the termination signal handler")?;
        Ok(signal)
    }

    /// Wait up to `timeout`; true when a shutdown was requested
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can request a shutdown any more; keep the cadence
                std::thread::sleep(timeout);
                false
            }
        }
    }
}
