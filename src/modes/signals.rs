//! Process signals that end the game
//!
//! Handlers are installed once, up front, so a signal that arrives at any
//! point of the loop is seen and the high score is saved on the way out.

use anyhow::Result;

#[cfg(unix)]
use anyhow::Context;
#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Which signal asked the game to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
    Hangup,
}

pub struct ShutdownSignals {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
    #[cfg(unix)]
    hangup: Signal,
}

impl ShutdownSignals {
    /// Install the handlers. Must be called inside a tokio runtime.
    #[cfg(unix)]
    pub fn new() -> Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())
                .context("Failed to listen for SIGINT")?,
            terminate: signal(SignalKind::terminate())
                .context("Failed to listen for SIGTERM")?,
            hangup: signal(SignalKind::hangup()).context("Failed to listen for SIGHUP")?,
        })
    }

    #[cfg(not(unix))]
    pub fn new() -> Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next shutdown signal. Cancel-safe.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> Shutdown {
        tokio::select! {
            _ = self.interrupt.recv() => Shutdown::Interrupt,
            _ = self.terminate.recv() => Shutdown::Terminate,
            _ = self.hangup.recv() => Shutdown::Hangup,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> Shutdown {
        // TODO: listen for console close events via tokio::signal::windows
        let _ = tokio::signal::ctrl_c().await;
        Shutdown::Interrupt
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;
    use std::time::Duration;

    fn send_to_self(name: &str) {
        let status = Command::new("kill")
            .args([format!("-{}", name), std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_terminate_and_hangup_are_caught() {
        let mut signals = ShutdownSignals::new().unwrap();

        send_to_self("TERM");
        let caught = tokio::time::timeout(Duration::from_secs(5), signals.recv())
            .await
            .unwrap();
        assert_eq!(caught, Shutdown::Terminate);

        send_to_self("HUP");
        let caught = tokio::time::timeout(Duration::from_secs(5), signals.recv())
            .await
            .unwrap();
        assert_eq!(caught, Shutdown::Hangup);
    }
}
