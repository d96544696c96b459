//! Shutdown signal handling for the session and `take` runners

use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

/// Why the process was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / Ctrl-C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => write!(f, "interrupted"),
            ShutdownReason::Terminate => write!(f, "terminated"),
        }
    }
}

/// Listens for OS shutdown signals.
///
/// `recv` is cancel safe, so it can sit in a `tokio::select!` loop.
pub struct ShutdownSignal {
    receiver: mpsc::Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Start listening. Must be called inside the tokio runtime.
    #[cfg(unix)]
    pub fn install() -> Result<Self, std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (tx, receiver) = mpsc::channel(4);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                debug!("received SIGINT");
                if tx_int.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            if sigterm.recv().await.is_some() {
                debug!("received SIGTERM");
                let _ = tx.send(ShutdownReason::Terminate).await;
            }
        });

        Ok(Self { receiver })
    }

    /// Start listening. Must be called inside the tokio runtime.
    #[cfg(not(unix))]
    pub fn install() -> Result<Self, std::io::Error> {
        let (tx, receiver) = mpsc::channel(4);
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                debug!("received Ctrl-C");
                if tx.send(ShutdownReason::Interrupt).await.is_err() {
                    break;
                }
            }
        });
        Ok(Self { receiver })
    }

    /// Wait for the next shutdown request
    pub async fn recv(&mut self) -> Option<ShutdownReason> {
        self.receiver.recv().await
    }

    #[cfg(test)]
    fn from_receiver(receiver: mpsc::Receiver<ShutdownReason>) -> Self {
        Self { receiver }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_display() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "interrupted");
        assert_eq!(ShutdownReason::Terminate.to_string(), "terminated");
    }

    #[tokio::test]
    async fn install_succeeds_inside_runtime() {
        assert!(ShutdownSignal::install().is_ok());
    }

    #[tokio::test]
    async fn recv_yields_sent_reason() {
        let (tx, rx) = mpsc::channel(1);
        let mut shutdown = ShutdownSignal::from_receiver(rx);
        tx.send(ShutdownReason::Terminate).await.unwrap();
        assert_eq!(shutdown.recv().await, Some(ShutdownReason::Terminate));
    }
}
