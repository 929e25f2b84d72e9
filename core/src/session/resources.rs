use crate::traits::ChannelTransport;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Owns the session's channel and closes it exactly once.
///
/// `release` is the normal path. If the guard is dropped unreleased inside a
/// tokio runtime, the close is spawned onto it.
pub struct ResourceGuard {
    transport: Arc<dyn ChannelTransport>,
    released: AtomicBool,
}

impl ResourceGuard {
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self {
            transport,
            released: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &dyn ChannelTransport {
        self.transport.as_ref()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub async fn release(&self) -> bool {
        if self.released.swap(true, Ordering::SeqCst) {
            debug!("Session resources already released");
            return false;
        }

        if let Err(e) = self.transport.close().await {
            warn!(transport = self.transport.name(), error = %e, "Failed to close channel");
        } else {
            debug!(transport = self.transport.name(), "Channel closed");
        }
        true
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }

        let transport = self.transport.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                drop(handle.spawn(async move {
                    if let Err(e) = transport.close().await {
                        warn!(error = %e, "Failed to close channel on drop");
                    }
                }));
            }
            Err(_) => warn!(
                transport = transport.name(),
                "Session dropped outside a runtime; channel left open"
            ),
        }
    }
}
