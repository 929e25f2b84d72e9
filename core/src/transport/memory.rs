use crate::traits::ChannelTransport;
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

pub struct MemoryTransport {
    inbound: Mutex<UnboundedReceiver<String>>,
    outbound: UnboundedSender<String>,
    closed: AtomicBool,
}

pub struct MemoryPeer {
    to_session: std::sync::Mutex<Option<UnboundedSender<String>>>,
    from_session: std::sync::Mutex<UnboundedReceiver<String>>,
}

pub fn memory_channel() -> (MemoryTransport, MemoryPeer) {
    let (to_session, inbound) = unbounded_channel();
    let (outbound, from_session) = unbounded_channel();

    (
        MemoryTransport {
            inbound: Mutex::new(inbound),
            outbound,
            closed: AtomicBool::new(false),
        },
        MemoryPeer {
            to_session: std::sync::Mutex::new(Some(to_session)),
            from_session: std::sync::Mutex::new(from_session),
        },
    )
}

#[async_trait]
impl ChannelTransport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, message: &str) -> anyhow::Result<()> {
        if self.is_closed() {
            return Err(anyhow!("Channel is closed"));
        }
        self.outbound
            .send(message.to_string())
            .map_err(|_| anyhow!("Peer has gone away"))
    }

    async fn recv(&self) -> Option<String> {
        if self.is_closed() {
            return None;
        }
        self.inbound.lock().await.recv().await
    }

    async fn close(&self) -> anyhow::Result<()> {
        if !self.closed.swap(true, Ordering::SeqCst)
            && let Ok(mut inbound) = self.inbound.try_lock()
        {
            inbound.close();
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl MemoryPeer {
    pub fn send(&self, message: impl Into<String>) -> anyhow::Result<()> {
        let guard = self
            .to_session
            .lock()
            .map_err(|_| anyhow!("Peer state poisoned"))?;
        let sender = guard
            .as_ref()
            .ok_or_else(|| anyhow!("Peer has hung up"))?;
        sender
            .send(message.into())
            .map_err(|_| anyhow!("Session side is closed"))
    }

    /// Stops sending; the session sees end-of-channel once queued messages are read.
    pub fn hang_up(&self) {
        if let Ok(mut guard) = self.to_session.lock() {
            guard.take();
        }
    }

    pub fn drain(&self) -> Vec<String> {
        let mut received = Vec::new();
        let Ok(mut rx) = self.from_session.lock() else {
            return received;
        };
        while let Ok(message) = rx.try_recv() {
            received.push(message);
        }
        received
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_in_order_both_ways() {
        let (transport, peer) = memory_channel();
        peer.send("one").unwrap();
        peer.send("two").unwrap();

        assert_eq!(transport.recv().await.as_deref(), Some("one"));
        assert_eq!(transport.recv().await.as_deref(), Some("two"));

        transport.send("a").await.unwrap();
        transport.send("b").await.unwrap();
        assert_eq!(peer.drain(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn close_is_idempotent_and_stops_traffic() {
        let (transport, peer) = memory_channel();
        transport.close().await.unwrap();
        transport.close().await.unwrap();

        assert!(transport.is_closed());
        assert!(transport.send("late").await.is_err());
        assert!(transport.recv().await.is_none());
        assert!(peer.send("late").is_err());
    }

    #[tokio::test]
    async fn hang_up_keeps_outbound_open() {
        let (transport, peer) = memory_channel();
        peer.send("last").unwrap();
        peer.hang_up();

        assert!(peer.send("more").is_err());
        assert_eq!(transport.recv().await.as_deref(), Some("last"));
        assert!(transport.recv().await.is_none());
        transport.send("reply").await.unwrap();
        assert_eq!(peer.drain(), vec!["reply"]);
    }

    #[tokio::test]
    async fn recv_ends_when_peer_drops() {
        let (transport, peer) = memory_channel();
        peer.send("last").unwrap();
        drop(peer);

        assert_eq!(transport.recv().await.as_deref(), Some("last"));
        assert!(transport.recv().await.is_none());
    }
}
