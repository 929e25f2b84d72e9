use async_trait::async_trait;

/// Ordered, bidirectional text channel to the remote agent.
///
/// Implementations deliver inbound messages in the order they arrived and
/// must tolerate `close` being called more than once.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, message: &str) -> anyhow::Result<()>;

    /// Next inbound message, or `None` once the channel is closed.
    async fn recv(&self) -> Option<String>;

    async fn close(&self) -> anyhow::Result<()>;

    fn is_closed(&self) -> bool;
}
