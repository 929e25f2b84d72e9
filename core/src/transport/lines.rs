use crate::traits::ChannelTransport;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;
use tracing::warn;

pub struct LineTransport<R, W> {
    reader: Mutex<Lines<R>>,
    writer: Mutex<W>,
    closed: AtomicBool,
}

pub type StdioTransport = LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

pub fn stdio() -> StdioTransport {
    LineTransport::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader.lines()),
            writer: Mutex::new(writer),
            closed: AtomicBool::new(false),
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader.into_inner().into_inner(), self.writer.into_inner())
    }
}

#[async_trait]
impl<R, W> ChannelTransport for LineTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        "lines"
    }

    async fn send(&self, message: &str) -> anyhow::Result<()> {
        if self.is_closed() {
            return Err(anyhow!("Channel is closed"));
        }
        if message.contains('\n') {
            return Err(anyhow!("Line transport cannot carry embedded newlines"));
        }

        let mut writer = self.writer.lock().await;
        writer
            .write_all(message.as_bytes())
            .await
            .context("Failed to write event")?;
        writer.write_all(b"\n").await.context("Failed to write event")?;
        writer.flush().await.context("Failed to flush event")?;
        Ok(())
    }

    async fn recv(&self) -> Option<String> {
        let mut reader = self.reader.lock().await;
        loop {
            if self.is_closed() {
                return None;
            }
            match reader.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => return Some(line),
                Ok(None) => return None,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    warn!(error = %e, "Skipping unreadable line");
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read from line transport");
                    return None;
                }
            }
        }
    }

    async fn close(&self) -> anyhow::Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.writer
            .lock()
            .await
            .flush()
            .await
            .context("Failed to flush on close")
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
