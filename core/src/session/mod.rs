pub mod control;
pub mod resources;

pub use control::SessionControl;
pub use resources::ResourceGuard;

use crate::agent::{Announcer, CallLog, Dispatch, Dispatcher, DuplicateCallPolicy, ToolRegistry};
use crate::config::Config;
use crate::names::{NameRegistry, RegistrySummary, SharedNameRegistry};
use crate::tools::name_tools;
use crate::traits::ChannelTransport;
use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub modalities: Vec<String>,
    pub instructions: Option<String>,
    pub duplicate_calls: DuplicateCallPolicy,
    pub recent_call_capacity: usize,
    pub call_log_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            modalities: config.modalities.clone(),
            instructions: config.instructions.clone(),
            duplicate_calls: config.duplicate_calls,
            recent_call_capacity: config.recent_call_capacity,
            call_log_capacity: config.call_log_capacity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Ended,
    ChannelClosed,
    TransportFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: String,
    pub reason: EndReason,
    pub summary: RegistrySummary,
    pub final_message: Option<String>,
    pub calls_answered: usize,
}

pub struct Session {
    id: Uuid,
    names: SharedNameRegistry,
    control: SessionControl,
    dispatcher: Dispatcher,
    announcer: Announcer,
    resources: ResourceGuard,
    calls_answered: usize,
}

impl Session {
    pub fn new(transport: Arc<dyn ChannelTransport>, options: SessionOptions) -> anyhow::Result<Self> {
        let names = NameRegistry::new().shared();
        let control = SessionControl::new();

        let mut tools = ToolRegistry::new();
        tools.register_all(name_tools(&names, &control))?;

        let dispatcher = Dispatcher::new(Arc::new(tools))
            .with_duplicate_policy(options.duplicate_calls)
            .with_recent_capacity(options.recent_call_capacity)
            .with_call_log_capacity(options.call_log_capacity);

        let announcer = Announcer::new()
            .with_modalities(options.modalities)
            .with_instructions(options.instructions);

        Ok(Self {
            id: Uuid::new_v4(),
            names,
            control,
            dispatcher,
            announcer,
            resources: ResourceGuard::new(transport),
            calls_answered: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn names(&self) -> SharedNameRegistry {
        self.names.clone()
    }

    pub fn control(&self) -> SessionControl {
        self.control.clone()
    }

    pub fn call_log(&self) -> &CallLog {
        self.dispatcher.call_log()
    }

    pub fn is_released(&self) -> bool {
        self.resources.is_released()
    }

    pub async fn announce(&mut self) -> anyhow::Result<bool> {
        self.announcer
            .announce(self.dispatcher.tools(), self.resources.transport())
            .await
    }

    pub async fn handle_message(&mut self, raw: &str) -> anyhow::Result<Dispatch> {
        let outcome = self
            .dispatcher
            .handle_message(raw, self.resources.transport())
            .await?;

        if matches!(outcome, Dispatch::Answered { .. } | Dispatch::Replayed { .. }) {
            self.calls_answered += 1;
        }
        if self.control.is_end_requested() {
            self.end().await;
        }
        Ok(outcome)
    }

    pub async fn end(&mut self) {
        if self.resources.release().await {
            info!(session_id = %self.id, "Session resources released");
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<SessionReport> {
        let span = info_span!("session", session_id = %self.id);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&mut self) -> anyhow::Result<SessionReport> {
        info!("Session started");

        let reason = match self.announce().await {
            Err(e) => {
                error!(error = %e, "Failed to announce capabilities");
                EndReason::TransportFailed
            }
            Ok(_) => self.serve().await,
        };

        self.end().await;

        let report = self.report(reason).await;
        info!(
            reason = ?report.reason,
            total = report.summary.total,
            confirmed = report.summary.confirmed,
            calls = report.calls_answered,
            "Session finished"
        );
        Ok(report)
    }

    async fn serve(&mut self) -> EndReason {
        loop {
            if self.control.is_end_requested() {
                return EndReason::Ended;
            }

            let Some(raw) = self.resources.transport().recv().await else {
                return if self.control.is_end_requested() {
                    EndReason::Ended
                } else {
                    info!("Channel closed by peer");
                    EndReason::ChannelClosed
                };
            };

            if let Err(e) = self.handle_message(&raw).await {
                error!(error = %e, "Failed to answer over channel");
                return EndReason::TransportFailed;
            }
        }
    }

    pub async fn report(&self, reason: EndReason) -> SessionReport {
        SessionReport {
            session_id: self.id.to_string(),
            reason,
            summary: self.names.lock().await.summarize(),
            final_message: self.control.final_message(),
            calls_answered: self.calls_answered,
        }
    }
}
