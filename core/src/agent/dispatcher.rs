use crate::agent::ToolRegistry;
use crate::agent::log::{CallLog, CallRecord};
use crate::protocol::{ClientEvent, FunctionCallArgumentsDone, InboundMessage, parse_inbound};
use crate::traits::{ChannelTransport, ToolError, ToolResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub const DEFAULT_RECENT_CALL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCallPolicy {
    #[default]
    Reinvoke,
    Replay,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Call event has no function name")]
    MissingFunctionName,
    #[error("Malformed arguments for '{function}': {reason}")]
    MalformedArguments { function: String, reason: String },
    #[error("Duplicate call id '{0}'")]
    DuplicateCall(String),
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
    #[error("Call event has no call_id")]
    MissingCallId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Answered {
        call_id: String,
        function: String,
        result: ToolResult,
    },
    Replayed { call_id: String },
    Ignored(String),
    Dropped(DispatchError),
}

#[derive(Debug)]
struct RecentCalls {
    entries: VecDeque<(String, String)>,
    capacity: usize,
}

impl RecentCalls {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    fn get(&self, call_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == call_id)
            .map(|(_, output)| output.as_str())
    }

    fn record(&mut self, call_id: &str, output: &str) {
        if self.capacity == 0 {
            return;
        }
        if let Some(slot) = self.entries.iter_mut().find(|(id, _)| id == call_id) {
            slot.1 = output.to_string();
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((call_id.to_string(), output.to_string()));
    }
}

pub struct Dispatcher {
    tools: Arc<ToolRegistry>,
    policy: DuplicateCallPolicy,
    recent: RecentCalls,
    log: CallLog,
}

impl Dispatcher {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            tools,
            policy: DuplicateCallPolicy::default(),
            recent: RecentCalls::new(DEFAULT_RECENT_CALL_CAPACITY),
            log: CallLog::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateCallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.recent = RecentCalls::new(capacity);
        self
    }

    pub fn with_call_log_capacity(mut self, capacity: usize) -> Self {
        self.log = CallLog::new(capacity);
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn call_log(&self) -> &CallLog {
        &self.log
    }

    /// Handles one raw channel message to completion.
    ///
    /// Only transport failures are returned as errors; every protocol problem
    /// becomes either a failure result or a logged drop.
    pub async fn handle_message(
        &mut self,
        raw: &str,
        transport: &dyn ChannelTransport,
    ) -> anyhow::Result<Dispatch> {
        let call = match parse_inbound(raw) {
            Ok(InboundMessage::FunctionCall(call)) => call,
            Ok(InboundMessage::Other(event_type)) => {
                trace!(event_type = %event_type, "Ignoring event");
                return Ok(Dispatch::Ignored(event_type));
            }
            Err(e) => {
                let err = DispatchError::InvalidMessage(e.to_string());
                warn!(error = %err, "Dropping inbound message");
                return Ok(Dispatch::Dropped(err));
            }
        };

        let Some(call_id) = call.call_id.clone() else {
            let err = DispatchError::MissingCallId;
            warn!(function = ?call.name, error = %err, "Dropping unroutable call");
            return Ok(Dispatch::Dropped(err));
        };

        let function = call.name.clone().unwrap_or_default();

        if let Some(cached) = self.recent.get(&call_id).map(str::to_string) {
            match self.policy {
                DuplicateCallPolicy::Reinvoke => {
                    warn!(call_id = %call_id, function = %function, "Re-invoking repeated call id");
                }
                DuplicateCallPolicy::Replay => {
                    info!(call_id = %call_id, function = %function, "Replaying cached output");
                    self.answer(transport, &call_id, &cached).await?;
                    return Ok(Dispatch::Replayed { call_id });
                }
                DuplicateCallPolicy::Reject => {
                    let result =
                        ToolResult::error(DispatchError::DuplicateCall(call_id.clone()).to_string());
                    warn!(call_id = %call_id, function = %function, "Rejecting repeated call id");
                    self.answer(transport, &call_id, &result.to_output()).await?;
                    return Ok(Dispatch::Answered {
                        call_id,
                        function,
                        result,
                    });
                }
            }
        }

        let (arguments, result) = self.invoke(&call).await;

        let output = result.to_output();
        self.recent.record(&call_id, &output);
        self.log.push(CallRecord {
            timestamp: Utc::now(),
            call_id: call_id.clone(),
            function: function.clone(),
            arguments,
            result: result.clone(),
        });

        info!(
            call_id = %call_id,
            function = %function,
            success = result.success,
            output = %output,
            "Tool call answered"
        );

        self.answer(transport, &call_id, &output).await?;

        Ok(Dispatch::Answered {
            call_id,
            function,
            result,
        })
    }

    async fn invoke(&self, call: &FunctionCallArgumentsDone) -> (Value, ToolResult) {
        let Some(name) = call.name.as_deref() else {
            return (Value::Null, failure(DispatchError::MissingFunctionName));
        };

        let Some(tool) = self.tools.get(name) else {
            warn!(function = %name, "No tool registered for call");
            return (Value::Null, failure(DispatchError::UnknownFunction(name.into())));
        };

        let args = match parse_arguments(call.arguments.as_ref()) {
            Ok(args) => args,
            Err(reason) => {
                let raw = call.arguments.clone().unwrap_or(Value::Null);
                return (
                    raw,
                    failure(DispatchError::MalformedArguments {
                        function: name.into(),
                        reason,
                    }),
                );
            }
        };

        debug!(function = %name, arguments = %args, "Calling local function");

        let result = match tool.execute(args.clone()).await {
            Ok(result) => result,
            Err(ToolError::InvalidArguments(reason)) => failure(DispatchError::MalformedArguments {
                function: name.into(),
                reason,
            }),
            Err(ToolError::Failed(e)) => ToolResult::error(format!("Execution failed: {}", e)),
        };

        (args, result)
    }

    async fn answer(
        &self,
        transport: &dyn ChannelTransport,
        call_id: &str,
        output: &str,
    ) -> anyhow::Result<()> {
        let item = ClientEvent::function_call_output(call_id, output).to_json()?;
        transport.send(&item).await?;
        transport.send(&ClientEvent::ResponseCreate.to_json()?).await?;
        Ok(())
    }
}

fn failure(err: DispatchError) -> ToolResult {
    ToolResult::error(err.to_string())
}

fn parse_arguments(raw: Option<&Value>) -> Result<Value, String> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(Value::Object(Map::new())),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Value::Object(Map::new())),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).map_err(|e| e.to_string())?,
        Some(other) => other.clone(),
    };

    if value.is_object() {
        Ok(value)
    } else {
        Err("arguments must be a JSON object".to_string())
    }
}
