use crate::traits::ToolResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;

pub const DEFAULT_CALL_LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    pub timestamp: DateTime<Utc>,
    pub call_id: String,
    pub function: String,
    pub arguments: Value,
    pub result: ToolResult,
}

impl CallRecord {
    pub fn success(&self) -> bool {
        self.result.success
    }
}

#[derive(Debug, Clone)]
pub struct CallLog {
    records: VecDeque<CallRecord>,
    capacity: usize,
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_LOG_CAPACITY)
    }
}

impl CallLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CALL_LOG_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, record: CallRecord) {
        if self.capacity == 0 {
            return;
        }
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    pub fn records(&self) -> impl Iterator<Item = &CallRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&CallRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
