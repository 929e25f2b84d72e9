use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity key for a name: case-folded, nothing else.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    key: String,
    display_name: String,
    confirmed: bool,
    last_updated: DateTime<Utc>,
}

impl NameEntry {
    pub(crate) fn new(display_name: &str) -> Self {
        Self {
            key: normalize(display_name),
            display_name: display_name.to_string(),
            confirmed: false,
            last_updated: Utc::now(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub(crate) fn rename(&mut self, new_name: &str) {
        self.key = normalize(new_name);
        self.display_name = new_name.to_string();
        self.touch();
    }

    pub(crate) fn confirm(&mut self) {
        self.confirmed = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    pub fn snapshot(&self) -> NameSnapshot {
        NameSnapshot {
            name: self.key.clone(),
            display_name: self.display_name.clone(),
            confirmed: self.confirmed,
            last_updated: self.last_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSnapshot {
    pub name: String,
    pub display_name: String,
    pub confirmed: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub confirmed: usize,
    pub unconfirmed: usize,
}
