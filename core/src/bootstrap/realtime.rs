use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    voice: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    #[serde(default)]
    id: Option<String>,
    client_secret: ClientSecret,
}

#[derive(Debug, Deserialize)]
struct ClientSecret {
    value: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCredential {
    pub session_id: Option<String>,
    pub value: String,
    pub expires_at: Option<i64>,
    pub model: String,
}

pub struct RealtimeSessionClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
    instructions: String,
    base_url: String,
}

impl RealtimeSessionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            model: "gpt-4o-realtime-preview".to_string(),
            voice: "ash".to_string(),
            instructions: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn sessions_url(&self) -> String {
        format!("{}/realtime/sessions", self.base_url.trim_end_matches('/'))
    }

    pub async fn create_session(&self) -> anyhow::Result<SessionCredential> {
        let request = CreateSessionRequest {
            model: &self.model,
            instructions: &self.instructions,
            voice: &self.voice,
        };

        let response = self
            .client
            .post(self.sessions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to reach realtime sessions endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Realtime session error {}: {}", status, error_text));
        }

        let body = response.text().await?;
        self.parse_credential(&body)
    }

    fn parse_credential(&self, body: &str) -> anyhow::Result<SessionCredential> {
        let parsed: CreateSessionResponse =
            serde_json::from_str(body).context("Unexpected realtime session response")?;

        if parsed.client_secret.value.is_empty() {
            return Err(anyhow!("Realtime session response has an empty client secret"));
        }

        Ok(SessionCredential {
            session_id: parsed.id,
            value: parsed.client_secret.value,
            expires_at: parsed.client_secret.expires_at,
            model: self.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_url_trims_trailing_slash() {
        let client = RealtimeSessionClient::new("sk").with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.sessions_url(), "http://localhost:8080/v1/realtime/sessions");
    }

    #[test]
    fn parses_client_secret() {
        let client = RealtimeSessionClient::new("sk").with_model("gpt-4o-mini-realtime-preview");
        let body = r#"{
            "id": "sess_001",
            "object": "realtime.session",
            "model": "gpt-4o-mini-realtime-preview",
            "voice": "ash",
            "client_secret": {"value": "ek_abc123", "expires_at": 1234567890}
        }"#;

        let credential = client.parse_credential(body).unwrap();
        assert_eq!(credential.session_id.as_deref(), Some("sess_001"));
        assert_eq!(credential.value, "ek_abc123");
        assert_eq!(credential.expires_at, Some(1234567890));
        assert_eq!(credential.model, "gpt-4o-mini-realtime-preview");
    }

    #[test]
    fn rejects_missing_or_empty_secret() {
        let client = RealtimeSessionClient::new("sk");
        assert!(client.parse_credential(r#"{"id":"sess"}"#).is_err());
        assert!(
            client
                .parse_credential(r#"{"client_secret":{"value":""}}"#)
                .is_err()
        );
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(CreateSessionRequest {
            model: "gpt-4o-realtime-preview",
            instructions: "Spell names",
            voice: "ash",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4o-realtime-preview",
                "instructions": "Spell names",
                "voice": "ash"
            })
        );
    }
}
