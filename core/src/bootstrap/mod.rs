pub mod realtime;

pub use realtime::{RealtimeSessionClient, SessionCredential};

use crate::agent::resolve_instructions;
use crate::config::Config;
use anyhow::{Result, anyhow};

const API_KEY_ENV_VARS: &[&str] = &["OPENAI_API_KEY", "NAMECHECK_OPENAI_API_KEY"];

pub fn create_session_client(config: &Config) -> Result<RealtimeSessionClient> {
    let api_key = resolve_api_key_with_fallback(API_KEY_ENV_VARS, &config.api_key)?;

    let mut client = RealtimeSessionClient::new(api_key)
        .with_model(config.model.clone())
        .with_voice(config.voice.clone())
        .with_instructions(resolve_instructions(config.instructions.as_deref()));
    if let Some(base_url) = &config.base_url {
        client = client.with_base_url(base_url.clone());
    }
    Ok(client)
}

fn resolve_api_key_with_fallback(env_vars: &[&str], config_key: &str) -> Result<String> {
    for var_name in env_vars {
        if let Ok(key) = std::env::var(var_name)
            && !key.trim().is_empty()
        {
            return Ok(key);
        }
    }
    if !config_key.is_empty() {
        Ok(config_key.to_string())
    } else {
        Err(anyhow!(
            "No API key found. Set {} or run 'namecheck onboard'.",
            env_vars.join(" / ")
        ))
    }
}
