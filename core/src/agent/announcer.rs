use crate::agent::ToolRegistry;
use crate::protocol::{ClientEvent, FunctionTool, SessionConfig};
use crate::traits::ChannelTransport;
use tracing::{debug, info};

pub const DEFAULT_MODALITIES: &[&str] = &["text", "audio"];

pub struct Announcer {
    modalities: Vec<String>,
    instructions: Option<String>,
    announced: bool,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer {
    pub fn new() -> Self {
        Self {
            modalities: DEFAULT_MODALITIES.iter().map(|m| m.to_string()).collect(),
            instructions: None,
            announced: false,
        }
    }

    pub fn with_modalities(mut self, modalities: Vec<String>) -> Self {
        self.modalities = modalities;
        self
    }

    pub fn with_instructions(mut self, instructions: Option<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn is_announced(&self) -> bool {
        self.announced
    }

    pub fn descriptor(&self, tools: &ToolRegistry) -> ClientEvent {
        ClientEvent::SessionUpdate {
            session: SessionConfig {
                modalities: self.modalities.clone(),
                instructions: self.instructions.clone(),
                tools: tools.get_specs().into_iter().map(FunctionTool::from).collect(),
            },
        }
    }

    /// Sends the descriptor. Returns `false` without sending if it already went out.
    pub async fn announce(
        &mut self,
        tools: &ToolRegistry,
        transport: &dyn ChannelTransport,
    ) -> anyhow::Result<bool> {
        if self.announced {
            debug!("Capabilities already announced, skipping");
            return Ok(false);
        }

        let event = self.descriptor(tools).to_json()?;
        transport.send(&event).await?;
        self.announced = true;

        info!(
            tools = tools.len(),
            transport = transport.name(),
            "Capabilities announced"
        );
        Ok(true)
    }
}
