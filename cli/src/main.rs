use anyhow::Result;
use clap::{Parser, Subcommand};
use namecheck_core::{agent, bootstrap, config, session, tools, transport};
mod onboard;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "namecheck")]
#[command(about = "namecheck - voice-confirmed name registry for realtime agents", long_about = None)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive setup of ~/.namecheck/config.toml
    Onboard,
    /// Run one session, exchanging newline-delimited JSON events on stdin/stdout
    Serve,
    /// Print the capability descriptor sent when a channel opens
    Tools,
    /// Fetch a short-lived realtime session credential
    Token,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug,hyper=warn,reqwest=warn,rustls=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or_else(|| {
        if !config::config_exists() {
            Commands::Onboard
        } else {
            Commands::Serve
        }
    });

    match command {
        Commands::Onboard => {
            let onboard_config = onboard::run_onboard().map_err(|e| {
                eprintln!("❌ Onboarding failed: {}", e);
                anyhow::anyhow!("Onboarding failed: {}", e)
            })?;
            config::save_config(&onboard_config)?;
        }
        Commands::Serve => {
            let config = config::Config::load_or_init()?;
            let channel: Arc<dyn namecheck_core::ChannelTransport> = Arc::new(transport::stdio());

            let mut session =
                session::Session::new(channel, session::SessionOptions::from(&config))?;
            let report = session.run().await?;

            eprintln!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Tools => {
            let config = config::Config::load_or_init()?;
            let names = namecheck_core::NameRegistry::new().shared();
            let mut registry = agent::ToolRegistry::new();
            registry.register_all(tools::name_tools(&names, &session::SessionControl::new()))?;

            let announcer = agent::Announcer::new()
                .with_modalities(config.modalities.clone())
                .with_instructions(config.instructions.clone());
            let descriptor = serde_json::to_value(announcer.descriptor(&registry))?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::Token => {
            let config = config::Config::load_or_init()?;
            let client = bootstrap::create_session_client(&config)?;

            match client.create_session().await {
                Ok(credential) => {
                    println!("{}", serde_json::to_string_pretty(&credential)?);
                }
                Err(e) => {
                    eprintln!("❌ Error: {}", e);
                    anyhow::bail!("Could not create realtime session: {}", e);
                }
            }
        }
    }

    Ok(())
}
