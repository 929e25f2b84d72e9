use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select};
use namecheck_core::DuplicateCallPolicy;
use namecheck_core::config::Config;

fn print_step(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, total, title))
            .cyan()
            .bold()
    );
    println!();
}

fn setup_api_key() -> Result<String> {
    let api_key: String = Input::new()
        .with_prompt("Enter your OpenAI API key (blank to use OPENAI_API_KEY)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read API key")?;

    Ok(api_key.trim().to_string())
}

fn setup_model() -> Result<String> {
    let models = vec!["gpt-4o-realtime-preview", "gpt-4o-mini-realtime-preview"];

    let selection = Select::new()
        .with_prompt("Select your realtime model")
        .items(&models)
        .default(0)
        .interact()
        .context("Failed to select model")?;

    Ok(models[selection].to_string())
}

fn setup_voice() -> Result<String> {
    let voices = vec!["ash", "alloy", "ballad", "coral", "echo", "sage", "shimmer", "verse"];

    let selection = Select::new()
        .with_prompt("Select the agent's voice")
        .items(&voices)
        .default(0)
        .interact()
        .context("Failed to select voice")?;

    Ok(voices[selection].to_string())
}

fn setup_duplicate_policy() -> Result<DuplicateCallPolicy> {
    let policies = [
        ("reinvoke - run the tool again", DuplicateCallPolicy::Reinvoke),
        ("replay - resend the first answer", DuplicateCallPolicy::Replay),
        ("reject - answer with an error", DuplicateCallPolicy::Reject),
    ];
    let labels: Vec<_> = policies.iter().map(|(label, _)| *label).collect();

    let selection = Select::new()
        .with_prompt("When a call id repeats")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to select duplicate call policy")?;

    Ok(policies[selection].1)
}

pub fn run_onboard() -> Result<Config> {
    println!();
    println!("  {}", style("Welcome to namecheck!").white().bold());
    println!(
        "  {}",
        style("This wizard configures the realtime session in a few steps.").dim()
    );
    println!();

    print_step(1, 4, "API Key Setup");
    let api_key = setup_api_key()?;

    print_step(2, 4, "Model Selection");
    let model = setup_model()?;

    print_step(3, 4, "Voice Selection");
    let voice = setup_voice()?;

    print_step(4, 4, "Repeated Calls");
    let duplicate_calls = setup_duplicate_policy()?;

    let config = Config {
        api_key,
        model,
        voice,
        duplicate_calls,
        ..Default::default()
    };

    println!();
    println!("  {} Configuration complete!", style("✓").green().bold());
    println!(
        "  {} Config saved to {}",
        style("→").green(),
        style(namecheck_core::config::get_config_path().display()).cyan()
    );
    println!();
    println!(
        "  {} You can now run: {}",
        style("→").green(),
        style("namecheck serve").cyan().bold()
    );
    println!();

    Ok(config)
}
