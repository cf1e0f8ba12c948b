// main.rs

// Module declarations
mod agent;
mod artifact;
mod config;
mod coordinator;
mod error;
mod generation;
mod logging;
mod mailbox;
mod message;
mod prompt;
mod state;

use crate::config::Config;
use crate::coordinator::Coordinator;
use color_eyre::eyre::Result;
use std::env;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_TOPIC: &str = "Artificial Intelligence in Medicine";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load configuration file, defaults when absent
    let config = Config::load_or_default(Path::new("config.json"))?;
    logging::init(config.debug);

    let mut coordinator = Coordinator::new(&config);

    // Automatic mode for unattended runs: AUTO_RUN=1, topic from BLOG_TOPIC
    if env::var("AUTO_RUN").as_deref() == Ok("1") {
        let topic = env::var("BLOG_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.to_string());
        logging::info(&format!("automatic mode, topic: {}", topic));
        let article = coordinator.run(&topic).await?;
        println!("\n{}", article);
        return Ok(());
    }

    // Interactive mode
    println!("What technology topic would you like to explore?");
    println!();
    println!("Examples:");
    println!("  - Artificial Intelligence in Medicine");
    println!("  - Blockchain and its Applications");
    println!("  - Quantum Computing");
    println!("  - Internet of Things (IoT)");
    println!("  - Modern Cybersecurity");
    println!();

    let mut topic = read_line("Topic: ")?;
    if topic.is_empty() {
        topic = DEFAULT_TOPIC.to_string();
    }

    loop {
        let article = coordinator.run(&topic).await?;
        println!("\n{}", article);

        let again = read_line("\nGenerate another article? (y/n): ")?;
        if !matches!(again.to_lowercase().as_str(), "y" | "yes") {
            println!("Goodbye!");
            break;
        }

        topic = read_line("\nNew topic: ")?;
        if topic.is_empty() {
            topic = DEFAULT_TOPIC.to_string();
        }
    }

    Ok(())
}

/// Prompts on stdout and returns the trimmed line read from stdin.
fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
