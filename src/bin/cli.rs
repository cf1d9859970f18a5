//! DevPulse CLI
//!
//! Command-line interface for the DevPulse dashboard:
//! - Team statistics and insights
//! - Per-developer detail, telemetry and recommendations
//! - Image analysis
//! - Server status

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Developer productivity and wellness dashboard")]
#[command(
    long_about = "DevPulse aggregates repository activity and device telemetry\ninto team statistics, insights and coaching recommendations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the team overview
    Team,

    /// Show aggregated team statistics
    Stats,

    /// Show team insights
    Insights,

    /// List all roster members
    Developers,

    /// Show one developer's detail
    Developer {
        /// Roster id, e.g. dev1
        id: String,
    },

    /// Show one developer's telemetry
    Telemetry {
        /// Roster id, e.g. dev1
        id: String,
    },

    /// Show one developer's recommendations
    Recommendations {
        /// Roster id, e.g. dev1
        id: String,
    },

    /// Analyze an image with a prompt
    Analyze {
        /// Image path relative to the server's assets directory
        image_path: String,
        /// Question to ask about the image
        prompt: String,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Team => {
            let data = get_json(&client, &cli.api_url, "/api/v1/team").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!(
                    "{:<8} {:<20} {:<30} {:>6} {:>6} {:>7}",
                    "Id", "Name", "Title", "Prod", "Collab", "Health"
                );
                println!("{}", "-".repeat(82));
                for dev in data["developers"].as_array().into_iter().flatten() {
                    println!(
                        "{:<8} {:<20} {:<30} {:>6.1} {:>6.1} {:>7}",
                        dev["id"].as_str().unwrap_or("-"),
                        dev["name"].as_str().unwrap_or("-"),
                        dev["title"].as_str().unwrap_or("-"),
                        dev["productivity_score"].as_f64().unwrap_or(0.0),
                        dev["collaboration_score"].as_f64().unwrap_or(0.0),
                        dev["health_score"].as_i64().unwrap_or(0)
                    );
                }
            }
        }

        Commands::Stats => {
            let data = get_json(&client, &cli.api_url, "/api/v1/team/stats").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("Team statistics");
                println!();
                println!(
                    "  Developers:       {}",
                    data["total_developers"].as_u64().unwrap_or(0)
                );
                println!(
                    "  Avg productivity: {:.1}",
                    data["average_productivity"].as_f64().unwrap_or(0.0)
                );
                println!(
                    "  Avg collaboration:{:.1}",
                    data["average_collaboration"].as_f64().unwrap_or(0.0)
                );
                println!(
                    "  Avg health:       {}",
                    data["average_health"].as_i64().unwrap_or(0)
                );
                println!(
                    "  Commits:          {}",
                    data["total_commits"].as_u64().unwrap_or(0)
                );
                println!(
                    "  Merged MRs:       {}",
                    data["total_merge_requests"].as_u64().unwrap_or(0)
                );
                println!(
                    "  High performers:  {}",
                    data["high_performers"].as_u64().unwrap_or(0)
                );
                println!(
                    "  Needing support:  {}",
                    data["needs_support"].as_u64().unwrap_or(0)
                );
            }
        }

        Commands::Insights => {
            let data = get_json(&client, &cli.api_url, "/api/v1/team/insights").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let insights = data["insights"].as_array().cloned().unwrap_or_default();
                if insights.is_empty() {
                    println!("No insights for the current statistics.");
                }
                for insight in insights {
                    println!(
                        "[{}] {}",
                        insight["type"].as_str().unwrap_or("info"),
                        insight["message"].as_str().unwrap_or("")
                    );
                }
            }
        }

        Commands::Developers => {
            let data = get_json(&client, &cli.api_url, "/api/v1/developers").await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!(
                    "{:<8} {:<20} {:<10} {:<30} {}",
                    "Id", "Name", "Role", "Title", "Team"
                );
                println!("{}", "-".repeat(90));
                for member in data.as_array().into_iter().flatten() {
                    println!(
                        "{:<8} {:<20} {:<10} {:<30} {}",
                        member["id"].as_str().unwrap_or("-"),
                        member["name"].as_str().unwrap_or("-"),
                        member["role"].as_str().unwrap_or("-"),
                        member["title"].as_str().unwrap_or("-"),
                        member["team"].as_str().unwrap_or("-")
                    );
                }
            }
        }

        Commands::Developer { id } => {
            let data = get_json(&client, &cli.api_url, &format!("/api/v1/developers/{}", id)).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        Commands::Telemetry { id } => {
            let data = get_json(
                &client,
                &cli.api_url,
                &format!("/api/v1/developers/{}/telemetry", id),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        Commands::Recommendations { id } => {
            let data = get_json(
                &client,
                &cli.api_url,
                &format!("/api/v1/developers/{}/recommendations", id),
            )
            .await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                for rec in data["recommendations"].as_array().into_iter().flatten() {
                    println!(
                        "[{}] {}",
                        rec["priority"].as_str().unwrap_or("-"),
                        rec["title"].as_str().unwrap_or("-")
                    );
                    println!("  {}", rec["description"].as_str().unwrap_or(""));
                    println!("  Action: {}", rec["action"].as_str().unwrap_or(""));
                }
            }
        }

        Commands::Analyze { image_path, prompt } => {
            let body = serde_json::json!({
                "image_path": image_path,
                "prompt": prompt,
            });

            let response = client
                .post(format!("{}/api/analyze_image", cli.api_url))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let data: serde_json::Value = response.json().await?;

            if status.is_success() {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                eprintln!(
                    "Analysis failed ({}): {}",
                    status,
                    data["error"].as_str().unwrap_or("unknown error")
                );
                std::process::exit(1);
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("DevPulse v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Provider:   {}",
                        health["provider"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Vision:     {}",
                        health["vision"].as_str().unwrap_or("unknown")
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to DevPulse API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the DevPulse API server is running:");
                    eprintln!("  cargo run --bin devpulse-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let contents = devpulse::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, contents)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", contents),
            }
        }
    }

    Ok(())
}

async fn get_json(
    client: &reqwest::Client,
    api_url: &str,
    path: &str,
) -> Result<serde_json::Value> {
    let response = client.get(format!("{}{}", api_url, path)).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        eprintln!("Request failed ({}): {}", status, text);
        std::process::exit(1);
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
