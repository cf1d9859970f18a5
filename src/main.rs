//! DevPulse Demo
//!
//! Assembles the built-in team with sample metrics and prints the
//! team's statistics, insights and per-developer recommendations.

use anyhow::Result;
use devpulse::gitlab::SampleMetricsProvider;
use devpulse::recommendations::recommend;
use devpulse::roster::Roster;
use devpulse::scoring::{health_score, team_insights, team_stats};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "devpulse=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("DevPulse v{}", env!("CARGO_PKG_VERSION"));

    let roster = Roster::builtin();
    let provider = SampleMetricsProvider;

    let records = roster.team_records(&provider).await;
    tracing::info!("Assembled records for {} developers", records.len());

    // Team statistics
    let stats = team_stats(&records)?;
    tracing::info!(
        "Team: {} developers, avg productivity {:.1}, avg collaboration {:.1}, avg health {}",
        stats.total_developers,
        stats.average_productivity,
        stats.average_collaboration,
        stats.average_health
    );
    tracing::info!(
        "Totals: {} commits, {} merged MRs; {} high performer(s), {} needing support",
        stats.total_commits,
        stats.total_merge_requests,
        stats.high_performers,
        stats.needs_support
    );

    // Insights
    for insight in team_insights(&stats) {
        tracing::info!("Insight [{:?}]: {}", insight.kind, insight.message);
    }

    // Per-developer detail
    for (id, record) in &records {
        let score = health_score(&record.telemetry.health_data);
        tracing::info!(
            "{} ({}): productivity {:.1}, health score {}",
            record.user_info.name,
            id,
            record.gitlab.productivity_score,
            score
        );

        for rec in recommend(&record.gitlab) {
            tracing::info!("  -> [{:?}] {}: {}", rec.priority, rec.title, rec.action);
        }
    }

    Ok(())
}
